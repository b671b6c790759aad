//! Project command definitions.

use crate::commands::params::{
    client_id_parameter, client_secret_parameter, format_parameter, format_pretty_parameter,
    format_with_headers_parameter, hub_id_parameter, COMMAND_LIST, COMMAND_PROJECT,
};
use crate::format::{CSV, JSON, TEXT};
use clap::Command;

pub fn project_command() -> Command {
    Command::new(COMMAND_PROJECT)
        .about("Browse projects")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List the projects of a hub")
                .visible_alias("ls")
                .arg(client_id_parameter())
                .arg(client_secret_parameter())
                .arg(hub_id_parameter())
                .arg(format_parameter().value_parser([TEXT, JSON, CSV]))
                .arg(format_pretty_parameter())
                .arg(format_with_headers_parameter()),
        )
}
