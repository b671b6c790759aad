//! Hub command definitions.

use crate::commands::params::{
    client_id_parameter, client_secret_parameter, format_parameter, format_pretty_parameter,
    format_with_headers_parameter, hub_id_parameter, COMMAND_CLEAR, COMMAND_HUB, COMMAND_LIST,
    COMMAND_USE,
};
use crate::format::{CSV, JSON, TEXT};
use clap::Command;

/// Create the hub command with all its subcommands.
pub fn hub_command() -> Command {
    Command::new(COMMAND_HUB)
        .about("Manage hubs")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List all hubs")
                .visible_alias("ls")
                .arg(client_id_parameter())
                .arg(client_secret_parameter())
                .arg(format_parameter().value_parser([TEXT, JSON, CSV]))
                .arg(format_pretty_parameter())
                .arg(format_with_headers_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_USE)
                .about("Set the active hub (interactive selection when no ID is given)")
                .arg(client_id_parameter())
                .arg(client_secret_parameter())
                .arg(hub_id_parameter().help("Hub ID to make active")),
        )
        .subcommand(Command::new(COMMAND_CLEAR).about("Clear the active hub"))
}
