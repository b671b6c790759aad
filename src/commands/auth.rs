//! Authentication command definitions.

use crate::commands::params::{
    client_id_parameter, client_secret_parameter, format_parameter, format_pretty_parameter,
    format_with_headers_parameter, COMMAND_AUTH, COMMAND_GET, COMMAND_LOGIN, COMMAND_LOGOUT,
};
use crate::format::{CSV, JSON, TEXT};
use clap::Command;

/// Create the authentication command with all its subcommands.
pub fn auth_command() -> Command {
    Command::new(COMMAND_AUTH)
        .about("Authentication operations")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_LOGIN)
                .about("Verify and store client credentials")
                .arg(client_id_parameter().required(true))
                .arg(client_secret_parameter().required(true)),
        )
        .subcommand(Command::new(COMMAND_LOGOUT).about("Delete the stored client credentials"))
        .subcommand(
            Command::new(COMMAND_GET)
                .about("Get a fresh access token")
                .arg(client_id_parameter())
                .arg(client_secret_parameter())
                .arg(format_parameter().value_parser([TEXT, JSON, CSV]))
                .arg(format_pretty_parameter())
                .arg(format_with_headers_parameter()),
        )
}
