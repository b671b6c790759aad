//! Configuration command definitions.

use crate::commands::params::{
    format_parameter, format_pretty_parameter, output_file_parameter, COMMAND_CONFIG,
    COMMAND_EXPORT, COMMAND_GET, COMMAND_PATH,
};
use crate::format::{CSV, JSON, TEXT};
use clap::Command;

/// Create the config command with all its subcommands.
pub fn config_command() -> Command {
    Command::new(COMMAND_CONFIG)
        .about("Configuration management")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_GET)
                .about("Get configuration details")
                .arg(format_parameter().value_parser([TEXT, JSON, CSV]))
                .arg(format_pretty_parameter())
                .subcommand(Command::new(COMMAND_PATH).about("Show configuration file path")),
        )
        .subcommand(
            Command::new(COMMAND_EXPORT)
                .about("Export configuration to file")
                .arg(output_file_parameter()),
        )
}
