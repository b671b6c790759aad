//! CLI command definitions and argument parsing.
//!
//! Every command group is defined in its own module with the clap builder
//! API; this module assembles them into the `egtree` command.

use clap::{Arg, ArgAction, ArgMatches, Command};

pub mod auth;
pub mod config;
pub mod element_group;
pub mod hub;
pub mod params;
pub mod project;

use params::PARAMETER_VERBOSE;

/// Build the complete command line interface.
pub fn create_cli_command() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(PARAMETER_VERBOSE)
                .short('v')
                .long(PARAMETER_VERBOSE)
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Enable verbose output for debugging"),
        )
        .subcommand(auth::auth_command())
        .subcommand(hub::hub_command())
        .subcommand(project::project_command())
        .subcommand(element_group::element_group_command())
        .subcommand(config::config_command())
}

/// Parse the process arguments.
///
/// Exits the process with a usage message when the arguments are invalid.
pub fn create_cli_commands() -> ArgMatches {
    create_cli_command().get_matches()
}
