//! Dispatch of parsed command line arguments to their actions.

use crate::{
    actions::{auth, config, element_groups, hubs, projects},
    commands::params::{
        COMMAND_AUTH, COMMAND_CLEAR, COMMAND_CONFIG, COMMAND_ELEMENT_GROUP, COMMAND_EXPORT,
        COMMAND_GET, COMMAND_HUB, COMMAND_LIST, COMMAND_LOGIN, COMMAND_LOGOUT, COMMAND_PATH,
        COMMAND_PROJECT, COMMAND_ROOT, COMMAND_TREE, COMMAND_USE,
    },
    error::CliError,
};
use clap::ArgMatches;
use tracing::trace;

fn extract_subcommand_name(sub_matches: &ArgMatches) -> String {
    sub_matches
        .subcommand_name()
        .unwrap_or("unknown")
        .to_string()
}

fn unsupported(sub_matches: &ArgMatches) -> CliError {
    CliError::UnsupportedSubcommand(extract_subcommand_name(sub_matches))
}

/// Execute the command selected by `matches`.
pub async fn execute_command(matches: &ArgMatches) -> Result<(), CliError> {
    trace!("Dispatching command...");

    match matches.subcommand() {
        Some((COMMAND_AUTH, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_LOGIN, sub_matches)) => auth::login(sub_matches).await,
            Some((COMMAND_LOGOUT, _)) => auth::logout().await,
            Some((COMMAND_GET, sub_matches)) => auth::print_access_token(sub_matches).await,
            _ => Err(unsupported(sub_matches)),
        },
        Some((COMMAND_HUB, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_LIST, sub_matches)) => hubs::list_hubs(sub_matches).await,
            Some((COMMAND_USE, sub_matches)) => hubs::use_hub(sub_matches).await,
            Some((COMMAND_CLEAR, _)) => hubs::clear_active_hub().await,
            _ => Err(unsupported(sub_matches)),
        },
        Some((COMMAND_PROJECT, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_LIST, sub_matches)) => projects::list_projects(sub_matches).await,
            _ => Err(unsupported(sub_matches)),
        },
        Some((COMMAND_ELEMENT_GROUP, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_ROOT, sub_matches)) => {
                element_groups::print_root_element_group(sub_matches).await
            }
            Some((COMMAND_TREE, sub_matches)) => {
                element_groups::print_element_group_tree(sub_matches).await
            }
            _ => Err(unsupported(sub_matches)),
        },
        Some((COMMAND_CONFIG, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_GET, sub_matches)) => match sub_matches.subcommand() {
                Some((COMMAND_PATH, _)) => config::print_configuration_path(),
                None => config::print_configuration(sub_matches),
                _ => Err(unsupported(sub_matches)),
            },
            Some((COMMAND_EXPORT, sub_matches)) => config::export_configuration(sub_matches),
            _ => Err(unsupported(sub_matches)),
        },
        _ => Err(unsupported(matches)),
    }
}
