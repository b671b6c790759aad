//! Shared command parameters for all CLI commands.
//!
//! Parameter names and argument builders used by more than one command live
//! here so that every command spells them the same way.

use crate::format::OutputFormat;
use clap::{Arg, ArgAction};
use std::path::PathBuf;

// Common operations
pub const COMMAND_GET: &str = "get";
pub const COMMAND_LIST: &str = "list";
pub const COMMAND_USE: &str = "use";
pub const COMMAND_CLEAR: &str = "clear";

// Auth commands
pub const COMMAND_AUTH: &str = "auth";
pub const COMMAND_LOGIN: &str = "login";
pub const COMMAND_LOGOUT: &str = "logout";

// Hub and project commands
pub const COMMAND_HUB: &str = "hub";
pub const COMMAND_PROJECT: &str = "project";

// Element group commands
pub const COMMAND_ELEMENT_GROUP: &str = "element-group";
pub const COMMAND_ROOT: &str = "root";
pub const COMMAND_TREE: &str = "tree";

// Config commands
pub const COMMAND_CONFIG: &str = "config";
pub const COMMAND_EXPORT: &str = "export";
pub const COMMAND_PATH: &str = "path";

// Parameter names
pub const PARAMETER_VERBOSE: &str = "verbose";
pub const PARAMETER_FORMAT: &str = "format";
pub const PARAMETER_PRETTY: &str = "pretty";
pub const PARAMETER_HEADERS: &str = "headers";
pub const PARAMETER_OUTPUT: &str = "output";
pub const PARAMETER_CLIENT_ID: &str = "client-id";
pub const PARAMETER_CLIENT_SECRET: &str = "client-secret";
pub const PARAMETER_HUB_ID: &str = "hub-id";
pub const PARAMETER_PROJECT_ID: &str = "project-id";
pub const PARAMETER_GROUP_ID: &str = "group-id";
pub const PARAMETER_START_LEVEL: &str = "start-level";
pub const PARAMETER_ALL_PROJECTS: &str = "all-projects";

// Environment variables
pub const ENV_CLIENT_ID: &str = "EGTREE_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "EGTREE_CLIENT_SECRET";
pub const ENV_FORMAT: &str = "EGTREE_FORMAT";
pub const ENV_HEADERS: &str = "EGTREE_HEADERS";

/// Create the format parameter.
///
/// Commands narrow the accepted values with `value_parser` when some formats
/// make no sense for their output.
pub fn format_parameter() -> Arg {
    Arg::new(PARAMETER_FORMAT)
        .short('f')
        .long(PARAMETER_FORMAT)
        .num_args(1)
        .required(false)
        .env(ENV_FORMAT)
        .default_value(crate::format::TEXT)
        .help("Output data format")
        .value_parser(OutputFormat::names())
}

pub fn format_pretty_parameter() -> Arg {
    Arg::new(PARAMETER_PRETTY)
        .long(PARAMETER_PRETTY)
        .action(ArgAction::SetTrue)
        .required(false)
        .help("Format the output pretty")
}

pub fn format_with_headers_parameter() -> Arg {
    Arg::new(PARAMETER_HEADERS)
        .long(PARAMETER_HEADERS)
        .action(ArgAction::SetTrue)
        .required(false)
        .env(ENV_HEADERS)
        .help("Format the output with headers")
}

/// Create the output file parameter.
pub fn output_file_parameter() -> Arg {
    Arg::new(PARAMETER_OUTPUT)
        .short('o')
        .long(PARAMETER_OUTPUT)
        .num_args(1)
        .required(true)
        .help("Output file path")
        .value_parser(clap::value_parser!(PathBuf))
}

/// Create the client ID parameter.
pub fn client_id_parameter() -> Arg {
    Arg::new(PARAMETER_CLIENT_ID)
        .long(PARAMETER_CLIENT_ID)
        .num_args(1)
        .required(false)
        .env(ENV_CLIENT_ID)
        .hide_env_values(true)
        .help("APS application client ID")
}

/// Create the client secret parameter.
pub fn client_secret_parameter() -> Arg {
    Arg::new(PARAMETER_CLIENT_SECRET)
        .long(PARAMETER_CLIENT_SECRET)
        .num_args(1)
        .required(false)
        .env(ENV_CLIENT_SECRET)
        .hide_env_values(true)
        .help("APS application client secret")
}

pub fn hub_id_parameter() -> Arg {
    Arg::new(PARAMETER_HUB_ID)
        .long(PARAMETER_HUB_ID)
        .num_args(1)
        .required(false)
        .help("Hub ID (defaults to the active hub, then to the first available hub)")
}

pub fn project_id_parameter() -> Arg {
    Arg::new(PARAMETER_PROJECT_ID)
        .short('p')
        .long(PARAMETER_PROJECT_ID)
        .num_args(1)
        .required(false)
        .help("Project ID")
}

pub fn group_id_parameter() -> Arg {
    Arg::new(PARAMETER_GROUP_ID)
        .short('g')
        .long(PARAMETER_GROUP_ID)
        .num_args(1)
        .required(false)
        .help("Element group ID to start from instead of the project's root element group")
}

pub fn start_level_parameter() -> Arg {
    Arg::new(PARAMETER_START_LEVEL)
        .long(PARAMETER_START_LEVEL)
        .num_args(1)
        .required(false)
        .default_value("0")
        .help("Depth assigned to the starting element group")
        .value_parser(clap::value_parser!(usize))
}

pub fn all_projects_parameter() -> Arg {
    Arg::new(PARAMETER_ALL_PROJECTS)
        .long(PARAMETER_ALL_PROJECTS)
        .action(ArgAction::SetTrue)
        .required(false)
        .conflicts_with_all([PARAMETER_PROJECT_ID, PARAMETER_GROUP_ID])
        .help("Walk every project of the hub, one after another")
}
