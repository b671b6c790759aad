//! Implementations of the CLI commands.
//!
//! Each function takes the parsed arguments of its subcommand, does the work
//! and prints the result to stdout. Diagnostics go through `tracing`.

pub mod auth;
pub mod config;
pub mod element_groups;
pub mod hubs;
pub mod projects;
