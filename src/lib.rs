//! The egtree client library.
//!
//! Browses the element group hierarchy of Autodesk Platform Services (APS)
//! projects.
//!
//! # Modules
//!
//! - `hierarchy`: Depth-first traversal of element group hierarchies
//! - `aps`: APS API client (hubs, projects, element groups)
//! - `auth`: OAuth2 client credentials authentication
//! - `commands`: CLI command definitions
//! - `actions`: CLI command implementations
//! - `configuration`: Configuration management
//! - `format`: Data formatting for the supported output formats
//! - `model`: Data models for APS resources and element group trees

pub mod actions;
pub mod aps;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod configuration;
pub mod context;
pub mod dev_keyring;
pub mod error;
pub mod error_utils;
pub mod exit_codes;
pub mod format;
pub mod hierarchy;
pub mod http_utils;
pub mod keyring;
pub mod model;
pub mod param_utils;
