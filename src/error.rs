use thiserror::Error;

use crate::{
    aps::ApiError, auth::AuthError, configuration::ConfigurationError,
    exit_codes::EgtreeExitCode, format::FormattingError, keyring::KeyringError,
};

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// Error when an unsupported or undefined subcommand is encountered
    #[error("Undefined or unsupported subcommand: {0}")]
    UnsupportedSubcommand(String),
    /// Error related to configuration loading or management
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigurationError),
    /// Error related to data formatting
    #[error("Formatting error: {0}")]
    FormattingError(#[from] FormattingError),
    /// Error when a required command-line argument is missing
    #[error("Missing required argument: {0}")]
    MissingRequiredArgument(String),
    /// Neither the arguments nor the keyring provide client credentials
    #[error("Missing client credentials. Run 'egtree auth login --client-id <ID> --client-secret <SECRET>' or set EGTREE_CLIENT_ID and EGTREE_CLIENT_SECRET")]
    MissingCredentials,
    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),
    #[error("Credential storage error: {0}")]
    KeyringError(#[from] KeyringError),
    #[error("API error: {0}")]
    ApiError(#[from] ApiError),
    #[error("No hubs found")]
    NoHubs,
    #[error("Hub '{0}' not found")]
    HubNotFound(String),
    #[error("No projects found in hub {0}")]
    NoProjects(String),
    #[error("No selection was made")]
    SelectionCancelled,
}

impl CliError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> EgtreeExitCode {
        match self {
            CliError::UnsupportedSubcommand(_) => EgtreeExitCode::SoftwareError,
            CliError::MissingRequiredArgument(_) => EgtreeExitCode::UsageError,
            CliError::HubNotFound(_) => EgtreeExitCode::UsageError,
            CliError::SelectionCancelled => EgtreeExitCode::UsageError,
            CliError::ConfigurationError(_) => EgtreeExitCode::ConfigError,
            CliError::FormattingError(_) => EgtreeExitCode::DataError,
            CliError::MissingCredentials => EgtreeExitCode::AuthError,
            CliError::AuthError(_) => EgtreeExitCode::AuthError,
            CliError::KeyringError(_) => EgtreeExitCode::AuthError,
            CliError::ApiError(_) => EgtreeExitCode::ApiError,
            CliError::NoHubs | CliError::NoProjects(_) => EgtreeExitCode::Unavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::MissingCredentials.exit_code(), EgtreeExitCode::AuthError);
        assert_eq!(CliError::NoHubs.exit_code().code(), 69);
        assert_eq!(
            CliError::MissingRequiredArgument("project-id".to_string()).exit_code(),
            EgtreeExitCode::UsageError
        );
        assert_eq!(
            CliError::ApiError(ApiError::UnexpectedStatus(reqwest::StatusCode::BAD_GATEWAY)).exit_code(),
            EgtreeExitCode::ApiError
        );
    }
}
