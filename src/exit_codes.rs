//! Custom exit codes for the egtree application
//!
//! This module defines specific exit codes for different error conditions
//! to make scripting and automation easier.

/// Custom exit codes for egtree
///
/// These codes follow the BSD sysexits.h conventions where possible:
/// - 0: Success
/// - 64-78: Standard exit codes from sysexits.h
/// - 100+: Custom application-specific codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EgtreeExitCode {
    /// Success (0) - Command completed successfully
    Success = exitcode::OK as isize,

    /// Command line usage error (64) - User input error
    UsageError = exitcode::USAGE as isize,

    /// Data format error (65) - Input data was incorrect
    DataError = exitcode::DATAERR as isize,

    /// Service unavailable (69) - Nothing to work with on the remote side
    Unavailable = exitcode::UNAVAILABLE as isize,

    /// Internal software error (70) - Unexpected application error
    SoftwareError = exitcode::SOFTWARE as isize,

    /// Configuration error (78) - Application configuration issue
    ConfigError = exitcode::CONFIG as isize,

    /// Authentication error (100) - Login or token issues
    AuthError = 100,

    /// API error (102) - Remote API returned an error
    ApiError = 102,
}

impl EgtreeExitCode {
    /// Convert to numeric exit code
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Get descriptive message for the exit code
    pub fn message(&self) -> &'static str {
        match self {
            EgtreeExitCode::Success => "Success",
            EgtreeExitCode::UsageError => "Command line usage error",
            EgtreeExitCode::DataError => "Data format error",
            EgtreeExitCode::Unavailable => "Service unavailable",
            EgtreeExitCode::SoftwareError => "Internal software error",
            EgtreeExitCode::ConfigError => "Configuration error",
            EgtreeExitCode::AuthError => "Authentication error",
            EgtreeExitCode::ApiError => "Remote API error",
        }
    }
}

impl From<EgtreeExitCode> for i32 {
    fn from(code: EgtreeExitCode) -> Self {
        code.code()
    }
}
