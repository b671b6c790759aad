//! Error reporting utilities for the egtree application.
//!
//! Technical errors from the HTTP and OAuth layers are mapped to messages a
//! user can act upon before they are printed.

use crate::{aps::ApiError, auth::AuthError, error::CliError};
use reqwest::StatusCode;

const AUTHENTICATION_FAILED: &str = "Authentication failed. Please check your client credentials and try logging in again with 'egtree auth login'.";
const ACCESS_FORBIDDEN: &str =
    "Access forbidden. The application is not provisioned for this hub or project.";
const RESOURCE_NOT_FOUND: &str =
    "Resource not found. Please check the hub, project or element group ID and try again.";
const REQUEST_TIMEOUT: &str =
    "Request timeout. The server took too long to respond. Please try again.";
const NETWORK_ERROR: &str = "Network error. Please check your internet connection and try again.";

/// Create a user-friendly error message from a command error
///
/// Only HTTP and OAuth failures are reworded, based on their status code or
/// transport failure. Every other error keeps its own message.
pub fn create_user_friendly_error(error: &CliError) -> String {
    match error {
        CliError::ApiError(ApiError::HttpError(e)) | CliError::AuthError(AuthError::HttpError(e)) => {
            transport_message(e).unwrap_or_else(|| error.to_string())
        }
        CliError::ApiError(ApiError::UnexpectedStatus(status)) => {
            status_message(*status).map_or_else(|| error.to_string(), str::to_string)
        }
        CliError::AuthError(AuthError::AuthFailed { status, message }) => {
            match status_message(*status) {
                Some(friendly) => format!("{} ({})", friendly, message),
                None => error.to_string(),
            }
        }
        _ => error.to_string(),
    }
}

fn status_message(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::UNAUTHORIZED => Some(AUTHENTICATION_FAILED),
        StatusCode::FORBIDDEN => Some(ACCESS_FORBIDDEN),
        StatusCode::NOT_FOUND => Some(RESOURCE_NOT_FOUND),
        _ => None,
    }
}

fn transport_message(error: &reqwest::Error) -> Option<String> {
    if let Some(friendly) = error.status().and_then(status_message) {
        Some(friendly.to_string())
    } else if error.is_timeout() {
        Some(REQUEST_TIMEOUT.to_string())
    } else if error.is_connect() {
        Some(NETWORK_ERROR.to_string())
    } else {
        None
    }
}
