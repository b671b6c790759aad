//! Execution context for the egtree client.
//!
//! Most commands need the same resources: the configuration, client
//! credentials, an access token and an API client carrying that token. This
//! module resolves them in one place.

use crate::{
    aps::ApsApiClient,
    auth::AuthClient,
    commands::params::{PARAMETER_CLIENT_ID, PARAMETER_CLIENT_SECRET},
    configuration::Configuration,
    error::CliError,
    keyring::{Keyring, KEY_CLIENT_ID, KEY_CLIENT_SECRET},
};
use clap::ArgMatches;
use tracing::{debug, trace};

/// OAuth client credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    /// Resolve credentials from the command line (or its environment
    /// variables) first and fall back to the keyring for anything missing.
    pub fn resolve(sub_matches: &ArgMatches) -> Result<Self, CliError> {
        let mut keyring = Keyring::default();
        Self::resolve_with(sub_matches, |key| Ok(keyring.get(key)?))
    }

    fn resolve_with<F>(sub_matches: &ArgMatches, mut lookup: F) -> Result<Self, CliError>
    where
        F: FnMut(&str) -> Result<Option<String>, CliError>,
    {
        let from_args = |name: &str| {
            sub_matches
                .try_get_one::<String>(name)
                .ok()
                .flatten()
                .filter(|value| !value.is_empty())
                .cloned()
        };

        let client_id = match from_args(PARAMETER_CLIENT_ID) {
            Some(value) => Some(value),
            None => lookup(KEY_CLIENT_ID)?,
        };
        let client_secret = match from_args(PARAMETER_CLIENT_SECRET) {
            Some(value) => Some(value),
            None => lookup(KEY_CLIENT_SECRET)?,
        };

        match (client_id, client_secret) {
            (Some(client_id), Some(client_secret)) => Ok(Self {
                client_id,
                client_secret,
            }),
            _ => Err(CliError::MissingCredentials),
        }
    }
}

/// Execution context containing common resources needed by CLI commands.
pub struct ExecutionContext {
    configuration: Configuration,
    api: ApsApiClient,
}

impl ExecutionContext {
    /// Load the configuration, resolve credentials, obtain an access token
    /// and build an authenticated API client.
    pub async fn from_args(sub_matches: &ArgMatches) -> Result<Self, CliError> {
        let configuration = Configuration::load_or_create_default()?;
        let credentials = ClientCredentials::resolve(sub_matches)?;

        trace!("Requesting an access token...");
        let token = AuthClient::new(
            credentials.client_id,
            credentials.client_secret,
            &configuration,
        )
        .get_access_token()
        .await?;
        debug!("Access token retrieved successfully");

        let api = ApsApiClient::from_configuration(&configuration)?.with_access_token(token);

        Ok(ExecutionContext { configuration, api })
    }

    pub fn api(&self) -> &ApsApiClient {
        &self.api
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }
}
