use crate::{
    auth::AuthClient,
    configuration::Configuration,
    context::ClientCredentials,
    error::CliError,
    format::Formattable,
    keyring::{Keyring, KEY_CLIENT_ID, KEY_CLIENT_SECRET},
    param_utils::get_format_parameter_value,
};
use clap::ArgMatches;
use tracing::{debug, trace};

/// Verify the credentials against the authentication service and store them.
pub async fn login(sub_matches: &ArgMatches) -> Result<(), CliError> {
    trace!("Executing 'auth login' command");

    let configuration = Configuration::load_or_create_default()?;
    let credentials = ClientCredentials::resolve(sub_matches)?;

    AuthClient::new(
        credentials.client_id.clone(),
        credentials.client_secret.clone(),
        &configuration,
    )
    .get_access_token()
    .await?;
    debug!("Credentials verified");

    let mut keyring = Keyring::default();
    keyring.put(KEY_CLIENT_ID, &credentials.client_id)?;
    keyring.put(KEY_CLIENT_SECRET, &credentials.client_secret)?;

    println!("Login successful");
    Ok(())
}

pub async fn logout() -> Result<(), CliError> {
    trace!("Executing 'auth logout' command");

    let mut keyring = Keyring::default();
    keyring.delete(KEY_CLIENT_ID)?;
    keyring.delete(KEY_CLIENT_SECRET)?;

    println!("Credentials removed");
    Ok(())
}

/// Request a fresh access token and print it.
pub async fn print_access_token(sub_matches: &ArgMatches) -> Result<(), CliError> {
    trace!("Executing 'auth get' command");

    let format = get_format_parameter_value(sub_matches)?;
    let configuration = Configuration::load_or_create_default()?;
    let credentials = ClientCredentials::resolve(sub_matches)?;

    let token = AuthClient::new(credentials.client_id, credentials.client_secret, &configuration)
        .request_token()
        .await?;

    println!("{}", token.format(&format)?);
    Ok(())
}
