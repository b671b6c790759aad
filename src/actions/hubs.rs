use crate::{
    commands::params::PARAMETER_HUB_ID,
    configuration::Configuration,
    context::ExecutionContext,
    error::CliError,
    format::Formattable,
    model::UNNAMED_HUB,
    param_utils::{get_format_parameter_value, get_string_parameter, select_resource},
};
use clap::ArgMatches;
use tracing::trace;

pub async fn list_hubs(sub_matches: &ArgMatches) -> Result<(), CliError> {
    trace!("Executing 'hub list' command");

    let format = get_format_parameter_value(sub_matches)?;
    let ctx = ExecutionContext::from_args(sub_matches).await?;

    let hubs = ctx.api().get_hubs().await?;
    println!("{}", hubs.named(UNNAMED_HUB).format(&format)?);
    Ok(())
}

/// Make a hub the active one, prompting for it when no ID is given.
pub async fn use_hub(sub_matches: &ArgMatches) -> Result<(), CliError> {
    trace!("Executing 'hub use' command");

    let ctx = ExecutionContext::from_args(sub_matches).await?;
    let hubs = ctx.api().get_hubs().await?;
    if hubs.is_empty() {
        return Err(CliError::NoHubs);
    }

    let hub = match get_string_parameter(sub_matches, PARAMETER_HUB_ID) {
        Some(hub_id) => hubs
            .find_by_id(&hub_id)
            .ok_or(CliError::HubNotFound(hub_id))?,
        None => select_resource(
            "Select a hub:",
            "Choose the hub you want to set as active",
            &hubs,
            UNNAMED_HUB,
        )?,
    };

    let mut configuration = ctx.configuration().clone();
    configuration.set_active_hub(&hub.id);
    configuration.save_to_default()?;

    println!(
        "Active hub: {} (ID: {})",
        hub.display_name(UNNAMED_HUB),
        hub.id
    );
    Ok(())
}

pub async fn clear_active_hub() -> Result<(), CliError> {
    trace!("Executing 'hub clear' command");

    let mut configuration = Configuration::load_or_create_default()?;
    configuration.clear_active_hub();
    configuration.save_to_default()?;

    println!("Active hub cleared");
    Ok(())
}
