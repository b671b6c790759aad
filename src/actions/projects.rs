use crate::{
    context::ExecutionContext,
    error::CliError,
    format::Formattable,
    model::UNNAMED_PROJECT,
    param_utils::{get_format_parameter_value, resolve_hub_id},
};
use clap::ArgMatches;
use tracing::{debug, trace};

pub async fn list_projects(sub_matches: &ArgMatches) -> Result<(), CliError> {
    trace!("Executing 'project list' command");

    let format = get_format_parameter_value(sub_matches)?;
    let ctx = ExecutionContext::from_args(sub_matches).await?;

    let hub_id = resolve_hub_id(ctx.api(), sub_matches, ctx.configuration()).await?;
    debug!("Listing projects of hub {}", hub_id);

    let projects = ctx.api().get_projects(&hub_id).await?;
    if projects.is_empty() {
        return Err(CliError::NoProjects(hub_id));
    }

    println!("{}", projects.named(UNNAMED_PROJECT).format(&format)?);
    Ok(())
}
