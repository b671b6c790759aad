use crate::{
    aps::ApsApiClient,
    commands::params::{
        PARAMETER_FORMAT, PARAMETER_HEADERS, PARAMETER_HUB_ID, PARAMETER_PRETTY,
        PARAMETER_PROJECT_ID,
    },
    configuration::Configuration,
    error::CliError,
    format::{OutputFormat, OutputFormatOptions},
    model::{Resource, ResourceList, UNNAMED_HUB, UNNAMED_PROJECT},
};
use clap::ArgMatches;
use tracing::{debug, info, trace};

/// Read `--format`, `--headers` and `--pretty` into an [`OutputFormat`].
///
/// Commands without some of these arguments get the default for the missing ones.
pub fn get_format_parameter_value(sub_matches: &ArgMatches) -> Result<OutputFormat, CliError> {
    trace!("Resolving output format options...");

    let format = sub_matches
        .try_get_one::<String>(PARAMETER_FORMAT)
        .ok()
        .flatten()
        .map(String::as_str)
        .unwrap_or(crate::format::TEXT);
    let with_headers = flag(sub_matches, PARAMETER_HEADERS);
    let pretty = flag(sub_matches, PARAMETER_PRETTY);

    trace!("Format: {}", format);
    trace!("With headers: {}", with_headers);
    trace!("Pretty: {}", pretty);

    let options = OutputFormatOptions { with_headers, pretty };
    Ok(OutputFormat::from_string_with_options(format, options)?)
}

fn flag(sub_matches: &ArgMatches, name: &str) -> bool {
    sub_matches
        .try_get_one::<bool>(name)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
}

/// Optional string argument, ignoring blank values
pub fn get_string_parameter(sub_matches: &ArgMatches, name: &str) -> Option<String> {
    sub_matches
        .try_get_one::<String>(name)
        .ok()
        .flatten()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// How the hub for a command was determined
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubChoice {
    Explicit(String),
    Active(String),
    /// Neither the arguments nor the configuration named a hub
    FirstAvailable { id: String, name: String },
}

impl HubChoice {
    pub fn id(&self) -> &str {
        match self {
            HubChoice::Explicit(id) | HubChoice::Active(id) => id,
            HubChoice::FirstAvailable { id, .. } => id,
        }
    }

    /// Message telling the user which hub was picked on their behalf
    pub fn notice(&self) -> Option<String> {
        match self {
            HubChoice::FirstAvailable { id, name } => {
                Some(format!("Selected hub: {} (ID: {})", name, id))
            }
            _ => None,
        }
    }
}

/// Pick the hub to work with: the explicit ID, then the active hub from the
/// configuration, then the first hub in the listing.
pub fn choose_hub(
    explicit: Option<String>,
    configuration: &Configuration,
    hubs: Option<&ResourceList>,
) -> Result<HubChoice, CliError> {
    if let Some(hub_id) = explicit {
        return Ok(HubChoice::Explicit(hub_id));
    }
    if let Some(hub_id) = configuration.active_hub_id() {
        return Ok(HubChoice::Active(hub_id.to_string()));
    }
    match hubs.and_then(ResourceList::first) {
        Some(hub) => Ok(HubChoice::FirstAvailable {
            id: hub.id.clone(),
            name: hub.display_name(UNNAMED_HUB),
        }),
        None => Err(CliError::NoHubs),
    }
}

/// Resolve the hub ID for a command, listing hubs only when neither the
/// arguments nor the configuration name one.
pub async fn resolve_hub_id(
    api: &ApsApiClient,
    sub_matches: &ArgMatches,
    configuration: &Configuration,
) -> Result<String, CliError> {
    let explicit = get_string_parameter(sub_matches, PARAMETER_HUB_ID);
    let choice = if explicit.is_some() || configuration.active_hub_id().is_some() {
        choose_hub(explicit, configuration, None)?
    } else {
        trace!("No hub specified, listing hubs...");
        let hubs = api.get_hubs().await?;
        choose_hub(None, configuration, Some(&hubs))?
    };

    match choice.notice() {
        // stdout carries the command output, so the notice goes to stderr
        Some(notice) => eprintln!("{}", notice),
        None => debug!("Using hub {}", choice.id()),
    }
    Ok(choice.id().to_string())
}

/// Label shown for a resource in interactive prompts
fn selection_label(resource: &Resource, placeholder: &str) -> String {
    format!("{} (ID: {})", resource.display_name(placeholder), resource.id)
}

/// Let the user pick one resource of a list.
pub fn select_resource<'a>(
    message: &str,
    help: &str,
    resources: &'a ResourceList,
    placeholder: &str,
) -> Result<&'a Resource, CliError> {
    let options: Vec<String> = resources
        .data
        .iter()
        .map(|r| selection_label(r, placeholder))
        .collect();

    let choice = inquire::Select::new(message, options)
        .with_help_message(help)
        .raw_prompt()
        .map_err(|e| {
            debug!("Selection aborted: {}", e);
            CliError::SelectionCancelled
        })?;

    trace!("User selected: {}", choice.value);
    resources
        .data
        .get(choice.index)
        .ok_or(CliError::SelectionCancelled)
}

/// Resolve the project ID: from `--project-id`, otherwise by listing the
/// projects of the resolved hub and prompting for one.
pub async fn resolve_project_id(
    api: &ApsApiClient,
    sub_matches: &ArgMatches,
    configuration: &Configuration,
) -> Result<String, CliError> {
    if let Some(project_id) = get_string_parameter(sub_matches, PARAMETER_PROJECT_ID) {
        return Ok(project_id);
    }

    let hub_id = resolve_hub_id(api, sub_matches, configuration).await?;
    let projects = api.get_projects(&hub_id).await?;
    if projects.is_empty() {
        return Err(CliError::NoProjects(hub_id));
    }

    let project = select_resource(
        "Select a project:",
        "Choose the project whose element groups you want to explore",
        &projects,
        UNNAMED_PROJECT,
    )?;
    info!(
        "Selected project: {} (ID: {})",
        project.display_name(UNNAMED_PROJECT),
        project.id
    );
    Ok(project.id.clone())
}
