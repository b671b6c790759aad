use crate::{
    commands::params::{
        PARAMETER_ALL_PROJECTS, PARAMETER_GROUP_ID, PARAMETER_PROJECT_ID, PARAMETER_START_LEVEL,
    },
    context::ExecutionContext,
    error::CliError,
    format::{Formattable, OutputFormat},
    hierarchy::{
        ApsChildSource, CollectingSink, HierarchyWalker, LineSink, ProjectCollectingSink,
        ProjectWalker,
    },
    model::{ElementGroupNode, ElementGroupTree, Resource},
    param_utils::{
        get_format_parameter_value, get_string_parameter, resolve_hub_id, resolve_project_id,
    },
};
use clap::ArgMatches;
use tracing::{debug, trace, warn};

pub async fn print_root_element_group(sub_matches: &ArgMatches) -> Result<(), CliError> {
    trace!("Executing 'element-group root' command");

    let format = get_format_parameter_value(sub_matches)?;
    let project_id = get_string_parameter(sub_matches, PARAMETER_PROJECT_ID)
        .ok_or_else(|| CliError::MissingRequiredArgument(PARAMETER_PROJECT_ID.to_string()))?;

    let ctx = ExecutionContext::from_args(sub_matches).await?;
    let root = ctx.api().get_root_element_group(&project_id).await?;

    println!("{}", ElementGroupNode::root(&root.data, 0).format(&format)?);
    Ok(())
}

/// Walk the element group hierarchy of a project and print it.
///
/// The text format prints each group as soon as it is retrieved. The other
/// formats need the whole traversal, so groups are collected first and the
/// groups that could not be expanded are logged as warnings afterwards.
pub async fn print_element_group_tree(sub_matches: &ArgMatches) -> Result<(), CliError> {
    trace!("Executing 'element-group tree' command");

    let format = get_format_parameter_value(sub_matches)?;
    let start_level = sub_matches
        .get_one::<usize>(PARAMETER_START_LEVEL)
        .copied()
        .unwrap_or(0);

    let ctx = ExecutionContext::from_args(sub_matches).await?;
    if sub_matches.get_flag(PARAMETER_ALL_PROJECTS) {
        return print_all_projects(&ctx, sub_matches, &format, start_level).await;
    }

    let project_id = resolve_project_id(ctx.api(), sub_matches, ctx.configuration()).await?;

    let root = match get_string_parameter(sub_matches, PARAMETER_GROUP_ID) {
        Some(group_id) => {
            debug!("Starting from element group {}", group_id);
            ElementGroupNode::root(&Resource::new(group_id, None), start_level)
        }
        None => {
            let root = ctx.api().get_root_element_group(&project_id).await?;
            ElementGroupNode::root(&root.data, start_level)
        }
    };
    debug!("Root element group: {}", root.label());

    let source = ApsChildSource::new(ctx.api(), &project_id);
    let walker = HierarchyWalker::new(&source);

    match format {
        OutputFormat::Text(_) => {
            println!("Root Element Group: {}", root.label());
            let mut sink = LineSink::new(std::io::stdout());
            walker.walk(&root.id, root.depth, &mut sink).await;
        }
        _ => {
            let mut sink = CollectingSink::new();
            walker.walk(&root.id, root.depth, &mut sink).await;

            for failure in &sink.failures {
                warn!("{}", failure);
            }
            debug!(
                "Traversal finished with {} element group(s) and {} pruned branch(es)",
                sink.nodes.len(),
                sink.failures.len()
            );

            let tree = ElementGroupTree::new(root, sink.nodes);
            println!("{}", tree.format(&format)?);
        }
    }

    Ok(())
}

/// Walk the element group hierarchy of every project of the hub.
///
/// A project whose root element group cannot be retrieved is reported and
/// skipped, the remaining projects are still walked.
async fn print_all_projects(
    ctx: &ExecutionContext,
    sub_matches: &ArgMatches,
    format: &OutputFormat,
    start_level: usize,
) -> Result<(), CliError> {
    let hub_id = resolve_hub_id(ctx.api(), sub_matches, ctx.configuration()).await?;
    let projects = ctx.api().get_projects(&hub_id).await?;
    if projects.is_empty() {
        return Err(CliError::NoProjects(hub_id));
    }
    debug!("Walking {} project(s) of hub {}", projects.data.len(), hub_id);

    let walker = ProjectWalker::new(ctx.api());

    match format {
        OutputFormat::Text(_) => {
            let mut sink = LineSink::new(std::io::stdout());
            walker.walk(&projects.data, start_level, &mut sink).await;
        }
        _ => {
            let mut sink = ProjectCollectingSink::new();
            walker.walk(&projects.data, start_level, &mut sink).await;

            for (project, failure) in &sink.skipped {
                warn!("Skipped project {}: {}", project.id, failure);
            }
            for failure in &sink.failures {
                warn!("{}", failure);
            }

            println!("{}", sink.projects.format(format)?);
        }
    }

    Ok(())
}
