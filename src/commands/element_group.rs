//! Element group command definitions.
//!
//! `tree` is the main command of the tool: it walks the element group
//! hierarchy of a project depth-first and prints every group it reaches.

use crate::commands::params::{
    all_projects_parameter, client_id_parameter, client_secret_parameter, format_parameter,
    format_pretty_parameter, format_with_headers_parameter, group_id_parameter, hub_id_parameter,
    project_id_parameter, start_level_parameter, COMMAND_ELEMENT_GROUP, COMMAND_ROOT,
    COMMAND_TREE,
};
use crate::format::{CSV, JSON, TEXT};
use clap::Command;

/// Create the element group command with all its subcommands.
pub fn element_group_command() -> Command {
    Command::new(COMMAND_ELEMENT_GROUP)
        .about("Explore element groups")
        .visible_alias("eg")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_ROOT)
                .about("Show the root element group of a project")
                .arg(client_id_parameter())
                .arg(client_secret_parameter())
                .arg(project_id_parameter().required(true))
                .arg(format_parameter().value_parser([TEXT, JSON, CSV]))
                .arg(format_pretty_parameter())
                .arg(format_with_headers_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_TREE)
                .about("Print the element group hierarchy of a project")
                .long_about(
                    "Print the element group hierarchy of a project.\n\n\
                     Without --project-id the projects of the hub are listed for interactive \
                     selection. With --all-projects every project of the hub is walked in \
                     turn and projects whose root element group cannot be retrieved are \
                     skipped. The text format streams groups as they are retrieved; the \
                     other formats print once the traversal has finished. Groups whose \
                     children cannot be retrieved are reported on stderr and their subtree \
                     is skipped.",
                )
                .arg(client_id_parameter())
                .arg(client_secret_parameter())
                .arg(hub_id_parameter())
                .arg(project_id_parameter())
                .arg(all_projects_parameter())
                .arg(group_id_parameter())
                .arg(start_level_parameter())
                .arg(format_parameter())
                .arg(format_pretty_parameter())
                .arg(format_with_headers_parameter()),
        )
}
