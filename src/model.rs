//! Data models for APS entities.
//!
//! The APS data management and element group endpoints answer with JSON:API
//! style documents: a `data` member holding either one resource or an array of
//! them, where every resource carries an `id` and an `attributes` object.
//! Only the members this client needs are modelled; everything else is ignored
//! during deserialization.

use crate::format::{CsvRecordProducer, Formattable, FormattingError, OutputFormat};
use ptree::TreeBuilder;
use serde::{Deserialize, Serialize};

/// Placeholder used for element groups without a name attribute
pub const UNNAMED_GROUP: &str = "Unnamed Group";
/// Placeholder used for a root element group without a name attribute
pub const UNNAMED_ROOT_GROUP: &str = "Root Group";
pub const UNNAMED_HUB: &str = "Unnamed Hub";
pub const UNNAMED_PROJECT: &str = "Unnamed Project";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A single JSON:API resource (hub, project or element group)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(default)]
    pub attributes: ResourceAttributes,
}

impl Resource {
    pub fn new(id: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            id: id.into(),
            attributes: ResourceAttributes {
                name: name.map(str::to_string),
            },
        }
    }

    /// The resource name, or `placeholder` when the name attribute is absent or blank
    pub fn display_name(&self, placeholder: &str) -> String {
        match self.attributes.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => placeholder.to_string(),
        }
    }
}

/// Response document carrying a list of resources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub data: Vec<Resource>,
}

impl ResourceList {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn first(&self) -> Option<&Resource> {
        self.data.first()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Resource> {
        self.data.iter().find(|r| r.id == id)
    }

    /// Bind the list to the placeholder used for unnamed entries so it can be formatted
    pub fn named<'a>(&'a self, placeholder: &'a str) -> NamedResourceList<'a> {
        NamedResourceList {
            list: self,
            placeholder,
        }
    }
}

/// Response document carrying a single resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceItem {
    pub data: Resource,
}

/// Flat output record for a listed hub or project
#[derive(Debug, Clone, Serialize)]
struct NamedRecord {
    id: String,
    name: String,
}

/// A resource list together with the placeholder for missing names
pub struct NamedResourceList<'a> {
    list: &'a ResourceList,
    placeholder: &'a str,
}

impl NamedResourceList<'_> {
    fn records(&self) -> Vec<NamedRecord> {
        self.list
            .data
            .iter()
            .map(|r| NamedRecord {
                id: r.id.clone(),
                name: r.display_name(self.placeholder),
            })
            .collect()
    }
}

impl CsvRecordProducer for NamedResourceList<'_> {
    fn csv_header() -> Vec<String> {
        vec!["ID".to_string(), "NAME".to_string()]
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        self.records()
            .into_iter()
            .map(|r| vec![r.id, r.name])
            .collect()
    }
}

impl Formattable for NamedResourceList<'_> {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        match f {
            OutputFormat::Json(options) => {
                let records = self.records();
                if options.pretty {
                    Ok(serde_json::to_string_pretty(&records)?)
                } else {
                    Ok(serde_json::to_string(&records)?)
                }
            }
            OutputFormat::Csv(options) => self.to_csv(options.with_headers),
            OutputFormat::Text(_) => Ok(self
                .records()
                .iter()
                .enumerate()
                .map(|(idx, r)| format!("{}. {} (ID: {})", idx + 1, r.name, r.id))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Tree(_) => Err(FormattingError::UnsupportedOutputFormat(f.to_string())),
        }
    }
}

/// One element group as emitted by the hierarchy walker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementGroupNode {
    pub id: String,
    pub name: String,
    pub depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl ElementGroupNode {
    /// Build a child node; the name falls back to [`UNNAMED_GROUP`]
    pub fn child(resource: &Resource, parent_id: &str, depth: usize) -> Self {
        Self {
            id: resource.id.clone(),
            name: resource.display_name(UNNAMED_GROUP),
            depth,
            parent_id: Some(parent_id.to_string()),
        }
    }

    /// Build the starting node of a traversal; the name falls back to [`UNNAMED_ROOT_GROUP`]
    pub fn root(resource: &Resource, depth: usize) -> Self {
        Self {
            id: resource.id.clone(),
            name: resource.display_name(UNNAMED_ROOT_GROUP),
            depth,
            parent_id: None,
        }
    }

    pub fn label(&self) -> String {
        format!("{} (ID: {})", self.name, self.id)
    }

    /// Indented text line, two spaces per level above this node
    pub fn text_line(&self) -> String {
        format!("{}- {}", "  ".repeat(self.depth.saturating_sub(1)), self.label())
    }
}

/// Element groups collected from one traversal, in emission order
#[derive(Debug, Clone, Serialize)]
pub struct ElementGroupTree {
    pub root: ElementGroupNode,
    pub nodes: Vec<ElementGroupNode>,
}

impl ElementGroupTree {
    pub fn new(root: ElementGroupNode, nodes: Vec<ElementGroupNode>) -> Self {
        Self { root, nodes }
    }

    /// Render with ptree. Nodes arrive in pre-order, so the depth of each node
    /// tells how many open levels have to be closed before it.
    fn to_tree_string(&self) -> Result<String, FormattingError> {
        let mut builder = TreeBuilder::new(self.root.label());
        let mut open = Vec::new();
        for node in &self.nodes {
            while matches!(open.last(), Some(depth) if *depth >= node.depth) {
                builder.end_child();
                open.pop();
            }
            builder.begin_child(node.label());
            open.push(node.depth);
        }
        for _ in open {
            builder.end_child();
        }
        let tree = builder.build();

        let mut out = Vec::new();
        ptree::write_tree(&tree, &mut out)
            .map_err(|e| FormattingError::FormatFailure { cause: Box::new(e) })?;
        Ok(String::from_utf8(out)?)
    }
}

impl CsvRecordProducer for ElementGroupTree {
    fn csv_header() -> Vec<String> {
        vec![
            "ID".to_string(),
            "NAME".to_string(),
            "DEPTH".to_string(),
            "PARENT_ID".to_string(),
        ]
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        self.nodes
            .iter()
            .map(|n| {
                vec![
                    n.id.clone(),
                    n.name.clone(),
                    n.depth.to_string(),
                    n.parent_id.clone().unwrap_or_default(),
                ]
            })
            .collect()
    }
}

impl Formattable for ElementGroupTree {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        match f {
            OutputFormat::Json(options) => {
                if options.pretty {
                    Ok(serde_json::to_string_pretty(self)?)
                } else {
                    Ok(serde_json::to_string(self)?)
                }
            }
            OutputFormat::Csv(options) => self.to_csv(options.with_headers),
            OutputFormat::Tree(_) => self.to_tree_string(),
            // text is streamed line by line while walking, see `hierarchy::LineSink`
            OutputFormat::Text(_) => Err(FormattingError::UnsupportedOutputFormat(f.to_string())),
        }
    }
}

/// The element group hierarchy of one project
#[derive(Debug, Clone, Serialize)]
pub struct ProjectElementGroups {
    pub project_id: String,
    pub project_name: String,
    #[serde(flatten)]
    pub tree: ElementGroupTree,
}

impl ProjectElementGroups {
    pub fn new(project: &Resource, root: ElementGroupNode) -> Self {
        Self {
            project_id: project.id.clone(),
            project_name: project.display_name(UNNAMED_PROJECT),
            tree: ElementGroupTree::new(root, Vec::new()),
        }
    }

    pub fn header(&self) -> String {
        format!("Project: {} (ID: {})", self.project_name, self.project_id)
    }
}

/// Hierarchies of several projects, in the order they were walked
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ProjectElementGroupsList {
    pub projects: Vec<ProjectElementGroups>,
}

impl CsvRecordProducer for ProjectElementGroupsList {
    fn csv_header() -> Vec<String> {
        let mut header = vec!["PROJECT_ID".to_string(), "PROJECT_NAME".to_string()];
        header.extend(ElementGroupTree::csv_header());
        header
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        self.projects
            .iter()
            .flat_map(|p| {
                p.tree.as_csv_records().into_iter().map(move |record| {
                    let mut row = vec![p.project_id.clone(), p.project_name.clone()];
                    row.extend(record);
                    row
                })
            })
            .collect()
    }
}

impl Formattable for ProjectElementGroupsList {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        match f {
            OutputFormat::Json(options) => {
                if options.pretty {
                    Ok(serde_json::to_string_pretty(self)?)
                } else {
                    Ok(serde_json::to_string(self)?)
                }
            }
            OutputFormat::Csv(options) => self.to_csv(options.with_headers),
            OutputFormat::Tree(_) => {
                let mut sections = Vec::with_capacity(self.projects.len());
                for project in &self.projects {
                    sections.push(format!("{}\n{}", project.header(), project.tree.to_tree_string()?));
                }
                Ok(sections.join("\n"))
            }
            OutputFormat::Text(_) => Err(FormattingError::UnsupportedOutputFormat(f.to_string())),
        }
    }
}

impl Formattable for ElementGroupNode {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        match f {
            OutputFormat::Json(options) => {
                if options.pretty {
                    Ok(serde_json::to_string_pretty(self)?)
                } else {
                    Ok(serde_json::to_string(self)?)
                }
            }
            OutputFormat::Csv(options) => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                if options.with_headers {
                    wtr.write_record(["ID", "NAME"])?;
                }
                wtr.write_record([self.id.as_str(), self.name.as_str()])?;
                Ok(String::from_utf8(wtr.into_inner()?)?)
            }
            OutputFormat::Text(_) => Ok(format!("Root Element Group: {}", self.label())),
            OutputFormat::Tree(_) => Err(FormattingError::UnsupportedOutputFormat(f.to_string())),
        }
    }
}
