//! Element group hierarchy traversal.
//!
//! The walker asks a [`ChildSource`] for the children of one element group at
//! a time and reports every child to a [`HierarchySink`] in depth-first
//! pre-order, exactly in the order the source returned them. Nothing but the
//! current path of open levels is kept in memory.
//!
//! A failed fetch only prunes the subtree below the node it was issued for;
//! the sink is told about it and traversal continues with the next sibling.
//! The walker performs no cycle detection, a source that reports a cycle
//! keeps it walking forever.
//!
//! [`ProjectWalker`] runs the same traversal for a sequence of projects. A
//! project whose root element group cannot be retrieved is skipped and the
//! next project is walked.

use crate::aps::{ApiError, ApsApiClient};
use crate::model::{
    ElementGroupNode, ProjectElementGroups, ProjectElementGroupsList, Resource, UNNAMED_PROJECT,
};
use std::io::Write;
use thiserror::Error;
use tracing::{trace, warn};

/// A child listing that could not be obtained
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to retrieve children of element group {parent_id}: {reason}")]
pub struct FetchFailure {
    pub parent_id: String,
    pub reason: String,
}

impl FetchFailure {
    pub fn new(parent_id: &str, reason: impl ToString) -> Self {
        Self {
            parent_id: parent_id.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Lists the direct children of an element group
#[allow(async_fn_in_trait)]
pub trait ChildSource {
    async fn fetch_children(&self, parent_id: &str) -> Result<Vec<Resource>, FetchFailure>;
}

impl<S: ChildSource + ?Sized> ChildSource for &S {
    async fn fetch_children(&self, parent_id: &str) -> Result<Vec<Resource>, FetchFailure> {
        (**self).fetch_children(parent_id).await
    }
}

/// Root element groups of projects, and the children below them
#[allow(async_fn_in_trait)]
pub trait ProjectSource {
    type Children<'a>: ChildSource
    where
        Self: 'a;

    async fn root_group(&self, project_id: &str) -> Result<Resource, FetchFailure>;

    fn children_of_project<'a>(&'a self, project_id: &str) -> Self::Children<'a>;
}

/// Receives the output of a traversal
pub trait HierarchySink {
    fn emit(&mut self, node: &ElementGroupNode);

    fn pruned(&mut self, failure: &FetchFailure) {
        warn!("{}", failure);
    }
}

/// Receives the output of a traversal over several projects
pub trait ProjectHierarchySink: HierarchySink {
    /// Called before the element groups of `project` are emitted
    fn begin_project(&mut self, project: &Resource, root: &ElementGroupNode);

    fn project_skipped(&mut self, project: &Resource, failure: &FetchFailure) {
        warn!(
            "Skipping project {} (ID: {}), its root element group could not be retrieved: {}",
            project.display_name(UNNAMED_PROJECT),
            project.id,
            failure.reason
        );
    }
}

/// Pending children of one open level
struct Frame {
    parent_id: String,
    depth: usize,
    children: std::vec::IntoIter<Resource>,
}

pub struct HierarchyWalker<'a, S: ChildSource> {
    source: &'a S,
}

impl<'a, S: ChildSource> HierarchyWalker<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Walk every descendant of `parent_id`, which sits at `depth`.
    ///
    /// Children of `parent_id` are emitted at `depth + 1`. A child's own
    /// children are fetched right after the child is emitted and before its
    /// next sibling, the same order a recursive traversal produces, but
    /// pending levels live on a heap allocated stack so deep hierarchies do
    /// not exhaust the call stack.
    pub async fn walk<K: HierarchySink>(&self, parent_id: &str, depth: usize, sink: &mut K) {
        let mut frames: Vec<Frame> = Vec::new();
        if let Some(children) = self.children_of(parent_id, sink).await {
            frames.push(Frame {
                parent_id: parent_id.to_string(),
                depth: depth + 1,
                children: children.into_iter(),
            });
        }

        while let Some(frame) = frames.last_mut() {
            let Some(child) = frame.children.next() else {
                frames.pop();
                continue;
            };

            let node = ElementGroupNode::child(&child, &frame.parent_id, frame.depth);
            let child_depth = frame.depth + 1;
            sink.emit(&node);

            if let Some(grandchildren) = self.children_of(&node.id, sink).await {
                frames.push(Frame {
                    parent_id: node.id,
                    depth: child_depth,
                    children: grandchildren.into_iter(),
                });
            }
        }
    }

    /// Children to descend into, `None` when the branch ends here
    async fn children_of<K: HierarchySink>(&self, parent_id: &str, sink: &mut K) -> Option<Vec<Resource>> {
        match self.source.fetch_children(parent_id).await {
            Ok(children) if children.is_empty() => {
                trace!("Element group {} has no children", parent_id);
                None
            }
            Ok(children) => Some(children),
            Err(failure) => {
                sink.pruned(&failure);
                None
            }
        }
    }
}

/// Walks the hierarchies of several projects one after another
pub struct ProjectWalker<'a, P: ProjectSource> {
    source: &'a P,
}

impl<'a, P: ProjectSource> ProjectWalker<'a, P> {
    pub fn new(source: &'a P) -> Self {
        Self { source }
    }

    /// Walk every project in order. The root element group of each project
    /// sits at `start_level`.
    pub async fn walk<K: ProjectHierarchySink>(
        &self,
        projects: &[Resource],
        start_level: usize,
        sink: &mut K,
    ) {
        for project in projects {
            let root = match self.source.root_group(&project.id).await {
                Ok(root) => ElementGroupNode::root(&root, start_level),
                Err(failure) => {
                    sink.project_skipped(project, &failure);
                    continue;
                }
            };

            sink.begin_project(project, &root);
            let children = self.source.children_of_project(&project.id);
            HierarchyWalker::new(&children)
                .walk(&root.id, root.depth, sink)
                .await;
        }
    }
}

/// Streams one indented text line per node
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> HierarchySink for LineSink<W> {
    fn emit(&mut self, node: &ElementGroupNode) {
        // a closed pipe (e.g. piping into head) must not abort the traversal
        if let Err(e) = writeln!(self.writer, "{}", node.text_line()) {
            trace!("Failed to write element group line: {}", e);
        }
    }
}

impl<W: Write> ProjectHierarchySink for LineSink<W> {
    fn begin_project(&mut self, project: &Resource, root: &ElementGroupNode) {
        let header = format!(
            "Project: {} (ID: {})\nRoot Element Group: {}",
            project.display_name(UNNAMED_PROJECT),
            project.id,
            root.label()
        );
        if let Err(e) = writeln!(self.writer, "{}", header) {
            trace!("Failed to write project header: {}", e);
        }
    }
}

/// Keeps nodes and failures in memory, without logging anything
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub nodes: Vec<ElementGroupNode>,
    pub failures: Vec<FetchFailure>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HierarchySink for CollectingSink {
    fn emit(&mut self, node: &ElementGroupNode) {
        self.nodes.push(node.clone());
    }

    fn pruned(&mut self, failure: &FetchFailure) {
        self.failures.push(failure.clone());
    }
}

/// Collects one [`ProjectElementGroups`] per walked project, without logging anything
#[derive(Debug, Default)]
pub struct ProjectCollectingSink {
    pub projects: ProjectElementGroupsList,
    /// Fetch failures below the root element groups
    pub failures: Vec<FetchFailure>,
    /// Projects whose root element group could not be retrieved
    pub skipped: Vec<(Resource, FetchFailure)>,
}

impl ProjectCollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HierarchySink for ProjectCollectingSink {
    fn emit(&mut self, node: &ElementGroupNode) {
        if let Some(project) = self.projects.projects.last_mut() {
            project.tree.nodes.push(node.clone());
        }
    }

    fn pruned(&mut self, failure: &FetchFailure) {
        self.failures.push(failure.clone());
    }
}

impl ProjectHierarchySink for ProjectCollectingSink {
    fn begin_project(&mut self, project: &Resource, root: &ElementGroupNode) {
        self.projects
            .projects
            .push(ProjectElementGroups::new(project, root.clone()));
    }

    fn project_skipped(&mut self, project: &Resource, failure: &FetchFailure) {
        self.skipped.push((project.clone(), failure.clone()));
    }
}

/// Element group children of one project, served by the APS API
pub struct ApsChildSource<'a> {
    api: &'a ApsApiClient,
    project_id: String,
}

impl<'a> ApsChildSource<'a> {
    pub fn new(api: &'a ApsApiClient, project_id: &str) -> Self {
        Self {
            api,
            project_id: project_id.to_string(),
        }
    }
}

impl ChildSource for ApsChildSource<'_> {
    async fn fetch_children(&self, parent_id: &str) -> Result<Vec<Resource>, FetchFailure> {
        self.api
            .get_element_group_children(&self.project_id, parent_id)
            .await
            .map(|list| list.data)
            .map_err(|e: ApiError| FetchFailure::new(parent_id, e))
    }
}

impl ProjectSource for ApsApiClient {
    type Children<'a> = ApsChildSource<'a>
    where
        Self: 'a;

    async fn root_group(&self, project_id: &str) -> Result<Resource, FetchFailure> {
        self.get_root_element_group(project_id)
            .await
            .map(|item| item.data)
            .map_err(|e: ApiError| FetchFailure::new(project_id, e))
    }

    fn children_of_project<'a>(&'a self, project_id: &str) -> ApsChildSource<'a> {
        ApsChildSource::new(self, project_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_utils::HttpRequestConfig;
    use crate::model::UNNAMED_GROUP;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory source; ids listed in `failing` answer with a failure
    #[derive(Default)]
    struct MapSource {
        children: HashMap<String, Vec<Resource>>,
        failing: Vec<String>,
        calls: RefCell<Vec<String>>,
    }

    impl MapSource {
        fn with(mut self, parent: &str, children: &[(&str, Option<&str>)]) -> Self {
            self.children.insert(
                parent.to_string(),
                children.iter().map(|(id, name)| Resource::new(*id, *name)).collect(),
            );
            self
        }

        fn failing(mut self, id: &str) -> Self {
            self.failing.push(id.to_string());
            self
        }
    }

    impl ChildSource for MapSource {
        async fn fetch_children(&self, parent_id: &str) -> Result<Vec<Resource>, FetchFailure> {
            self.calls.borrow_mut().push(parent_id.to_string());
            if self.failing.iter().any(|id| id == parent_id) {
                return Err(FetchFailure::new(parent_id, "HTTP status server error (500)"));
            }
            Ok(self.children.get(parent_id).cloned().unwrap_or_default())
        }
    }

    /// Uniform tree: every node at depth < `levels` has `branching` children
    struct UniformSource {
        branching: usize,
        levels: usize,
    }

    impl ChildSource for UniformSource {
        async fn fetch_children(&self, parent_id: &str) -> Result<Vec<Resource>, FetchFailure> {
            let depth = parent_id.split('.').count() - 1;
            if depth >= self.levels {
                return Ok(Vec::new());
            }
            Ok((0..self.branching)
                .map(|i| Resource::new(format!("{}.{}", parent_id, i), Some("node")))
                .collect())
        }
    }

    /// Single path of `length` nodes with numeric ids
    struct ChainSource {
        length: usize,
    }

    impl ChildSource for ChainSource {
        async fn fetch_children(&self, parent_id: &str) -> Result<Vec<Resource>, FetchFailure> {
            let index: usize = parent_id.parse().map_err(|e| FetchFailure::new(parent_id, e))?;
            if index >= self.length {
                return Ok(Vec::new());
            }
            Ok(vec![Resource::new((index + 1).to_string(), None)])
        }
    }

    async fn collect<S: ChildSource>(source: &S, root: &str, depth: usize) -> CollectingSink {
        let mut sink = CollectingSink::new();
        HierarchyWalker::new(source).walk(root, depth, &mut sink).await;
        sink
    }

    fn labels(sink: &CollectingSink) -> Vec<(String, usize)> {
        sink.nodes.iter().map(|n| (n.label(), n.depth)).collect()
    }

    #[tokio::test]
    async fn test_preorder_emission() {
        let source = MapSource::default()
            .with("R", &[("A", Some("Alpha")), ("B", Some("Beta"))])
            .with("A", &[])
            .with("B", &[("C", Some("Gamma"))]);

        let sink = collect(&source, "R", 0).await;
        assert_eq!(
            labels(&sink),
            vec![
                ("Alpha (ID: A)".to_string(), 1),
                ("Beta (ID: B)".to_string(), 1),
                ("Gamma (ID: C)".to_string(), 2),
            ]
        );
        assert!(sink.failures.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_order_matches_recursive_traversal() {
        let source = MapSource::default()
            .with("R", &[("A", None), ("B", None)])
            .with("A", &[("A1", None)])
            .with("B", &[("B1", None)]);

        collect(&source, "R", 0).await;
        assert_eq!(
            source.calls.into_inner(),
            vec!["R", "A", "A1", "B", "B1"]
        );
    }

    #[tokio::test]
    async fn test_uniform_tree_line_count() {
        for (branching, levels) in [(1, 5), (2, 3), (3, 4), (4, 1)] {
            let source = UniformSource { branching, levels };
            let sink = collect(&source, "root", 0).await;
            let expected: usize = (1..=levels as u32).map(|d| branching.pow(d)).sum();
            assert_eq!(sink.nodes.len(), expected, "B={} D={}", branching, levels);
        }
    }

    #[tokio::test]
    async fn test_depth_counts_edges_from_root() {
        let source = UniformSource { branching: 2, levels: 3 };
        let sink = collect(&source, "root", 0).await;
        for node in &sink.nodes {
            assert_eq!(node.depth, node.id.split('.').count() - 1);
        }
    }

    #[tokio::test]
    async fn test_failure_prunes_only_its_subtree() {
        let source = MapSource::default()
            .with("R", &[("A", Some("Alpha")), ("B", Some("Beta")), ("C", Some("Gamma"))])
            .with("A", &[("A1", Some("Alpha One"))])
            .with("B", &[("B1", Some("Beta One"))])
            .with("B1", &[("B11", Some("Hidden"))])
            .with("C", &[("C1", Some("Gamma One"))])
            .failing("B");

        let sink = collect(&source, "R", 0).await;
        let ids: Vec<&str> = sink.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "A1", "B", "C", "C1"]);
        assert_eq!(sink.failures, vec![FetchFailure::new("B", "HTTP status server error (500)")]);
    }

    #[tokio::test]
    async fn test_failure_below_first_level_keeps_ancestor_siblings() {
        let source = MapSource::default()
            .with("R", &[("A", None), ("B", None)])
            .with("A", &[("A1", None), ("A2", None)])
            .with("A1", &[("A11", None)])
            .with("A2", &[("A21", None)])
            .failing("A1");

        let sink = collect(&source, "R", 0).await;
        let emitted: Vec<(&str, usize)> = sink.nodes.iter().map(|n| (n.id.as_str(), n.depth)).collect();
        assert_eq!(
            emitted,
            vec![("A", 1), ("A1", 2), ("A2", 2), ("A21", 3), ("B", 1)]
        );
        assert_eq!(sink.failures.len(), 1);
        assert_eq!(sink.failures[0].parent_id, "A1");
    }

    #[tokio::test]
    async fn test_failure_below_first_level_text_output() {
        let source = MapSource::default()
            .with("R", &[("A", Some("Alpha")), ("B", Some("Beta"))])
            .with("A", &[("A1", Some("Broken")), ("A2", Some("Second"))])
            .with("A2", &[("A21", Some("Leaf"))])
            .failing("A1");

        let mut sink = LineSink::new(Vec::new());
        HierarchyWalker::new(&source).walk("R", 0, &mut sink).await;
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            output,
            "- Alpha (ID: A)\n  - Broken (ID: A1)\n  - Second (ID: A2)\n    - Leaf (ID: A21)\n- Beta (ID: B)\n"
        );
    }

    #[tokio::test]
    async fn test_failing_root_emits_nothing() {
        let source = MapSource::default().with("R", &[("A", None)]).failing("R");
        let sink = collect(&source, "R", 0).await;
        assert!(sink.nodes.is_empty());
        assert_eq!(sink.failures.len(), 1);
        assert_eq!(sink.failures[0].parent_id, "R");
    }

    #[tokio::test]
    async fn test_missing_name_uses_placeholder() {
        let source = MapSource::default().with("R", &[("A", None), ("B", Some(""))]);
        let sink = collect(&source, "R", 0).await;
        assert!(sink.nodes.iter().all(|n| n.name == UNNAMED_GROUP));
    }

    #[tokio::test]
    async fn test_source_order_is_kept() {
        let source = MapSource::default().with(
            "R",
            &[("3", Some("Zulu")), ("1", Some("Alpha")), ("2", Some("Mike"))],
        );
        let sink = collect(&source, "R", 0).await;
        let names: Vec<&str> = sink.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Zulu", "Alpha", "Mike"]);
    }

    #[tokio::test]
    async fn test_leaf_does_not_recurse_further() {
        let source = MapSource::default().with("R", &[("A", None)]);
        let sink = collect(&source, "R", 0).await;
        assert_eq!(sink.nodes.len(), 1);
        assert_eq!(source.calls.into_inner(), vec!["R", "A"]);
    }

    #[tokio::test]
    async fn test_explicit_starting_level() {
        let source = MapSource::default()
            .with("R", &[("A", None)])
            .with("A", &[("B", None)]);
        let sink = collect(&source, "R", 3).await;
        let depths: Vec<usize> = sink.nodes.iter().map(|n| n.depth).collect();
        assert_eq!(depths, vec![4, 5]);
        assert_eq!(sink.nodes[1].parent_id.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_deep_chain_does_not_overflow_the_stack() {
        let source = ChainSource { length: 10_000 };
        let sink = collect(&source, "0", 0).await;
        assert_eq!(sink.nodes.len(), 10_000);
        assert_eq!(sink.nodes.last().map(|n| n.depth), Some(10_000));
    }

    #[tokio::test]
    async fn test_line_sink_output() {
        let source = MapSource::default()
            .with("R", &[("A", Some("Alpha")), ("B", Some("Beta"))])
            .with("B", &[("C", Some("Gamma"))]);

        let mut sink = LineSink::new(Vec::new());
        HierarchyWalker::new(&source).walk("R", 0, &mut sink).await;
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            output,
            "- Alpha (ID: A)\n- Beta (ID: B)\n  - Gamma (ID: C)\n"
        );
    }

    /// Projects with a root element group each; projects missing from
    /// `roots` fail to resolve their root
    struct Portfolio {
        roots: HashMap<String, Resource>,
        groups: MapSource,
    }

    impl ProjectSource for Portfolio {
        type Children<'a> = &'a MapSource
        where
            Self: 'a;

        async fn root_group(&self, project_id: &str) -> Result<Resource, FetchFailure> {
            self.roots.get(project_id).cloned().ok_or_else(|| {
                FetchFailure::new(project_id, "HTTP status client error (404 Not Found)")
            })
        }

        fn children_of_project<'a>(&'a self, _project_id: &str) -> &'a MapSource {
            &self.groups
        }
    }

    fn portfolio() -> (Portfolio, Vec<Resource>) {
        let mut roots = HashMap::new();
        roots.insert("p.1".to_string(), Resource::new("R1", Some("Tower Root")));
        roots.insert("p.3".to_string(), Resource::new("R3", None));
        let groups = MapSource::default()
            .with("R1", &[("A", Some("Alpha"))])
            .with("R3", &[("B", Some("Beta"))])
            .with("B", &[("C", Some("Gamma"))]);
        let projects = vec![
            Resource::new("p.1", Some("Tower")),
            Resource::new("p.2", Some("Missing Root")),
            Resource::new("p.3", None),
        ];
        (Portfolio { roots, groups }, projects)
    }

    #[tokio::test]
    async fn test_project_walk_skips_projects_without_root() {
        let (source, projects) = portfolio();
        let mut sink = ProjectCollectingSink::new();
        ProjectWalker::new(&source).walk(&projects, 0, &mut sink).await;

        let walked: Vec<&str> = sink.projects.projects.iter().map(|p| p.project_id.as_str()).collect();
        assert_eq!(walked, vec!["p.1", "p.3"]);
        assert_eq!(sink.skipped.len(), 1);
        assert_eq!(sink.skipped[0].0.id, "p.2");
        assert_eq!(sink.skipped[0].1.parent_id, "p.2");
        assert!(sink.failures.is_empty());

        let first = &sink.projects.projects[0];
        assert_eq!(first.tree.root.label(), "Tower Root (ID: R1)");
        assert_eq!(first.tree.nodes.len(), 1);

        let last = &sink.projects.projects[1];
        assert_eq!(last.project_name, UNNAMED_PROJECT);
        let ids: Vec<&str> = last.tree.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "C"]);
        assert_eq!(source.groups.calls.borrow().as_slice(), ["R1", "A", "R3", "B", "C"]);
    }

    #[tokio::test]
    async fn test_project_walk_text_output() {
        let (source, projects) = portfolio();
        let mut sink = LineSink::new(Vec::new());
        ProjectWalker::new(&source).walk(&projects, 0, &mut sink).await;

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            output,
            "Project: Tower (ID: p.1)\n\
             Root Element Group: Tower Root (ID: R1)\n\
             - Alpha (ID: A)\n\
             Project: Unnamed Project (ID: p.3)\n\
             Root Element Group: Root Group (ID: R3)\n\
             - Beta (ID: B)\n  \
             - Gamma (ID: C)\n"
        );
    }

    #[tokio::test]
    async fn test_aps_source_converts_api_errors() {
        let config = HttpRequestConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: 2,
            ..HttpRequestConfig::default()
        };
        let api = ApsApiClient::new(config).unwrap();
        let source = ApsChildSource::new(&api, "project-1");

        let sink = collect(&source, "root-group", 0).await;
        assert!(sink.nodes.is_empty());
        assert_eq!(sink.failures.len(), 1);
        assert_eq!(sink.failures[0].parent_id, "root-group");
    }
}
