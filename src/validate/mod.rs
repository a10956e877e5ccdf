mod connectivity;
mod properties;
mod structure;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Edge, GraphError, Node, WorkflowGraph};

/// Which part of the editor a finding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Connection,
    Property,
    General,
}

/// A single validation finding. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Workflow must contain at least one node")]
    EmptyWorkflow,

    #[error("Workflow is missing a start node")]
    MissingStart,

    #[error("Workflow has multiple start nodes ({count})")]
    MultipleStarts { count: usize },

    #[error("Start node must connect to at least one other node")]
    StartNotConnected { node_id: String },

    #[error("Missing required field: {field} for node \"{label}\"")]
    MissingField {
        node_id: String,
        label: String,
        field: String,
    },

    #[error("Node \"{label}\" is not connected to any previous node")]
    NotConnected { node_id: String, label: String },

    /// Warning only; never makes a workflow invalid.
    #[error("Node \"{label}\" is not reachable from the start node")]
    Unreachable { node_id: String, label: String },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::EmptyWorkflow
            | ValidationError::MissingStart
            | ValidationError::MultipleStarts { .. } => ErrorKind::General,
            ValidationError::MissingField { .. } => ErrorKind::Property,
            ValidationError::StartNotConnected { .. }
            | ValidationError::NotConnected { .. }
            | ValidationError::Unreachable { .. } => ErrorKind::Connection,
        }
    }

    pub fn node_id(&self) -> Option<&str> {
        match self {
            ValidationError::EmptyWorkflow
            | ValidationError::MissingStart
            | ValidationError::MultipleStarts { .. } => None,
            ValidationError::StartNotConnected { node_id }
            | ValidationError::MissingField { node_id, .. }
            | ValidationError::NotConnected { node_id, .. }
            | ValidationError::Unreachable { node_id, .. } => Some(node_id),
        }
    }

    pub fn to_issue(&self) -> Issue {
        Issue {
            kind: self.kind(),
            node_id: self.node_id().map(str::to_string),
            message: self.to_string(),
        }
    }
}

/// Wire form of a finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub kind: ErrorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    pub message: String,
}

/// Wire form of a full validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub valid: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors_of(&self, kind: ErrorKind) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.kind() == kind)
    }

    pub fn report(&self) -> Report {
        Report {
            valid: self.valid(),
            errors: self.errors.iter().map(ValidationError::to_issue).collect(),
            warnings: self.warnings.iter().map(ValidationError::to_issue).collect(),
        }
    }
}

/// Validate a graph, collecting every finding.
///
/// Checks run in a fixed order: emptiness, start node count, start
/// connectivity, required fields, then orphaned actions. Only an empty graph
/// stops the run early; orphan detection needs a start node to exist.
pub fn validate(graph: &WorkflowGraph) -> ValidationResult {
    let mut result = ValidationResult::default();

    if graph.is_empty() {
        result.errors.push(ValidationError::EmptyWorkflow);
        return result;
    }

    result.errors.extend(structure::check_start_nodes(graph));
    result.errors.extend(structure::check_start_connected(graph));
    result.errors.extend(properties::check_required_fields(graph));
    result.errors.extend(connectivity::check_orphans(graph));
    result.warnings.extend(connectivity::check_reachability(graph));

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "validated workflow graph"
    );
    result
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Either a bare `{nodes, edges}` document or a saved workflow.
#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

/// A graph read from disk, with the workflow name if the file had one.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    pub name: Option<String>,
    pub graph: WorkflowGraph,
}

/// Read a workflow file into a graph. Dangling edges and duplicate ids are
/// load errors, not validation findings.
pub fn load(path: &Path) -> Result<LoadedGraph, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    let doc: Document = serde_json::from_str(&contents)?;
    let graph = WorkflowGraph::from_parts(doc.nodes, doc.edges)?;
    Ok(LoadedGraph {
        name: doc.name,
        graph,
    })
}

/// CLI entry point for the `validate` subcommand.
pub fn run(path: &Path) -> anyhow::Result<()> {
    let loaded = match load(path) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", path.display());
            std::process::exit(1);
        }
    };
    let result = validate(&loaded.graph);
    let name = loaded.name.as_deref().unwrap_or("(unnamed)");

    for w in &result.warnings {
        eprintln!("warning: {w}");
    }

    if result.valid() {
        println!(
            "Workflow '{}' is valid. {} nodes, {} edges.",
            name,
            loaded.graph.node_count(),
            loaded.graph.edge_count()
        );
        for node in loaded.graph.nodes() {
            println!("  - {}", node.summary());
        }
        Ok(())
    } else {
        eprintln!("Validation failed with {} error(s):", result.errors.len());
        for (i, e) in result.errors.iter().enumerate() {
            eprintln!("  {}. [{:?}] {}", i + 1, e.kind(), e);
        }
        std::process::exit(1);
    }
}
