use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::edge::Edge;
use super::graph::{GraphError, WorkflowGraph};
use super::node::Node;

/// A saved workflow: the persisted aggregate owned by storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Workflow {
    /// Storage-assigned identifier.
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// RFC 3339 creation timestamp.
    pub created: String,
    /// RFC 3339 timestamp of the last update.
    pub updated: String,
}

impl Workflow {
    /// Rebuild the editable graph from the stored node and edge lists.
    pub fn graph(&self) -> Result<WorkflowGraph, GraphError> {
        WorkflowGraph::from_parts(self.nodes.clone(), self.edges.clone())
    }
}

/// Body of a create request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NewWorkflow {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl NewWorkflow {
    pub fn from_graph(name: impl Into<String>, description: Option<String>, graph: &WorkflowGraph) -> Self {
        let (nodes, edges) = graph.to_parts();
        Self {
            name: name.into(),
            description,
            nodes,
            edges,
        }
    }

    pub fn graph(&self) -> Result<WorkflowGraph, GraphError> {
        WorkflowGraph::from_parts(self.nodes.clone(), self.edges.clone())
    }
}

/// Partial update. Absent fields are left untouched; `nodes` and `edges`
/// replace the stored lists wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WorkflowPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Absent leaves the description alone; `null` clears it.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<Edge>>,
}

// A field that is present, even as `null`, deserializes to `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl WorkflowPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.nodes.is_none() && self.edges.is_none()
    }

    /// Apply to `workflow` in place, checking that the resulting node/edge
    /// lists still form a valid graph. On error `workflow` is unchanged.
    pub fn apply(self, workflow: &mut Workflow) -> Result<(), GraphError> {
        let nodes = self.nodes.unwrap_or_else(|| workflow.nodes.clone());
        let edges = self.edges.unwrap_or_else(|| workflow.edges.clone());
        WorkflowGraph::from_parts(nodes.clone(), edges.clone())?;

        if let Some(name) = self.name {
            workflow.name = name;
        }
        if let Some(description) = self.description {
            workflow.description = description;
        }
        workflow.nodes = nodes;
        workflow.edges = edges;
        Ok(())
    }
}
