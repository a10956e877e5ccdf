use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::node::NodeId;

/// A unique identifier for an edge within a workflow.
pub type EdgeId = String;

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    /// Source node ID.
    pub source: NodeId,
    /// Destination node ID.
    pub target: NodeId,
    /// Output port on the source, e.g. `"true"`/`"false"` on condition nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl Edge {
    pub fn new(id: impl Into<EdgeId>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    pub fn from_handle(mut self, handle: impl Into<String>) -> Self {
        self.source_handle = Some(handle.into());
        self
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}
