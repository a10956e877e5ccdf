use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::{Dfs, EdgeRef};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::edge::{Edge, EdgeId};
use super::node::{Config, Node, NodeCategory, NodeId, Position};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("Edge `{edge_id}` references unknown node `{node_id}`")]
    InvalidEdge { edge_id: EdgeId, node_id: NodeId },

    #[error("Duplicate node ID `{node_id}`")]
    DuplicateNode { node_id: NodeId },

    #[error("Duplicate edge ID `{edge_id}`")]
    DuplicateEdge { edge_id: EdgeId },

    #[error("Unknown node `{node_id}`")]
    UnknownNode { node_id: NodeId },

    #[error("Node `{node_id}` has no configuration (not an action node)")]
    NotConfigurable { node_id: NodeId },
}

/// The persisted `{ nodes, edges }` shape of a workflow graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// Graph weight tagged with its insertion sequence number. Stable graphs
/// reuse vacated slots, so index order alone does not give insertion order.
#[derive(Debug, Clone)]
struct Slot<T> {
    seq: u64,
    value: T,
}

/// The editable working copy of a workflow: nodes and directed edges with an
/// adjacency index.
///
/// Invariant: no edge ever references a node that is not in the graph.
/// `add_edge` rejects dangling endpoints and `remove_node` drops every
/// incident edge in the same call.
///
/// All listings (nodes, edges, per-node incoming/outgoing edges) come back in
/// insertion order, which is the order the traversal follows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "GraphDocument", into = "GraphDocument")]
pub struct WorkflowGraph {
    graph: StableDiGraph<Slot<Node>, Slot<Edge>>,
    nodes_by_id: HashMap<NodeId, NodeIndex>,
    edges_by_id: HashMap<EdgeId, EdgeIndex>,
    next_seq: u64,
}

impl WorkflowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a persisted document. Nodes are inserted first, so
    /// any edge naming a missing node fails with [`GraphError::InvalidEdge`].
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node)?;
        }
        for edge in edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    pub fn to_parts(&self) -> (Vec<Node>, Vec<Edge>) {
        (
            self.nodes().into_iter().cloned().collect(),
            self.edges().into_iter().cloned().collect(),
        )
    }

    fn bump(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.nodes_by_id.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode { node_id: node.id });
        }
        let id = node.id.clone();
        let seq = self.bump();
        let idx = self.graph.add_node(Slot { seq, value: node });
        self.nodes_by_id.insert(id, idx);
        Ok(())
    }

    /// Remove a node and every edge that references it.
    pub fn remove_node(&mut self, node_id: &str) -> Option<Node> {
        let idx = self.nodes_by_id.remove(node_id)?;

        let incident: Vec<EdgeIndex> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.graph.edges_directed(idx, Direction::Incoming))
            .map(|e| e.id())
            .collect();
        let mut dropped = 0usize;
        for edge_idx in incident {
            // A self-loop shows up in both directions; the second removal is a no-op.
            if let Some(slot) = self.graph.remove_edge(edge_idx) {
                self.edges_by_id.remove(&slot.value.id);
                dropped += 1;
            }
        }

        let removed = self.graph.remove_node(idx).map(|slot| slot.value);
        tracing::debug!(node_id, dropped_edges = dropped, "removed node");
        removed
    }

    /// Connect two existing nodes.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        if self.edges_by_id.contains_key(&edge.id) {
            return Err(GraphError::DuplicateEdge { edge_id: edge.id });
        }
        let source = self.index_for_edge(&edge, &edge.source)?;
        let target = self.index_for_edge(&edge, &edge.target)?;

        let id = edge.id.clone();
        let seq = self.bump();
        let idx = self.graph.add_edge(source, target, Slot { seq, value: edge });
        self.edges_by_id.insert(id, idx);
        Ok(())
    }

    fn index_for_edge(&self, edge: &Edge, node_id: &str) -> Result<NodeIndex, GraphError> {
        self.nodes_by_id
            .get(node_id)
            .copied()
            .ok_or_else(|| GraphError::InvalidEdge {
                edge_id: edge.id.clone(),
                node_id: node_id.to_string(),
            })
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> Option<Edge> {
        let idx = self.edges_by_id.remove(edge_id)?;
        self.graph.remove_edge(idx).map(|slot| slot.value)
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        let idx = self.nodes_by_id.get(node_id)?;
        self.graph.node_weight(*idx).map(|slot| &slot.value)
    }

    pub fn edge(&self, edge_id: &str) -> Option<&Edge> {
        let idx = self.edges_by_id.get(edge_id)?;
        self.graph.edge_weight(*idx).map(|slot| &slot.value)
    }

    fn node_mut(&mut self, node_id: &str) -> Result<&mut Node, GraphError> {
        self.nodes_by_id
            .get(node_id)
            .and_then(|idx| self.graph.node_weight_mut(*idx))
            .map(|slot| &mut slot.value)
            .ok_or_else(|| GraphError::UnknownNode {
                node_id: node_id.to_string(),
            })
    }

    /// Shallow-merge `patch` into an action node's config.
    pub fn merge_config(&mut self, node_id: &str, patch: Config) -> Result<(), GraphError> {
        let node = self.node_mut(node_id)?;
        if node.merge_config(patch) {
            Ok(())
        } else {
            Err(GraphError::NotConfigurable {
                node_id: node_id.to_string(),
            })
        }
    }

    pub fn set_label(&mut self, node_id: &str, label: impl Into<String>) -> Result<(), GraphError> {
        self.node_mut(node_id)?.label = label.into();
        Ok(())
    }

    pub fn set_position(&mut self, node_id: &str, position: Position) -> Result<(), GraphError> {
        self.node_mut(node_id)?.position = position;
        Ok(())
    }

    /// Replace a condition node's expression.
    pub fn set_condition(&mut self, node_id: &str, expr: Option<String>) -> Result<(), GraphError> {
        let node = self.node_mut(node_id)?;
        match &mut node.kind {
            super::node::NodeKind::Condition { condition } => {
                *condition = expr;
                Ok(())
            }
            _ => Err(GraphError::NotConfigurable {
                node_id: node_id.to_string(),
            }),
        }
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut slots: Vec<&Slot<Node>> = self.graph.node_indices().map(|i| &self.graph[i]).collect();
        slots.sort_by_key(|s| s.seq);
        slots.into_iter().map(|s| &s.value).collect()
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> Vec<&Edge> {
        let mut slots: Vec<&Slot<Edge>> = self.graph.edge_indices().map(|i| &self.graph[i]).collect();
        slots.sort_by_key(|s| s.seq);
        slots.into_iter().map(|s| &s.value).collect()
    }

    fn edges_at(&self, node_id: &str, dir: Direction) -> Vec<&Edge> {
        let Some(&idx) = self.nodes_by_id.get(node_id) else {
            return Vec::new();
        };
        let mut slots: Vec<&Slot<Edge>> = self.graph.edges_directed(idx, dir).map(|e| e.weight()).collect();
        slots.sort_by_key(|s| s.seq);
        slots.into_iter().map(|s| &s.value).collect()
    }

    /// Edges whose target is `node_id`, in insertion order.
    pub fn incoming_edges(&self, node_id: &str) -> Vec<&Edge> {
        self.edges_at(node_id, Direction::Incoming)
    }

    /// Edges whose source is `node_id`, in insertion order.
    pub fn outgoing_edges(&self, node_id: &str) -> Vec<&Edge> {
        self.edges_at(node_id, Direction::Outgoing)
    }

    pub fn nodes_of_kind(&self, category: NodeCategory) -> Vec<&Node> {
        self.nodes()
            .into_iter()
            .filter(|n| n.category() == category)
            .collect()
    }

    pub fn start_nodes(&self) -> Vec<&Node> {
        self.nodes().into_iter().filter(|n| n.is_start()).collect()
    }

    /// IDs of every node reachable from `node_id` (itself included) by
    /// following edges forward.
    pub fn reachable_from(&self, node_id: &str) -> HashSet<NodeId> {
        let mut reached = HashSet::new();
        let Some(&start) = self.nodes_by_id.get(node_id) else {
            return reached;
        };
        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(idx) = dfs.next(&self.graph) {
            reached.insert(self.graph[idx].value.id.clone());
        }
        reached
    }

    pub fn contains_node(&self, node_id: &str) -> bool {
        self.nodes_by_id.contains_key(node_id)
    }

    pub fn contains_edge(&self, edge_id: &str) -> bool {
        self.edges_by_id.contains_key(edge_id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes_by_id.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes_by_id.is_empty()
    }
}

impl TryFrom<GraphDocument> for WorkflowGraph {
    type Error = GraphError;

    fn try_from(doc: GraphDocument) -> Result<Self, Self::Error> {
        WorkflowGraph::from_parts(doc.nodes, doc.edges)
    }
}

impl From<WorkflowGraph> for GraphDocument {
    fn from(graph: WorkflowGraph) -> Self {
        let (nodes, edges) = graph.to_parts();
        GraphDocument { nodes, edges }
    }
}

impl From<&WorkflowGraph> for GraphDocument {
    fn from(graph: &WorkflowGraph) -> Self {
        let (nodes, edges) = graph.to_parts();
        GraphDocument { nodes, edges }
    }
}
