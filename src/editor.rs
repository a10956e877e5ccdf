//! Editing session for one workflow: the working graph plus the selection
//! and save state that the canvas and config panel share.

use thiserror::Error;

use crate::engine::{Step, TraversalError, build_preview};
use crate::model::{
    Config, Edge, EdgeId, GraphError, NewWorkflow, Node, NodeId, NodeTemplate, Position, Workflow, WorkflowGraph,
    WorkflowPatch,
};
use crate::validate::{ValidationResult, validate};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error("unknown node template `{0}`")]
    UnknownTemplate(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    graph: WorkflowGraph,
    selected: Option<NodeId>,
    name: String,
    description: Option<String>,
    workflow_id: Option<i64>,
    dirty: bool,
    next_id: u64,
}

impl EditorSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Open a saved workflow for editing.
    pub fn load(workflow: &Workflow) -> Result<Self, EditorError> {
        Ok(Self {
            graph: workflow.graph()?,
            selected: None,
            name: workflow.name.clone(),
            description: workflow.description.clone(),
            workflow_id: Some(workflow.id),
            dirty: false,
            next_id: 0,
        })
    }

    pub fn graph(&self) -> &WorkflowGraph {
        &self.graph
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.dirty = true;
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.dirty = true;
    }

    pub fn workflow_id(&self) -> Option<i64> {
        self.workflow_id
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Next `prefix-N` id not already used by a node or an edge.
    fn fresh_id(&mut self, prefix: &str) -> String {
        loop {
            self.next_id += 1;
            let id = format!("{prefix}-{}", self.next_id);
            if !self.graph.contains_node(&id) && !self.graph.contains_edge(&id) {
                return id;
            }
        }
    }

    // ── Graph edits ─────────────────────────────────────────────────

    /// Drop a library template onto the canvas. Returns the new node's id.
    pub fn drop_template(&mut self, template_id: &str, position: Position) -> Result<NodeId, EditorError> {
        let template =
            NodeTemplate::find(template_id).ok_or_else(|| EditorError::UnknownTemplate(template_id.to_string()))?;
        let id = self.fresh_id("node");
        self.graph.add_node(template.instantiate(id.clone(), position))?;
        self.dirty = true;
        tracing::debug!(node_id = %id, template = template_id, "dropped node");
        Ok(id)
    }

    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
        source_handle: Option<String>,
    ) -> Result<EdgeId, EditorError> {
        let id = self.fresh_id("edge");
        let mut edge = Edge::new(id.clone(), source, target);
        edge.source_handle = source_handle;
        self.graph.add_edge(edge)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn update_config(&mut self, node_id: &str, patch: Config) -> Result<(), EditorError> {
        self.graph.merge_config(node_id, patch)?;
        self.dirty = true;
        Ok(())
    }

    pub fn rename_node(&mut self, node_id: &str, label: impl Into<String>) -> Result<(), EditorError> {
        self.graph.set_label(node_id, label)?;
        self.dirty = true;
        Ok(())
    }

    pub fn set_condition(&mut self, node_id: &str, expr: Option<String>) -> Result<(), EditorError> {
        self.graph.set_condition(node_id, expr)?;
        self.dirty = true;
        Ok(())
    }

    /// Positions are presentational; moving does not mark the session dirty.
    pub fn move_node(&mut self, node_id: &str, position: Position) -> Result<(), EditorError> {
        self.graph.set_position(node_id, position)?;
        Ok(())
    }

    /// Delete a node with its edges, dropping the selection if it pointed there.
    pub fn delete_node(&mut self, node_id: &str) -> Option<Node> {
        let removed = self.graph.remove_node(node_id)?;
        if self.selected.as_deref() == Some(node_id) {
            self.selected = None;
        }
        self.dirty = true;
        Some(removed)
    }

    pub fn delete_edge(&mut self, edge_id: &str) -> Option<Edge> {
        let removed = self.graph.remove_edge(edge_id)?;
        self.dirty = true;
        Some(removed)
    }

    // ── Selection ───────────────────────────────────────────────────

    pub fn select(&mut self, node_id: &str) -> Result<(), EditorError> {
        if !self.graph.contains_node(node_id) {
            return Err(GraphError::UnknownNode {
                node_id: node_id.to_string(),
            }
            .into());
        }
        self.selected = Some(node_id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.graph.node(self.selected.as_deref()?)
    }

    // ── Checks and persistence ──────────────────────────────────────

    pub fn validate(&self) -> ValidationResult {
        validate(&self.graph)
    }

    pub fn preview(&self) -> Result<Vec<Step>, TraversalError> {
        build_preview(&self.graph)
    }

    pub fn to_new_workflow(&self) -> NewWorkflow {
        NewWorkflow::from_graph(self.name.clone(), self.description.clone(), &self.graph)
    }

    pub fn to_patch(&self) -> WorkflowPatch {
        let (nodes, edges) = self.graph.to_parts();
        WorkflowPatch {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            nodes: Some(nodes),
            edges: Some(edges),
        }
    }

    /// Record that the current state was saved under `workflow_id`.
    pub fn mark_saved(&mut self, workflow_id: i64) {
        self.workflow_id = Some(workflow_id);
        self.dirty = false;
    }
}
