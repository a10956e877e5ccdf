use crate::model::WorkflowGraph;

use super::ValidationError;

/// Exactly one start node must exist.
pub fn check_start_nodes(graph: &WorkflowGraph) -> Vec<ValidationError> {
    match graph.start_nodes().len() {
        0 => vec![ValidationError::MissingStart],
        1 => Vec::new(),
        count => vec![ValidationError::MultipleStarts { count }],
    }
}

/// The unique start node must lead somewhere. Skipped unless there is
/// exactly one start node.
pub fn check_start_connected(graph: &WorkflowGraph) -> Vec<ValidationError> {
    let starts = graph.start_nodes();
    let [start] = starts.as_slice() else {
        return Vec::new();
    };

    if graph.outgoing_edges(&start.id).is_empty() {
        vec![ValidationError::StartNotConnected {
            node_id: start.id.clone(),
        }]
    } else {
        Vec::new()
    }
}
