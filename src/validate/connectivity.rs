use std::collections::HashSet;

use crate::model::{NodeCategory, WorkflowGraph};

use super::ValidationError;

/// Flag action nodes that nothing leads into.
///
/// A node wired directly from a start node is exempt; every other action with
/// no incoming edge is an orphan. Needs at least one start node to be
/// meaningful, so it reports nothing when there is none.
pub fn check_orphans(graph: &WorkflowGraph) -> Vec<ValidationError> {
    let starts = graph.start_nodes();
    if starts.is_empty() {
        return Vec::new();
    }

    let fed_by_start: HashSet<&str> = starts
        .iter()
        .flat_map(|s| graph.outgoing_edges(&s.id))
        .map(|e| e.target.as_str())
        .collect();

    graph
        .nodes_of_kind(NodeCategory::Action)
        .into_iter()
        .filter(|n| graph.incoming_edges(&n.id).is_empty() && !fed_by_start.contains(n.id.as_str()))
        .map(|n| ValidationError::NotConnected {
            node_id: n.id.clone(),
            label: n.label.clone(),
        })
        .collect()
}

/// Warn about nodes the start node can never reach. Only runs with a unique
/// start node.
pub fn check_reachability(graph: &WorkflowGraph) -> Vec<ValidationError> {
    let starts = graph.start_nodes();
    let [start] = starts.as_slice() else {
        return Vec::new();
    };

    let reached = graph.reachable_from(&start.id);
    graph
        .nodes()
        .into_iter()
        .filter(|n| !n.is_start() && !reached.contains(&n.id))
        .map(|n| ValidationError::Unreachable {
            node_id: n.id.clone(),
            label: n.label.clone(),
        })
        .collect()
}
