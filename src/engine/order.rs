use std::collections::HashSet;

use crate::model::{Node, WorkflowGraph};

use super::TraversalError;

/// The unique start node, or why there isn't one.
pub fn start_node(graph: &WorkflowGraph) -> Result<&Node, TraversalError> {
    let starts = graph.start_nodes();
    match starts.as_slice() {
        [] => Err(TraversalError::NoStartNode),
        [start] => Ok(*start),
        many => Err(TraversalError::MultipleStartNodes { count: many.len() }),
    }
}

/// Walk the graph depth-first from the start node and return every other
/// node it reaches, each exactly once, in first-visit order.
///
/// Children are followed in edge insertion order. The visited check happens
/// when a node is popped, so cycles and diamonds terminate. Nothing past an
/// `end` node is followed, even if it has outgoing edges.
pub fn execution_order(graph: &WorkflowGraph) -> Result<Vec<&Node>, TraversalError> {
    let start = start_node(graph)?;

    let mut visited: HashSet<&str> = HashSet::new();
    let mut order = Vec::new();
    let mut stack: Vec<&str> = vec![start.id.as_str()];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(node) = graph.node(id) else {
            continue;
        };

        if !node.is_start() {
            order.push(node);
        }
        if node.is_end() {
            continue;
        }

        // Reverse so the first edge is popped first.
        for edge in graph.outgoing_edges(id).into_iter().rev() {
            if !visited.contains(edge.target.as_str()) {
                stack.push(edge.target.as_str());
            }
        }
    }

    Ok(order)
}
