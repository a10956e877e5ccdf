use serde::Serialize;

use crate::model::{ActionType, Config, WorkflowGraph};

use super::{TraversalError, execution_order};

/// An action node in execution order, with the config it would run with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedAction {
    pub node_id: String,
    pub action_type: ActionType,
    pub label: String,
    pub config: Config,
}

/// Action nodes only, in the same order as the preview.
pub fn action_plan(graph: &WorkflowGraph) -> Result<Vec<PlannedAction>, TraversalError> {
    let order = execution_order(graph)?;
    Ok(order
        .into_iter()
        .filter_map(|node| {
            let action_type = node.action_type()?;
            Some(PlannedAction {
                node_id: node.id.clone(),
                action_type,
                label: node.label.clone(),
                config: node.config().cloned().unwrap_or_default(),
            })
        })
        .collect())
}
