use crate::model::action::is_blank;
use crate::model::{NodeCategory, WorkflowGraph};

use super::ValidationError;

/// Every required parameter of every action node must be set.
pub fn check_required_fields(graph: &WorkflowGraph) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for node in graph.nodes_of_kind(NodeCategory::Action) {
        let Some(config) = node.config() else {
            continue;
        };
        for param in node.required_params() {
            let set = config.get(param.key).is_some_and(|v| !is_blank(v));
            if !set {
                errors.push(ValidationError::MissingField {
                    node_id: node.id.clone(),
                    label: node.label.clone(),
                    field: param.label.to_string(),
                });
            }
        }
    }

    errors
}
