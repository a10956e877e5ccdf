use serde::{Deserialize, Serialize};

use crate::model::action::{display_value, is_blank};
use crate::model::{Node, NodeKind, Terminal, WorkflowGraph};

use super::{TraversalError, execution_order};

/// One line of the execution preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub node_id: String,
    /// Action wire name, `"condition"` or `"end"`.
    #[serde(rename = "type")]
    pub step_type: String,
    pub label: String,
    pub details: String,
}

/// Ordered preview of what running the workflow would do. An empty list
/// means no executable actions were found, which is not an error.
pub fn build_preview(graph: &WorkflowGraph) -> Result<Vec<Step>, TraversalError> {
    let order = execution_order(graph)?;
    Ok(order.into_iter().filter_map(step_for).collect())
}

fn step_for(node: &Node) -> Option<Step> {
    let (step_type, details) = match &node.kind {
        NodeKind::Action { action_type, config } => {
            let mut parts = Vec::new();
            for param in action_type.params() {
                if let Some(value) = config.get(param.key).filter(|v| !is_blank(v)) {
                    parts.push(format!("{}: {}", param.label, display_value(value)));
                }
            }
            // Keys outside the schema still show up, under their raw name.
            for (key, value) in config {
                if action_type.param(key).is_none() && !is_blank(value) {
                    parts.push(format!("{key}: {}", display_value(value)));
                }
            }
            let details = if parts.is_empty() {
                "No configuration".to_string()
            } else {
                parts.join(", ")
            };
            (action_type.as_str().to_string(), details)
        }
        NodeKind::Condition { condition } => {
            let details = condition
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or("No condition specified")
                .to_string();
            ("condition".to_string(), details)
        }
        NodeKind::StartEnd { sub_type: Terminal::End } => {
            ("end".to_string(), "Workflow completes".to_string())
        }
        NodeKind::StartEnd { sub_type: Terminal::Start } => return None,
    };

    Some(Step {
        node_id: node.id.clone(),
        step_type,
        label: node.label.clone(),
        details,
    })
}

/// CLI entry point for the `preview` subcommand.
pub fn run(path: &std::path::Path) -> anyhow::Result<()> {
    let loaded = crate::validate::load(path)?;
    let steps = match build_preview(&loaded.graph) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Cannot build preview: {e}");
            std::process::exit(1);
        }
    };

    if steps.is_empty() {
        println!("No executable actions found.");
        return Ok(());
    }

    println!("Execution preview ({} steps):", steps.len());
    for (i, step) in steps.iter().enumerate() {
        println!("  {}. [{}] {} | {}", i + 1, step.step_type, step.label, step.details);
    }
    Ok(())
}
