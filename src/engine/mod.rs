//! Execution-order traversal of a workflow graph, and the views built on it.

pub mod order;
pub mod plan;
pub mod preview;

use thiserror::Error;

pub use order::{execution_order, start_node};
pub use plan::{PlannedAction, action_plan};
pub use preview::{Step, build_preview};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    #[error("no start node")]
    NoStartNode,

    #[error("multiple start nodes ({count})")]
    MultipleStartNodes { count: usize },
}
