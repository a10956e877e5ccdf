pub mod action;
pub mod edge;
pub mod graph;
pub mod node;
pub mod template;
pub mod workflow;

pub use action::{ActionGroup, ActionType, ParamSpec, ParamType};
pub use edge::{Edge, EdgeId};
pub use graph::{GraphDocument, GraphError, WorkflowGraph};
pub use node::{Config, Node, NodeCategory, NodeId, NodeKind, Position, Terminal};
pub use template::{NodeTemplate, TemplateKind};
pub use workflow::{NewWorkflow, Workflow, WorkflowPatch};
