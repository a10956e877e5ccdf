use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::action::{ActionType, ParamSpec};

/// A unique identifier for a node within a workflow.
pub type NodeId = String;

/// Open key-value configuration of an action node. Keys are parameter keys
/// from the action's schema; values are whatever the config panel produced.
pub type Config = serde_json::Map<String, serde_json::Value>;

/// Canvas coordinates. Presentational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which end of the workflow a terminal node marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Terminal {
    Start,
    End,
}

/// Coarse node category, used for `nodes_of_kind` lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum NodeCategory {
    Action,
    Condition,
    StartEnd,
}

/// What a node does. Discriminated by the `kind` field in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeKind {
    /// An executable step; its `config` is checked against the action schema.
    Action {
        #[serde(rename = "actionType")]
        action_type: ActionType,
        #[serde(default)]
        config: Config,
    },
    /// A branch point. Outgoing edges use `sourceHandle` `"true"`/`"false"`.
    Condition {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        condition: Option<String>,
    },
    /// The workflow entry or exit marker.
    StartEnd {
        #[serde(rename = "subType")]
        sub_type: Terminal,
    },
}

/// A vertex of the workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Node {
    /// Unique, immutable identifier.
    pub id: NodeId,
    /// Display name shown on the canvas.
    pub label: String,
    #[serde(default)]
    pub position: Position,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    /// A new action node carrying the action's default label and config.
    pub fn action(id: impl Into<NodeId>, action_type: ActionType) -> Self {
        Self {
            id: id.into(),
            label: action_type.default_label().to_string(),
            position: Position::default(),
            kind: NodeKind::Action {
                action_type,
                config: action_type.default_config(),
            },
        }
    }

    pub fn condition(id: impl Into<NodeId>, condition: Option<String>) -> Self {
        Self {
            id: id.into(),
            label: "Condition".to_string(),
            position: Position::default(),
            kind: NodeKind::Condition { condition },
        }
    }

    pub fn start(id: impl Into<NodeId>) -> Self {
        Self::marker(id, Terminal::Start)
    }

    pub fn end(id: impl Into<NodeId>) -> Self {
        Self::marker(id, Terminal::End)
    }

    fn marker(id: impl Into<NodeId>, sub_type: Terminal) -> Self {
        let label = match sub_type {
            Terminal::Start => "Start",
            Terminal::End => "End",
        };
        Self {
            id: id.into(),
            label: label.to_string(),
            position: Position::default(),
            kind: NodeKind::StartEnd { sub_type },
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set one config entry. No-op on non-action nodes.
    pub fn with_config(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        if let NodeKind::Action { config, .. } = &mut self.kind {
            config.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> NodeCategory {
        match self.kind {
            NodeKind::Action { .. } => NodeCategory::Action,
            NodeKind::Condition { .. } => NodeCategory::Condition,
            NodeKind::StartEnd { .. } => NodeCategory::StartEnd,
        }
    }

    pub fn action_type(&self) -> Option<ActionType> {
        match &self.kind {
            NodeKind::Action { action_type, .. } => Some(*action_type),
            _ => None,
        }
    }

    pub fn config(&self) -> Option<&Config> {
        match &self.kind {
            NodeKind::Action { config, .. } => Some(config),
            _ => None,
        }
    }

    pub fn terminal(&self) -> Option<Terminal> {
        match self.kind {
            NodeKind::StartEnd { sub_type } => Some(sub_type),
            _ => None,
        }
    }

    pub fn is_start(&self) -> bool {
        self.terminal() == Some(Terminal::Start)
    }

    pub fn is_end(&self) -> bool {
        self.terminal() == Some(Terminal::End)
    }

    /// Schema entries this node must have filled in.
    pub fn required_params(&self) -> impl Iterator<Item = &'static ParamSpec> {
        self.action_type()
            .map(|a| a.params())
            .unwrap_or_default()
            .iter()
            .filter(|p| p.required)
    }

    /// Shallow-merge `patch` into the node's config. Returns `false` if the
    /// node has no config (non-action nodes).
    pub fn merge_config(&mut self, patch: Config) -> bool {
        match &mut self.kind {
            NodeKind::Action { config, .. } => {
                for (key, value) in patch {
                    config.insert(key, value);
                }
                true
            }
            _ => false,
        }
    }

    /// Short single-line description for CLI listings.
    pub fn summary(&self) -> String {
        match &self.kind {
            NodeKind::Action { action_type, .. } => format!("{} ({action_type})", self.label),
            NodeKind::Condition { condition } => match condition {
                Some(c) => format!("{} [if {c}]", self.label),
                None => format!("{} [condition]", self.label),
            },
            NodeKind::StartEnd { sub_type } => format!("{} ({sub_type:?})", self.label),
        }
    }
}
