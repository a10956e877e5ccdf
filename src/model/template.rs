use serde::Serialize;

use super::action::{ActionGroup, ActionType};
use super::node::{Node, NodeId, Position, Terminal};

/// What dropping a template onto the canvas produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Action(ActionType),
    Condition,
    Terminal(Terminal),
}

/// A draggable entry of the node library.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTemplate {
    /// Stable template id, e.g. `actionNode-defiSwap` or `startEndNode-start`.
    pub id: String,
    pub label: &'static str,
    pub description: &'static str,
    pub group: ActionGroup,
    #[serde(skip)]
    pub kind: TemplateKind,
}

impl NodeTemplate {
    pub fn for_action(action: ActionType) -> Self {
        Self {
            id: format!("actionNode-{}", action.as_str()),
            label: action.default_label(),
            description: action.description(),
            group: action.group(),
            kind: TemplateKind::Action(action),
        }
    }

    fn condition() -> Self {
        Self {
            id: "conditionNode".to_string(),
            label: "Condition",
            description: "Branch on a boolean expression",
            group: ActionGroup::General,
            kind: TemplateKind::Condition,
        }
    }

    fn terminal(sub_type: Terminal) -> Self {
        let (id, label, description) = match sub_type {
            Terminal::Start => ("startEndNode-start", "Start", "Workflow entry point"),
            Terminal::End => ("startEndNode-end", "End", "Workflow exit point"),
        };
        Self {
            id: id.to_string(),
            label,
            description,
            group: ActionGroup::General,
            kind: TemplateKind::Terminal(sub_type),
        }
    }

    /// Every template in library order: start, end, condition, then actions.
    pub fn all() -> Vec<NodeTemplate> {
        let mut templates = vec![
            Self::terminal(Terminal::Start),
            Self::terminal(Terminal::End),
            Self::condition(),
        ];
        templates.extend(ActionType::ALL.into_iter().map(Self::for_action));
        templates
    }

    pub fn find(id: &str) -> Option<NodeTemplate> {
        Self::all().into_iter().find(|t| t.id == id)
    }

    /// Create a fresh node from this template. Action nodes start with a copy
    /// of the action's default config.
    pub fn instantiate(&self, id: impl Into<NodeId>, position: Position) -> Node {
        let node = match self.kind {
            TemplateKind::Action(action) => Node::action(id, action),
            TemplateKind::Condition => Node::condition(id, None),
            TemplateKind::Terminal(Terminal::Start) => Node::start(id),
            TemplateKind::Terminal(Terminal::End) => Node::end(id),
        };
        node.with_position(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_ids_are_unique() {
        let all = NodeTemplate::all();
        let mut ids: Vec<&str> = all.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), all.len());
    }

    #[test]
    fn instantiate_copies_defaults() {
        let tpl = NodeTemplate::find("actionNode-jupiterSwap").unwrap();
        let node = tpl.instantiate("n1", Position::new(10.0, 20.0));
        assert_eq!(node.label, "Jupiter Swap");
        assert_eq!(node.config().unwrap()["inputMint"], "SOL");
        assert_eq!(node.position.x, 10.0);
    }
}
