use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::engine::Step;
use crate::model::{ActionType, Edge, Node, NodeTemplate, ParamSpec, TemplateKind};

// ── Request types ────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Symbol or mint.
    pub input_mint: String,
    /// Symbol or mint.
    pub output_mint: String,
    /// Base units of the input token.
    pub amount: u64,
    #[serde(default = "default_slippage_bps")]
    pub slippage_bps: u16,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_slippage_bps() -> u16 {
    50
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateRequest {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    /// Whether the stand-in signer approves the confirmation.
    #[serde(default = "default_approve")]
    pub approve: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_approve() -> bool {
    true
}

#[derive(Deserialize)]
pub struct ClusterQuery {
    pub cluster: Option<String>,
}

#[derive(Deserialize)]
pub struct AddressRequest {
    pub address: Option<String>,
}

#[derive(Deserialize)]
pub struct ConnectRequest {
    pub address: String,
    /// Base-unit balances keyed by mint.
    #[serde(default)]
    pub balances: HashMap<String, u64>,
}

// ── Response types ───────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub steps: Vec<Step>,
    /// Set when the walk found nothing to run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AddressResponse {
    pub valid: bool,
    pub message: String,
}

/// A library entry with its parameter schema.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateView {
    #[serde(flatten)]
    pub template: NodeTemplate,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_type: Option<ActionType>,
    pub params: &'static [ParamSpec],
}

impl From<NodeTemplate> for TemplateView {
    fn from(template: NodeTemplate) -> Self {
        let (kind, action_type, params): (_, _, &'static [ParamSpec]) = match template.kind {
            TemplateKind::Action(a) => ("action", Some(a), a.params()),
            TemplateKind::Condition => ("condition", None, &[]),
            TemplateKind::Terminal(_) => ("startEnd", None, &[]),
        };
        Self {
            template,
            kind,
            action_type,
            params,
        }
    }
}
