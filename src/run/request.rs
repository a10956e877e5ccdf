use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::action::is_blank;
use crate::model::{ActionType, Config, Node};
use crate::sim::MarketTable;
use crate::sim::market::{DEFAULT_DECIMALS, to_base_units};

const DEFAULT_SLIPPAGE_BPS: u16 = 50;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("node `{node_id}` is not a swap")]
    NotASwap { node_id: String },

    #[error("node `{node_id}` is missing `{field}`")]
    MissingField { node_id: String, field: &'static str },

    #[error("node `{node_id}` has invalid amount `{value}`")]
    InvalidAmount { node_id: String, value: String },

    #[error("node `{node_id}` has invalid slippage `{value}`")]
    InvalidSlippage { node_id: String, value: String },
}

/// A swap node's config resolved to mints and base units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub input_mint: String,
    pub output_mint: String,
    /// Amount in base units of the input mint.
    pub amount: u64,
    /// Amount as entered.
    pub ui_amount: f64,
    pub slippage_bps: u16,
}

/// Config keys a swap-type action keeps its fields under.
struct SwapKeys {
    input: &'static str,
    output: &'static str,
    slippage: &'static str,
    /// Slippage entered in percent rather than basis points.
    percent: bool,
}

fn swap_keys(action: ActionType) -> Option<SwapKeys> {
    match action {
        ActionType::DefiSwap => Some(SwapKeys {
            input: "inputToken",
            output: "outputToken",
            slippage: "slippageBps",
            percent: false,
        }),
        ActionType::JupiterSwap => Some(SwapKeys {
            input: "inputMint",
            output: "outputMint",
            slippage: "slippageBps",
            percent: false,
        }),
        ActionType::Swap => Some(SwapKeys {
            input: "sourceToken",
            output: "targetToken",
            slippage: "slippage",
            percent: true,
        }),
        _ => None,
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl SwapRequest {
    pub fn from_node(node: &Node, market: &MarketTable) -> Result<Self, PlanError> {
        let action = node.action_type().ok_or_else(|| PlanError::NotASwap {
            node_id: node.id.clone(),
        })?;
        let empty = Config::new();
        Self::from_config(&node.id, action, node.config().unwrap_or(&empty), market)
    }

    /// Token fields take a known symbol or a raw mint. Unknown mints are
    /// assumed to have 9 decimals.
    pub fn from_config(
        node_id: &str,
        action: ActionType,
        config: &Config,
        market: &MarketTable,
    ) -> Result<Self, PlanError> {
        let keys = swap_keys(action).ok_or_else(|| PlanError::NotASwap {
            node_id: node_id.to_string(),
        })?;

        let text = |field: &'static str| -> Result<String, PlanError> {
            match config.get(field) {
                Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
                _ => Err(PlanError::MissingField {
                    node_id: node_id.to_string(),
                    field,
                }),
            }
        };

        let (input_mint, input_decimals) = match market.resolve(&text(keys.input)?) {
            Some(t) => (t.mint.clone(), t.decimals),
            None => (text(keys.input)?, DEFAULT_DECIMALS),
        };
        let output_mint = match market.resolve(&text(keys.output)?) {
            Some(t) => t.mint.clone(),
            None => text(keys.output)?,
        };

        let raw_amount = config.get("amount").ok_or(PlanError::MissingField {
            node_id: node_id.to_string(),
            field: "amount",
        })?;
        let ui_amount = number(raw_amount)
            .filter(|a| a.is_finite() && *a > 0.0)
            .ok_or_else(|| PlanError::InvalidAmount {
                node_id: node_id.to_string(),
                value: crate::model::action::display_value(raw_amount),
            })?;

        let slippage_bps = match config.get(keys.slippage).filter(|v| !is_blank(v)) {
            None => DEFAULT_SLIPPAGE_BPS,
            Some(v) => {
                let invalid = || PlanError::InvalidSlippage {
                    node_id: node_id.to_string(),
                    value: crate::model::action::display_value(v),
                };
                let n = number(v).ok_or_else(invalid)?;
                let bps = if keys.percent { n * 100.0 } else { n };
                if !(0.0..=10_000.0).contains(&bps) {
                    return Err(invalid());
                }
                bps.round() as u16
            }
        };

        Ok(Self {
            input_mint,
            output_mint,
            amount: to_base_units(ui_amount, input_decimals),
            ui_amount,
            slippage_bps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::market::{SOL_MINT, USDC_DEVNET_MINT};

    #[test]
    fn defi_swap_symbols_resolve() {
        let node = Node::action("n", ActionType::DefiSwap)
            .with_config("inputToken", "SOL")
            .with_config("outputToken", "USDC")
            .with_config("amount", "1");
        let req = SwapRequest::from_node(&node, &MarketTable::default()).unwrap();
        assert_eq!(req.input_mint, SOL_MINT);
        assert_eq!(req.output_mint, USDC_DEVNET_MINT);
        assert_eq!(req.amount, 1_000_000_000);
        assert_eq!(req.slippage_bps, 50);
    }

    #[test]
    fn module_swap_reads_percent() {
        let node = Node::action("n", ActionType::Swap).with_config("slippage", "2.5");
        let req = SwapRequest::from_node(&node, &MarketTable::default()).unwrap();
        assert_eq!(req.slippage_bps, 250);
        assert_eq!(req.input_mint, "BTC");
        assert_eq!(req.amount, 500_000_000);
    }

    #[test]
    fn non_swap_is_rejected() {
        let node = Node::action("n", ActionType::Stake);
        assert!(matches!(
            SwapRequest::from_node(&node, &MarketTable::default()),
            Err(PlanError::NotASwap { .. })
        ));
    }
}
