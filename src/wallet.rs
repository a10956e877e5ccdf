//! Wallet connection and token balances, with change notifications.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;

use crate::sim::{ExecutionResult, Quote};

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Whether `address` looks like a Solana public key: 32 to 44 base58 chars.
pub fn validate_address(address: &str) -> bool {
    (32..=44).contains(&address.len()) && address.chars().all(|c| BASE58_ALPHABET.contains(c))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("Invalid wallet address format")]
    InvalidAddress,

    #[error("no wallet connected")]
    NotConnected,

    #[error("insufficient {mint} balance: have {have}, need {need}")]
    InsufficientBalance { mint: String, have: u64, need: u64 },
}

/// Notifications published to subscribers whenever wallet state changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BalanceEvent {
    Connected { address: String },
    Disconnected,
    #[serde(rename_all = "camelCase")]
    BalanceChanged { mint: String, balance: u64 },
}

/// Snapshot of the wallet for the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletSnapshot {
    pub address: Option<String>,
    pub balances: HashMap<String, u64>,
}

/// Sole owner of wallet state. Other components read snapshots or
/// subscribe to [`BalanceEvent`]s instead of sharing the state.
pub struct BalanceController {
    address: Option<String>,
    /// Base-unit balances keyed by mint.
    balances: HashMap<String, u64>,
    events: broadcast::Sender<BalanceEvent>,
}

impl Default for BalanceController {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceController {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            address: None,
            balances: HashMap::new(),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BalanceEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: BalanceEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    pub fn snapshot(&self) -> WalletSnapshot {
        WalletSnapshot {
            address: self.address.clone(),
            balances: self.balances.clone(),
        }
    }

    /// Connect `address`, replacing any previous wallet and its balances.
    pub fn connect(
        &mut self,
        address: &str,
        balances: impl IntoIterator<Item = (String, u64)>,
    ) -> Result<(), WalletError> {
        if !validate_address(address) {
            return Err(WalletError::InvalidAddress);
        }
        self.address = Some(address.to_string());
        self.balances = balances.into_iter().collect();
        tracing::info!(%address, tokens = self.balances.len(), "wallet connected");

        self.publish(BalanceEvent::Connected {
            address: address.to_string(),
        });
        let mut mints: Vec<&String> = self.balances.keys().collect();
        mints.sort();
        for mint in mints {
            self.publish(BalanceEvent::BalanceChanged {
                mint: mint.clone(),
                balance: self.balances[mint],
            });
        }
        Ok(())
    }

    pub fn disconnect(&mut self) {
        if self.address.take().is_some() {
            self.balances.clear();
            self.publish(BalanceEvent::Disconnected);
        }
    }

    pub fn balance(&self, mint: &str) -> u64 {
        self.balances.get(mint).copied().unwrap_or(0)
    }

    pub fn set_balance(&mut self, mint: &str, balance: u64) -> Result<(), WalletError> {
        if !self.is_connected() {
            return Err(WalletError::NotConnected);
        }
        self.balances.insert(mint.to_string(), balance);
        self.publish(BalanceEvent::BalanceChanged {
            mint: mint.to_string(),
            balance,
        });
        Ok(())
    }

    /// Settle a successful swap: debit the input, credit the filled output.
    /// Unsuccessful results leave balances untouched.
    pub fn apply_swap(&mut self, quote: &Quote, result: &ExecutionResult) -> Result<(), WalletError> {
        if !result.success {
            return Ok(());
        }
        if !self.is_connected() {
            return Err(WalletError::NotConnected);
        }

        let have = self.balance(&quote.input_mint);
        let remaining = have
            .checked_sub(quote.in_amount)
            .ok_or_else(|| WalletError::InsufficientBalance {
                mint: quote.input_mint.clone(),
                have,
                need: quote.in_amount,
            })?;
        let received = result.output_amount.unwrap_or(0);
        let credited = self.balance(&quote.output_mint).saturating_add(received);

        self.set_balance(&quote.input_mint, remaining)?;
        self.set_balance(&quote.output_mint, credited)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_format() {
        assert!(validate_address("So11111111111111111111111111111111111111112"));
        assert!(!validate_address("0x1234567890abcdef1234567890abcdef12345678"));
        assert!(!validate_address("short"));
    }
}
