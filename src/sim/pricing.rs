use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::market::MarketTable;
use super::noise::MarketNoise;

const BPS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("input and output token must differ (both `{mint}`)")]
    IdenticalMint { mint: String },

    #[error("slippage {bps} bps is above 10000 bps")]
    InvalidSlippage { bps: u16 },
}

/// Tunables of the mock AMM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Max relative price move per quote, e.g. `0.02` for ±2%.
    pub volatility: f64,
    /// Flat trading fee in basis points.
    pub fee_bps: u64,
    /// Price impact cap, in percent.
    pub max_impact_pct: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            volatility: 0.02,
            fee_bps: 30,
            max_impact_pct: 5.0,
        }
    }
}

/// A priced swap. Amounts are in base units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub input_mint: String,
    pub output_mint: String,
    pub in_amount: u64,
    pub out_amount: u64,
    pub price_impact_pct: f64,
    pub fee_amount: u64,
    /// `out_amount` less the slippage tolerance.
    pub minimum_out_amount: u64,
    pub slippage_bps: u16,
}

/// Constant-product style mock pricing with injectable market noise.
pub struct PricingEngine<N: MarketNoise> {
    config: PricingConfig,
    market: MarketTable,
    noise: N,
}

impl<N: MarketNoise> PricingEngine<N> {
    pub fn new(config: PricingConfig, market: MarketTable, noise: N) -> Self {
        Self {
            config,
            market,
            noise,
        }
    }

    pub fn market(&self) -> &MarketTable {
        &self.market
    }

    /// Reference price of `mint` moved by one noise draw.
    fn current_price(&mut self, mint: &str) -> f64 {
        let jitter = self.noise.price_jitter() * self.config.volatility;
        self.market.price(mint) * (1.0 + jitter)
    }

    /// Price impact in percent for trading `amount_in` across the pair.
    pub fn price_impact_pct(&self, input_mint: &str, output_mint: &str, amount_in: u64) -> f64 {
        let avg_liquidity = (self.market.liquidity(input_mint) + self.market.liquidity(output_mint)) / 2.0;
        if avg_liquidity <= 0.0 {
            return self.config.max_impact_pct;
        }
        (amount_in as f64 / avg_liquidity * 100.0).min(self.config.max_impact_pct)
    }

    /// Quote swapping `amount_in` base units of `input_mint` for `output_mint`.
    pub fn quote(
        &mut self,
        input_mint: &str,
        output_mint: &str,
        amount_in: u64,
        slippage_bps: u16,
    ) -> Result<Quote, PricingError> {
        if amount_in == 0 {
            return Err(PricingError::InvalidAmount);
        }
        if input_mint == output_mint {
            return Err(PricingError::IdenticalMint {
                mint: input_mint.to_string(),
            });
        }
        if u64::from(slippage_bps) > BPS {
            return Err(PricingError::InvalidSlippage { bps: slippage_bps });
        }

        let input_price = self.current_price(input_mint);
        let output_price = self.current_price(output_mint);

        let raw_out = amount_in as f64 * input_price / output_price;
        let fee = raw_out * self.config.fee_bps as f64 / BPS as f64;
        let after_fee = raw_out - fee;

        let impact_pct =
            self.price_impact_pct(input_mint, output_mint, amount_in) * self.noise.impact_scale();
        let impact_amount = after_fee * impact_pct / 100.0;
        let out_amount = (after_fee - impact_amount).floor().max(0.0) as u64;

        let minimum_out_amount =
            (u128::from(out_amount) * u128::from(BPS - u64::from(slippage_bps)) / u128::from(BPS)) as u64;

        let quote = Quote {
            input_mint: input_mint.to_string(),
            output_mint: output_mint.to_string(),
            in_amount: amount_in,
            out_amount,
            price_impact_pct: impact_pct,
            fee_amount: fee.floor().max(0.0) as u64,
            minimum_out_amount,
            slippage_bps,
        };
        tracing::info!(
            input = %self.market.symbol(input_mint),
            output = %self.market.symbol(output_mint),
            in_amount = amount_in,
            out_amount = quote.out_amount,
            impact_pct,
            "quoted swap"
        );
        Ok(quote)
    }
}
