//! Mock market: reference prices, the AMM pricing engine and the
//! execution simulator.

pub mod executor;
pub mod market;
pub mod noise;
pub mod pricing;

pub use executor::{ConfirmationPolicy, ExecutionError, ExecutionResult, ExecutionSimulator, SimulatorConfig};
pub use market::{MarketTable, TokenInfo};
pub use noise::{FixedNoise, MarketNoise, RngNoise};
pub use pricing::{PricingConfig, PricingEngine, PricingError, Quote};
