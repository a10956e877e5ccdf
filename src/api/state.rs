use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::RwLock;

use crate::jupiter::JupiterClient;
use crate::sim::{ExecutionSimulator, MarketTable, PricingConfig, PricingEngine, RngNoise, SimulatorConfig};
use crate::store::WorkflowStore;
use crate::wallet::BalanceController;

#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub store: Arc<dyn WorkflowStore>,
    pub market: MarketTable,
    pub pricing: PricingConfig,
    pub simulator: SimulatorConfig,
    pub jupiter: JupiterClient,
    pub wallet: RwLock<BalanceController>,
}

impl AppState {
    pub fn new(store: Arc<dyn WorkflowStore>, jupiter: JupiterClient) -> Self {
        Self::with_configs(store, jupiter, PricingConfig::default(), SimulatorConfig::default())
    }

    pub fn with_configs(
        store: Arc<dyn WorkflowStore>,
        jupiter: JupiterClient,
        pricing: PricingConfig,
        simulator: SimulatorConfig,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                market: MarketTable::default(),
                pricing,
                simulator,
                jupiter,
                wallet: RwLock::new(BalanceController::new()),
            }),
        }
    }
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

impl AppStateInner {
    /// A pricing engine for one request.
    pub fn pricing_engine(&self, seed: Option<u64>) -> PricingEngine<RngNoise<StdRng>> {
        PricingEngine::new(self.pricing.clone(), self.market.clone(), RngNoise::new(rng(seed)))
    }

    /// An execution simulator for one request.
    pub fn execution_simulator(&self, seed: Option<u64>) -> ExecutionSimulator<StdRng> {
        let seed = seed.map(|s| s.wrapping_add(1));
        ExecutionSimulator::new(self.simulator.clone(), self.market.clone(), rng(seed))
    }
}
