use rand::Rng;

/// Source of the random market movement applied to quotes.
///
/// `price_jitter` is a unit draw in `[-1, 1]`, scaled by the configured
/// volatility. `impact_scale` in `[0, 1]` multiplies the liquidity price
/// impact.
pub trait MarketNoise {
    fn price_jitter(&mut self) -> f64;
    fn impact_scale(&mut self) -> f64;
}

/// Live noise: uniform price jitter, full price impact.
pub struct RngNoise<R: Rng> {
    rng: R,
}

impl<R: Rng> RngNoise<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MarketNoise for RngNoise<R> {
    fn price_jitter(&mut self) -> f64 {
        self.rng.random_range(-1.0..=1.0)
    }

    fn impact_scale(&mut self) -> f64 {
        1.0
    }
}

/// Constant noise for reproducible quotes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise {
    pub jitter: f64,
    pub impact: f64,
}

impl FixedNoise {
    /// No price movement and no price impact.
    pub fn zero() -> Self {
        Self {
            jitter: 0.0,
            impact: 0.0,
        }
    }

    /// No price movement, full price impact.
    pub fn calm() -> Self {
        Self {
            jitter: 0.0,
            impact: 1.0,
        }
    }
}

impl MarketNoise for FixedNoise {
    fn price_jitter(&mut self) -> f64 {
        self.jitter.clamp(-1.0, 1.0)
    }

    fn impact_scale(&mut self) -> f64 {
        self.impact.clamp(0.0, 1.0)
    }
}
