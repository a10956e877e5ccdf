use serde::Serialize;

/// Reference price used for mints missing from the table.
pub const DEFAULT_PRICE: f64 = 1.0;
/// Reference liquidity used for mints missing from the table.
pub const DEFAULT_LIQUIDITY: f64 = 100_000.0;
/// Decimals assumed for mints missing from the table.
pub const DEFAULT_DECIMALS: u8 = 9;

pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const USDC_DEVNET_MINT: &str = "4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU";
pub const USDC_MAINNET_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const USDT_MAINNET_MINT: &str = "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB";
pub const USDT_DEVNET_MINT: &str = "BRjpCHtyQLNCo8gqRUr8jtdAj5AjPYQaoqbvcZiHok1k";
pub const MSOL_MINT: &str = "mSoLzYCxHdYgdzU16g5QSh3i5K3z3KZK7ytfqcJm7So";

/// Static market data for one token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub mint: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    /// Base reference price in USD.
    pub price: f64,
    /// Base liquidity level, in the same raw units as trade amounts.
    pub liquidity: f64,
    /// Mainnet-only mint; rejected on the devnet swap path.
    pub mainnet: bool,
}

impl TokenInfo {
    fn new(mint: &str, symbol: &str, name: &str, decimals: u8, price: f64, liquidity: f64) -> Self {
        Self {
            mint: mint.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            decimals,
            price,
            liquidity,
            mainnet: false,
        }
    }

    fn mainnet(mut self) -> Self {
        self.mainnet = true;
        self
    }

    /// Convert a human amount (e.g. `1.5` SOL) to base units.
    pub fn to_base_units(&self, ui_amount: f64) -> u64 {
        to_base_units(ui_amount, self.decimals)
    }

    /// Convert base units back to a human amount.
    pub fn to_ui_amount(&self, base_units: u64) -> f64 {
        base_units as f64 / 10f64.powi(self.decimals as i32)
    }
}

pub fn to_base_units(ui_amount: f64, decimals: u8) -> u64 {
    (ui_amount * 10f64.powi(decimals as i32)).round().max(0.0) as u64
}

/// Lookup table of reference prices and liquidity per mint.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketTable {
    tokens: Vec<TokenInfo>,
}

impl Default for MarketTable {
    fn default() -> Self {
        Self {
            tokens: vec![
                TokenInfo::new(SOL_MINT, "SOL", "Wrapped SOL", 9, 150.0, 1_000_000.0),
                TokenInfo::new(USDC_DEVNET_MINT, "USDC", "USD Coin (Devnet)", 6, 1.0, 5_000_000.0),
                TokenInfo::new(USDT_DEVNET_MINT, "USDT", "Tether USD (Devnet)", 6, 1.0, 100_000.0),
                TokenInfo::new(MSOL_MINT, "mSOL", "Marinade staked SOL", 9, 160.0, 100_000.0),
                TokenInfo::new(USDC_MAINNET_MINT, "USDC", "USD Coin", 6, 1.0, 5_000_000.0).mainnet(),
                TokenInfo::new(USDT_MAINNET_MINT, "USDT", "Tether USD", 6, 1.0, 500_000.0).mainnet(),
            ],
        }
    }
}

impl MarketTable {
    pub fn new(tokens: Vec<TokenInfo>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[TokenInfo] {
        &self.tokens
    }

    pub fn by_mint(&self, mint: &str) -> Option<&TokenInfo> {
        self.tokens.iter().find(|t| t.mint == mint)
    }

    /// Look up a token by mint address, or by symbol (case-insensitive).
    /// Symbols resolve to the devnet mint.
    pub fn resolve(&self, symbol_or_mint: &str) -> Option<&TokenInfo> {
        let key = symbol_or_mint.trim();
        self.by_mint(key).or_else(|| {
            self.tokens
                .iter()
                .find(|t| !t.mainnet && t.symbol.eq_ignore_ascii_case(key))
        })
    }

    pub fn price(&self, mint: &str) -> f64 {
        self.by_mint(mint).map_or(DEFAULT_PRICE, |t| t.price)
    }

    pub fn liquidity(&self, mint: &str) -> f64 {
        self.by_mint(mint).map_or(DEFAULT_LIQUIDITY, |t| t.liquidity)
    }

    pub fn decimals(&self, mint: &str) -> u8 {
        self.by_mint(mint).map_or(DEFAULT_DECIMALS, |t| t.decimals)
    }

    /// Display symbol, falling back to an abbreviated mint.
    pub fn symbol(&self, mint: &str) -> String {
        if let Some(t) = self.by_mint(mint) {
            return t.symbol.clone();
        }
        let chars: Vec<char> = mint.chars().collect();
        if chars.len() > 8 {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{head}..{tail}")
        } else {
            mint.to_string()
        }
    }

    pub fn is_mainnet_only(&self, mint: &str) -> bool {
        self.by_mint(mint).is_some_and(|t| t.mainnet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_resolve_to_devnet() {
        let market = MarketTable::default();
        assert_eq!(market.resolve("usdc").unwrap().mint, USDC_DEVNET_MINT);
        assert_eq!(market.resolve(USDC_MAINNET_MINT).unwrap().symbol, "USDC");
        assert!(market.resolve("BONK").is_none());
    }

    #[test]
    fn unknown_mints_use_defaults() {
        let market = MarketTable::default();
        assert_eq!(market.price("unknown"), DEFAULT_PRICE);
        assert_eq!(market.liquidity("unknown"), DEFAULT_LIQUIDITY);
    }

    #[test]
    fn base_unit_conversion() {
        let market = MarketTable::default();
        let sol = market.resolve("SOL").unwrap();
        assert_eq!(sol.to_base_units(1.5), 1_500_000_000);
        assert_eq!(sol.to_ui_amount(250_000_000), 0.25);
    }
}
