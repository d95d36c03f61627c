//! Liquidity and moneyness thresholds for contract selection

use serde::{Deserialize, Serialize};

/// Thresholds applied by [`super::ContractSelector`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Minimum open interest for a liquid quote.
    /// A quote with no open interest reported never qualifies.
    pub min_open_interest: u64,

    /// Minimum traded volume for a liquid quote.
    /// A quote with no volume reported never qualifies.
    pub min_volume: u64,

    /// ATM band as a fraction of spot: |K - S| / S <= tolerance.
    /// When no strike falls inside the band the whole chain is used.
    pub atm_tolerance: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl SelectionConfig {
    /// Batch scanner settings: real liquidity, 2% ATM band
    pub fn strict() -> Self {
        Self {
            min_open_interest: 100,
            min_volume: 10,
            atm_tolerance: 0.02,
        }
    }

    /// Interactive settings: any open interest, 5% ATM band
    pub fn relaxed() -> Self {
        Self {
            min_open_interest: 1,
            min_volume: 0,
            atm_tolerance: 0.05,
        }
    }
}
