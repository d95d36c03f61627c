//! Batch premium scan
//!
//! Evaluates one expiry across a list of symbols: select a call per symbol,
//! price it at the mid and rank by premium return. Symbols that fail any
//! step are skipped rather than aborting the batch.

mod scanner;

pub use scanner::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::SelectionMode;
use crate::selection::SelectionConfig;

/// Scan settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Liquidity and moneyness thresholds
    pub selection: SelectionConfig,
    /// Which call to write
    pub mode: SelectionMode,
    /// Keep symbols reporting earnings on or before expiry
    /// Default: true
    pub include_earnings_before_expiry: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            selection: SelectionConfig::strict(),
            mode: SelectionMode::Atm,
            include_earnings_before_expiry: true,
        }
    }
}

/// One ranked symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRow {
    pub symbol: String,
    pub spot: f64,
    pub expiry: NaiveDate,
    /// Calendar days from the scan date
    pub days_to_expiry: i64,
    pub mode: SelectionMode,
    pub strike: f64,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub mid: f64,
    pub open_interest: Option<u64>,
    pub volume: Option<u64>,
    /// ((strike - spot) + mid) / spot * 100
    pub premium_return_pct: f64,
    pub next_earnings: Option<NaiveDate>,
    /// Earnings fall on or before expiry
    pub earnings_before_expiry: bool,
}
