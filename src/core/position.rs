//! Selected contracts and their priced covered-call positions

use serde::{Deserialize, Serialize};

use super::option::SelectionMode;
use super::quote::OptionQuote;

/// A chosen call and the mode that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub quote: OptionQuote,
    pub mode: SelectionMode,
}

impl SelectionResult {
    pub fn new(quote: OptionQuote, mode: SelectionMode) -> Self {
        Self { quote, mode }
    }

    /// Strike of the selected quote (always present for a selection)
    pub fn strike(&self) -> f64 {
        self.quote.strike().unwrap_or(f64::NAN)
    }
}

/// Covered call priced at the mid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedPosition {
    pub selection: SelectionResult,
    /// Spot the position was priced against
    pub spot: f64,
    /// Execution price of the call
    pub mid: f64,
    /// ((strike - spot) + mid) / spot * 100
    pub premium_return_pct: f64,
}

impl PricedPosition {
    pub fn strike(&self) -> f64 {
        self.selection.strike()
    }
}
