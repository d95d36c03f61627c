//! Option quote data
//!
//! Call-option snapshots as delivered by a chain provider. Every field except
//! the identity may be missing or NaN in upstream data, so accessors treat a
//! NaN exactly like an absent value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Keep a value only when it is present and not NaN
pub(crate) fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// Keep a value only when it is present and strictly positive
pub(crate) fn positive(value: Option<f64>) -> Option<f64> {
    present(value).filter(|v| *v > 0.0)
}

/// Call option market quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Strike price
    pub strike: Option<f64>,
    /// Bid price
    pub bid: Option<f64>,
    /// Ask price
    pub ask: Option<f64>,
    /// Last traded price
    pub last: Option<f64>,
    /// Open interest
    pub open_interest: Option<u64>,
    /// Trading volume
    pub volume: Option<u64>,
    /// Implied volatility (if provided by exchange)
    pub implied_vol: Option<f64>,
}

impl OptionQuote {
    /// Create a quote with only a strike
    pub fn new(strike: f64) -> Self {
        Self {
            strike: Some(strike),
            bid: None,
            ask: None,
            last: None,
            open_interest: None,
            volume: None,
            implied_vol: None,
        }
    }

    pub fn with_bid_ask(mut self, bid: f64, ask: f64) -> Self {
        self.bid = Some(bid);
        self.ask = Some(ask);
        self
    }

    pub fn with_last(mut self, last: f64) -> Self {
        self.last = Some(last);
        self
    }

    pub fn with_liquidity(mut self, open_interest: u64, volume: u64) -> Self {
        self.open_interest = Some(open_interest);
        self.volume = Some(volume);
        self
    }

    pub fn with_implied_vol(mut self, iv: f64) -> Self {
        self.implied_vol = Some(iv);
        self
    }

    /// Strike if present and finite
    pub fn strike(&self) -> Option<f64> {
        self.strike.filter(|k| k.is_finite())
    }

    /// Bid and ask both present, bid positive, ask not below bid
    pub fn has_valid_spread(&self) -> bool {
        match (positive(self.bid), present(self.ask)) {
            (Some(bid), Some(ask)) => ask >= bid,
            _ => false,
        }
    }

    /// Any of bid, ask or last is usable as a price
    pub fn has_any_price(&self) -> bool {
        positive(self.bid).is_some() || positive(self.ask).is_some() || positive(self.last).is_some()
    }

    /// Execution price estimate (see [`crate::selection::mid_price`])
    pub fn mid(&self) -> Option<f64> {
        crate::selection::mid_price(self.bid, self.ask, self.last)
    }
}

/// Calls for a single underlying and expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteChain {
    /// Underlying symbol
    pub underlying: String,
    /// Expiry date
    pub expiry: NaiveDate,
    /// Call quotes in provider order
    pub calls: Vec<OptionQuote>,
}

impl QuoteChain {
    pub fn new(underlying: impl Into<String>, expiry: NaiveDate, calls: Vec<OptionQuote>) -> Self {
        Self {
            underlying: underlying.into(),
            expiry,
            calls,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_counts_as_absent() {
        let mut quote = OptionQuote::new(100.0).with_bid_ask(f64::NAN, 2.0);
        assert!(!quote.has_valid_spread());
        assert!(quote.has_any_price());

        quote.ask = Some(f64::NAN);
        assert!(!quote.has_any_price());
        assert!(quote.mid().is_none());
    }

    #[test]
    fn test_spread_validity() {
        assert!(OptionQuote::new(100.0).with_bid_ask(1.0, 1.0).has_valid_spread());
        assert!(!OptionQuote::new(100.0).with_bid_ask(1.2, 1.0).has_valid_spread());
        assert!(!OptionQuote::new(100.0).with_bid_ask(0.0, 1.0).has_valid_spread());
    }

    #[test]
    fn test_missing_strike() {
        let mut quote = OptionQuote::new(100.0);
        quote.strike = Some(f64::NAN);
        assert!(quote.strike().is_none());
    }
}
