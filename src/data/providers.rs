//! Market data collaborators
//!
//! The engine never fetches anything itself. Callers plug in whatever source
//! they have (a broker API, a cache, fixtures) through these traits;
//! [`StaticMarket`] is the in-memory implementation.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::core::{CCError, CCResult, OptionQuote, PriceSeries, QuoteChain};

/// Option chains by symbol and expiry
pub trait ChainProvider {
    /// Listed expiries for a symbol, ascending
    fn expirations(&self, symbol: &str) -> CCResult<Vec<NaiveDate>>;

    /// Call quotes for one expiry
    fn calls(&self, symbol: &str, expiry: NaiveDate) -> CCResult<QuoteChain>;
}

/// Current underlying price
pub trait SpotProvider {
    fn spot(&self, symbol: &str) -> CCResult<f64>;
}

/// Next scheduled earnings date, `None` when unknown
pub trait EarningsProvider {
    fn next_earnings(&self, symbol: &str) -> CCResult<Option<NaiveDate>>;
}

/// Daily close history
pub trait HistoryProvider {
    fn daily_closes(&self, symbol: &str) -> CCResult<PriceSeries>;
}

/// In-memory market snapshot
#[derive(Debug, Clone, Default)]
pub struct StaticMarket {
    spots: HashMap<String, f64>,
    chains: HashMap<String, Vec<QuoteChain>>,
    earnings: HashMap<String, NaiveDate>,
    history: HashMap<String, PriceSeries>,
}

impl StaticMarket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_spot(&mut self, symbol: &str, spot: f64) {
        self.spots.insert(symbol.to_string(), spot);
    }

    /// Add calls for an expiry, replacing any existing chain for it
    pub fn add_chain(&mut self, symbol: &str, expiry: NaiveDate, calls: Vec<OptionQuote>) {
        let chains = self.chains.entry(symbol.to_string()).or_default();
        chains.retain(|c| c.expiry != expiry);
        chains.push(QuoteChain::new(symbol, expiry, calls));
        chains.sort_by_key(|c| c.expiry);
    }

    pub fn set_earnings(&mut self, symbol: &str, date: NaiveDate) {
        self.earnings.insert(symbol.to_string(), date);
    }

    pub fn set_history(&mut self, series: PriceSeries) {
        self.history.insert(series.symbol.clone(), series);
    }
}

impl ChainProvider for StaticMarket {
    fn expirations(&self, symbol: &str) -> CCResult<Vec<NaiveDate>> {
        self.chains
            .get(symbol)
            .map(|chains| chains.iter().map(|c| c.expiry).collect())
            .ok_or_else(|| CCError::data_unavailable(format!("no options listed for {}", symbol)))
    }

    fn calls(&self, symbol: &str, expiry: NaiveDate) -> CCResult<QuoteChain> {
        self.chains
            .get(symbol)
            .and_then(|chains| chains.iter().find(|c| c.expiry == expiry))
            .cloned()
            .ok_or_else(|| {
                CCError::data_unavailable(format!("no chain for {} expiring {}", symbol, expiry))
            })
    }
}

impl SpotProvider for StaticMarket {
    fn spot(&self, symbol: &str) -> CCResult<f64> {
        self.spots
            .get(symbol)
            .copied()
            .ok_or_else(|| CCError::data_unavailable(format!("no spot for {}", symbol)))
    }
}

impl EarningsProvider for StaticMarket {
    fn next_earnings(&self, symbol: &str) -> CCResult<Option<NaiveDate>> {
        Ok(self.earnings.get(symbol).copied())
    }
}

impl HistoryProvider for StaticMarket {
    fn daily_closes(&self, symbol: &str) -> CCResult<PriceSeries> {
        self.history
            .get(symbol)
            .cloned()
            .ok_or_else(|| CCError::data_unavailable(format!("no history for {}", symbol)))
    }
}
