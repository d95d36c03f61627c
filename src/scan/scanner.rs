//! Scanner - per-symbol evaluation against market data providers

use chrono::NaiveDate;

use crate::core::{days_to_expiry, CCError, CCResult};
use crate::data::{ChainProvider, EarningsProvider, SpotProvider};
use crate::selection::ContractSelector;

use super::{ScanConfig, ScanRow};

/// Ranks covered-call premiums across symbols
pub struct Scanner<'a, P: ?Sized> {
    provider: &'a P,
    selector: ContractSelector,
    config: ScanConfig,
}

impl<'a, P> Scanner<'a, P>
where
    P: ChainProvider + SpotProvider + EarningsProvider + ?Sized,
{
    pub fn new(provider: &'a P) -> Self {
        Self::with_config(provider, ScanConfig::default())
    }

    pub fn with_config(provider: &'a P, config: ScanConfig) -> Self {
        Self {
            provider,
            selector: ContractSelector::with_config(config.selection.clone()),
            config,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Evaluate one symbol for `expiry`.
    ///
    /// Errors when the expiry is not listed, spot is unusable or the chain
    /// is empty. `Ok(None)` when no contract qualifies or none has a price.
    pub fn scan_symbol(
        &self,
        symbol: &str,
        expiry: NaiveDate,
        today: NaiveDate,
    ) -> CCResult<Option<ScanRow>> {
        let expirations = self.provider.expirations(symbol)?;
        if !expirations.contains(&expiry) {
            return Err(CCError::data_unavailable(format!(
                "{}: expiry {} not listed",
                symbol, expiry
            )));
        }

        let spot = self.provider.spot(symbol)?;
        if !(spot.is_finite() && spot > 0.0) {
            return Err(CCError::invalid_input(format!("{}: bad spot {}", symbol, spot)));
        }

        let chain = self.provider.calls(symbol, expiry)?;
        if chain.is_empty() {
            return Err(CCError::data_unavailable(format!(
                "{}: empty chain for {}",
                symbol, expiry
            )));
        }

        let Some(position) = self.selector.select_priced(&chain.calls, spot, self.config.mode) else {
            tracing::debug!(symbol, %expiry, "no qualifying call");
            return Ok(None);
        };

        let next_earnings = match self.provider.next_earnings(symbol) {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!(symbol, error = %e, "earnings lookup failed");
                None
            }
        };

        let quote = &position.selection.quote;
        Ok(Some(ScanRow {
            symbol: symbol.to_string(),
            spot,
            expiry,
            days_to_expiry: days_to_expiry(expiry, today),
            mode: self.config.mode,
            strike: position.strike(),
            bid: quote.bid,
            ask: quote.ask,
            mid: position.mid,
            open_interest: quote.open_interest,
            volume: quote.volume,
            premium_return_pct: position.premium_return_pct,
            next_earnings,
            earnings_before_expiry: next_earnings.is_some_and(|d| d <= expiry),
        }))
    }

    /// Scan every symbol, best premium return first
    pub fn scan<S: AsRef<str>>(&self, symbols: &[S], expiry: NaiveDate, today: NaiveDate) -> Vec<ScanRow> {
        let mut rows = Vec::new();

        for symbol in symbols {
            let symbol = symbol.as_ref();
            match self.scan_symbol(symbol, expiry, today) {
                Ok(Some(row)) => {
                    if row.earnings_before_expiry && !self.config.include_earnings_before_expiry {
                        tracing::debug!(symbol, "earnings before expiry, excluded");
                        continue;
                    }
                    tracing::debug!(symbol, premium_return = row.premium_return_pct, "scanned");
                    rows.push(row);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(symbol, error = %e, "skipping symbol"),
            }
        }

        rows.sort_by(|a, b| b.premium_return_pct.total_cmp(&a.premium_return_pct));
        tracing::info!(n_symbols = symbols.len(), n_rows = rows.len(), %expiry, "scan complete");
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OptionQuote, SelectionMode};
    use crate::data::StaticMarket;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn liquid(strike: f64, bid: f64, ask: f64) -> OptionQuote {
        OptionQuote::new(strike).with_bid_ask(bid, ask).with_liquidity(500, 50)
    }

    fn market() -> StaticMarket {
        let mut m = StaticMarket::new();
        m.set_spot("AAA", 100.0);
        m.add_chain("AAA", d(6, 20), vec![liquid(100.0, 1.0, 1.2), liquid(105.0, 0.2, 0.3)]);
        m.set_spot("BBB", 50.0);
        m.add_chain("BBB", d(6, 20), vec![liquid(50.0, 1.5, 1.7)]);
        m.set_earnings("BBB", d(6, 18));
        m.set_spot("CCC", 20.0);
        m.add_chain("CCC", d(6, 27), vec![liquid(20.0, 0.5, 0.6)]);
        m
    }

    #[test]
    fn test_scan_symbol_row() {
        let m = market();
        let row = Scanner::new(&m).scan_symbol("AAA", d(6, 20), d(6, 13)).unwrap().unwrap();
        assert_eq!(row.strike, 100.0);
        assert!((row.mid - 1.1).abs() < 1e-12);
        assert!((row.premium_return_pct - 1.1).abs() < 1e-9);
        assert_eq!(row.days_to_expiry, 7);
        assert_eq!(row.mode, SelectionMode::Atm);
        assert!(!row.earnings_before_expiry);
    }

    #[test]
    fn test_unlisted_expiry_is_an_error() {
        let m = market();
        let scanner = Scanner::new(&m);
        assert!(scanner.scan_symbol("CCC", d(6, 20), d(6, 13)).is_err());
        assert!(scanner.scan_symbol("ZZZ", d(6, 20), d(6, 13)).is_err());
    }

    #[test]
    fn test_scan_ranks_and_skips() {
        let m = market();
        let rows = Scanner::new(&m).scan(&["AAA", "BBB", "CCC", "ZZZ"], d(6, 20), d(6, 13));
        let symbols: Vec<&str> = rows.iter().map(|r| r.symbol.as_str()).collect();
        // BBB 3.2% beats AAA 1.1%; CCC lacks the expiry, ZZZ is unknown
        assert_eq!(symbols, vec!["BBB", "AAA"]);
        assert!(rows[0].earnings_before_expiry);
    }

    #[test]
    fn test_scan_excludes_earnings_when_asked() {
        let m = market();
        let config = ScanConfig {
            include_earnings_before_expiry: false,
            ..Default::default()
        };
        let rows = Scanner::with_config(&m, config).scan(&["AAA", "BBB"], d(6, 20), d(6, 13));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].symbol, "AAA");
    }
}
