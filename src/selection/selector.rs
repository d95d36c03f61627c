//! ContractSelector - picks the call to write from a noisy chain
//!
//! Each mode orders the candidate strikes, then makes two passes over that
//! order: the first accepts only liquid quotes with a sane spread, the second
//! accepts anything with a usable price.

use std::cmp::Ordering;

use crate::core::{OptionQuote, PricedPosition, SelectionMode, SelectionResult};

use super::{premium_return_pct, price_selection, SelectionConfig};

/// Selects one representative call per (chain, spot, mode)
#[derive(Debug, Clone, Default)]
pub struct ContractSelector {
    config: SelectionConfig,
}

impl ContractSelector {
    /// Create a selector with the strict configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: SelectionConfig) -> Self {
        Self { config }
    }

    /// Get current configuration
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Select a call for `mode`, `None` when no contract is available
    pub fn select(
        &self,
        chain: &[OptionQuote],
        spot: f64,
        mode: SelectionMode,
    ) -> Option<SelectionResult> {
        if chain.is_empty() || !(spot.is_finite() && spot > 0.0) {
            return None;
        }

        let quote = match mode {
            SelectionMode::Atm => self.select_atm(chain, spot),
            SelectionMode::Itm => self.select_itm(chain, spot),
            SelectionMode::Both => self.select_best(chain, spot),
        }?;

        Some(SelectionResult::new(quote.clone(), mode))
    }

    /// Select and price in one step
    pub fn select_priced(
        &self,
        chain: &[OptionQuote],
        spot: f64,
        mode: SelectionMode,
    ) -> Option<PricedPosition> {
        self.select(chain, spot, mode)
            .and_then(|selection| price_selection(selection, spot))
    }

    /// Nearest strike to spot, restricted to the ATM band when it is populated
    pub fn select_atm<'a>(&self, chain: &'a [OptionQuote], spot: f64) -> Option<&'a OptionQuote> {
        let struck: Vec<(f64, &OptionQuote)> = chain
            .iter()
            .filter_map(|q| q.strike().map(|k| (k, q)))
            .collect();

        let band: Vec<(f64, &OptionQuote)> = struck
            .iter()
            .copied()
            .filter(|(k, _)| (k - spot).abs() / spot <= self.config.atm_tolerance)
            .collect();

        let mut window = if band.is_empty() { struck } else { band };

        window.sort_by(|(ka, _), (kb, _)| {
            let (da, db) = ((ka - spot).abs(), (kb - spot).abs());
            da.total_cmp(&db).then_with(|| ka.total_cmp(kb))
        });

        self.first_qualifying(window.into_iter().map(|(_, q)| q))
    }

    /// Nearest strike at or below spot, higher strike first on ties
    pub fn select_itm<'a>(&self, chain: &'a [OptionQuote], spot: f64) -> Option<&'a OptionQuote> {
        let mut itm: Vec<(f64, &OptionQuote)> = chain
            .iter()
            .filter_map(|q| q.strike().map(|k| (k, q)))
            .filter(|(k, _)| *k <= spot)
            .collect();

        itm.sort_by(|(ka, _), (kb, _)| {
            let (da, db) = (spot - ka, spot - kb);
            da.total_cmp(&db).then_with(|| kb.total_cmp(ka))
        });

        self.first_qualifying(itm.into_iter().map(|(_, q)| q))
    }

    /// Higher premium return of the ATM and ITM picks; ATM wins ties
    fn select_best<'a>(&self, chain: &'a [OptionQuote], spot: f64) -> Option<&'a OptionQuote> {
        let candidates = [self.select_atm(chain, spot), self.select_itm(chain, spot)];

        let mut best: Option<(f64, &OptionQuote)> = None;
        for quote in candidates.into_iter().flatten() {
            let (Some(strike), Some(mid)) = (quote.strike(), quote.mid().filter(|m| m.is_finite()))
            else {
                continue;
            };
            let ret = premium_return_pct(strike, spot, mid);
            let better = match best {
                Some((best_ret, _)) => ret.partial_cmp(&best_ret) == Some(Ordering::Greater),
                None => true,
            };
            if better {
                best = Some((ret, quote));
            }
        }

        best.map(|(_, q)| q)
    }

    /// Liquid quote first, then anything priced, over the same ordering
    fn first_qualifying<'a>(
        &self,
        ordered: impl Iterator<Item = &'a OptionQuote> + Clone,
    ) -> Option<&'a OptionQuote> {
        ordered
            .clone()
            .find(|q| self.is_liquid(q))
            .or_else(|| ordered.clone().find(|q| q.has_any_price()))
    }

    /// Open interest and volume thresholds met and the spread is valid
    pub fn is_liquid(&self, quote: &OptionQuote) -> bool {
        let oi_ok = quote
            .open_interest
            .map(|oi| oi >= self.config.min_open_interest)
            .unwrap_or(false);
        let vol_ok = quote
            .volume
            .map(|v| v >= self.config.min_volume)
            .unwrap_or(false);

        oi_ok && vol_ok && quote.has_valid_spread()
    }
}

/// Select with an explicit configuration
pub fn select(
    chain: &[OptionQuote],
    spot: f64,
    mode: SelectionMode,
    config: &SelectionConfig,
) -> Option<SelectionResult> {
    ContractSelector::with_config(config.clone()).select(chain, spot, mode)
}
