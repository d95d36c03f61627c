//! Execution price and premium-return metric for a selected call

use crate::core::{positive, PricedPosition, SelectionResult};

/// Execution price from bid, ask and last.
///
/// A sane two-sided market (both positive, ask >= bid) gives the average.
/// Otherwise the largest positive price among bid, ask and last, and `None`
/// when nothing is usable.
pub fn mid_price(bid: Option<f64>, ask: Option<f64>, last: Option<f64>) -> Option<f64> {
    let (bid, ask, last) = (positive(bid), positive(ask), positive(last));

    if let (Some(b), Some(a)) = (bid, ask) {
        if a >= b {
            return Some(0.5 * (b + a));
        }
    }

    [bid, ask, last].into_iter().flatten().reduce(f64::max)
}

/// Percentage gain if the covered call is assigned at the strike:
/// strike markup plus premium, relative to spot
pub fn premium_return_pct(strike: f64, spot: f64, mid: f64) -> f64 {
    ((strike - spot) + mid) / spot * 100.0
}

/// Price a selection at its mid, `None` without a finite mid
pub fn price_selection(selection: SelectionResult, spot: f64) -> Option<PricedPosition> {
    let strike = selection.quote.strike()?;
    let mid = selection.quote.mid().filter(|m| m.is_finite())?;

    Some(PricedPosition {
        premium_return_pct: premium_return_pct(strike, spot, mid),
        selection,
        spot,
        mid,
    })
}
