//! Contract selection modes and expiry resolution

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::CCError;

/// Which call to write against the stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Strike nearest to spot
    #[default]
    Atm,
    /// Nearest strike at or below spot
    Itm,
    /// Whichever of ATM and ITM has the higher premium return
    Both,
}

impl SelectionMode {
    pub fn label(&self) -> &'static str {
        match self {
            SelectionMode::Atm => "atm",
            SelectionMode::Itm => "itm",
            SelectionMode::Both => "both",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SelectionMode {
    type Err = CCError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atm" => Ok(SelectionMode::Atm),
            "itm" => Ok(SelectionMode::Itm),
            "both" => Ok(SelectionMode::Both),
            other => Err(CCError::invalid_input(format!("unknown selection mode '{}'", other))),
        }
    }
}

/// Resolve the expiry to trade from the listed ones.
///
/// Exact match wins. Otherwise the listed expiry nearest to `target` among
/// those not before `today`, and if every listed expiry is in the past, the
/// nearest overall. Ties go to the earliest listed.
pub fn resolve_expiry(
    available: &[NaiveDate],
    target: NaiveDate,
    today: NaiveDate,
) -> Option<NaiveDate> {
    if available.contains(&target) {
        return Some(target);
    }

    nearest_to(available.iter().copied().filter(|e| *e >= today), target)
        .or_else(|| nearest_to(available.iter().copied(), target))
}

fn nearest_to(candidates: impl Iterator<Item = NaiveDate>, target: NaiveDate) -> Option<NaiveDate> {
    // min_by_key keeps the first of equal keys
    candidates.min_by_key(|e| (*e - target).num_days().abs())
}

/// First expiry at least `min_days` out, else the first listed
pub fn pick_forward_expiry(
    available: &[NaiveDate],
    today: NaiveDate,
    min_days: i64,
) -> Option<NaiveDate> {
    available
        .iter()
        .copied()
        .find(|e| (*e - today).num_days() >= min_days)
        .or_else(|| available.first().copied())
}

/// Whole days from `today` to `expiry` (negative once expired)
pub fn days_to_expiry(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}
