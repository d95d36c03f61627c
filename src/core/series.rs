//! Underlying price history

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{CCError, CCResult};

/// One daily close
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub close: f64,
}

impl DailyBar {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Daily closes for one symbol, strictly ordered by date
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    bars: Vec<DailyBar>,
}

impl PriceSeries {
    /// Build a series, dropping non-finite or non-positive closes.
    ///
    /// Bars are sorted by date; duplicate dates are rejected.
    pub fn new(symbol: impl Into<String>, mut bars: Vec<DailyBar>) -> CCResult<Self> {
        bars.retain(|b| b.close.is_finite() && b.close > 0.0);
        bars.sort_by_key(|b| b.date);

        if let Some(w) = bars.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(CCError::invalid_input(format!("duplicate bar for {}", w[0].date)));
        }

        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_cleans_and_sorts() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        let series = PriceSeries::new(
            "SPY",
            vec![
                DailyBar::new(d(5), 101.0),
                DailyBar::new(d(3), 100.0),
                DailyBar::new(d(4), f64::NAN),
            ],
        )
        .unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![100.0, 101.0]);
        assert_eq!(series.last_close(), Some(101.0));
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let result = PriceSeries::new("SPY", vec![DailyBar::new(d, 1.0), DailyBar::new(d, 2.0)]);
        assert!(matches!(result, Err(CCError::InvalidInput(_))));
    }
}
