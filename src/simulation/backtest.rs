//! Historical weekly covered-call backtest
//!
//! Sells a grid-ATM call at each Friday close, priced with Black-Scholes at
//! the trailing realized volatility, and settles it at the next Friday close.

use serde::{Deserialize, Serialize};

use crate::core::{CCError, CCResult, PriceSeries};
use crate::data::{build_cycles, RollCycle};

use super::{BacktestConfig, BacktestSummary, EquityCurve, RollSimulator, SimulationPeriod};

/// Output of a completed backtest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub periods: Vec<SimulationPeriod>,
    pub equity_curve: EquityCurve,
    pub summary: BacktestSummary,
    /// Cycles dropped for missing volatility
    pub skipped_cycles: usize,
}

/// Replays weekly rolls over a price history
#[derive(Debug, Clone, Default)]
pub struct Backtester {
    config: BacktestConfig,
}

impl Backtester {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BacktestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Backtest over daily closes.
    ///
    /// Fails with `DataUnavailable` for an empty series and
    /// `InsufficientHistory` when no cycle can be priced.
    pub fn run(&self, series: &PriceSeries) -> CCResult<BacktestReport> {
        self.config.validate()?;

        if series.is_empty() {
            return Err(CCError::data_unavailable(format!(
                "no price history for '{}'",
                series.symbol
            )));
        }
        if series.len() <= self.config.vol_window {
            return Err(CCError::insufficient_history(format!(
                "{} closes for '{}', need more than the {}-day volatility window",
                series.len(),
                series.symbol,
                self.config.vol_window
            )));
        }

        let cycles = build_cycles(series.bars(), self.config.vol_window);
        tracing::debug!(symbol = %series.symbol, n_cycles = cycles.len(), "built weekly cycles");

        self.run_cycles(&cycles)
    }

    /// Backtest over prepared weekly cycles.
    ///
    /// Cycles without a finite volatility are skipped and excluded from
    /// every aggregate.
    pub fn run_cycles(&self, cycles: &[RollCycle]) -> CCResult<BacktestReport> {
        let mut sim = RollSimulator::new(self.config.roll_params())?;
        let mut skipped_cycles = 0;

        for cycle in cycles {
            let Some(vol) = cycle.volatility.filter(|v| v.is_finite()) else {
                tracing::debug!(sell = %cycle.sell_date, "no volatility estimate, skipping cycle");
                skipped_cycles += 1;
                continue;
            };
            sim.roll(
                cycle.spot_start,
                cycle.spot_end,
                vol,
                Some((cycle.sell_date, cycle.buy_date)),
            )?;
        }

        let (periods, equity_curve) = sim.complete();
        let summary = BacktestSummary::from_periods(&periods, &equity_curve).ok_or_else(|| {
            CCError::insufficient_history(format!(
                "no eligible weekly cycles ({} skipped); use a shorter vol window or longer history",
                skipped_cycles
            ))
        })?;

        tracing::info!(
            weeks = summary.weeks,
            win_rate = summary.win_rate_pct,
            total_return = summary.total_return_pct,
            "backtest complete"
        );

        Ok(BacktestReport {
            periods,
            equity_curve,
            summary,
            skipped_cycles,
        })
    }
}

/// Backtest `series` with `config`
pub fn run_backtest(series: &PriceSeries, config: &BacktestConfig) -> CCResult<BacktestReport> {
    Backtester::with_config(config.clone()).run(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DailyBar;
    use chrono::{Datelike, Duration, NaiveDate};

    fn cycle(week: i64, start: f64, end: f64, vol: Option<f64>) -> RollCycle {
        let first = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        RollCycle {
            sell_date: first + Duration::weeks(week),
            buy_date: first + Duration::weeks(week + 1),
            spot_start: start,
            spot_end: end,
            volatility: vol,
        }
    }

    fn weekday_series(n: usize, close: impl Fn(usize) -> f64) -> PriceSeries {
        let mut bars = Vec::new();
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        while bars.len() < n {
            if date.weekday().num_days_from_monday() < 5 {
                let i = bars.len();
                bars.push(DailyBar::new(date, close(i)));
            }
            date += Duration::days(1);
        }
        PriceSeries::new("TEST", bars).unwrap()
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::new("TEST", vec![]).unwrap();
        assert!(matches!(Backtester::new().run(&series), Err(CCError::DataUnavailable(_))));
    }

    #[test]
    fn test_short_series() {
        let series = weekday_series(15, |_| 100.0);
        assert!(matches!(
            Backtester::new().run(&series),
            Err(CCError::InsufficientHistory(_))
        ));
    }

    #[test]
    fn test_no_cycles_is_insufficient() {
        assert!(matches!(
            Backtester::new().run_cycles(&[]),
            Err(CCError::InsufficientHistory(_))
        ));
        // every cycle lacks volatility
        let cycles = [cycle(0, 100.0, 101.0, None), cycle(1, 101.0, 100.0, Some(f64::NAN))];
        assert!(matches!(
            Backtester::new().run_cycles(&cycles),
            Err(CCError::InsufficientHistory(_))
        ));
    }

    #[test]
    fn test_skipped_cycles_excluded() {
        let cycles = [
            cycle(0, 100.0, 101.0, None),
            cycle(1, 101.0, 102.0, Some(0.2)),
            cycle(2, 102.0, 101.0, Some(0.2)),
        ];
        let report = Backtester::new().run_cycles(&cycles).unwrap();
        assert_eq!(report.skipped_cycles, 1);
        assert_eq!(report.summary.weeks, 2);
        assert_eq!(report.summary.initial_equity, 101.0);
        assert_eq!(report.periods[0].index, 0);
        assert_eq!(report.periods[0].sell_date, Some(cycles[1].sell_date));
    }

    #[test]
    fn test_flat_series_keeps_premium() {
        let series = weekday_series(120, |_| 50.0);
        let report = Backtester::new().run(&series).unwrap();

        assert!(report.summary.weeks > 10);
        for p in &report.periods {
            assert_eq!(p.stock_pnl, 0.0);
            assert_eq!(p.call_pnl, p.premium);
            assert!(p.expired_otm);
            assert_eq!(p.volatility, 0.0);
        }
        assert_eq!(report.summary.expired_otm_pct, 100.0);
        assert_eq!(report.summary.win_rate_pct, 100.0);
    }

    #[test]
    fn test_equity_curve_dates_increase() {
        let series = weekday_series(200, |i| 100.0 + (i as f64 * 0.7).sin() * 3.0);
        let report = Backtester::new().run(&series).unwrap();

        let dates: Vec<NaiveDate> = report
            .equity_curve
            .points()
            .iter()
            .filter_map(|p| p.date)
            .collect();
        assert_eq!(dates.len(), report.periods.len());
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }
}
