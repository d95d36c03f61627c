//! Run summaries: backtest statistics and Monte Carlo return distributions

use serde::{Deserialize, Serialize};

use crate::models::{mean, std_dev};

use super::{EquityCurve, SimulationPeriod, WEEKS_PER_YEAR};

/// Aggregate statistics of a weekly backtest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestSummary {
    pub weeks: usize,
    pub wins: usize,
    /// % of periods with positive total P&L
    pub win_rate_pct: f64,
    /// Cumulative return over the run, %
    pub total_return_pct: f64,
    /// CAGR from weekly compounding, %
    pub annual_return_pct: f64,
    /// Annualized Sharpe of weekly returns; `None` when undefined
    pub sharpe: Option<f64>,
    /// Mean premium per share
    pub avg_premium: f64,
    /// Mean premium as % of spot at sale
    pub avg_premium_pct: f64,
    /// % of calls that expired out of the money
    pub expired_otm_pct: f64,
    pub initial_equity: f64,
    pub final_equity: f64,
}

impl BacktestSummary {
    /// Summarize recorded periods; `None` for an empty run
    pub fn from_periods(periods: &[SimulationPeriod], curve: &EquityCurve) -> Option<Self> {
        let first = periods.first()?;
        let weeks = periods.len();
        let n = weeks as f64;

        let initial_equity = first.spot_start;
        let final_equity = curve.final_equity().unwrap_or(initial_equity);
        let growth = final_equity / initial_equity;

        let wins = periods.iter().filter(|p| p.total_pnl > 0.0).count();
        let expired = periods.iter().filter(|p| p.expired_otm).count();
        let premiums: Vec<f64> = periods.iter().map(|p| p.premium).collect();
        let premium_pcts: Vec<f64> = periods.iter().map(|p| p.premium / p.spot_start).collect();

        Some(Self {
            weeks,
            wins,
            win_rate_pct: 100.0 * wins as f64 / n,
            total_return_pct: 100.0 * (growth - 1.0),
            annual_return_pct: 100.0 * (growth.powf(WEEKS_PER_YEAR / n) - 1.0),
            sharpe: sharpe_ratio(&curve.returns(), WEEKS_PER_YEAR),
            avg_premium: mean(&premiums).unwrap_or(0.0),
            avg_premium_pct: 100.0 * mean(&premium_pcts).unwrap_or(0.0),
            expired_otm_pct: 100.0 * expired as f64 / n,
            initial_equity,
            final_equity,
        })
    }
}

/// Annualized Sharpe ratio with zero risk-free rate: mean / sample std × √periods.
/// `None` with fewer than two returns or zero dispersion.
pub fn sharpe_ratio(returns: &[f64], periods_per_year: f64) -> Option<f64> {
    let m = mean(returns)?;
    let s = std_dev(returns, 1)?;
    if !(s.is_finite() && s > 0.0) {
        return None;
    }
    Some(m / s * periods_per_year.sqrt())
}

/// Percentile with linear interpolation between closest ranks.
/// `sorted` must be ascending; `p` in [0, 100].
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64))
}

/// Terminal returns of simulated paths, in percent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnDistribution {
    returns_pct: Vec<f64>,
}

/// Summary of a [`ReturnDistribution`], all values in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub n_paths: usize,
    pub mean: f64,
    pub median: f64,
    pub p5: f64,
    pub p95: f64,
    pub min: f64,
    pub max: f64,
    /// % of paths that ended below the starting equity
    pub prob_loss_pct: f64,
}

impl ReturnDistribution {
    pub fn new(returns_pct: Vec<f64>) -> Self {
        Self { returns_pct }
    }

    pub fn returns_pct(&self) -> &[f64] {
        &self.returns_pct
    }

    pub fn len(&self) -> usize {
        self.returns_pct.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns_pct.is_empty()
    }

    /// `None` for an empty distribution
    pub fn summary(&self) -> Option<DistributionSummary> {
        let mut sorted = self.returns_pct.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len();
        let losses = sorted.iter().filter(|r| **r < 0.0).count();

        Some(DistributionSummary {
            n_paths: n,
            mean: mean(&sorted)?,
            median: percentile(&sorted, 50.0)?,
            p5: percentile(&sorted, 5.0)?,
            p95: percentile(&sorted, 95.0)?,
            min: *sorted.first()?,
            max: *sorted.last()?,
            prob_loss_pct: 100.0 * losses as f64 / n as f64,
        })
    }
}
