//! Weekly covered-call roll
//!
//! Each period: write a call struck at spot rounded to the strike grid, price
//! it with Black-Scholes, move to the next spot, then book stock and option
//! P&L against a one-share position. Equity starts at the first spot and
//! compounds period P&L.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{CCError, CCResult};
use crate::models::call_price;

use super::RollParams;

/// One completed weekly cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationPeriod {
    /// Position in the run, from 0
    pub index: usize,
    /// Date the call was written (historical runs only)
    pub sell_date: Option<NaiveDate>,
    /// Date the call expired (historical runs only)
    pub buy_date: Option<NaiveDate>,
    pub spot_start: f64,
    pub spot_end: f64,
    pub strike: f64,
    /// Annualized volatility used for pricing
    pub volatility: f64,
    /// Call premium collected
    pub premium: f64,
    pub stock_pnl: f64,
    pub call_pnl: f64,
    pub total_pnl: f64,
    /// total_pnl over equity before the period
    pub period_return: f64,
    /// Call finished at or below the strike
    pub expired_otm: bool,
}

/// Equity after one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub index: usize,
    pub date: Option<NaiveDate>,
    pub equity: f64,
    pub period_return: f64,
}

/// Time-ordered equity after each period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquityCurve {
    initial_equity: Option<f64>,
    points: Vec<EquityPoint>,
}

impl EquityCurve {
    pub fn points(&self) -> &[EquityPoint] {
        &self.points
    }

    pub fn initial_equity(&self) -> Option<f64> {
        self.initial_equity
    }

    pub fn final_equity(&self) -> Option<f64> {
        self.points.last().map(|p| p.equity).or(self.initial_equity)
    }

    pub fn returns(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.period_return).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Lifecycle of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Initialized,
    /// Number of periods recorded so far
    Running(usize),
    Completed,
}

/// Nearest strike on a grid of `step`, halves to even
pub fn grid_strike(spot: f64, step: f64) -> f64 {
    (spot / step).round_ties_even() * step
}

/// Rolls one-share covered calls period by period
#[derive(Debug, Clone)]
pub struct RollSimulator {
    params: RollParams,
    state: RunState,
    equity: Option<f64>,
    periods: Vec<SimulationPeriod>,
    curve: EquityCurve,
}

impl RollSimulator {
    pub fn new(params: RollParams) -> CCResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            state: RunState::Initialized,
            equity: None,
            periods: Vec::new(),
            curve: EquityCurve::default(),
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn params(&self) -> &RollParams {
        &self.params
    }

    /// Current equity, `None` before the first period
    pub fn equity(&self) -> Option<f64> {
        self.equity
    }

    pub fn periods(&self) -> &[SimulationPeriod] {
        &self.periods
    }

    /// Write a call at `spot`, settle it at `next_spot`
    pub fn roll(
        &mut self,
        spot: f64,
        next_spot: f64,
        volatility: f64,
        dates: Option<(NaiveDate, NaiveDate)>,
    ) -> CCResult<&SimulationPeriod> {
        let index = match self.state {
            RunState::Initialized => 0,
            RunState::Running(n) => n,
            RunState::Completed => {
                return Err(CCError::invalid_input("roll after run completed"));
            }
        };
        if !(spot.is_finite() && spot > 0.0 && next_spot.is_finite() && next_spot > 0.0) {
            return Err(CCError::invalid_input(format!(
                "period {}: spots must be positive, got {} -> {}",
                index, spot, next_spot
            )));
        }
        if !volatility.is_finite() {
            return Err(CCError::invalid_input(format!("period {}: non-finite volatility", index)));
        }

        let p = &self.params;
        let strike = grid_strike(spot, p.strike_step);
        if strike <= 0.0 {
            return Err(CCError::invalid_input(format!(
                "period {}: spot {} rounds to a non-positive strike on a {} grid",
                index, spot, p.strike_step
            )));
        }
        let premium = call_price(spot, strike, p.risk_free_rate, volatility, p.tenor_years);

        let stock_pnl = (next_spot - spot) - p.slippage - p.stock_fee;
        let call_pnl = premium - (next_spot - strike).max(0.0) - p.slippage - p.option_fee;
        let total_pnl = stock_pnl + call_pnl;

        let equity_before = *self.equity.get_or_insert(spot);
        if self.curve.initial_equity.is_none() {
            self.curve.initial_equity = Some(equity_before);
        }
        let period_return = total_pnl / equity_before;
        let equity = equity_before + total_pnl;
        self.equity = Some(equity);

        let (sell_date, buy_date) = match dates {
            Some((s, b)) => (Some(s), Some(b)),
            None => (None, None),
        };

        self.curve.points.push(EquityPoint {
            index,
            date: buy_date,
            equity,
            period_return,
        });
        self.periods.push(SimulationPeriod {
            index,
            sell_date,
            buy_date,
            spot_start: spot,
            spot_end: next_spot,
            strike,
            volatility,
            premium,
            stock_pnl,
            call_pnl,
            total_pnl,
            period_return,
            expired_otm: next_spot <= strike,
        });
        self.state = RunState::Running(index + 1);

        Ok(&self.periods[index])
    }

    /// Stop the run and hand back its periods and equity curve
    pub fn complete(&mut self) -> (Vec<SimulationPeriod>, EquityCurve) {
        self.state = RunState::Completed;
        (
            std::mem::take(&mut self.periods),
            std::mem::take(&mut self.curve),
        )
    }
}
