//! Configuration for backtests and forward simulation

use serde::{Deserialize, Serialize};

use crate::core::{CCError, CCResult};

/// One-week option tenor in years
pub const WEEKLY_TENOR: f64 = 7.0 / 365.0;

/// Weekly periods per year, used for annualization
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Per-period roll parameters shared by both simulation modes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollParams {
    /// Annual risk-free rate
    pub risk_free_rate: f64,
    /// Strike grid spacing; strikes are spot rounded to this step
    pub strike_step: f64,
    /// Option tenor in years
    pub tenor_years: f64,
    /// Per-share slippage on each leg
    pub slippage: f64,
    /// Per-share stock commission
    pub stock_fee: f64,
    /// Per-share option commission
    pub option_fee: f64,
}

impl Default for RollParams {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.02,
            strike_step: 1.0,
            tenor_years: WEEKLY_TENOR,
            slippage: 0.0,
            stock_fee: 0.0,
            option_fee: 0.0,
        }
    }
}

impl RollParams {
    pub fn validate(&self) -> CCResult<()> {
        if !(self.strike_step.is_finite() && self.strike_step > 0.0) {
            return Err(CCError::invalid_input("strike_step must be positive"));
        }
        if !self.risk_free_rate.is_finite() || !self.tenor_years.is_finite() {
            return Err(CCError::invalid_input("risk_free_rate and tenor_years must be finite"));
        }
        if [self.slippage, self.stock_fee, self.option_fee]
            .iter()
            .any(|c| !c.is_finite() || *c < 0.0)
        {
            return Err(CCError::invalid_input("costs must be finite and non-negative"));
        }
        Ok(())
    }
}

/// Historical weekly backtest configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    /// Annual risk-free rate
    /// Default: 0.02
    pub risk_free_rate: f64,

    /// Daily returns in the realized-vol window
    /// Default: 21 (one month)
    pub vol_window: usize,

    /// Strike grid spacing
    /// Default: 1.0
    pub strike_step: f64,

    /// Option tenor in years
    /// Default: 7/365
    pub tenor_years: f64,

    /// Per-share slippage charged on both legs
    pub slippage: f64,
    /// Per-share stock commission
    pub stock_fee: f64,
    /// Per-share option commission
    pub option_fee: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        let roll = RollParams::default();
        Self {
            risk_free_rate: roll.risk_free_rate,
            vol_window: 21,
            strike_step: roll.strike_step,
            tenor_years: roll.tenor_years,
            slippage: roll.slippage,
            stock_fee: roll.stock_fee,
            option_fee: roll.option_fee,
        }
    }
}

impl BacktestConfig {
    pub fn roll_params(&self) -> RollParams {
        RollParams {
            risk_free_rate: self.risk_free_rate,
            strike_step: self.strike_step,
            tenor_years: self.tenor_years,
            slippage: self.slippage,
            stock_fee: self.stock_fee,
            option_fee: self.option_fee,
        }
    }

    pub fn validate(&self) -> CCResult<()> {
        if self.vol_window == 0 {
            return Err(CCError::invalid_input("vol_window must be at least 1"));
        }
        self.roll_params().validate()
    }
}

/// Forward Monte Carlo configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    /// Number of independent paths
    /// Default: 2000
    pub n_paths: usize,

    /// Weekly rolls per path
    /// Default: 52
    pub weeks: usize,

    /// Annual risk-free rate
    pub risk_free_rate: f64,

    /// Strike grid spacing
    pub strike_step: f64,

    /// Option tenor and GBM step in years
    /// Default: 7/365
    pub tenor_years: f64,

    /// Relative week-to-week noise on the base volatility
    /// Default: 0.20
    pub vol_of_vol: f64,

    /// Floor for the jittered volatility
    /// Default: 1e-4
    pub min_vol: f64,

    /// Base seed; path `i` draws from stream `i` of this seed
    /// Default: 42
    pub seed: u64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            n_paths: 2000,
            weeks: 52,
            risk_free_rate: 0.02,
            strike_step: 1.0,
            tenor_years: WEEKLY_TENOR,
            vol_of_vol: 0.20,
            min_vol: 1e-4,
            seed: 42,
        }
    }
}

impl MonteCarloConfig {
    pub fn roll_params(&self) -> RollParams {
        RollParams {
            risk_free_rate: self.risk_free_rate,
            strike_step: self.strike_step,
            tenor_years: self.tenor_years,
            ..RollParams::default()
        }
    }

    pub fn validate(&self) -> CCResult<()> {
        if !(self.vol_of_vol.is_finite() && self.vol_of_vol >= 0.0) {
            return Err(CCError::invalid_input("vol_of_vol must be finite and non-negative"));
        }
        if !(self.min_vol.is_finite() && self.min_vol > 0.0) {
            return Err(CCError::invalid_input("min_vol must be positive"));
        }
        if !(self.tenor_years.is_finite() && self.tenor_years > 0.0) {
            return Err(CCError::invalid_input("tenor_years must be positive for the GBM step"));
        }
        self.roll_params().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(BacktestConfig::default().validate().is_ok());
        assert!(MonteCarloConfig::default().validate().is_ok());
        assert_eq!(MonteCarloConfig::default().weeks, 52);
    }

    #[test]
    fn test_invalid_configs() {
        let bt = BacktestConfig {
            strike_step: 0.0,
            ..Default::default()
        };
        assert!(bt.validate().is_err());

        let bt = BacktestConfig {
            vol_window: 0,
            ..Default::default()
        };
        assert!(bt.validate().is_err());

        let bt = BacktestConfig {
            slippage: -0.01,
            ..Default::default()
        };
        assert!(bt.validate().is_err());

        let mc = MonteCarloConfig {
            min_vol: 0.0,
            ..Default::default()
        };
        assert!(mc.validate().is_err());

        for tenor_years in [0.0, -WEEKLY_TENOR, f64::NAN] {
            let mc = MonteCarloConfig {
                tenor_years,
                ..Default::default()
            };
            assert!(matches!(mc.validate(), Err(CCError::InvalidInput(_))), "tenor {}", tenor_years);
        }
    }
}
