//! Black-Scholes Model
//!
//! Closed-form European call value used in place of a live quote when
//! backtesting or simulating weekly rolls. No dividend term: the strategy
//! holds the stock for one week at a time.

use std::f64::consts::SQRT_2;

use statrs::function::erf::erf;

use crate::core::{CCError, CCResult};

/// Standard normal CDF via the error function
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / SQRT_2))
}

/// Black-Scholes d1 parameter
pub fn d1(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * time.sqrt())
}

/// Black-Scholes d2 parameter
pub fn d2(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    d1(spot, strike, rate, vol, time) - vol * time.sqrt()
}

/// Spot less the discounted strike, floored at zero
pub fn discounted_intrinsic(spot: f64, strike: f64, rate: f64, time: f64) -> f64 {
    (spot - strike * (-rate * time).exp()).max(0.0)
}

/// Black-Scholes European call price.
///
/// With no volatility or no time left the call is worth its discounted
/// intrinsic value. Spot and strike must be positive; see [`validate_inputs`].
pub fn call_price(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    if vol <= 0.0 || time <= 0.0 {
        return discounted_intrinsic(spot, strike, rate, time);
    }

    let d1 = d1(spot, strike, rate, vol, time);
    let d2 = d2(spot, strike, rate, vol, time);
    let df = (-rate * time).exp();

    // rounding can push a deep OTM value a hair below zero
    (spot * norm_cdf(d1) - strike * df * norm_cdf(d2)).max(0.0)
}

/// Check pricing inputs before calling [`call_price`]
pub fn validate_inputs(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> CCResult<()> {
    if !(spot.is_finite() && spot > 0.0) {
        return Err(CCError::invalid_input(format!("spot must be positive, got {}", spot)));
    }
    if !(strike.is_finite() && strike > 0.0) {
        return Err(CCError::invalid_input(format!("strike must be positive, got {}", strike)));
    }
    if !rate.is_finite() || !vol.is_finite() || !time.is_finite() {
        return Err(CCError::invalid_input("rate, volatility and time must be finite"));
    }
    Ok(())
}
