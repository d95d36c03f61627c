//! Realized volatility as an implied-volatility proxy
//!
//! All estimators take daily data and annualize with 252 trading days.

/// Trading days per year
pub const TRADING_DAYS: f64 = 252.0;

/// Minimum closes before full-history drift and volatility are trusted
pub const MIN_HISTORY: usize = 30;

/// Base volatility when neither implied nor realized volatility is usable
pub const DEFAULT_BASE_VOL: f64 = 0.25;

/// Daily log returns ln(c[i] / c[i-1])
pub fn log_returns(closes: &[f64]) -> Vec<f64> {
    closes.windows(2).map(|w| (w[1] / w[0]).ln()).collect()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation with `ddof` delta degrees of freedom
pub fn std_dev(values: &[f64], ddof: usize) -> Option<f64> {
    if values.len() <= ddof {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() - ddof) as f64).sqrt())
}

/// Annualized rolling realized volatility.
///
/// Population standard deviation of the most recent `window` returns,
/// scaled by √252. `None` when fewer than `window` returns are available.
pub fn annualized_vol(log_returns: &[f64], window: usize) -> Option<f64> {
    if window == 0 || log_returns.len() < window {
        return None;
    }
    let recent = &log_returns[log_returns.len() - window..];
    std_dev(recent, 0).map(|s| s * TRADING_DAYS.sqrt())
}

/// Realized volatility over the whole history (sample std × √252)
pub fn full_history_vol(closes: &[f64]) -> Option<f64> {
    if closes.len() <= MIN_HISTORY {
        return None;
    }
    std_dev(&log_returns(closes), 1).map(|s| s * TRADING_DAYS.sqrt())
}

/// Annualized mean log return, zero for short histories
pub fn annualized_drift(closes: &[f64]) -> f64 {
    if closes.len() <= MIN_HISTORY {
        return 0.0;
    }
    mean(&log_returns(closes)).map(|m| m * TRADING_DAYS).unwrap_or(0.0)
}

/// Base volatility for forward simulation.
///
/// A finite positive implied volatility wins, then full-history realized
/// volatility, then [`DEFAULT_BASE_VOL`].
pub fn resolve_base_volatility(implied_vol: Option<f64>, closes: &[f64]) -> f64 {
    if let Some(iv) = implied_vol.filter(|v| v.is_finite() && *v > 0.0) {
        return iv;
    }

    match full_history_vol(closes).filter(|v| v.is_finite()) {
        Some(rv) => {
            tracing::debug!(rv, "no usable implied vol, using realized");
            rv
        }
        None => {
            tracing::warn!(
                n_closes = closes.len(),
                "no implied vol and too little history, using default base vol"
            );
            DEFAULT_BASE_VOL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_returns() {
        let r = log_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(r.len(), 2);
        assert!((r[0] - (1.1_f64).ln()).abs() < 1e-12);
        assert!((r[1] - (0.9_f64).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_vol_requires_window() {
        assert!(annualized_vol(&[0.01, -0.01], 3).is_none());
        assert!(annualized_vol(&[0.01, -0.01], 0).is_none());
    }

    #[test]
    fn test_vol_uses_most_recent_window() {
        // older returns are huge, the last two alternate ±1%
        let returns = [0.5, -0.5, 0.01, -0.01];
        let vol = annualized_vol(&returns, 2).unwrap();
        assert!((vol - 0.01 * TRADING_DAYS.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_constant_returns_have_zero_vol() {
        assert!(annualized_vol(&[0.002; 21], 21).unwrap() < 1e-12);
    }

    #[test]
    fn test_sample_vs_population() {
        let v = [1.0, 3.0];
        assert!((std_dev(&v, 0).unwrap() - 1.0).abs() < 1e-12);
        assert!((std_dev(&v, 1).unwrap() - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!(std_dev(&[1.0], 1).is_none());
    }

    #[test]
    fn test_drift_needs_history() {
        let short: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        assert_eq!(annualized_drift(&short), 0.0);

        let growth = 1.001_f64;
        let long: Vec<f64> = (0..40).map(|i| 100.0 * growth.powi(i)).collect();
        assert!((annualized_drift(&long) - growth.ln() * TRADING_DAYS).abs() < 1e-9);
    }

    #[test]
    fn test_base_vol_fallbacks() {
        assert_eq!(resolve_base_volatility(Some(0.31), &[]), 0.31);
        assert_eq!(resolve_base_volatility(Some(f64::NAN), &[]), DEFAULT_BASE_VOL);
        assert_eq!(resolve_base_volatility(Some(0.0), &[100.0; 5]), DEFAULT_BASE_VOL);

        let closes: Vec<f64> = (0..40).map(|i| if i % 2 == 0 { 100.0 } else { 101.0 }).collect();
        let rv = resolve_base_volatility(None, &closes);
        assert!(rv > 0.0 && rv != DEFAULT_BASE_VOL);
    }
}
