//! Forward Monte Carlo of weekly covered-call rolls
//!
//! Each path starts from the same spot and base volatility, moves the spot
//! week by week along a GBM step and rolls one call per week through the
//! shared [`RollSimulator`]. Week-to-week implied volatility is jittered
//! around the base value.
//!
//! Path `i` draws from stream `i` of a `ChaCha8Rng` seeded with the configured
//! seed, so a distribution is reproducible whether paths run in parallel or not.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, StandardNormal};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::{CCError, CCResult, OptionQuote};
use crate::models::{annualized_drift, resolve_base_volatility};

use super::{MonteCarloConfig, ReturnDistribution, RollSimulator};

/// Std of the standard-normal multiplier applied to vol-of-vol
const VOL_JITTER_STD: f64 = 0.5;

/// Pick the forward ATM call: lowest strike at or above spot, else the
/// strike closest to spot.
pub fn forward_atm_quote(calls: &[OptionQuote], spot: f64) -> Option<&OptionQuote> {
    let priced = || calls.iter().filter_map(|q| q.strike().map(|k| (k, q)));

    priced()
        .filter(|(k, _)| *k >= spot)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .or_else(|| {
            priced().min_by(|a, b| {
                (a.0 - spot)
                    .abs()
                    .total_cmp(&(b.0 - spot).abs())
                    .then(a.0.total_cmp(&b.0))
            })
        })
        .map(|(_, q)| q)
}

/// Starting point of a forward simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForwardInputs {
    pub spot: f64,
    pub base_vol: f64,
    pub drift: f64,
}

impl ForwardInputs {
    /// Derive inputs from a forward chain and daily closes.
    ///
    /// Volatility comes from the forward ATM quote's implied vol when usable,
    /// then realized volatility, then the default. Drift is the annualized
    /// mean log return.
    pub fn resolve(spot: f64, calls: &[OptionQuote], closes: &[f64]) -> Self {
        let atm_iv = forward_atm_quote(calls, spot).and_then(|q| q.implied_vol);
        Self {
            spot,
            base_vol: resolve_base_volatility(atm_iv, closes),
            drift: annualized_drift(closes),
        }
    }
}

/// Seeded forward simulator
#[derive(Debug, Clone, Default)]
pub struct MonteCarlo {
    config: MonteCarloConfig,
}

impl MonteCarlo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MonteCarloConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Terminal returns, in percent, of `n_paths` independent paths
    pub fn run(&self, spot: f64, base_vol: f64, drift: f64) -> CCResult<ReturnDistribution> {
        self.config.validate()?;
        if !(spot.is_finite() && spot > 0.0) {
            return Err(CCError::invalid_input(format!("spot must be positive, got {}", spot)));
        }
        if !(base_vol.is_finite() && base_vol >= 0.0) {
            return Err(CCError::invalid_input(format!(
                "base volatility must be finite and non-negative, got {}",
                base_vol
            )));
        }
        if !drift.is_finite() {
            return Err(CCError::invalid_input("drift must be finite"));
        }

        let n_paths = self.config.n_paths;
        if n_paths == 0 {
            return Ok(ReturnDistribution::default());
        }

        let jitter = Normal::new(0.0, VOL_JITTER_STD).map_err(|e| CCError::numerical(e.to_string()))?;

        #[cfg(feature = "parallel")]
        let returns: CCResult<Vec<f64>> = (0..n_paths)
            .into_par_iter()
            .map(|i| self.simulate_path(spot, base_vol, drift, &jitter, &mut self.path_rng(i as u64)))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let returns: CCResult<Vec<f64>> = (0..n_paths)
            .map(|i| self.simulate_path(spot, base_vol, drift, &jitter, &mut self.path_rng(i as u64)))
            .collect();

        let dist = ReturnDistribution::new(returns?);
        tracing::info!(
            n_paths,
            weeks = self.config.weeks,
            seed = self.config.seed,
            base_vol,
            drift,
            "monte carlo complete"
        );
        Ok(dist)
    }

    /// Run from resolved [`ForwardInputs`]
    pub fn run_inputs(&self, inputs: &ForwardInputs) -> CCResult<ReturnDistribution> {
        self.run(inputs.spot, inputs.base_vol, inputs.drift)
    }

    fn path_rng(&self, index: u64) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        rng.set_stream(index);
        rng
    }

    /// One path; returns 100·(final equity / spot − 1)
    fn simulate_path<R: Rng + ?Sized>(
        &self,
        spot: f64,
        base_vol: f64,
        drift: f64,
        jitter: &Normal<f64>,
        rng: &mut R,
    ) -> CCResult<f64> {
        let cfg = &self.config;
        let dt = cfg.tenor_years;
        let sqrt_dt = dt.sqrt();

        let mut sim = RollSimulator::new(cfg.roll_params())?;
        let mut s = spot;
        let mut vol = base_vol;

        for _ in 0..cfg.weeks {
            let z: f64 = StandardNormal.sample(rng);
            let next = s * ((drift - 0.5 * vol * vol) * dt + vol * sqrt_dt * z).exp();
            sim.roll(s, next, vol, None)?;
            s = next;

            let n: f64 = jitter.sample(rng);
            vol = (base_vol * (1.0 + cfg.vol_of_vol * n)).max(cfg.min_vol);
        }

        let equity = sim.equity().unwrap_or(spot);
        Ok(100.0 * (equity / spot - 1.0))
    }
}

/// Simulate `config.n_paths` forward years from `spot`
pub fn run_monte_carlo(
    spot: f64,
    base_vol: f64,
    drift: f64,
    config: &MonteCarloConfig,
) -> CCResult<ReturnDistribution> {
    MonteCarlo::with_config(config.clone()).run(spot, base_vol, drift)
}
