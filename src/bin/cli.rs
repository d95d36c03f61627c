//! CC Options CLI
//!
//! Demonstrates pricing, a synthetic backtest and a seeded forward
//! simulation. Pass a JSON engine config path to override defaults.
//! Set `RUST_LOG=debug` for engine logs.

use chrono::{Datelike, Duration, NaiveDate};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use tracing_subscriber::EnvFilter;

use cc_options::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => match EngineConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Could not load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    println!("Covered-Call Engine");
    println!("===================\n");

    // Weekly ATM call
    let (spot, strike, rate, vol) = (100.0, 100.0, 0.02, 0.20);
    println!("Black-Scholes weekly call:");
    println!("  Spot: ${:.2}  Strike: ${:.2}  Rate: {:.1}%  Vol: {:.1}%", spot, strike, rate * 100.0, vol * 100.0);
    let premium = bs_call_price(spot, strike, rate, vol, WEEKLY_TENOR);
    println!("  Premium: ${:.4} ({:.2}% of spot)\n", premium, premium / spot * 100.0);

    // Chain selection
    let chain = vec![
        OptionQuote::new(98.0).with_bid_ask(2.6, 2.8).with_liquidity(900, 120),
        OptionQuote::new(99.0).with_bid_ask(1.9, 2.1).with_liquidity(1200, 300),
        OptionQuote::new(100.0).with_bid_ask(1.3, 1.4).with_liquidity(2500, 800),
        OptionQuote::new(101.0).with_bid_ask(0.8, 0.9).with_liquidity(1500, 400),
    ];
    let selector = ContractSelector::with_config(config.selection.clone());
    println!("Selection at spot $99.60:");
    for mode in [SelectionMode::Atm, SelectionMode::Itm, SelectionMode::Both] {
        match selector.select_priced(&chain, 99.6, mode) {
            Some(p) => println!(
                "  {:<4} strike ${:.2}  mid ${:.3}  premium return {:.2}%",
                mode.label(),
                p.strike(),
                p.mid,
                p.premium_return_pct
            ),
            None => println!("  {:<4} no contract", mode.label()),
        }
    }

    // Backtest over a synthetic random walk
    let series = match synthetic_series("DEMO", 100.0, 2 * 252, 7) {
        Ok(series) => series,
        Err(e) => {
            eprintln!("Could not build synthetic history: {}", e);
            std::process::exit(1);
        }
    };
    println!("\nBacktest ({} daily closes, {}-day vol window):", series.len(), config.backtest.vol_window);
    match run_backtest(&series, &config.backtest) {
        Ok(report) => {
            let s = &report.summary;
            println!("  Weeks: {}  Win rate: {:.1}%", s.weeks, s.win_rate_pct);
            println!("  Total return: {:.2}%  Annualized: {:.2}%", s.total_return_pct, s.annual_return_pct);
            match s.sharpe {
                Some(sharpe) => println!("  Sharpe: {:.2}", sharpe),
                None => println!("  Sharpe: n/a"),
            }
            println!("  Avg premium: ${:.3} ({:.2}% of spot)", s.avg_premium, s.avg_premium_pct);
            println!("  Expired OTM: {:.1}%", s.expired_otm_pct);
            println!("  Equity: ${:.2} -> ${:.2}", s.initial_equity, s.final_equity);
        }
        Err(e) => println!("  Backtest failed: {}", e),
    }

    // Forward simulation seeded from the synthetic history
    let inputs = ForwardInputs::resolve(series.last_close().unwrap_or(100.0), &chain, &series.closes());
    let mc = &config.monte_carlo;
    println!(
        "\nMonte Carlo ({} paths x {} weeks, seed {}):",
        mc.n_paths, mc.weeks, mc.seed
    );
    println!("  Spot: ${:.2}  Base vol: {:.1}%  Drift: {:.2}%", inputs.spot, inputs.base_vol * 100.0, inputs.drift * 100.0);
    match MonteCarlo::with_config(mc.clone()).run_inputs(&inputs) {
        Ok(dist) => match dist.summary() {
            Some(s) => {
                println!("  Mean: {:.2}%  Median: {:.2}%", s.mean, s.median);
                println!("  5th pct: {:.2}%  95th pct: {:.2}%", s.p5, s.p95);
                println!("  Min: {:.2}%  Max: {:.2}%", s.min, s.max);
                println!("  P(loss): {:.1}%", s.prob_loss_pct);
            }
            None => println!("  No paths simulated"),
        },
        Err(e) => println!("  Simulation failed: {}", e),
    }
}

/// Weekday closes following a seeded lognormal walk
fn synthetic_series(symbol: &str, start: f64, n: usize, seed: u64) -> CCResult<PriceSeries> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    // ~22% annualized daily noise with a small upward drift
    let step: Normal<f64> = Normal::new(0.0003, 0.014).map_err(|e| CCError::numerical(e.to_string()))?;

    let mut bars = Vec::with_capacity(n);
    let mut date = NaiveDate::from_ymd_opt(2023, 1, 2)
        .ok_or_else(|| CCError::invalid_input("bad start date"))?;
    let mut close = start;
    while bars.len() < n {
        if date.weekday().num_days_from_monday() < 5 {
            bars.push(DailyBar::new(date, close));
            close *= step.sample(&mut rng).exp();
        }
        date += Duration::days(1);
    }

    PriceSeries::new(symbol, bars)
}
