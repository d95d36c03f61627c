//! # CC Options - Covered-Call Selection and Simulation
//!
//! Evaluates short-dated covered calls on equities: pick the call to write
//! from a live chain, price it, and measure the premium yield of writing it
//! against owned stock. Without a live chain, Black-Scholes stands in for the
//! quote to backtest historical weekly rolls or to simulate a year of forward
//! rolls.
//!
//! ## Key Components
//!
//! - **Selection**: ATM / ITM / best-of contract selection under liquidity rules
//! - **Black-Scholes**: theoretical call premium
//! - **Volatility**: rolling realized volatility as an implied-vol proxy
//! - **Simulation**: weekly roll backtest and seeded Monte Carlo
//! - **Scan**: rank one expiry across many symbols
//!
//! ## Usage
//!
//! ```rust
//! use cc_options::prelude::*;
//!
//! let chain = vec![
//!     OptionQuote::new(99.0).with_bid_ask(2.0, 2.2).with_liquidity(500, 40),
//!     OptionQuote::new(101.0).with_bid_ask(0.9, 1.1).with_liquidity(800, 60),
//! ];
//!
//! let selector = ContractSelector::new();
//! let position = selector.select_priced(&chain, 100.4, SelectionMode::Atm).unwrap();
//! assert_eq!(position.strike(), 101.0);
//!
//! let premium = bs_call_price(100.0, 100.0, 0.02, 0.20, WEEKLY_TENOR);
//! assert!(premium > 1.0 && premium < 1.2);
//! ```
//!
//! ## What This Crate Does NOT Do
//!
//! - Fetch market data (plug a source in through the provider traits)
//! - Render tables, HTML or plots
//! - Persist results

pub mod config;
pub mod core;
pub mod data;
pub mod models;
pub mod scan;
pub mod selection;
pub mod simulation;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        resolve_expiry, CCError, CCResult, DailyBar, OptionQuote, PricedPosition, PriceSeries,
        QuoteChain, SelectionMode, SelectionResult,
    };

    pub use crate::config::EngineConfig;

    // Market data
    pub use crate::data::{
        build_cycles, ChainProvider, EarningsProvider, HistoryProvider, RollCycle, SpotProvider,
        StaticMarket,
    };

    // Models
    pub use crate::models::{
        annualized_vol,
        // Black-Scholes
        call_price as bs_call_price,
        norm_cdf,
        resolve_base_volatility,
    };

    // Selection
    pub use crate::selection::{mid_price, premium_return_pct, ContractSelector, SelectionConfig};

    // Simulation
    pub use crate::simulation::{
        run_backtest, run_monte_carlo, BacktestConfig, BacktestReport, BacktestSummary,
        Backtester, DistributionSummary, EquityCurve, ForwardInputs, MonteCarlo,
        MonteCarloConfig, ReturnDistribution, RollSimulator, SimulationPeriod, WEEKLY_TENOR,
    };

    // Scan
    pub use crate::scan::{ScanConfig, ScanRow, Scanner};
}

// Re-export main types at crate root
pub use crate::core::{CCError, CCResult};
pub use crate::selection::{select, ContractSelector};
pub use crate::models::call_price as price;
pub use crate::simulation::{run_backtest, run_monte_carlo};
