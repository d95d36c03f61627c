//! Weekly roll simulation
//!
//! Both modes share one per-period routine ([`RollSimulator`]):
//! - **Backtest**: replays historical Friday-to-Friday cycles
//! - **Monte Carlo**: rolls along seeded GBM paths and collects the
//!   distribution of terminal returns

pub mod config;
pub mod roll;
pub mod stats;
pub mod backtest;
pub mod monte_carlo;

pub use config::*;
pub use roll::*;
pub use stats::*;
pub use backtest::*;
pub use monte_carlo::*;
