//! Pricing and volatility models
//!
//! Implements:
//! - Black-Scholes call pricing (theoretical premium when no live quote exists)
//! - Realized volatility estimation (implied-volatility proxy)

pub mod black_scholes;
pub mod volatility;

pub use black_scholes::*;
pub use volatility::*;
