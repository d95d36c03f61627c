//! Core data types
//!
//! Defines fundamental types:
//! - OptionQuote / QuoteChain: call snapshots from a chain provider
//! - SelectionMode: ATM / ITM / best-of
//! - SelectionResult / PricedPosition: the chosen call and its yield
//! - PriceSeries: daily closes of the underlying

pub mod option;
pub mod quote;
pub mod position;
pub mod series;
pub mod error;

pub use option::*;
pub use quote::*;
pub use position::*;
pub use series::*;
pub use error::*;
