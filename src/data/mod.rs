//! Market data plumbing
//!
//! Handles:
//! - Provider traits for chains, spot, earnings and history
//! - In-memory market snapshot
//! - Weekly roll calendar built from daily closes

pub mod providers;
pub mod calendar;

pub use providers::*;
pub use calendar::*;
