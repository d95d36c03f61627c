//! Contract selection from a live option chain
//!
//! Picks the call to write against owned stock and prices it:
//! 1. **ATM**: nearest strike to spot inside a moneyness band
//! 2. **ITM**: nearest strike at or below spot
//! 3. **Both**: whichever of the two has the higher premium return
//!
//! Liquid quotes (open interest, volume, valid spread) are preferred; when
//! none qualify, the nearest quote with any usable price is taken.

mod config;
mod resolver;
mod selector;

pub use config::*;
pub use resolver::*;
pub use selector::*;
