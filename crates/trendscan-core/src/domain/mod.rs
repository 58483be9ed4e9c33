//! Domain types shared by the engine and its storage backends.
//!
//! Construction validates invariants, so downstream code never sees an
//! empty ticker, an impossible bar, or a non-calendar date.

mod date;
mod models;
mod symbol;

pub use date::TradingDate;
pub use models::{Instrument, Market, PriceObservation};
pub use symbol::Symbol;
