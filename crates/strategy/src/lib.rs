//! Opening-range breakout detection and position tracking.
//!
//! One trading day flows through two state machines in sequence:
//!
//! 1. [`BreakoutMonitor`] — derives the opening range from the first candles
//!    of the day, then polls the index spot price until it breaks out of the
//!    band and the matching weekly option can be priced.
//! 2. [`PositionTracker`] — watches the entered option against its
//!    stop-loss/target band until one is hit.
//!
//! Both loops absorb fetch failures into retry-with-delay and check a
//! shutdown signal at every wait point. Symbol resolution
//! ([`symbols`]) is pure and testable offline.

pub mod breakout;
pub mod poll;
pub mod range;
pub mod symbols;
pub mod tracker;

pub use breakout::{BreakoutMonitor, BreakoutOutcome, MonitorState};
pub use poll::wait_or_shutdown;
pub use range::{opening_range, RangeError};
pub use symbols::{nearest_strike, weekly_expiry, ContractSymbol};
pub use tracker::{PositionTracker, TrackerOutcome};

#[cfg(test)]
pub(crate) mod testutil;
