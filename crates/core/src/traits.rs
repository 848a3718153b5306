use crate::error::QuoteError;
use crate::types::Candle;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Source of live prices and historical candles.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Last traded price for a symbol.
    async fn last_price(&self, symbol: &str) -> std::result::Result<Decimal, QuoteError>;

    /// Intraday candles for a single trading day, chronological.
    ///
    /// `resolution` is the bar size in minutes, as the provider expects it
    /// (e.g. "5").
    async fn day_candles(
        &self,
        symbol: &str,
        resolution: &str,
        day: NaiveDate,
    ) -> std::result::Result<Vec<Candle>, QuoteError>;
}

/// Delivers a text alert to the configured destination.
///
/// Delivery is fire-and-forget: callers log failures and continue. A failed
/// send must never stop or delay a polling loop.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
}

/// Readiness gate for the authenticated quote session.
///
/// The session itself is established externally; the daily cycle only polls
/// this until it reports ready.
#[async_trait]
pub trait SessionGate: Send + Sync {
    async fn is_ready(&self) -> bool;
}
