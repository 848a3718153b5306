//! Raw Fyers API response shapes and their domain conversions.

use chrono::DateTime;
use orb_trade_core::Candle;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Raw quotes response: `{"s": "ok", "d": [{"n": "...", "v": {"lp": ...}}]}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawQuotesResponse {
    pub s: Option<String>,
    pub d: Option<Vec<RawQuoteNode>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawQuoteNode {
    #[allow(dead_code)]
    pub n: Option<String>,
    pub v: Option<RawQuoteValues>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawQuoteValues {
    /// Last traded price.
    pub lp: Option<f64>,
}

impl RawQuotesResponse {
    /// Last traded price of the first quoted symbol, if present.
    pub(crate) fn last_price(&self) -> Option<Decimal> {
        let lp = self
            .d
            .as_ref()?
            .first()?
            .v
            .as_ref()?
            .lp?;
        Decimal::try_from(lp).ok()
    }
}

/// Raw history response: `{"s": "ok", "candles": [[epoch, o, h, l, c, v], ...]}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawHistoryResponse {
    pub s: Option<String>,
    pub candles: Option<Vec<Vec<f64>>>,
}

/// Converts one `[epoch, o, h, l, c, ...]` row into a candle.
///
/// Caller has already checked the row has at least five elements.
pub(crate) fn candle_from_row(row: &[f64]) -> Candle {
    #[allow(clippy::cast_possible_truncation)]
    let timestamp =
        DateTime::from_timestamp(row[0] as i64, 0).unwrap_or(DateTime::UNIX_EPOCH);
    Candle {
        timestamp,
        open: Decimal::try_from(row[1]).unwrap_or_default(),
        high: Decimal::try_from(row[2]).unwrap_or_default(),
        low: Decimal::try_from(row[3]).unwrap_or_default(),
        close: Decimal::try_from(row[4]).unwrap_or_default(),
    }
}
