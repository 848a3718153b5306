//! Opening range derivation from the first candles of the trading day.

use chrono::NaiveDate;
use orb_trade_core::{OpeningRange, QuoteError, QuoteProvider};
use rust_decimal::Decimal;
use thiserror::Error;

/// Why the opening range could not be established. Any of these aborts the
/// current day's cycle — there is no retry until the next scheduled trigger.
#[derive(Debug, Error)]
pub enum RangeError {
    /// Fewer candles than the range needs (market not open yet, or a thin
    /// provider response).
    #[error("insufficient history: got {got} candles, need {need}")]
    InsufficientHistory { got: usize, need: usize },

    /// The derived band is inverted — the candle data is invalid.
    #[error("invalid opening range: high {high} below low {low}")]
    InvalidRange { high: Decimal, low: Decimal },

    /// The candle fetch itself failed.
    #[error(transparent)]
    Quote(#[from] QuoteError),
}

/// Derives the opening range from the first `count` candles of `day`.
///
/// No retry here — the caller decides what a failure means.
///
/// # Errors
/// See [`RangeError`].
pub async fn opening_range(
    provider: &dyn QuoteProvider,
    symbol: &str,
    resolution: &str,
    count: usize,
    day: NaiveDate,
) -> Result<OpeningRange, RangeError> {
    let candles = provider.day_candles(symbol, resolution, day).await?;

    if candles.len() < count || count == 0 {
        return Err(RangeError::InsufficientHistory {
            got: candles.len(),
            need: count,
        });
    }

    let opening = &candles[..count];
    // count >= 1 here, so max/min always exist.
    let high = opening.iter().map(|c| c.high).max().unwrap_or_default();
    let low = opening.iter().map(|c| c.low).min().unwrap_or_default();

    if high < low {
        return Err(RangeError::InvalidRange { high, low });
    }

    Ok(OpeningRange { high, low })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ScriptedProvider;
    use orb_trade_core::Candle;
    use rust_decimal_macros::dec;

    fn candle(high: Decimal, low: Decimal) -> Candle {
        Candle {
            timestamp: chrono::DateTime::UNIX_EPOCH,
            open: low,
            high,
            low,
            close: high,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 7).unwrap()
    }

    #[tokio::test]
    async fn fewer_than_required_candles_is_insufficient() {
        for n in 0..3 {
            let candles = vec![candle(dec!(22050), dec!(21950)); n];
            let provider = ScriptedProvider::new().with_candles(candles);
            let err = opening_range(&provider, "NSE:NIFTY50-INDEX", "5", 3, day())
                .await
                .unwrap_err();
            assert!(
                matches!(err, RangeError::InsufficientHistory { got, need: 3 } if got == n),
                "{n} candles should be insufficient"
            );
        }
    }

    #[tokio::test]
    async fn range_uses_exactly_the_first_three_candles() {
        let candles = vec![
            candle(dec!(22050), dec!(21980)),
            candle(dec!(22030), dec!(21950)),
            candle(dec!(22010), dec!(21990)),
            // A later candle with wider extremes must not affect the range.
            candle(dec!(22500), dec!(21500)),
        ];
        let provider = ScriptedProvider::new().with_candles(candles);
        let range = opening_range(&provider, "NSE:NIFTY50-INDEX", "5", 3, day())
            .await
            .unwrap();
        assert_eq!(range.high, dec!(22050));
        assert_eq!(range.low, dec!(21950));
    }

    #[tokio::test]
    async fn inverted_candle_data_is_invalid() {
        // Candles whose "high" sits below another candle's "low" produce an
        // inverted band.
        let candles = vec![
            candle(dec!(100), dec!(200)),
            candle(dec!(100), dec!(200)),
            candle(dec!(100), dec!(200)),
        ];
        let provider = ScriptedProvider::new().with_candles(candles);
        let err = opening_range(&provider, "NSE:NIFTY50-INDEX", "5", 3, day())
            .await
            .unwrap_err();
        assert!(matches!(err, RangeError::InvalidRange { .. }));
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let provider = ScriptedProvider::new(); // no candles scripted → fetch fails
        let err = opening_range(&provider, "NSE:NIFTY50-INDEX", "5", 3, day())
            .await
            .unwrap_err();
        assert!(matches!(err, RangeError::Quote(_)));
    }
}
