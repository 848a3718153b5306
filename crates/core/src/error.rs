//! Typed fetch-error taxonomy for the quote capability.
//!
//! Every variant is retryable at the polling-loop boundary: the monitor and
//! tracker loops absorb these into a retry-with-delay rather than
//! terminating the daily cycle.

use thiserror::Error;

/// Why a quote or candle fetch produced no usable data.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The provider responded but returned no usable data for the symbol.
    #[error("no usable quote data for {symbol}")]
    DataUnavailable {
        /// Symbol the fetch was for.
        symbol: String,
    },

    /// No authenticated quote session is available yet.
    #[error("quote session not ready")]
    SessionNotReady,

    /// Transport-level failure (network, timeout, HTTP status, decode).
    #[error("transport error: {0}")]
    Transport(String),
}

impl QuoteError {
    /// Creates a data-unavailable error for a symbol.
    pub fn data_unavailable(symbol: impl Into<String>) -> Self {
        Self::DataUnavailable {
            symbol: symbol.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_unavailable_names_the_symbol() {
        let err = QuoteError::data_unavailable("NSE:NIFTY50-INDEX");
        assert!(err.to_string().contains("NSE:NIFTY50-INDEX"));
    }

    #[test]
    fn session_not_ready_display() {
        let err = QuoteError::SessionNotReady;
        assert!(err.to_string().contains("session not ready"));
    }
}
