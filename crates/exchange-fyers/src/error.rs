//! Error types for the Fyers data API integration.

use orb_trade_core::QuoteError;
use thiserror::Error;

/// Errors that can occur when talking to the Fyers data API.
#[derive(Debug, Error)]
pub enum FyersError {
    /// No access token has been installed in the session yet.
    #[error("quote session not ready")]
    SessionNotReady,

    /// API request failed.
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Error message from API.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimit {
        /// Seconds to wait before retry.
        retry_after_secs: u64,
    },

    /// Network error.
    #[error("network error: {0}")]
    Network(String),

    /// Request timeout.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Response carried no usable data for the symbol.
    #[error("no data for {symbol}")]
    NoData {
        /// The symbol the request was for.
        symbol: String,
    },

    /// Invalid symbol supplied by the caller.
    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl FyersError {
    /// Creates an API error from status code and message.
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a rate limit error.
    #[must_use]
    pub const fn rate_limit(retry_after_secs: u64) -> Self {
        Self::RateLimit { retry_after_secs }
    }

    /// Creates a no-data error for a symbol.
    pub fn no_data(symbol: impl Into<String>) -> Self {
        Self::NoData {
            symbol: symbol.into(),
        }
    }

    /// Returns true if the error indicates the request should be retried later.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) | Self::RateLimit { .. } => true,
            Self::Api { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for FyersError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Network(format!("connection failed: {err}"))
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FyersError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<FyersError> for QuoteError {
    fn from(err: FyersError) -> Self {
        match err {
            FyersError::SessionNotReady => Self::SessionNotReady,
            FyersError::NoData { symbol } => Self::DataUnavailable { symbol },
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Result type alias for Fyers operations.
pub type Result<T> = std::result::Result<T, FyersError>;
