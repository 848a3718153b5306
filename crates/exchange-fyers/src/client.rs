//! Fyers data REST client with rate limiting.
//!
//! Provides typed access to the quotes and history endpoints with automatic
//! rate limiting using the governor crate. Requests are authenticated with
//! the `{client_id}:{access_token}` header scheme; the token comes from the
//! shared [`Session`].

use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use orb_trade_core::{Candle, Quote, QuoteError, QuoteProvider, SessionGate};
use reqwest::Client;
use rust_decimal::Decimal;

use crate::error::{FyersError, Result};
use crate::session::Session;
use crate::types::{candle_from_row, RawHistoryResponse, RawQuotesResponse};

/// Fyers data API base URL.
pub const FYERS_DATA_URL: &str = "https://api.fyers.in/data-rest/v2";

/// Configuration for the Fyers client.
#[derive(Debug, Clone)]
pub struct FyersClientConfig {
    /// Base URL for the data API.
    pub base_url: String,

    /// App client id, sent as the first half of the auth header.
    pub client_id: String,

    /// Requests per minute limit.
    pub requests_per_minute: NonZeroU32,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FyersClientConfig {
    fn default() -> Self {
        Self {
            base_url: FYERS_DATA_URL.to_string(),
            client_id: String::new(),
            requests_per_minute: nonzero!(60u32),
            timeout_secs: 30,
        }
    }
}

impl FyersClientConfig {
    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the app client id.
    #[must_use]
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Sets the rate limit.
    #[must_use]
    pub const fn with_rate_limit(mut self, requests_per_minute: NonZeroU32) -> Self {
        self.requests_per_minute = requests_per_minute;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Fyers data REST client.
///
/// All requests are rate-limited and carry the session's access token.
pub struct FyersClient {
    config: FyersClientConfig,
    http: Client,
    rate_limiter: Arc<
        RateLimiter<
            governor::state::NotKeyed,
            governor::state::InMemoryState,
            governor::clock::DefaultClock,
        >,
    >,
    session: Arc<Session>,
}

impl std::fmt::Debug for FyersClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FyersClient")
            .field("base_url", &self.config.base_url)
            .field("requests_per_minute", &self.config.requests_per_minute)
            .finish_non_exhaustive()
    }
}

impl FyersClient {
    /// Creates a new client with the given configuration and session.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: FyersClientConfig, session: Arc<Session>) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FyersError::Network(format!("failed to build HTTP client: {e}")))?;

        let quota = Quota::per_minute(config.requests_per_minute);
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            config,
            http,
            rate_limiter,
            session,
        })
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// The session this client authenticates with.
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Validates a symbol before it is placed into a request URL.
    ///
    /// Fyers symbols look like `NSE:NIFTY50-INDEX` or
    /// `NSE:NIFTY07AUG2522050CE` — alphanumeric plus `:`, `-`, `_`.
    fn validate_symbol(symbol: &str) -> Result<&str> {
        if symbol.is_empty() {
            return Err(FyersError::InvalidSymbol("symbol cannot be empty".to_string()));
        }

        if !symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ':' || c == '-' || c == '_')
        {
            return Err(FyersError::InvalidSymbol(format!(
                "symbol must contain only alphanumeric, colon, hyphen, or underscore: {symbol}"
            )));
        }

        if symbol.len() > 64 {
            return Err(FyersError::InvalidSymbol(format!(
                "symbol exceeds maximum length of 64: {}",
                symbol.len()
            )));
        }

        Ok(symbol)
    }

    /// Waits for the rate limiter and makes an authenticated GET request.
    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let token = self.session.token().await.ok_or(FyersError::SessionNotReady)?;
        let url = format!("{}{}", self.config.base_url, path);

        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .header(
                "Authorization",
                format!("{}:{}", self.config.client_id, token),
            )
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handles API response, converting errors appropriately.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(FyersError::rate_limit(retry_after));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(FyersError::api(status.as_u16(), text));
        }

        let body = response.json::<T>().await?;
        Ok(body)
    }

    /// Gets the last traded price for a symbol.
    ///
    /// # Errors
    /// Returns `NoData` if the response carries no usable price, or a
    /// transport error if the call fails.
    pub async fn quote(&self, symbol: &str) -> Result<Quote> {
        let symbol = Self::validate_symbol(symbol)?;
        let path = format!("/quotes?symbols={symbol}");

        let response: RawQuotesResponse = self.get(&path).await?;

        if response.s.as_deref() == Some("error") {
            return Err(FyersError::no_data(symbol));
        }

        let last_price = response
            .last_price()
            .ok_or_else(|| FyersError::no_data(symbol))?;

        Ok(Quote {
            symbol: symbol.to_string(),
            last_price,
        })
    }

    /// Gets one trading day of candles for a symbol.
    ///
    /// `resolution` is the bar size in minutes (e.g. "5").
    ///
    /// # Errors
    /// Returns `NoData` if the response carries no candle rows, or a
    /// transport error if the call fails.
    pub async fn history(
        &self,
        symbol: &str,
        resolution: &str,
        day: NaiveDate,
    ) -> Result<Vec<Candle>> {
        let symbol = Self::validate_symbol(symbol)?;
        let date = day.format("%Y-%m-%d");
        let path = format!(
            "/history?symbol={symbol}&resolution={resolution}&date_format=1&range_from={date}&range_to={date}&cont_flag=1"
        );

        let response: RawHistoryResponse = self.get(&path).await?;

        if response.s.as_deref() == Some("error") {
            return Err(FyersError::no_data(symbol));
        }

        let rows = response
            .candles
            .ok_or_else(|| FyersError::no_data(symbol))?;

        Ok(rows
            .iter()
            .filter(|row| row.len() >= 5)
            .map(|row| candle_from_row(row))
            .collect())
    }
}

#[async_trait]
impl QuoteProvider for FyersClient {
    async fn last_price(&self, symbol: &str) -> std::result::Result<Decimal, QuoteError> {
        self.quote(symbol)
            .await
            .map(|q| q.last_price)
            .map_err(QuoteError::from)
    }

    async fn day_candles(
        &self,
        symbol: &str,
        resolution: &str,
        day: NaiveDate,
    ) -> std::result::Result<Vec<Candle>, QuoteError> {
        self.history(symbol, resolution, day)
            .await
            .map_err(QuoteError::from)
    }
}

#[async_trait]
impl SessionGate for FyersClient {
    async fn is_ready(&self) -> bool {
        self.session.is_ready().await
    }
}
