//! Telegram Bot API notifier.
//!
//! Sends plain-text alerts via `sendMessage`. Delivery is fire-and-forget
//! from the strategy's point of view: errors surface to the caller, which
//! logs and moves on — a failed alert never affects the trading loops.

use async_trait::async_trait;
use orb_trade_core::Notifier;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Telegram Bot API base URL.
pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Errors that can occur when delivering a Telegram alert.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// HTTP-level failure from the Bot API.
    #[error("telegram API error: {status_code} - {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Error body from the API.
        message: String,
    },

    /// The API answered but declined the message.
    #[error("telegram rejected message: {0}")]
    Rejected(String),

    /// Network error.
    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::Network(format!("connection failed: {err}"))
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// `sendMessage` response envelope.
#[derive(Debug, Deserialize)]
struct RawSendResponse {
    ok: bool,
    description: Option<String>,
}

/// Sends text alerts to a fixed chat through a Telegram bot.
pub struct TelegramNotifier {
    http: Client,
    api_url: String,
    bot_token: String,
    chat_id: String,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the bot token.
        f.debug_struct("TelegramNotifier")
            .field("api_url", &self.api_url)
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

impl TelegramNotifier {
    /// Creates a notifier for the given bot and destination chat.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Result<Self, TelegramError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| TelegramError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_url: TELEGRAM_API_URL.to_string(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        })
    }

    /// Overrides the API base URL (useful for testing).
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        let url = format!("{}/bot{}/sendMessage", self.api_url, self.bot_token);

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "chat_id": self.chat_id,
                "text": text,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TelegramError::Api {
                status_code: status.as_u16(),
                message: text,
            });
        }

        let body: RawSendResponse = response.json().await?;
        if !body.ok {
            return Err(TelegramError::Rejected(
                body.description.unwrap_or_else(|| "no description".to_string()),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> anyhow::Result<()> {
        self.send_message(text).await?;
        tracing::debug!("Telegram alert sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_notifier(api_url: &str) -> TelegramNotifier {
        TelegramNotifier::new("123:abc", "@alerts_channel")
            .unwrap()
            .with_api_url(api_url)
    }

    #[tokio::test]
    async fn send_posts_chat_id_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .and(body_partial_json(serde_json::json!({
                "chat_id": "@alerts_channel",
                "text": "hello"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let notifier = test_notifier(&server.uri());
        notifier.send("hello").await.unwrap();
    }

    #[tokio::test]
    async fn rejected_message_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": false,
                "description": "chat not found"
            })))
            .mount(&server)
            .await;

        let notifier = test_notifier(&server.uri());
        let err = notifier.send_message("hello").await.unwrap_err();
        assert!(matches!(err, TelegramError::Rejected(ref d) if d == "chat not found"));
    }

    #[tokio::test]
    async fn http_failure_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let notifier = test_notifier(&server.uri());
        let err = notifier.send_message("hello").await.unwrap_err();
        assert!(matches!(err, TelegramError::Api { status_code: 502, .. }));
    }

    #[test]
    fn debug_does_not_leak_bot_token() {
        let notifier = TelegramNotifier::new("secret-token", "@alerts_channel").unwrap();
        let rendered = format!("{notifier:?}");
        assert!(!rendered.contains("secret-token"));
    }
}
