//! Fyers market data integration for the breakout alerting system.
//!
//! This crate provides:
//! - REST client with rate limiting for the Fyers quotes and history endpoints
//! - A shared session object holding the externally-obtained access token
//! - Typed errors with a transient/permanent split
//! - `QuoteProvider` and `SessionGate` implementations for the core traits
//!
//! # Authentication
//!
//! The OAuth authorization-code exchange is out of scope here. Obtain an
//! access token externally and install it with [`Session::with_token`] or
//! [`Session::set_token`]; every request then carries
//! `Authorization: {client_id}:{access_token}`.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use orb_trade_fyers::{FyersClient, FyersClientConfig, Session};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let session = Arc::new(Session::with_token(std::env::var("FYERS_ACCESS_TOKEN")?));
//!     let config = FyersClientConfig::default().with_client_id("YOUR-APP-ID");
//!     let client = FyersClient::new(config, session)?;
//!
//!     let quote = client.quote("NSE:NIFTY50-INDEX").await?;
//!     println!("NIFTY LTP: {}", quote.last_price);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod session;
mod types;

pub use client::{FyersClient, FyersClientConfig, FYERS_DATA_URL};
pub use error::{FyersError, Result};
pub use session::Session;
