//! Scripted test doubles for the polling loops.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use orb_trade_core::{Candle, Notifier, QuoteError, QuoteProvider};
use rust_decimal::Decimal;
use tokio::sync::watch;

/// One scripted provider response.
#[derive(Debug, Clone, Copy)]
pub enum Tick {
    Price(Decimal),
    Fail,
}

/// Quote provider that replays a per-symbol script.
///
/// When a symbol's script runs dry the provider keeps failing; optionally it
/// fires a shutdown signal at that point so a loop under test winds down
/// instead of retrying forever.
pub struct ScriptedProvider {
    prices: Mutex<HashMap<String, VecDeque<Tick>>>,
    candles: Mutex<Option<Vec<Candle>>>,
    on_exhausted: Mutex<Option<watch::Sender<bool>>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            prices: Mutex::new(HashMap::new()),
            candles: Mutex::new(None),
            on_exhausted: Mutex::new(None),
        }
    }

    pub fn with_candles(self, candles: Vec<Candle>) -> Self {
        *self.candles.lock().unwrap() = Some(candles);
        self
    }

    pub fn script(self, symbol: &str, ticks: impl IntoIterator<Item = Tick>) -> Self {
        self.prices
            .lock()
            .unwrap()
            .insert(symbol.to_string(), ticks.into_iter().collect());
        self
    }

    pub fn shutdown_when_exhausted(self, tx: watch::Sender<bool>) -> Self {
        *self.on_exhausted.lock().unwrap() = Some(tx);
        self
    }
}

#[async_trait]
impl QuoteProvider for ScriptedProvider {
    async fn last_price(&self, symbol: &str) -> Result<Decimal, QuoteError> {
        let next = self
            .prices
            .lock()
            .unwrap()
            .get_mut(symbol)
            .and_then(VecDeque::pop_front);
        match next {
            Some(Tick::Price(price)) => Ok(price),
            Some(Tick::Fail) => Err(QuoteError::data_unavailable(symbol)),
            None => {
                if let Some(tx) = self.on_exhausted.lock().unwrap().take() {
                    let _ = tx.send(true);
                }
                Err(QuoteError::data_unavailable(symbol))
            }
        }
    }

    async fn day_candles(
        &self,
        symbol: &str,
        _resolution: &str,
        _day: NaiveDate,
    ) -> Result<Vec<Candle>, QuoteError> {
        self.candles
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| QuoteError::data_unavailable(symbol))
    }
}

/// Notifier that records every alert; optionally fails each send.
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
    failing: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            failing: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, text: &str) -> anyhow::Result<()> {
        if self.failing {
            anyhow::bail!("notifier down");
        }
        self.messages.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
