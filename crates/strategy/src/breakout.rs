//! Breakout monitoring — from opening range to a confirmed entry.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use orb_trade_core::{Notifier, Position, QuoteProvider, StrategyConfig};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::poll::wait_or_shutdown;
use crate::range;
use crate::symbols::{nearest_strike, ContractSymbol};

/// Monitor lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    WaitingForRange,
    Polling,
    BreakoutConfirmed,
    Aborted,
}

/// How a monitoring run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakoutOutcome {
    /// A breakout was confirmed and a position opened. Hand off to the
    /// position tracker exactly once.
    Confirmed(Position),
    /// The opening range could not be established; the day is over for us.
    Aborted,
    /// Shutdown fired mid-poll.
    Cancelled,
}

/// Polls the index spot price against the opening range until one side
/// breaks out and the option leg can be priced.
///
/// Fetch failures never terminate the loop — the hardest failure mode here
/// is provider flakiness, which must not end the cycle. A breakout tick
/// whose option price is unavailable is not consumed; the next tick
/// re-evaluates from scratch.
pub struct BreakoutMonitor {
    provider: Arc<dyn QuoteProvider>,
    notifier: Arc<dyn Notifier>,
    config: StrategyConfig,
    state: MonitorState,
}

impl BreakoutMonitor {
    #[must_use]
    pub fn new(
        provider: Arc<dyn QuoteProvider>,
        notifier: Arc<dyn Notifier>,
        config: StrategyConfig,
    ) -> Self {
        Self {
            provider,
            notifier,
            config,
            state: MonitorState::WaitingForRange,
        }
    }

    #[must_use]
    pub const fn state(&self) -> MonitorState {
        self.state
    }

    /// Runs the monitor for `day` until it reaches a terminal outcome.
    pub async fn run(
        &mut self,
        day: NaiveDate,
        shutdown: &mut watch::Receiver<bool>,
    ) -> BreakoutOutcome {
        let range = match range::opening_range(
            self.provider.as_ref(),
            &self.config.index_symbol,
            &self.config.candle_resolution,
            self.config.opening_candle_count,
            day,
        )
        .await
        {
            Ok(range) => {
                info!(high = %range.high, low = %range.low, "Opening range established");
                self.state = MonitorState::Polling;
                range
            }
            Err(e) => {
                error!(error = %e, "Opening range unavailable, aborting today's cycle");
                self.state = MonitorState::Aborted;
                return BreakoutOutcome::Aborted;
            }
        };

        let poll_delay = Duration::from_secs(self.config.poll_interval_secs);

        loop {
            if *shutdown.borrow() {
                return BreakoutOutcome::Cancelled;
            }

            let spot = match self.provider.last_price(&self.config.index_symbol).await {
                Ok(spot) => spot,
                Err(e) => {
                    warn!(error = %e, "Spot quote failed, retrying");
                    if !wait_or_shutdown(poll_delay, shutdown).await {
                        return BreakoutOutcome::Cancelled;
                    }
                    continue;
                }
            };

            let Some(side) = range.breakout(spot) else {
                info!(spot = %spot, "No breakout yet");
                if !wait_or_shutdown(poll_delay, shutdown).await {
                    return BreakoutOutcome::Cancelled;
                }
                continue;
            };

            let Some(strike) = nearest_strike(spot, self.config.strike_step) else {
                warn!(spot = %spot, "Unusable spot price, retrying");
                if !wait_or_shutdown(poll_delay, shutdown).await {
                    return BreakoutOutcome::Cancelled;
                }
                continue;
            };

            let contract =
                ContractSymbol::weekly(self.config.option_underlying.clone(), day, strike, side);
            let symbol = contract.to_string();

            match self.provider.last_price(&symbol).await {
                Ok(entry) => {
                    let position = Position::open(
                        symbol.clone(),
                        entry,
                        self.config.stop_loss_points,
                        self.config.target_points,
                    );
                    let alert = format!(
                        "🚨 {} BREAKOUT 🚨\nSpot: ₹{:.2} | Strike: {}{}\nLTP: ₹{:.2} | SL: ₹{:.2} | Target: ₹{:.2}",
                        side.label(),
                        spot,
                        strike,
                        side.code(),
                        entry,
                        position.stop_loss,
                        position.target
                    );
                    if let Err(e) = self.notifier.send(&alert).await {
                        warn!(error = %e, "Alert delivery failed");
                    }
                    info!(symbol = %symbol, spot = %spot, entry = %entry, "Breakout confirmed");
                    self.state = MonitorState::BreakoutConfirmed;
                    return BreakoutOutcome::Confirmed(position);
                }
                Err(e) => {
                    // Breakout not consumed — the next tick re-evaluates.
                    warn!(symbol = %symbol, error = %e, "Option quote failed, staying in polling");
                    if !wait_or_shutdown(poll_delay, shutdown).await {
                        return BreakoutOutcome::Cancelled;
                    }
                }
            }
        }
    }
}
