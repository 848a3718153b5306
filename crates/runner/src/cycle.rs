//! One full trading-day cycle.
//!
//! Strictly sequential: wait for a ready quote session, establish the
//! opening range and monitor for a breakout, then — only if a position was
//! entered — track it to an exit. A cycle never restarts itself; a fresh
//! cycle begins only on the next external trigger.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use orb_trade_core::{Notifier, Position, QuoteProvider, SessionGate, StrategyConfig};
use orb_trade_strategy::poll::wait_or_shutdown;
use orb_trade_strategy::{BreakoutMonitor, BreakoutOutcome, PositionTracker, TrackerOutcome};
use tokio::sync::watch;
use tracing::info;

/// How a daily cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The opening range could not be established; no position was opened.
    Aborted,
    /// Shutdown fired somewhere along the way.
    Cancelled,
    /// A position was entered and exited; status says which side.
    Exited(Position),
}

/// Runs one cycle per external trigger.
pub struct DailyCycle {
    provider: Arc<dyn QuoteProvider>,
    gate: Arc<dyn SessionGate>,
    notifier: Arc<dyn Notifier>,
    config: StrategyConfig,
}

impl DailyCycle {
    #[must_use]
    pub fn new(
        provider: Arc<dyn QuoteProvider>,
        gate: Arc<dyn SessionGate>,
        notifier: Arc<dyn Notifier>,
        config: StrategyConfig,
    ) -> Self {
        Self {
            provider,
            gate,
            notifier,
            config,
        }
    }

    /// Runs the cycle for `day` to one of its terminal outcomes.
    pub async fn run(&self, day: NaiveDate, mut shutdown: watch::Receiver<bool>) -> CycleOutcome {
        let session_delay = Duration::from_secs(self.config.session_poll_secs);

        while !self.gate.is_ready().await {
            info!("Waiting for quote session");
            if !wait_or_shutdown(session_delay, &mut shutdown).await {
                return CycleOutcome::Cancelled;
            }
        }

        let mut monitor = BreakoutMonitor::new(
            self.provider.clone(),
            self.notifier.clone(),
            self.config.clone(),
        );

        let position = match monitor.run(day, &mut shutdown).await {
            BreakoutOutcome::Aborted => return CycleOutcome::Aborted,
            BreakoutOutcome::Cancelled => return CycleOutcome::Cancelled,
            BreakoutOutcome::Confirmed(position) => position,
        };

        let tracker = PositionTracker::new(
            self.provider.clone(),
            self.notifier.clone(),
            self.config.clone(),
            position,
        );

        match tracker.run(&mut shutdown).await {
            TrackerOutcome::Cancelled => CycleOutcome::Cancelled,
            TrackerOutcome::Exited(position) => {
                info!(symbol = %position.symbol, status = ?position.status, "Daily cycle complete");
                CycleOutcome::Exited(position)
            }
        }
    }
}
