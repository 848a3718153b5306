//! Position tracking — polls the entered option against its exit band.

use std::sync::Arc;
use std::time::Duration;

use orb_trade_core::{Notifier, Position, PositionStatus, QuoteProvider, StrategyConfig};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::poll::wait_or_shutdown;

/// How a tracking run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerOutcome {
    /// The position reached its stop-loss or target; status is terminal.
    Exited(Position),
    /// Shutdown fired mid-poll; the position was still tracking.
    Cancelled,
}

/// Watches an entered option's price until stop-loss or target is hit.
///
/// Fetch failures back off on a shorter interval than normal ticks —
/// capital is at risk once a position exists, so the loop re-checks sooner.
pub struct PositionTracker {
    provider: Arc<dyn QuoteProvider>,
    notifier: Arc<dyn Notifier>,
    config: StrategyConfig,
    position: Position,
}

impl PositionTracker {
    #[must_use]
    pub fn new(
        provider: Arc<dyn QuoteProvider>,
        notifier: Arc<dyn Notifier>,
        config: StrategyConfig,
        position: Position,
    ) -> Self {
        Self {
            provider,
            notifier,
            config,
            position,
        }
    }

    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Runs the tracker until the position exits or shutdown fires.
    pub async fn run(mut self, shutdown: &mut watch::Receiver<bool>) -> TrackerOutcome {
        info!(
            symbol = %self.position.symbol,
            entry = %self.position.entry_price,
            stop_loss = %self.position.stop_loss,
            target = %self.position.target,
            "Tracking position"
        );

        let poll_delay = Duration::from_secs(self.config.poll_interval_secs);
        let retry_delay = Duration::from_secs(self.config.retry_interval_secs);

        loop {
            if *shutdown.borrow() {
                return TrackerOutcome::Cancelled;
            }

            let ltp = match self.provider.last_price(&self.position.symbol).await {
                Ok(ltp) => ltp,
                Err(e) => {
                    warn!(error = %e, "Option quote failed, retrying");
                    if !wait_or_shutdown(retry_delay, shutdown).await {
                        return TrackerOutcome::Cancelled;
                    }
                    continue;
                }
            };

            // Stop-loss is evaluated before target: when a single reading
            // satisfies both thresholds, the loss exit wins.
            if ltp <= self.position.stop_loss {
                let alert = format!("🛑 SL Hit for {} | LTP: ₹{ltp:.2}", self.position.symbol);
                self.alert(&alert).await;
                self.position.status = PositionStatus::StoppedOut;
                info!(symbol = %self.position.symbol, ltp = %ltp, "Stop-loss hit");
                return TrackerOutcome::Exited(self.position);
            }

            if ltp >= self.position.target {
                let alert = format!("✅ Target Hit for {} | LTP: ₹{ltp:.2}", self.position.symbol);
                self.alert(&alert).await;
                self.position.status = PositionStatus::TargetHit;
                info!(symbol = %self.position.symbol, ltp = %ltp, "Target hit");
                return TrackerOutcome::Exited(self.position);
            }

            info!(symbol = %self.position.symbol, ltp = %ltp, "Tracking");
            if !wait_or_shutdown(poll_delay, shutdown).await {
                return TrackerOutcome::Cancelled;
            }
        }
    }

    async fn alert(&self, text: &str) {
        if let Err(e) = self.notifier.send(text).await {
            warn!(error = %e, "Alert delivery failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{RecordingNotifier, ScriptedProvider, Tick};
    use rust_decimal_macros::dec;

    const SYMBOL: &str = "NSE:NIFTY07AUG2522050CE";

    fn position() -> Position {
        Position::open(SYMBOL.to_string(), dec!(120), dec!(25), dec!(50))
    }

    fn tracker(
        provider: ScriptedProvider,
        notifier: Arc<RecordingNotifier>,
        position: Position,
    ) -> PositionTracker {
        PositionTracker::new(
            Arc::new(provider),
            notifier,
            StrategyConfig::default(),
            position,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn stop_loss_exit_sends_exactly_one_alert() {
        let provider = ScriptedProvider::new()
            .script(SYMBOL, [Tick::Price(dec!(110)), Tick::Price(dec!(90))]);
        let notifier = Arc::new(RecordingNotifier::new());
        let tracker = tracker(provider, notifier.clone(), position());

        let (_tx, mut rx) = watch::channel(false);
        let outcome = tracker.run(&mut rx).await;

        let TrackerOutcome::Exited(position) = outcome else {
            panic!("expected exit, got {outcome:?}");
        };
        assert_eq!(position.status, PositionStatus::StoppedOut);

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("SL Hit"));
        assert!(sent[0].contains("90.00"));
    }

    #[tokio::test(start_paused = true)]
    async fn target_exit_sends_exactly_one_alert() {
        let provider = ScriptedProvider::new()
            .script(SYMBOL, [Tick::Price(dec!(160)), Tick::Price(dec!(175))]);
        let notifier = Arc::new(RecordingNotifier::new());
        let tracker = tracker(provider, notifier.clone(), position());

        let (_tx, mut rx) = watch::channel(false);
        let outcome = tracker.run(&mut rx).await;

        let TrackerOutcome::Exited(position) = outcome else {
            panic!("expected exit, got {outcome:?}");
        };
        assert_eq!(position.status, PositionStatus::TargetHit);

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("Target Hit"));
        assert!(sent[0].contains("175.00"));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_loss_wins_when_one_reading_satisfies_both() {
        // Degenerate band where a single price is at once <= stop and >= target.
        let mut position = position();
        position.stop_loss = dec!(100);
        position.target = dec!(100);

        let provider = ScriptedProvider::new().script(SYMBOL, [Tick::Price(dec!(100))]);
        let notifier = Arc::new(RecordingNotifier::new());
        let tracker = tracker(provider, notifier.clone(), position);

        let (_tx, mut rx) = watch::channel(false);
        let outcome = tracker.run(&mut rx).await;

        let TrackerOutcome::Exited(position) = outcome else {
            panic!("expected exit, got {outcome:?}");
        };
        assert_eq!(position.status, PositionStatus::StoppedOut);

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("SL Hit"));
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_failures_do_not_accumulate_state() {
        let provider = ScriptedProvider::new().script(
            SYMBOL,
            [
                Tick::Fail,
                Tick::Fail,
                Tick::Fail,
                Tick::Price(dec!(110)),
                Tick::Price(dec!(90)),
            ],
        );
        let notifier = Arc::new(RecordingNotifier::new());
        let tracker = tracker(provider, notifier.clone(), position());

        let (_tx, mut rx) = watch::channel(false);
        let outcome = tracker.run(&mut rx).await;

        let TrackerOutcome::Exited(position) = outcome else {
            panic!("expected exit, got {outcome:?}");
        };
        assert_eq!(position.status, PositionStatus::StoppedOut);
        assert_eq!(notifier.sent().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_without_alerting() {
        let (tx, mut rx) = watch::channel(false);
        let provider = ScriptedProvider::new()
            .script(SYMBOL, [Tick::Price(dec!(110))])
            .shutdown_when_exhausted(tx);
        let notifier = Arc::new(RecordingNotifier::new());
        let tracker = tracker(provider, notifier.clone(), position());

        let outcome = tracker.run(&mut rx).await;

        assert_eq!(outcome, TrackerOutcome::Cancelled);
        assert!(notifier.sent().is_empty());
    }
}
