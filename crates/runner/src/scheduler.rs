//! Cron-driven daily trigger.

use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use orb_trade_core::SchedulerConfig;
use tokio::sync::watch;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::cycle::{CycleOutcome, DailyCycle};

/// Fires one [`DailyCycle`] per scheduled trading day.
///
/// The shutdown channel it owns is threaded through every poll-wait in the
/// cycle, so stopping the scheduler also winds down a cycle in flight.
pub struct DailyScheduler {
    config: SchedulerConfig,
    cycle: Arc<DailyCycle>,
    shutdown_tx: watch::Sender<bool>,
}

impl DailyScheduler {
    /// Creates a new scheduler around a daily cycle.
    #[must_use]
    pub fn new(config: SchedulerConfig, cycle: DailyCycle) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            config,
            cycle: Arc::new(cycle),
            shutdown_tx,
        }
    }

    /// A handle that cancels the scheduler and any cycle in flight.
    #[must_use]
    pub fn shutdown_handle(&self) -> watch::Sender<bool> {
        self.shutdown_tx.clone()
    }

    /// Starts the scheduler and runs until shut down.
    ///
    /// # Errors
    /// Returns an error if the scheduler fails to start or if job
    /// scheduling fails.
    pub async fn start(self) -> Result<()> {
        if !self.config.enabled {
            info!("Daily scheduler is disabled");
            return Ok(());
        }

        info!(cron = %self.config.cron_schedule, "Starting daily scheduler");

        let scheduler = JobScheduler::new().await?;
        let cycle = self.cycle.clone();
        let shutdown_tx = self.shutdown_tx.clone();

        let job = Job::new_async(self.config.cron_schedule.as_str(), move |_uuid, _lock| {
            let cycle = cycle.clone();
            let shutdown_rx = shutdown_tx.subscribe();
            Box::pin(async move {
                let day = Local::now().date_naive();
                info!(%day, "Daily trigger fired");
                let outcome = cycle.run(day, shutdown_rx).await;
                match outcome {
                    CycleOutcome::Exited(position) => {
                        info!(symbol = %position.symbol, status = ?position.status, "Cycle exited");
                    }
                    outcome => info!(?outcome, "Cycle finished without a position exit"),
                }
            })
        })?;

        scheduler.add(job).await?;
        scheduler.start().await?;

        info!("Daily scheduler started");

        // Keep the scheduler alive until shutdown flips.
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        loop {
            tokio::select! {
                () = tokio::time::sleep(tokio::time::Duration::from_secs(60)) => {}
                _ = shutdown_rx.changed() => break,
            }
        }

        info!("Daily scheduler shutting down");
        let mut scheduler = scheduler;
        if let Err(e) = scheduler.shutdown().await {
            error!(error = %e, "Scheduler shutdown failed");
        }
        Ok(())
    }

    /// Runs a single cycle immediately (manual invocation).
    pub async fn run_once(&self) -> CycleOutcome {
        let day = Local::now().date_naive();
        self.cycle.run(day, self.shutdown_tx.subscribe()).await
    }
}
