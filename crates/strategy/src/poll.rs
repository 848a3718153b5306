//! Poll-wait primitive shared by the monitoring loops.

use std::time::Duration;

use tokio::sync::watch;

/// Sleeps for `delay` unless the shutdown signal fires first.
///
/// Returns `false` when the wait was interrupted — by the signal flipping or
/// by its sender going away — which the loops treat as a cancelled cycle.
/// This is the only suspension point of the polling loops.
pub async fn wait_or_shutdown(delay: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    if *shutdown.borrow() {
        return false;
    }
    tokio::select! {
        () = tokio::time::sleep(delay) => true,
        _ = shutdown.changed() => false,
    }
}
