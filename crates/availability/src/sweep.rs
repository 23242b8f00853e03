//! Periodic removal of expired slot locks.
//!
//! A long-running async function intended to be spawned via `tokio::spawn`
//! (or wrapped by the standalone sweeper binary). Runs on a fixed interval
//! using `tokio::time::interval` until the [`CancellationToken`] fires.
//!
//! Racing `lock_slot` is fine: a lock that flips from live to expired
//! mid-sweep is either deleted here or superseded by a new holder, and
//! both outcomes are correct.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use bookline_db::repositories::SlotLockRepo;
use bookline_db::DbPool;

/// How often the sweep runs by default.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Run the expired-lock sweep loop.
///
/// The interval is overridable via `LOCK_SWEEP_INTERVAL_SECS`. Runs until
/// `cancel` is triggered.
pub async fn run(pool: DbPool, cancel: CancellationToken) {
    let interval_secs: u64 = std::env::var("LOCK_SWEEP_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(SWEEP_INTERVAL.as_secs());

    tracing::info!(interval_secs, "Slot lock sweep started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Slot lock sweep stopping");
                break;
            }
            _ = interval.tick() => {
                match SlotLockRepo::cleanup_expired(&pool).await {
                    Ok(removed) => {
                        if removed > 0 {
                            tracing::info!(removed, "Slot lock sweep: purged expired holds");
                        } else {
                            tracing::debug!("Slot lock sweep: nothing to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Slot lock sweep failed");
                    }
                }
            }
        }
    }
}
