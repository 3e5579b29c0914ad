//! Periodic invocation of the join processor.
//!
//! Runs [`JoinElements::run`] on a fixed `tokio::time::interval`. A failed
//! cycle is logged and the next tick tries again; the platform state is the
//! source of truth, so nothing is carried over. Cancellation is only
//! observed between cycles, never in the middle of one.

use std::time::Duration;

use diagroup_pipeline::{JoinElements, Platform, ProcessedStore};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Poll `pool_id` every `every` until `cancel` is triggered.
///
/// Returns the processor so its state can be inspected after shutdown.
pub async fn run<P, S>(
    mut join: JoinElements<P, S>,
    pool_id: &str,
    every: Duration,
    cancel: CancellationToken,
) -> JoinElements<P, S>
where
    P: Platform,
    S: ProcessedStore,
{
    tracing::info!(
        processor = %join.config().name,
        pool_id,
        interval_secs = every.as_secs_f64(),
        "Join poller started"
    );

    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(pool_id, "Join poller stopping");
                break;
            }
            _ = interval.tick() => {
                match join.run(pool_id).await {
                    Ok(summary) => {
                        if summary.fetched > 0 {
                            tracing::info!(
                                accepted = summary.accepted,
                                rejected = summary.rejected,
                                tasks_created = summary.tasks_created,
                                "Join cycle complete"
                            );
                        } else {
                            tracing::debug!("Join cycle: nothing submitted");
                        }
                    }
                    Err(e) => {
                        tracing::error!(pool_id, error = %e, "Join cycle failed");
                    }
                }
            }
        }
    }

    join
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
