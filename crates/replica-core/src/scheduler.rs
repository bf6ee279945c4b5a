//! Fixed-interval execution of sync cycles
//!
//! The first cycle runs immediately, then one per interval. A cycle that
//! overruns the interval is followed straight away by the next one; missed
//! ticks are not queued, so cycles never overlap. Failed or panicking
//! cycles are logged and the schedule carries on.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::{Error, Result};

/// Cycle counts at the time the scheduler stopped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub succeeded: u64,
    pub failed: u64,
}

impl SchedulerStats {
    pub fn total(&self) -> u64 {
        self.succeeded + self.failed
    }
}

/// Runs a blocking cycle function at a fixed period until shutdown
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    interval: Duration,
}

impl Scheduler {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a zero interval.
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(Error::InvalidConfig {
                message: "interval must be greater than zero".into(),
            });
        }
        Ok(Self { interval })
    }

    /// Run `cycle` repeatedly until `shutdown` resolves.
    ///
    /// Each cycle runs on the blocking thread pool and is awaited before
    /// the next tick. Shutdown is only observed between cycles, so a cycle
    /// that has started always runs to completion.
    pub async fn run<F, T, E>(
        &self,
        cycle: F,
        shutdown: impl Future<Output = ()>,
    ) -> SchedulerStats
    where
        F: Fn() -> std::result::Result<T, E> + Send + Sync + 'static,
        T: Send + 'static,
        E: Display + Send + 'static,
    {
        let cycle = Arc::new(cycle);
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut stats = SchedulerStats::default();
        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => {
                    tracing::info!("Shutdown requested, stopping scheduler");
                    break;
                }
                _ = ticker.tick() => {}
            }

            let cycle = Arc::clone(&cycle);
            match tokio::task::spawn_blocking(move || (*cycle)()).await {
                Ok(Ok(_)) => stats.succeeded += 1,
                Ok(Err(e)) => {
                    tracing::error!("Sync cycle failed: {}", e);
                    stats.failed += 1;
                }
                Err(join_error) => {
                    let error = Error::CycleFailed {
                        message: join_error.to_string(),
                    };
                    tracing::error!("{}", error);
                    stats.failed += 1;
                }
            }
        }

        tracing::debug!(
            succeeded = stats.succeeded,
            failed = stats.failed,
            "Scheduler stopped"
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use tokio::sync::Notify;

    #[test]
    fn zero_interval_is_rejected() {
        assert!(Scheduler::new(Duration::ZERO).is_err());
    }

    #[tokio::test]
    async fn failing_and_panicking_cycles_do_not_stop_schedule() {
        let scheduler = Scheduler::new(Duration::from_millis(5)).unwrap();
        let calls = Arc::new(AtomicU64::new(0));
        let stop = Arc::new(Notify::new());

        let cycle_calls = Arc::clone(&calls);
        let cycle_stop = Arc::clone(&stop);
        let stats = scheduler
            .run(
                move || {
                    let n = cycle_calls.fetch_add(1, Ordering::SeqCst) + 1;
                    if n >= 4 {
                        cycle_stop.notify_one();
                    }
                    match n {
                        1 => Err("source directory missing"),
                        2 => panic!("unexpected"),
                        _ => Ok(n),
                    }
                },
                async move { stop.notified().await },
            )
            .await;

        assert_eq!(stats.failed, 2);
        assert_eq!(stats.succeeded, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn overrunning_cycles_never_overlap() {
        let scheduler = Scheduler::new(Duration::from_millis(2)).unwrap();
        let running = Arc::new(AtomicBool::new(false));
        let overlapped = Arc::new(AtomicBool::new(false));
        let calls = Arc::new(AtomicU64::new(0));
        let stop = Arc::new(Notify::new());

        let (r, o, c, s) = (
            Arc::clone(&running),
            Arc::clone(&overlapped),
            Arc::clone(&calls),
            Arc::clone(&stop),
        );
        let stats = scheduler
            .run(
                move || {
                    if r.swap(true, Ordering::SeqCst) {
                        o.store(true, Ordering::SeqCst);
                    }
                    std::thread::sleep(Duration::from_millis(10));
                    r.store(false, Ordering::SeqCst);
                    if c.fetch_add(1, Ordering::SeqCst) + 1 >= 3 {
                        s.notify_one();
                    }
                    Ok::<_, String>(())
                },
                async move { stop.notified().await },
            )
            .await;

        assert!(!overlapped.load(Ordering::SeqCst));
        assert_eq!(stats.total(), 3);
    }

    #[tokio::test]
    async fn shutdown_before_first_tick_runs_nothing() {
        let scheduler = Scheduler::new(Duration::from_secs(60)).unwrap();

        let stats = scheduler
            .run(|| Ok::<_, String>(()), std::future::ready(()))
            .await;

        assert_eq!(stats, SchedulerStats::default());
    }
}
