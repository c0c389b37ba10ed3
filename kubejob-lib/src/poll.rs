//! Polling subscriptions.
//!
//! A [`Subscription`] owns one background task that fetches on a fixed
//! interval and hands every result to a delivery callback. The task stops
//! when the subscription is cancelled or dropped, or when delivery reports
//! that nobody is listening any more. A failed fetch is delivered like any
//! other result; it never stops the schedule.

use std::future::Future;
use std::time::Duration;

use log::debug;
use log::trace;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Handle to a running background fetch task.
///
/// Dropping the handle cancels the task.
#[derive(Debug)]
pub struct Subscription {
    name: String,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Subscription {
    /// Fetches immediately, then every `period`, until cancelled.
    ///
    /// `deliver` receives each result and returns `false` once its receiver
    /// is gone, which ends the task.
    pub fn interval<F, Fut, T, D>(
        name: impl Into<String>,
        period: Duration,
        mut fetch: F,
        mut deliver: D,
    ) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
        D: FnMut(T) -> bool + Send + 'static,
    {
        let name = name.into();
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let task_name = name.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                trace!("poller {} tick", task_name);
                let result = tokio::select! {
                    _ = cancelled.cancelled() => break,
                    result = fetch() => result,
                };

                if cancelled.is_cancelled() || !deliver(result) {
                    break;
                }
            }

            debug!("poller {} stopped", task_name);
        });

        debug!("poller {} started ({:?})", name, period);
        Self {
            name,
            token,
            handle,
        }
    }

    /// Runs a single fetch in the background and delivers its result unless
    /// cancelled first.
    pub fn once<Fut, T, D>(name: impl Into<String>, fetch: Fut, deliver: D) -> Self
    where
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
        D: FnOnce(T) + Send + 'static,
    {
        let name = name.into();
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                result = fetch => {
                    if !cancelled.is_cancelled() {
                        deliver(result);
                    }
                }
            }
        });

        Self {
            name,
            token,
            handle,
        }
    }

    /// The name given at creation, for logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stops the task. Idempotent.
    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            debug!("cancelling poller {}", self.name);
            self.token.cancel();
        }
    }

    /// Returns `true` once cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Returns `true` once the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
