//! Cancellable periodic refresh.
//!
//! Pages that re-request snapshots on a timer own a `RefreshTask`. The task
//! runs its callback every interval, or immediately after `wake()`, until
//! `stop()` is awaited or the handle is dropped.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;

/// Shortest interval a task will honour.
pub const MIN_INTERVAL: Duration = Duration::from_millis(100);

pub struct RefreshTask {
    name: String,
    stop_tx: watch::Sender<bool>,
    wake: Arc<Notify>,
    ticks: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshTask {
    /// Start a refresh loop on the current tokio runtime.
    pub fn spawn<F, Fut>(name: impl Into<String>, interval: Duration, mut callback: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let name = name.into();
        if interval < MIN_INTERVAL {
            log::warn!(
                "{} refresh: interval {:?} below minimum, using {:?}",
                name,
                interval,
                MIN_INTERVAL
            );
        }
        let interval = interval.max(MIN_INTERVAL);
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let wake = Arc::new(Notify::new());
        let ticks = Arc::new(AtomicU64::new(0));

        let task_name = name.clone();
        let task_wake = Arc::clone(&wake);
        let task_ticks = Arc::clone(&ticks);

        let handle = tokio::spawn(async move {
            log::info!("{} refresh: started ({:?} interval)", task_name, interval);
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {},
                    _ = task_wake.notified() => {
                        log::debug!("{} refresh: woken", task_name);
                    },
                    changed = stop_rx.changed() => {
                        // Err means the handle is gone; treat as stop.
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                        continue;
                    },
                }

                let tick = task_ticks.fetch_add(1, Ordering::Relaxed) + 1;
                log::debug!("{} refresh: tick {}", task_name, tick);
                callback().await;
            }
            log::info!("{} refresh: stopped", task_name);
        });

        Self {
            name,
            stop_tx,
            wake,
            ticks,
            handle: Some(handle),
        }
    }

    /// Run the callback now instead of waiting for the interval.
    pub fn wake(&self) {
        self.wake.notify_one();
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the loop to exit and wait for it. An in-flight callback is
    /// allowed to finish.
    pub async fn stop(mut self) {
        let _ = self.stop_tx.send(true);
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                log::warn!("{} refresh: task ended abnormally: {}", self.name, e);
            }
        }
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
