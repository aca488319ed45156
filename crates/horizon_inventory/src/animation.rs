//! Periodic update process backing animated views.

use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{trace, warn};

/// A restartable background task calling a closure once per period.
///
/// The first call happens one full period after [`start`](Self::start).
/// Dropping the updater aborts the task.
#[derive(Debug, Default)]
pub struct PeriodicUpdater {
    task: Mutex<Option<JoinHandle<()>>>,
}

impl PeriodicUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns the update task on the current tokio runtime, replacing any
    /// task already running. Returns `false` when no runtime is available.
    pub fn start<F>(&self, period: Duration, mut tick: F) -> bool
    where
        F: FnMut() + Send + 'static,
    {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!("⚠️ Cannot start periodic update outside a tokio runtime: {}", e);
                return false;
            }
        };
        let period = period.max(Duration::from_millis(1));

        let task = handle.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                tick();
            }
        });

        if let Some(previous) = self.lock().replace(task) {
            previous.abort();
        }
        trace!("▶️ Periodic update started ({:?})", period);
        true
    }

    /// Stops the task. Returns `true` if one was running.
    pub fn stop(&self) -> bool {
        match self.lock().take() {
            Some(task) => {
                let was_running = !task.is_finished();
                task.abort();
                trace!("⏹️ Periodic update stopped");
                was_running
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.lock()
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.task.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for PeriodicUpdater {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_until_stopped() {
        let updater = PeriodicUpdater::new();
        let ticks = Arc::new(AtomicUsize::new(0));

        let counter = ticks.clone();
        assert!(updater.start(Duration::from_millis(100), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert!(updater.is_running());

        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);

        assert!(updater.stop());
        assert!(!updater.is_running());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let updater = PeriodicUpdater::new();
        assert!(!updater.stop());

        updater.start(Duration::from_secs(60), || {});
        assert!(updater.stop());
        assert!(!updater.stop());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_previous_task() {
        let updater = PeriodicUpdater::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let counter = first.clone();
        updater.start(Duration::from_millis(100), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = second.clone();
        updater.start(Duration::from_millis(100), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_start_without_runtime() {
        let updater = PeriodicUpdater::new();
        assert!(!updater.start(Duration::from_millis(10), || {}));
        assert!(!updater.is_running());
    }
}
