//! Repeating tick sources for the timer engine

use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};
use tokio::{
    runtime::Handle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Callback fired once per period
pub type TickCallback = Arc<dyn Fn() + Send + Sync>;

/// Something that can fire a callback on a fixed period until cancelled
pub trait Scheduler: Send + Sync {
    fn schedule_repeating(&self, period: Duration, callback: TickCallback) -> ScheduleHandle;
}

/// Handle to a scheduled callback. Cancelled on `cancel()` or drop.
pub struct ScheduleHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl ScheduleHandle {
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop the callback from firing again
    pub fn cancel(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for ScheduleHandle {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for ScheduleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Wall-clock ticks driven by a tokio interval task
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime the caller is running on
    pub fn from_current() -> Result<Self, String> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| format!("No tokio runtime available for the ticker: {}", e))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&self, period: Duration, callback: TickCallback) -> ScheduleHandle {
        // First fire is one full period after scheduling, like a plain repeating timer
        let first = Instant::now() + period;
        let task = self.handle.spawn(async move {
            let mut interval = interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                callback();
            }
        });

        debug!("Scheduled repeating tick every {:?}", period);
        ScheduleHandle::new(move || {
            task.abort();
            debug!("Cancelled repeating tick");
        })
    }
}

/// Virtual clock for driving an engine tick by tick
#[derive(Clone, Default)]
pub struct ManualScheduler {
    entries: Arc<Mutex<Vec<(u64, TickCallback)>>>,
    next_id: Arc<AtomicU64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every active callback `ticks` times, in scheduling order
    pub fn advance(&self, ticks: u32) {
        for _ in 0..ticks {
            // Snapshot so callbacks may schedule or cancel without deadlocking
            let callbacks: Vec<TickCallback> = self
                .lock()
                .iter()
                .map(|(_, callback)| Arc::clone(callback))
                .collect();

            for callback in callbacks {
                callback();
            }
        }
    }

    /// Number of callbacks currently scheduled
    pub fn active_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(u64, TickCallback)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&self, _period: Duration, callback: TickCallback) -> ScheduleHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock().push((id, callback));

        let entries = Arc::clone(&self.entries);
        ScheduleHandle::new(move || {
            entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|(entry, _)| *entry != id);
        })
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("active", &self.active_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, TickCallback) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        let callback: TickCallback = Arc::new(move || {
            inner.fetch_add(1, Ordering::SeqCst);
        });
        (count, callback)
    }

    #[test]
    fn test_manual_scheduler_fires_until_cancelled() {
        let scheduler = ManualScheduler::new();
        let (count, callback) = counter();

        let handle = scheduler.schedule_repeating(Duration::from_secs(1), callback);
        assert_eq!(scheduler.active_count(), 1);

        scheduler.advance(3);
        assert_eq!(count.load(Ordering::SeqCst), 3);

        handle.cancel();
        assert_eq!(scheduler.active_count(), 0);

        scheduler.advance(5);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_dropping_handle_cancels() {
        let scheduler = ManualScheduler::new();
        let (count, callback) = counter();

        drop(scheduler.schedule_repeating(Duration::from_secs(1), callback));
        scheduler.advance(2);

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_from_current_without_runtime() {
        assert!(TokioScheduler::from_current().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_ticks_once_per_period() {
        let scheduler = TokioScheduler::from_current().unwrap();
        let (count, callback) = counter();

        let handle = scheduler.schedule_repeating(Duration::from_secs(1), callback);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        handle.cancel();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_counts_from_scheduling() {
        let scheduler = TokioScheduler::from_current().unwrap();
        let (count, callback) = counter();

        let _handle = scheduler.schedule_repeating(Duration::from_secs(1), callback);

        // Clock moves before the interval task gets polled
        tokio::time::advance(Duration::from_millis(600)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
