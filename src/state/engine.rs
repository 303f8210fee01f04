//! Countdown engine: owns the timer state and its tick source

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tokio::sync::watch;
use tracing::{debug, info};

use super::{
    messages::{RandomSource, ThreadRandom},
    TimerState,
};
use crate::tasks::{ScheduleHandle, Scheduler, TickCallback};

/// Interval between ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Single-session countdown timer.
///
/// Counts down from a minute, then counts overtime upward. Ticks come from the
/// injected [`Scheduler`]; every mutation is published to subscribers.
pub struct TimerEngine {
    shared: Arc<Shared>,
    scheduler: Box<dyn Scheduler>,
}

struct Shared {
    inner: Mutex<Inner>,
    updates: watch::Sender<TimerState>,
}

struct Inner {
    state: TimerState,
    /// Bumped whenever a schedule starts or stops; stale callbacks compare unequal
    generation: u64,
    schedule: Option<ScheduleHandle>,
    random: Box<dyn RandomSource>,
}

impl TimerEngine {
    /// Create a stopped engine that picks messages with the thread RNG
    pub fn new<S>(scheduler: S) -> Self
    where
        S: Scheduler + 'static,
    {
        Self::with_random(scheduler, ThreadRandom)
    }

    /// Create a stopped engine with an explicit random source
    pub fn with_random<S, R>(scheduler: S, random: R) -> Self
    where
        S: Scheduler + 'static,
        R: RandomSource + 'static,
    {
        let state = TimerState::new();
        let (updates, _) = watch::channel(state.clone());

        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    state,
                    generation: 0,
                    schedule: None,
                    random: Box::new(random),
                }),
                updates,
            }),
            scheduler: Box::new(scheduler),
        }
    }

    /// Begin ticking. No-op when already running.
    pub fn start(&self) {
        let mut inner = self.shared.lock();
        if inner.state.running {
            debug!("Start requested while already running");
            return;
        }

        self.begin(&mut inner);
        info!("Timer started at {}", inner.state.display_text());
        self.shared.publish(&inner.state);
    }

    /// Stop ticking. No-op when already stopped.
    pub fn stop(&self) {
        let mut inner = self.shared.lock();
        if Shared::halt(&mut inner) {
            info!("Timer paused at {}", inner.state.display_text());
            self.shared.publish(&inner.state);
        }
    }

    /// Discard the current session and start a fresh one
    pub fn next(&self) {
        let mut inner = self.shared.lock();
        Shared::halt(&mut inner);
        inner.state.reset();
        self.begin(&mut inner);

        info!("Next session started");
        self.shared.publish(&inner.state);
    }

    /// Pause when running, resume otherwise
    pub fn toggle(&self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Watch channel receiving a snapshot after every change
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.shared.updates.subscribe()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> TimerState {
        self.shared.lock().state.clone()
    }

    /// Current time as `M:SS`, `+` prefixed in overtime
    pub fn display_text(&self) -> String {
        self.shared.lock().state.display_text()
    }

    /// Seconds left, or seconds over once in overtime
    pub fn remaining(&self) -> i64 {
        self.shared.lock().state.remaining
    }

    /// Check if the timer is ticking
    pub fn is_running(&self) -> bool {
        self.shared.lock().state.running
    }

    /// Check if the countdown has run out
    pub fn is_overtime(&self) -> bool {
        self.shared.lock().state.overtime
    }

    /// Overtime message, empty while counting down
    pub fn message(&self) -> String {
        self.shared.lock().state.message.clone()
    }

    fn begin(&self, inner: &mut Inner) {
        inner.state.running = true;
        inner.generation += 1;

        let generation = inner.generation;
        let shared = Arc::downgrade(&self.shared);
        let callback: TickCallback = Arc::new(move || {
            if let Some(shared) = shared.upgrade() {
                shared.tick(generation);
            }
        });

        inner.schedule = Some(self.scheduler.schedule_repeating(TICK_PERIOD, callback));
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &TimerState) {
        self.updates.send_replace(state.clone());
    }

    /// Clear `running` and drop the schedule. Returns whether it was running.
    fn halt(inner: &mut Inner) -> bool {
        let was_running = inner.state.running;
        inner.state.running = false;
        inner.generation += 1;

        if let Some(schedule) = inner.schedule.take() {
            schedule.cancel();
        }
        was_running
    }

    fn tick(&self, generation: u64) {
        let mut inner = self.lock();
        if !inner.state.running || inner.generation != generation {
            debug!("Ignoring tick from a cancelled schedule");
            return;
        }

        let Inner { state, random, .. } = &mut *inner;
        if state.advance(&mut **random) {
            info!(nudge = %state.message, "Countdown finished, overtime started");
        } else {
            debug!("Tick: {}", state.display_text());
        }
        self.publish(state);
    }
}
