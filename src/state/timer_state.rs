//! Timer state structure and the per-second transition

use serde::{Deserialize, Serialize};

use super::messages::{pick_message, RandomSource, OVERTIME_MESSAGES};

/// Length of one countdown session in seconds
pub const SESSION_SECONDS: i64 = 60;

/// Timer state for one countdown session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Seconds left while counting down, seconds elapsed once in overtime
    pub remaining: i64,
    pub running: bool,
    pub overtime: bool,
    /// Empty until overtime begins
    pub message: String,
}

impl TimerState {
    /// Create a fresh, stopped session
    pub fn new() -> Self {
        Self {
            remaining: SESSION_SECONDS,
            running: false,
            overtime: false,
            message: String::new(),
        }
    }

    /// Rewind to the start of a session, leaving `running` untouched
    pub fn reset(&mut self) {
        self.remaining = SESSION_SECONDS;
        self.overtime = false;
        self.message.clear();
    }

    /// Advance by one second.
    ///
    /// Counts down until the decrement reaches zero, at which point the
    /// session enters overtime with a message from the pool. Returns `true`
    /// on the tick that made that transition.
    pub fn advance(&mut self, random: &mut dyn RandomSource) -> bool {
        if self.overtime {
            self.remaining += 1;
            return false;
        }

        self.remaining -= 1;
        if self.remaining <= 0 {
            self.overtime = true;
            self.remaining = 0;
            self.message = pick_message(&OVERTIME_MESSAGES, random);
            return true;
        }
        false
    }

    /// Format as `M:SS`, with a `+` prefix for elapsed overtime
    pub fn display_text(&self) -> String {
        let seconds = self.remaining.abs();
        let text = format!("{}:{:02}", seconds / 60, seconds % 60);

        if self.overtime && self.remaining > 0 {
            format!("+{}", text)
        } else {
            text
        }
    }

    /// Fraction of the session used up, `1.0` once in overtime
    pub fn progress(&self) -> f64 {
        if self.overtime {
            return 1.0;
        }
        let elapsed = (SESSION_SECONDS - self.remaining).clamp(0, SESSION_SECONDS);
        elapsed as f64 / SESSION_SECONDS as f64
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
