//! Standup Timer - a one-minute meeting countdown
//! 
//! This library provides the countdown engine that flips into overtime with a
//! nudge message, the tick sources that drive it, and a small terminal front end.

pub mod config;
pub mod state;
pub mod console;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{TimerEngine, TimerState};
pub use tasks::{ManualScheduler, Scheduler, TokioScheduler};
pub use utils::signals::shutdown_signal;
