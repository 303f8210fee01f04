//! Background tasks module
//! 
//! This module contains the tick sources that drive the timer engine.

pub mod ticker;

// Re-export main types
pub use ticker::{ManualScheduler, ScheduleHandle, Scheduler, TickCallback, TokioScheduler};
