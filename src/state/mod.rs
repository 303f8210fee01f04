//! State management module
//! 
//! This module contains the countdown state, the message pool and the engine
//! that drives them.

pub mod engine;
pub mod messages;
pub mod timer_state;

// Re-export main types
pub use engine::{TimerEngine, TICK_PERIOD};
pub use messages::{RandomSource, SeededRandom, ThreadRandom};
pub use timer_state::{TimerState, SESSION_SECONDS};
