//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod study_timer;
pub mod session_recorder;

// Re-export main functions
pub use study_timer::{study_timer_task, IntervalTicks, TickSource};
pub use session_recorder::session_recorder_task;
