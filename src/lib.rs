//! StudyBuddy - A pomodoro study timer service
//! 
//! This library provides a pomodoro timer state machine with long-break
//! cadence, an in-memory study log, and an HTTP API that serves the timer
//! alongside mock study plan, resource and chat helpers.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, PomodoroTimer, TimerConfig};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
