//! State management module
//! 
//! This module contains the pomodoro timer state machine, the study and chat logs and
//! the shared application state that owns them.

pub mod timer_state;
pub mod study_log;
pub mod chat_log;
pub mod app_state;

// Re-export main types
pub use timer_state::{ModeSwitch, Phase, PomodoroTimer, TimerConfig, TimerEvent, TimerSnapshot};
pub use study_log::{StudyLog, StudySession, StudyStats};
pub use chat_log::{ChatLog, ChatMessage, Sender};
pub use app_state::AppState;
