//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::utils::format_uptime;
use super::{ChatLog, ChatMessage, ModeSwitch, PomodoroTimer, StudyLog, StudySession, StudyStats, TimerConfig, TimerEvent, TimerSnapshot};

/// Main application state that owns the study timer and the study log
#[derive(Debug)]
pub struct AppState {
    /// The single pomodoro timer served by this process
    pub timer: Arc<Mutex<PomodoroTimer>>,
    /// Recorded study sessions and statistics
    pub study_log: Arc<Mutex<StudyLog>>,
    /// Conversation with the study assistant
    pub chat_log: Arc<Mutex<ChatLog>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for timer notifications (completion, study start, break start)
    pub timer_event_tx: broadcast::Sender<TimerEvent>,
    /// Channel for timer snapshots, updated after every mutation
    pub timer_update_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create a new AppState with a paused timer at the start of a study interval
    pub fn new(port: u16, host: String, timer_config: TimerConfig) -> Self {
        let timer = PomodoroTimer::new(timer_config);
        let (timer_event_tx, _) = broadcast::channel(100);
        let (timer_update_tx, timer_update_rx) = watch::channel(timer.snapshot());

        Self {
            timer: Arc::new(Mutex::new(timer)),
            study_log: Arc::new(Mutex::new(StudyLog::new())),
            chat_log: Arc::new(Mutex::new(ChatLog::new())),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            timer_event_tx,
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Apply a mutation to the timer under its lock and publish the result.
    ///
    /// The mutation and its notifications happen while the lock is held, so a
    /// tick can never interleave with a user action.
    fn update_timer<F>(&self, updater: F) -> Result<(Option<ModeSwitch>, TimerSnapshot), String>
    where
        F: FnOnce(&mut PomodoroTimer) -> Option<ModeSwitch>,
    {
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let switch = updater(&mut *timer);
        let snapshot = timer.snapshot();

        // Publish before releasing the lock so watchers see mutations in order
        if let Some(switch) = switch {
            self.publish_events(&switch);
        }

        // Notify snapshot watchers (this drives the ticking task)
        if let Err(e) = self.timer_update_tx.send(snapshot.clone()) {
            warn!("Failed to send timer update: {}", e);
        }
        drop(timer);

        Ok((switch, snapshot))
    }

    fn publish_events(&self, switch: &ModeSwitch) {
        info!("Timer switched from {:?} to {:?} (completed: {})", switch.from, switch.to, switch.completed);
        for event in switch.events() {
            // No subscribers is fine; the events are still returned to the caller
            if self.timer_event_tx.send(event).is_err() {
                debug!("No subscribers for timer event {:?}", event);
            }
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Start or pause the countdown
    pub fn toggle_timer(&self) -> Result<TimerSnapshot, String> {
        let (_, snapshot) = self.update_timer(|timer| {
            timer.toggle();
            None
        })?;
        info!("Timer {}", if snapshot.is_running { "started" } else { "paused" });
        self.record_action(if snapshot.is_running { "start" } else { "pause" });
        Ok(snapshot)
    }

    /// Rewind the current interval
    pub fn reset_timer(&self) -> Result<TimerSnapshot, String> {
        let (_, snapshot) = self.update_timer(|timer| {
            timer.reset();
            None
        })?;
        info!("Timer reset to {}", snapshot.countdown);
        self.record_action("reset");
        Ok(snapshot)
    }

    /// Jump to the next interval
    pub fn skip_timer(&self) -> Result<(ModeSwitch, TimerSnapshot), String> {
        let (switch, snapshot) = self.update_timer(|timer| Some(timer.skip()))?;
        self.record_action("skip");
        let switch = switch.ok_or_else(|| "Skip did not switch modes".to_string())?;
        Ok((switch, snapshot))
    }

    /// Advance the countdown by one second (called by the ticking task)
    pub fn tick_timer(&self) -> Result<(Option<ModeSwitch>, TimerSnapshot), String> {
        let (switch, snapshot) = self.update_timer(|timer| timer.tick())?;
        debug!("Timer tick: {} left", snapshot.countdown);
        Ok((switch, snapshot))
    }

    /// Get current timer snapshot
    pub fn get_timer_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.timer.lock()
            .map(|timer| timer.snapshot())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    pub fn get_timer_config(&self) -> Result<TimerConfig, String> {
        self.timer.lock()
            .map(|timer| *timer.config())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Subscribe to timer notifications
    pub fn subscribe_timer_events(&self) -> broadcast::Receiver<TimerEvent> {
        self.timer_event_tx.subscribe()
    }

    /// Subscribe to timer snapshots
    pub fn watch_timer(&self) -> watch::Receiver<TimerSnapshot> {
        self.timer_update_tx.subscribe()
    }

    /// Record a study session, falling back to the active subject
    pub fn record_study_session(&self, subject: Option<String>, duration_minutes: u32) -> Result<StudySession, String> {
        let mut log = self.study_log.lock()
            .map_err(|e| format!("Failed to lock study log: {}", e))?;

        let subject = subject.or_else(|| log.active_subject().map(str::to_string));
        Ok(log.add_session(subject, duration_minutes, Utc::now()))
    }

    pub fn remove_study_session(&self, id: u64) -> Result<bool, String> {
        let mut log = self.study_log.lock()
            .map_err(|e| format!("Failed to lock study log: {}", e))?;

        let removed = log.remove_session(id);
        if removed {
            info!("Removed study session {}", id);
        }
        Ok(removed)
    }

    /// Get recorded sessions, optionally for one subject only
    pub fn get_study_sessions(&self, subject: Option<&str>) -> Result<Vec<StudySession>, String> {
        let log = self.study_log.lock()
            .map_err(|e| format!("Failed to lock study log: {}", e))?;

        Ok(match subject {
            Some(subject) => log.sessions_for(subject),
            None => log.sessions().to_vec(),
        })
    }

    pub fn get_total_minutes_for(&self, subject: &str) -> Result<u64, String> {
        self.study_log.lock()
            .map(|log| log.total_minutes_for(subject))
            .map_err(|e| format!("Failed to lock study log: {}", e))
    }

    pub fn get_study_stats(&self) -> Result<(StudyStats, Option<String>), String> {
        self.study_log.lock()
            .map(|log| (log.stats().clone(), log.active_subject().map(str::to_string)))
            .map_err(|e| format!("Failed to lock study log: {}", e))
    }

    pub fn set_active_subject(&self, subject: Option<String>) -> Result<Option<String>, String> {
        let mut log = self.study_log.lock()
            .map_err(|e| format!("Failed to lock study log: {}", e))?;

        log.set_active_subject(subject);
        let active = log.active_subject().map(str::to_string);
        info!("Active subject set to: {:?}", active);
        drop(log);

        self.record_action("subject");
        Ok(active)
    }

    /// Append a user message and the assistant's reply as one exchange
    pub fn record_chat_exchange(&self, question: String, answer: String) -> Result<(ChatMessage, ChatMessage), String> {
        let mut log = self.chat_log.lock()
            .map_err(|e| format!("Failed to lock chat log: {}", e))?;

        let question = log.add_user_message(question);
        let answer = log.add_bot_message(answer);
        Ok((question, answer))
    }

    pub fn get_chat_history(&self) -> Result<Vec<ChatMessage>, String> {
        self.chat_log.lock()
            .map(|log| log.messages().to_vec())
            .map_err(|e| format!("Failed to lock chat log: {}", e))
    }

    /// Reset the conversation to the welcome message
    pub fn clear_chat_history(&self) -> Result<Vec<ChatMessage>, String> {
        let mut log = self.chat_log.lock()
            .map_err(|e| format!("Failed to lock chat log: {}", e))?;

        log.clear();
        Ok(log.messages().to_vec())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Phase;

    fn test_state() -> AppState {
        AppState::new(0, "127.0.0.1".to_string(), TimerConfig::default())
    }

    #[test]
    fn skip_publishes_break_started() {
        let state = test_state();
        let mut events = state.subscribe_timer_events();

        let (switch, snapshot) = state.skip_timer().unwrap();
        assert_eq!(switch.to, Phase::ShortBreak);
        assert_eq!(snapshot.time_left_seconds, 300);
        assert_eq!(events.try_recv().unwrap(), TimerEvent::BreakStarted { is_long_break: false });
        assert!(events.try_recv().is_err());
        assert_eq!(state.get_last_action().0.as_deref(), Some("skip"));
    }

    #[test]
    fn mutations_update_the_watch_channel() {
        let state = test_state();
        let rx = state.watch_timer();

        state.toggle_timer().unwrap();
        assert!(rx.borrow().is_running);

        state.reset_timer().unwrap();
        assert!(!rx.borrow().is_running);
        assert_eq!(rx.borrow().time_left_seconds, 1500);
    }

    #[test]
    fn tick_only_counts_while_running() {
        let state = test_state();
        let (_, snapshot) = state.tick_timer().unwrap();
        assert_eq!(snapshot.time_left_seconds, 1500);

        state.toggle_timer().unwrap();
        let (switch, snapshot) = state.tick_timer().unwrap();
        assert!(switch.is_none());
        assert_eq!(snapshot.time_left_seconds, 1499);
    }

    #[test]
    fn chat_exchange_appends_after_welcome() {
        let state = test_state();
        state.record_chat_exchange("hi".to_string(), "hello".to_string()).unwrap();
        assert_eq!(state.get_chat_history().unwrap().len(), 3);

        let history = state.clear_chat_history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text, crate::state::chat_log::WELCOME_MESSAGE);
    }

    #[test]
    fn last_published_snapshot_matches_timer() {
        let state = Arc::new(test_state());
        let rx = state.watch_timer();

        let ticker = {
            let state = Arc::clone(&state);
            std::thread::spawn(move || {
                for _ in 0..2000 {
                    state.tick_timer().unwrap();
                }
            })
        };
        let toggler = {
            let state = Arc::clone(&state);
            std::thread::spawn(move || {
                for _ in 0..2001 {
                    state.toggle_timer().unwrap();
                }
            })
        };
        ticker.join().unwrap();
        toggler.join().unwrap();

        let published = rx.borrow().clone();
        assert_eq!(published, state.get_timer_snapshot().unwrap());
        assert!(published.is_running, "an odd number of toggles leaves it running");
    }

    #[test]
    fn sessions_default_to_active_subject() {
        let state = test_state();
        state.set_active_subject(Some("Physics".to_string())).unwrap();

        let session = state.record_study_session(None, 25).unwrap();
        assert_eq!(session.subject.as_deref(), Some("Physics"));

        let session = state.record_study_session(Some("Art".to_string()), 10).unwrap();
        assert_eq!(session.subject.as_deref(), Some("Art"));

        assert_eq!(state.get_study_sessions(Some("Physics")).unwrap().len(), 1);
        assert_eq!(state.get_total_minutes_for("Art").unwrap(), 10);
        let (stats, active) = state.get_study_stats().unwrap();
        assert_eq!(stats.sessions_completed, 2);
        assert_eq!(active.as_deref(), Some("Physics"));
    }
}
