//! Pomodoro timer state machine
//!
//! A single countdown that alternates between study and break intervals,
//! choosing a long break after every `long_break_after` completed study
//! intervals. The machine is purely synchronous: a driver calls [`PomodoroTimer::tick`]
//! once per elapsed second and user input calls `toggle`, `reset` and `skip`.

use serde::{Deserialize, Serialize};

use crate::utils::format_countdown;

pub const DEFAULT_STUDY_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: u32 = 15;
pub const DEFAULT_LONG_BREAK_AFTER: u32 = 4;

/// Interval lengths and long-break cadence, fixed for the lifetime of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub study_minutes: u32,
    pub break_minutes: u32,
    pub long_break_minutes: u32,
    /// Number of completed study intervals before a long break
    pub long_break_after: u32,
}

impl TimerConfig {
    pub fn study_seconds(&self) -> u32 {
        self.study_minutes.saturating_mul(60)
    }

    pub fn break_seconds(&self) -> u32 {
        self.break_minutes.saturating_mul(60)
    }

    pub fn long_break_seconds(&self) -> u32 {
        self.long_break_minutes.saturating_mul(60)
    }

    /// Whether finishing the next study interval earns a long break.
    ///
    /// A cadence of zero never yields a long break.
    pub fn long_break_due(&self, completed_intervals: u32) -> bool {
        completed_intervals
            .saturating_add(1)
            .checked_rem(self.long_break_after)
            == Some(0)
    }

    /// Full length in seconds of the given phase
    pub fn phase_seconds(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Study => self.study_seconds(),
            Phase::ShortBreak => self.break_seconds(),
            Phase::LongBreak => self.long_break_seconds(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            study_minutes: DEFAULT_STUDY_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            long_break_minutes: DEFAULT_LONG_BREAK_MINUTES,
            long_break_after: DEFAULT_LONG_BREAK_AFTER,
        }
    }
}

/// The interval currently counting down.
///
/// The short/long decision for a break is made once, when the break is
/// entered, and carried here so that reset and progress never recompute it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Study,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn is_study(&self) -> bool {
        matches!(self, Phase::Study)
    }

    pub fn is_long_break(&self) -> bool {
        matches!(self, Phase::LongBreak)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Phase::Study => "Study Session",
            Phase::ShortBreak | Phase::LongBreak => "Break Time",
        }
    }
}

/// Notifications fired during a mode switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    /// The countdown ran out; carries whether a study interval just finished
    Completed { was_study_mode: bool },
    StudyStarted,
    BreakStarted { is_long_break: bool },
}

/// Outcome of a mode switch, returned by `tick` and `skip`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeSwitch {
    /// True when the countdown ran out, false when the interval was skipped
    pub completed: bool,
    pub from: Phase,
    pub to: Phase,
}

impl ModeSwitch {
    pub fn is_long_break(&self) -> bool {
        self.to.is_long_break()
    }

    /// Notifications in the order they fire
    pub fn events(&self) -> Vec<TimerEvent> {
        let mut events = Vec::with_capacity(2);
        if self.completed {
            events.push(TimerEvent::Completed {
                was_study_mode: self.from.is_study(),
            });
        }
        if self.to.is_study() {
            events.push(TimerEvent::StudyStarted);
        } else {
            events.push(TimerEvent::BreakStarted {
                is_long_break: self.to.is_long_break(),
            });
        }
        events
    }
}

/// Render-ready view of a timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub time_left_seconds: u32,
    pub interval_total_seconds: u32,
    pub is_running: bool,
    pub is_study_mode: bool,
    pub completed_intervals: u32,
    pub progress_percent: f64,
    pub countdown: String,
    pub title: String,
}

/// Pomodoro countdown alternating between study and break intervals
#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    config: TimerConfig,
    phase: Phase,
    time_left_seconds: u32,
    is_running: bool,
    completed_intervals: u32,
}

impl PomodoroTimer {
    /// Create a paused timer at the start of a study interval
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            phase: Phase::Study,
            time_left_seconds: config.study_seconds(),
            is_running: false,
            completed_intervals: 0,
        }
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn time_left_seconds(&self) -> u32 {
        self.time_left_seconds
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn is_study_mode(&self) -> bool {
        self.phase.is_study()
    }

    pub fn completed_intervals(&self) -> u32 {
        self.completed_intervals
    }

    /// Full length of the current interval, using the pinned break decision
    pub fn interval_total_seconds(&self) -> u32 {
        self.config.phase_seconds(self.phase)
    }

    /// Remaining share of the current interval in percent, 100 at its start
    pub fn progress_percent(&self) -> f64 {
        let total = self.interval_total_seconds();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.time_left_seconds) / f64::from(total) * 100.0
    }

    /// Remaining time as `MM:SS`
    pub fn countdown_label(&self) -> String {
        format_countdown(self.time_left_seconds)
    }

    /// Start when paused, pause when running. Returns the new running state.
    pub fn toggle(&mut self) -> bool {
        self.is_running = !self.is_running;
        self.is_running
    }

    /// Pause and rewind the current interval to its full length
    pub fn reset(&mut self) {
        self.is_running = false;
        self.time_left_seconds = self.interval_total_seconds();
    }

    /// Pause and move to the next interval, discarding remaining time
    pub fn skip(&mut self) -> ModeSwitch {
        self.is_running = false;
        self.switch_mode(false)
    }

    /// Advance the countdown by one second.
    ///
    /// Does nothing while paused. Returns the mode switch when the countdown
    /// runs out.
    pub fn tick(&mut self) -> Option<ModeSwitch> {
        if !self.is_running {
            return None;
        }

        self.time_left_seconds = self.time_left_seconds.saturating_sub(1);
        if self.time_left_seconds > 0 {
            return None;
        }

        self.is_running = false;
        Some(self.switch_mode(true))
    }

    fn switch_mode(&mut self, completed: bool) -> ModeSwitch {
        let from = self.phase;
        let to = if from.is_study() {
            let next = if self.config.long_break_due(self.completed_intervals) {
                Phase::LongBreak
            } else {
                Phase::ShortBreak
            };
            self.completed_intervals = self.completed_intervals.saturating_add(1);
            next
        } else {
            Phase::Study
        };

        self.phase = to;
        self.time_left_seconds = self.config.phase_seconds(to);

        ModeSwitch { completed, from, to }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            time_left_seconds: self.time_left_seconds,
            interval_total_seconds: self.interval_total_seconds(),
            is_running: self.is_running,
            is_study_mode: self.is_study_mode(),
            completed_intervals: self.completed_intervals,
            progress_percent: self.progress_percent(),
            countdown: self.countdown_label(),
            title: self.phase.title().to_string(),
        }
    }
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}
