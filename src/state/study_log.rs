//! Study session log and running statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A finished block of study time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    pub id: u64,
    pub subject: Option<String>,
    pub duration_minutes: u32,
    pub date: DateTime<Utc>,
}

/// Aggregate statistics across all recorded sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyStats {
    pub total_study_minutes: u64,
    pub sessions_completed: u64,
    /// Consecutive calendar days with at least one session
    pub streak: u32,
    pub last_study_date: Option<DateTime<Utc>>,
}

impl StudyStats {
    fn record(&mut self, duration_minutes: u32, date: DateTime<Utc>) {
        self.total_study_minutes += u64::from(duration_minutes);
        self.sessions_completed += 1;
        self.streak = match self.last_study_date.map(|last| last.date_naive()) {
            Some(last) if last == date.date_naive() => self.streak.max(1),
            Some(last) if last.succ_opt() == Some(date.date_naive()) => {
                self.streak.saturating_add(1)
            }
            _ => 1,
        };
        self.last_study_date = Some(date);
    }
}

/// In-memory record of study sessions for one process
#[derive(Debug, Clone, Default)]
pub struct StudyLog {
    sessions: Vec<StudySession>,
    stats: StudyStats,
    active_subject: Option<String>,
    next_id: u64,
}

impl StudyLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a session and fold it into the statistics
    pub fn add_session(
        &mut self,
        subject: Option<String>,
        duration_minutes: u32,
        date: DateTime<Utc>,
    ) -> StudySession {
        self.next_id += 1;
        let session = StudySession {
            id: self.next_id,
            subject,
            duration_minutes,
            date,
        };

        self.stats.record(duration_minutes, date);
        self.sessions.push(session.clone());
        tracing::info!(
            "Recorded study session {} ({} min, subject: {:?})",
            session.id,
            session.duration_minutes,
            session.subject
        );
        session
    }

    /// Drop a session from the log. Statistics are left as they were.
    pub fn remove_session(&mut self, id: u64) -> bool {
        let initial_count = self.sessions.len();
        self.sessions.retain(|session| session.id != id);
        self.sessions.len() != initial_count
    }

    pub fn sessions(&self) -> &[StudySession] {
        &self.sessions
    }

    pub fn sessions_for(&self, subject: &str) -> Vec<StudySession> {
        self.sessions
            .iter()
            .filter(|session| session.subject.as_deref() == Some(subject))
            .cloned()
            .collect()
    }

    pub fn total_minutes_for(&self, subject: &str) -> u64 {
        self.sessions
            .iter()
            .filter(|session| session.subject.as_deref() == Some(subject))
            .map(|session| u64::from(session.duration_minutes))
            .sum()
    }

    pub fn stats(&self) -> &StudyStats {
        &self.stats
    }

    pub fn active_subject(&self) -> Option<&str> {
        self.active_subject.as_deref()
    }

    /// Set the subject attached to sessions recorded from now on; blank clears it
    pub fn set_active_subject(&mut self, subject: Option<String>) {
        self.active_subject = subject
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn sessions_accumulate_into_stats() {
        let mut log = StudyLog::new();
        log.add_session(Some("Biology".into()), 25, at(4, 9));
        log.add_session(None, 50, at(4, 11));

        let stats = log.stats();
        assert_eq!(stats.total_study_minutes, 75);
        assert_eq!(stats.sessions_completed, 2);
        assert_eq!(stats.last_study_date, Some(at(4, 11)));
    }

    #[test]
    fn streak_grows_on_consecutive_days() {
        let mut log = StudyLog::new();
        log.add_session(None, 25, at(4, 22));
        assert_eq!(log.stats().streak, 1);

        log.add_session(None, 25, at(4, 23));
        assert_eq!(log.stats().streak, 1, "same day keeps the streak");

        log.add_session(None, 25, at(5, 8));
        assert_eq!(log.stats().streak, 2);

        log.add_session(None, 25, at(6, 8));
        assert_eq!(log.stats().streak, 3);
    }

    #[test]
    fn streak_restarts_after_a_gap() {
        let mut log = StudyLog::new();
        log.add_session(None, 25, at(4, 9));
        log.add_session(None, 25, at(5, 9));
        log.add_session(None, 25, at(8, 9));
        assert_eq!(log.stats().streak, 1);
    }

    #[test]
    fn filters_and_totals_by_subject() {
        let mut log = StudyLog::new();
        log.add_session(Some("Math".into()), 25, at(4, 9));
        log.add_session(Some("History".into()), 15, at(4, 10));
        log.add_session(Some("Math".into()), 50, at(4, 11));

        let math = log.sessions_for("Math");
        assert_eq!(math.len(), 2);
        assert!(math.iter().all(|s| s.subject.as_deref() == Some("Math")));
        assert_eq!(log.total_minutes_for("Math"), 75);
        assert_eq!(log.total_minutes_for("Art"), 0);
    }

    #[test]
    fn remove_session_keeps_stats() {
        let mut log = StudyLog::new();
        let first = log.add_session(None, 25, at(4, 9));
        log.add_session(None, 25, at(4, 10));

        assert!(log.remove_session(first.id));
        assert!(!log.remove_session(first.id));
        assert_eq!(log.sessions().len(), 1);
        assert_eq!(log.stats().sessions_completed, 2);
    }

    #[test]
    fn blank_active_subject_clears_it() {
        let mut log = StudyLog::new();
        log.set_active_subject(Some("  Chemistry ".into()));
        assert_eq!(log.active_subject(), Some("Chemistry"));

        log.set_active_subject(Some("   ".into()));
        assert_eq!(log.active_subject(), None);
    }
}
