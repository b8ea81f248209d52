//! Derived views over recorded sessions.
//!
//! Everything here is a pure function of a state snapshot and a point in
//! time, so the store and the front end can share it.

use chrono::{DateTime, Duration, Local, NaiveDate};
use std::collections::BTreeSet;

use crate::state::{Challenge, Session};

/// Sessions expected per challenge day (morning and evening).
pub const SESSIONS_PER_DAY: u32 = 2;

/// Length of the unbroken run of days, ending today, with at least one
/// session.
///
/// Several sessions on the same day count once. If there is no session
/// today the streak is 0, and the first day without a session ends the run.
pub fn streak(sessions: &[Session], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = sessions.iter().map(Session::day).collect();

    let mut streak = 0;
    let mut expected = today;
    for day in days.into_iter().rev() {
        if day > expected {
            // future-dated entries don't count
            continue;
        }
        if day < expected {
            break;
        }
        streak += 1;
        match expected.pred_opt() {
            Some(prev) => expected = prev,
            None => break,
        }
    }
    streak
}

/// Aggregates over the trailing seven days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeeklyStats {
    pub sessions_count: usize,
    pub total_seconds: u64,
    /// 0 when there were no sessions.
    pub average_seconds: f64,
}

/// Sessions dated at or after `now - 7 days`.
pub fn weekly_stats(sessions: &[Session], now: DateTime<Local>) -> WeeklyStats {
    let week_ago = now - Duration::days(7);
    let week: Vec<&Session> = sessions.iter().filter(|s| s.date >= week_ago).collect();

    let total_seconds: u64 = week.iter().map(|s| s.duration).sum();
    let average_seconds = if week.is_empty() {
        0.0
    } else {
        total_seconds as f64 / week.len() as f64
    };

    WeeklyStats {
        sessions_count: week.len(),
        total_seconds,
        average_seconds,
    }
}

/// Sessions whose notes contain `query`, ignoring case, in recorded order.
pub fn search_notes<'a>(sessions: &'a [Session], query: &str) -> Vec<&'a Session> {
    let query = query.to_lowercase();
    sessions
        .iter()
        .filter(|s| s.notes.to_lowercase().contains(&query))
        .collect()
}

/// Sessions ordered by date for display; ties keep recorded order.
pub fn sorted_sessions(sessions: &[Session], ascending: bool) -> Vec<&Session> {
    let mut sorted: Vec<&Session> = sessions.iter().collect();
    if ascending {
        sorted.sort_by(|a, b| a.date.cmp(&b.date));
    } else {
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
    }
    sorted
}

/// Number of sessions recorded on `day`.
pub fn sessions_on(sessions: &[Session], day: NaiveDate) -> usize {
    sessions.iter().filter(|s| s.day() == day).count()
}

/// Progress through the active challenge.
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeProgress {
    /// 1-based day within the challenge (may exceed `total_days` once it
    /// has ended, or be below 1 before it starts).
    pub day_number: i64,
    pub total_days: u32,
    pub days_remaining: u32,
    /// Share of the challenge window elapsed, 0..=100.
    pub percent_complete: u8,
    pub total_sessions: usize,
    pub target_sessions: u32,
    pub total_seconds: u64,
    pub average_seconds: f64,
    pub sessions_today: usize,
    /// Session count for each challenge day, starting at the start date.
    pub days: Vec<DayCell>,
}

/// One day of the challenge grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub sessions: usize,
    pub is_today: bool,
}

impl ChallengeProgress {
    /// Compute progress as of `now`.
    pub fn compute(challenge: &Challenge, sessions: &[Session], now: DateTime<Local>) -> Self {
        let today = now.date_naive();
        let elapsed_days = (today - challenge.start_date).num_days();
        let day_number = elapsed_days + 1;
        let total_days = challenge.duration;

        let days_remaining = (i64::from(total_days) - day_number).clamp(0, i64::from(total_days));

        let start = challenge
            .start_date
            .and_hms_opt(0, 0, 0)
            .map(crate::clock::local_from_naive)
            .unwrap_or(now);
        let elapsed_secs = (now - start).num_seconds().max(0) as f64;
        let percent = if total_days == 0 {
            100.0
        } else {
            let window_secs = f64::from(total_days) * 86_400.0;
            (elapsed_secs / window_secs * 100.0).round().clamp(0.0, 100.0)
        };

        let total_seconds: u64 = sessions.iter().map(|s| s.duration).sum();
        let average_seconds = if sessions.is_empty() {
            0.0
        } else {
            total_seconds as f64 / sessions.len() as f64
        };

        let days = challenge
            .start_date
            .iter_days()
            .take(total_days as usize)
            .map(|date| DayCell {
                date,
                sessions: sessions_on(sessions, date),
                is_today: date == today,
            })
            .collect();

        Self {
            day_number,
            total_days,
            days_remaining: days_remaining as u32,
            percent_complete: percent as u8,
            total_sessions: sessions.len(),
            target_sessions: total_days.saturating_mul(SESSIONS_PER_DAY),
            total_seconds,
            average_seconds,
            sessions_today: sessions_on(sessions, today),
            days,
        }
    }

    /// Challenge days with at least one session.
    pub fn practiced_days(&self) -> usize {
        self.days.iter().filter(|d| d.sessions > 0).count()
    }
}
