//! Streak computation engine.
//!
//! A streak is a run of consecutive *covered* calendar days. A day is covered
//! when the user checked in, when a streak protector was used on it, or when
//! it falls on one of the user's rest weekdays. Only the days between two
//! check-ins (or between the last check-in and "today") need cover; the
//! check-in days themselves always count.
//!
//! The engine is a pure function of its inputs. "Today" is passed in as
//! `as_of`, and its timezone decides which local calendar date every
//! timestamp falls on.

pub mod dates;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attendance::{AttendanceRecord, ProtectorUsage, RestDays};

pub use dates::{dates_between, DateRange};

/// How repeated check-ins on the same local date affect the run length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SameDayPolicy {
    /// A day counts once no matter how many check-ins it holds.
    #[default]
    Collapse,
    /// Every check-in adds one, even on an already counted day.
    CountEach,
}

/// Tunables for [`compute_stats_with`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakConfig {
    /// Closed runs kept in the history, most recent last.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Shortest closed run that is recorded in the history.
    #[serde(default = "default_min_history_days")]
    pub min_history_days: u32,
    #[serde(default)]
    pub same_day: SameDayPolicy,
}

fn default_history_limit() -> usize {
    5
}
fn default_min_history_days() -> u32 {
    3
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            min_history_days: default_min_history_days(),
            same_day: SameDayPolicy::default(),
        }
    }
}

/// A streak that was later broken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRun {
    pub start: NaiveDate,
    /// Last check-in date of the run.
    pub end: NaiveDate,
    pub days: u32,
}

/// Output of the engine. Derived on every call, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakStats {
    pub current_streak: u32,
    pub best_streak: u32,
    /// Number of check-ins, not number of covered days.
    pub total_days: usize,
    pub last_check_in: Option<DateTime<Utc>>,
    pub streak_history: Vec<StreakRun>,
}

/// Compute streak statistics with the default [`StreakConfig`].
pub fn compute_stats<Tz: TimeZone>(
    records: &[AttendanceRecord],
    protectors: &ProtectorUsage,
    rest_days: &RestDays,
    as_of: &DateTime<Tz>,
) -> StreakStats {
    compute_stats_with(
        &StreakConfig::default(),
        records,
        protectors,
        rest_days,
        as_of,
    )
}

/// Compute streak statistics.
///
/// `records` may be in any order. Timestamps are truncated to local dates in
/// the timezone of `as_of` before any day arithmetic.
pub fn compute_stats_with<Tz: TimeZone>(
    config: &StreakConfig,
    records: &[AttendanceRecord],
    protectors: &ProtectorUsage,
    rest_days: &RestDays,
    as_of: &DateTime<Tz>,
) -> StreakStats {
    let mut sorted: Vec<&AttendanceRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.timestamp);

    let Some(last_record) = sorted.last() else {
        return StreakStats::default();
    };
    let last_check_in = last_record.timestamp;

    let tz = as_of.timezone();
    let local_date = |record: &AttendanceRecord| record.timestamp.with_timezone(&tz).date_naive();
    let gap_is_covered = |from: NaiveDate, to: NaiveDate| {
        dates::interior(from, to).all(|d| protectors.contains(d) || rest_days.covers(d))
    };

    let mut history: Vec<StreakRun> = Vec::new();
    let mut close_run = |start: NaiveDate, end: NaiveDate, days: u32| {
        if days >= config.min_history_days {
            history.push(StreakRun { start, end, days });
        }
    };

    let mut current = 0u32;
    let mut best = 0u32;
    let mut run_start: Option<NaiveDate> = None;
    let mut previous: Option<NaiveDate> = None;

    for record in &sorted {
        let date = local_date(record);
        match previous {
            None => {
                run_start = Some(date);
                current = 1;
            }
            Some(prev) => {
                let day_diff = (date - prev).num_days();
                if day_diff <= 0 {
                    if config.same_day == SameDayPolicy::CountEach {
                        current += 1;
                    }
                } else if day_diff == 1 {
                    current += 1;
                } else if gap_is_covered(prev, date) {
                    current += day_diff as u32;
                } else {
                    close_run(run_start.unwrap_or(prev), prev, current);
                    run_start = Some(date);
                    current = 1;
                }
            }
        }
        previous = Some(date);
        best = best.max(current);
    }

    let today = as_of.date_naive();
    if let Some(last) = previous {
        let since_last = (today - last).num_days();
        if since_last > 1 && !gap_is_covered(last, today) {
            close_run(run_start.unwrap_or(last), last, current);
            current = 0;
        }
    }

    if history.len() > config.history_limit {
        let excess = history.len() - config.history_limit;
        history.drain(..excess);
    }

    debug!(
        records = sorted.len(),
        current_streak = current,
        best_streak = best,
        closed_runs = history.len(),
        %today,
        "computed streak stats"
    );

    StreakStats {
        current_streak: current,
        best_streak: best,
        total_days: sorted.len(),
        last_check_in: Some(last_check_in),
        streak_history: history,
    }
}
