//! Per-day marks for a calendar view.
//!
//! Attendance and protector marks come from the stored data; rest marks are
//! projected onto every matching weekday in the range.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::attendance::{AttendanceRecord, ProtectorUsage, RestDays};
use crate::streak::dates_between;

/// What happened on a single day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMark {
    pub attended: bool,
    pub protected: bool,
    pub rest: bool,
}

/// Marks for every date in `from..=to` that has at least one flag set.
///
/// Record timestamps are converted to local dates in `tz`.
pub fn mark_days<Tz: TimeZone>(
    records: &[AttendanceRecord],
    protectors: &ProtectorUsage,
    rest_days: &RestDays,
    from: NaiveDate,
    to: NaiveDate,
    tz: &Tz,
) -> BTreeMap<NaiveDate, DayMark> {
    let in_range = |d: &NaiveDate| *d >= from && *d <= to;
    let mut marks: BTreeMap<NaiveDate, DayMark> = BTreeMap::new();

    for date in records
        .iter()
        .map(|r| r.timestamp.with_timezone(tz).date_naive())
        .filter(in_range)
    {
        marks.entry(date).or_default().attended = true;
    }

    for date in protectors.iter().filter(in_range) {
        marks.entry(date).or_default().protected = true;
    }

    if !rest_days.is_empty() {
        for date in dates_between(from, to).filter(|d| rest_days.covers(*d)) {
            marks.entry(date).or_default().rest = true;
        }
    }

    marks
}
