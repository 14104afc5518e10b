//! Calendar date ranges.

use chrono::NaiveDate;

/// Inclusive, ascending run of calendar dates stepping one day at a time.
///
/// Cloning yields an independent iterator starting from the same position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl DateRange {
    fn empty() -> Self {
        Self {
            next: None,
            end: NaiveDate::MIN,
        }
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next.filter(|d| *d <= self.end)?;
        self.next = current.succ_opt();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = match self.next {
            Some(d) if d <= self.end => (self.end - d).num_days() as usize + 1,
            _ => 0,
        };
        (len, Some(len))
    }
}

impl ExactSizeIterator for DateRange {}

/// Every date from `start` to `end`, both included. Empty when `start > end`.
pub fn dates_between(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange {
        next: Some(start),
        end,
    }
}

/// Dates strictly between `start` and `end`.
pub fn interior(start: NaiveDate, end: NaiveDate) -> DateRange {
    match (start.succ_opt(), end.pred_opt()) {
        (Some(first), Some(last)) => dates_between(first, last),
        _ => DateRange::empty(),
    }
}
