//! Attendance data model.
//!
//! These are the three collections the streak engine consumes, plus the
//! registered gym locations. Serialized shapes match what the store keeps
//! under its JSON keys:
//! - attendance: `[{"id", "locationId", "timestamp"}]`
//! - protectors: `{"2024-01-02": true}`
//! - user data: `{"restDays": [0, 6]}`

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

use crate::error::ValidationError;

/// One successful gym check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub location_id: String,
    pub timestamp: DateTime<Utc>,
}

impl AttendanceRecord {
    /// Create a record with a fresh unique id.
    pub fn new(location_id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            location_id: location_id.into(),
            timestamp,
        }
    }
}

/// Dates on which a streak protector was consumed.
///
/// Stored as a map of `YYYY-MM-DD` to a flag; only `true` entries count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectorUsage {
    dates: BTreeSet<NaiveDate>,
}

impl ProtectorUsage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a date as protected. Returns `false` if it already was.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Protected dates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }
}

impl FromIterator<NaiveDate> for ProtectorUsage {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl Serialize for ProtectorUsage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map: BTreeMap<String, bool> = self
            .dates
            .iter()
            .map(|d| (d.format("%Y-%m-%d").to_string(), true))
            .collect();
        map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ProtectorUsage {
    /// Any truthy flag marks the date; keys that are not `YYYY-MM-DD` are skipped.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut dates = BTreeSet::new();
        for (key, flag) in map {
            if !is_truthy(&flag) {
                continue;
            }
            match NaiveDate::parse_from_str(&key, "%Y-%m-%d") {
                Ok(date) => {
                    dates.insert(date);
                }
                Err(e) => warn!(key = %key, error = %e, "skipping invalid protector date"),
            }
        }
        Ok(Self { dates })
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Weekdays exempt from breaking a streak.
///
/// Numbered 0 = Sunday through 6 = Saturday and serialized as that list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestDays {
    days: BTreeSet<u8>,
}

impl RestDays {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from weekday numbers, rejecting anything outside 0..=6.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidRestDay`] for the first out-of-range value.
    pub fn from_numbers(numbers: &[u8]) -> Result<Self, ValidationError> {
        let mut days = BTreeSet::new();
        for &n in numbers {
            if n > 6 {
                return Err(ValidationError::InvalidRestDay(n));
            }
            days.insert(n);
        }
        Ok(Self { days })
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.days.contains(&(weekday.num_days_from_sunday() as u8))
    }

    /// Whether `date` falls on a rest weekday.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.contains(date.weekday())
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn numbers(&self) -> Vec<u8> {
        self.days.iter().copied().collect()
    }
}

impl FromIterator<Weekday> for RestDays {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        Self {
            days: iter
                .into_iter()
                .map(|w| w.num_days_from_sunday() as u8)
                .collect(),
        }
    }
}

impl Serialize for RestDays {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.numbers().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RestDays {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<i64>::deserialize(deserializer)?;
        let days = raw
            .into_iter()
            .filter(|n| (0..=6).contains(n))
            .map(|n| n as u8)
            .collect();
        Ok(Self { days })
    }
}

/// User profile object persisted under the user-data key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(default)]
    pub rest_days: RestDays,
}

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A registered gym.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GymLocation {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub timestamp: DateTime<Utc>,
}

impl GymLocation {
    pub fn new(name: impl Into<String>, coordinate: Coordinate, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            coordinate,
            timestamp,
        }
    }
}
