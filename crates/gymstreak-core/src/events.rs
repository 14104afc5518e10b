use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Every state change in the tracker produces an Event.
/// Views re-read their data when they see one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    AttendanceRecorded {
        record_id: String,
        location_id: String,
        at: DateTime<Utc>,
    },
    PointsChanged {
        balance: u64,
        at: DateTime<Utc>,
    },
    ProtectorUsed {
        date: NaiveDate,
        at: DateTime<Utc>,
    },
    RestDaysUpdated {
        rest_days: Vec<u8>,
        at: DateTime<Utc>,
    },
    /// A gym location was added or removed.
    LocationsChanged {
        count: usize,
        at: DateTime<Utc>,
    },
    DataReset {
        at: DateTime<Utc>,
    },
}

/// Receiver for tracker events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &Event);
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &Event) {}
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<Event>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything emitted so far.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: &Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Logs every event as JSON at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &Event) {
        match serde_json::to_string(event) {
            Ok(json) => debug!(event = %json, "tracker event"),
            Err(e) => warn!(error = %e, "failed to encode tracker event"),
        }
    }
}

impl<E: EventSink + ?Sized> EventSink for std::sync::Arc<E> {
    fn emit(&self, event: &Event) {
        (**self).emit(event);
    }
}
