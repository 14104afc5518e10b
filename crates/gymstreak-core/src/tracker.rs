//! Tracker service.
//!
//! Owns every read and write around the streak engine: check-ins, the points
//! balance, protector purchases, rest days and gym locations. All state goes
//! through an explicit [`KeyValueStore`]; the engine only ever sees the
//! collections loaded here.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tracing::{error, info, warn};

use crate::attendance::{AttendanceRecord, GymLocation, ProtectorUsage, RestDays, UserData};
use crate::calendar::{mark_days, DayMark};
use crate::error::{CoreError, Result};
use crate::events::{Event, EventSink, NullSink};
use crate::ledger::PointsLedger;
use crate::storage::{keys, Config, KeyValueStore};
use crate::streak::{compute_stats_with, StreakStats};

/// Gym attendance tracker over a key-value store.
pub struct GymTracker<S> {
    store: S,
    config: Config,
    events: Box<dyn EventSink>,
}

impl<S: KeyValueStore> GymTracker<S> {
    pub fn new(store: S, config: Config) -> Self {
        Self {
            store,
            config,
            events: Box::new(NullSink),
        }
    }

    /// Send state-change events to `sink` instead of dropping them.
    pub fn with_events(mut self, sink: impl EventSink + 'static) -> Self {
        self.events = Box::new(sink);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn ledger(&self) -> PointsLedger<&S> {
        PointsLedger::new(&self.store)
    }

    fn emit(&self, event: Event) {
        self.events.emit(&event);
    }

    // ── Attendance ──────────────────────────────────────────────────────

    /// All check-ins in storage order.
    ///
    /// # Errors
    /// Returns an error if the store fails or holds malformed JSON.
    pub fn attendance_records(&self) -> Result<Vec<AttendanceRecord>> {
        self.store.get_json(keys::ATTENDANCE)
    }

    /// Whether any check-in falls on `date` in timezone `tz`.
    ///
    /// # Errors
    /// Returns an error if the records cannot be loaded.
    pub fn has_checked_in_on<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> Result<bool> {
        Ok(self
            .attendance_records()?
            .iter()
            .any(|r| r.timestamp.with_timezone(tz).date_naive() == date))
    }

    /// Record a check-in at `location_id` and credit the check-in reward.
    ///
    /// Only one check-in per local date (in the timezone of `at`) is accepted.
    ///
    /// # Errors
    /// Returns [`CoreError::AlreadyCheckedIn`] for a second check-in on the
    /// same date, or a storage error.
    pub fn register_attendance<Tz: TimeZone>(
        &self,
        location_id: &str,
        at: &DateTime<Tz>,
    ) -> Result<AttendanceRecord> {
        let date = at.date_naive();
        let mut records = self.attendance_records()?;
        let tz = at.timezone();
        if records
            .iter()
            .any(|r| r.timestamp.with_timezone(&tz).date_naive() == date)
        {
            warn!(%date, location_id, "rejected duplicate check-in");
            return Err(CoreError::AlreadyCheckedIn { date });
        }

        let record = AttendanceRecord::new(location_id, at.with_timezone(&Utc));
        records.push(record.clone());
        self.store.set_json(keys::ATTENDANCE, &records)?;

        let balance = self.ledger().credit(self.config.points.checkin_reward)?;
        info!(
            record_id = %record.id,
            location_id,
            %date,
            balance,
            "registered attendance"
        );

        self.emit(Event::AttendanceRecorded {
            record_id: record.id.clone(),
            location_id: record.location_id.clone(),
            at: record.timestamp,
        });
        self.emit(Event::PointsChanged {
            balance,
            at: record.timestamp,
        });
        Ok(record)
    }

    // ── Points ──────────────────────────────────────────────────────────

    /// # Errors
    /// Returns an error if the stored balance cannot be read.
    pub fn points(&self) -> Result<u64> {
        self.ledger().balance()
    }

    /// Credit `amount` points and return the new balance.
    ///
    /// # Errors
    /// Returns an error if the store fails.
    pub fn add_points(&self, amount: u64) -> Result<u64> {
        let balance = self.ledger().credit(amount)?;
        self.emit(Event::PointsChanged {
            balance,
            at: Utc::now(),
        });
        Ok(balance)
    }

    // ── Streak protectors ───────────────────────────────────────────────

    /// # Errors
    /// Returns an error if the store fails or holds malformed JSON.
    pub fn protector_usage(&self) -> Result<ProtectorUsage> {
        self.store.get_json(keys::STREAK_PROTECTORS)
    }

    /// Buy a streak protector for `date` and return the remaining balance.
    ///
    /// The protector price is debited and the date marked together; if the
    /// mark cannot be written the points are returned. Protecting a date that
    /// is already protected still costs points.
    ///
    /// # Errors
    /// Returns [`CoreError::InsufficientPoints`] with nothing written when the
    /// balance is below the protector price.
    pub fn use_streak_protector(&self, date: NaiveDate) -> Result<u64> {
        let cost = self.config.points.protector_cost;
        let mut usage = self.protector_usage()?;
        let ledger = self.ledger();

        let balance = ledger.debit(cost)?;
        usage.insert(date);
        if let Err(e) = self.store.set_json(keys::STREAK_PROTECTORS, &usage) {
            warn!(%date, error = %e, "failed to store protector, refunding");
            if let Err(refund) = ledger.credit(cost) {
                error!(%date, cost, error = %refund, "protector refund failed");
            }
            return Err(e);
        }

        info!(%date, cost, balance, "used streak protector");
        let now = Utc::now();
        self.emit(Event::ProtectorUsed { date, at: now });
        self.emit(Event::PointsChanged { balance, at: now });
        Ok(balance)
    }

    // ── Rest days ───────────────────────────────────────────────────────

    /// # Errors
    /// Returns an error if the store fails or holds malformed JSON.
    pub fn user_data(&self) -> Result<UserData> {
        self.store.get_json(keys::USER_DATA)
    }

    /// Replace the rest weekdays (0 = Sunday .. 6 = Saturday).
    ///
    /// # Errors
    /// Returns a validation error for numbers above 6; nothing is written then.
    pub fn update_rest_days(&self, days: &[u8]) -> Result<RestDays> {
        let rest_days = RestDays::from_numbers(days)?;
        let mut user_data = self.user_data()?;
        user_data.rest_days = rest_days.clone();
        self.store.set_json(keys::USER_DATA, &user_data)?;

        info!(rest_days = ?rest_days.numbers(), "updated rest days");
        self.emit(Event::RestDaysUpdated {
            rest_days: rest_days.numbers(),
            at: Utc::now(),
        });
        Ok(rest_days)
    }

    // ── Locations ───────────────────────────────────────────────────────

    /// # Errors
    /// Returns an error if the store fails or holds malformed JSON.
    pub fn locations(&self) -> Result<Vec<GymLocation>> {
        self.store.get_json(keys::LOCATIONS)
    }

    /// # Errors
    /// Returns an error if the store fails.
    pub fn save_location(&self, location: GymLocation) -> Result<()> {
        let mut locations = self.locations()?;
        info!(id = %location.id, name = %location.name, "saved gym location");
        locations.push(location);
        self.store.set_json(keys::LOCATIONS, &locations)?;
        self.emit(Event::LocationsChanged {
            count: locations.len(),
            at: Utc::now(),
        });
        Ok(())
    }

    /// Remove the location with `id`. Returns whether one was removed.
    ///
    /// # Errors
    /// Returns an error if the store fails.
    pub fn delete_location(&self, id: &str) -> Result<bool> {
        let mut locations = self.locations()?;
        let before = locations.len();
        locations.retain(|loc| loc.id != id);
        if locations.len() == before {
            return Ok(false);
        }
        self.store.set_json(keys::LOCATIONS, &locations)?;
        info!(id, "deleted gym location");
        self.emit(Event::LocationsChanged {
            count: locations.len(),
            at: Utc::now(),
        });
        Ok(true)
    }

    // ── Derived views ───────────────────────────────────────────────────

    /// Streak statistics as of `as_of`, using the configured streak tuning.
    ///
    /// # Errors
    /// Returns an error if any of the three inputs cannot be loaded.
    pub fn streak_stats<Tz: TimeZone>(&self, as_of: &DateTime<Tz>) -> Result<StreakStats> {
        let records = self.attendance_records()?;
        let protectors = self.protector_usage()?;
        let user_data = self.user_data()?;
        Ok(compute_stats_with(
            &self.config.streak,
            &records,
            &protectors,
            &user_data.rest_days,
            as_of,
        ))
    }

    /// Day marks for `from..=to` with local dates in `tz`.
    ///
    /// # Errors
    /// Returns an error if any of the three inputs cannot be loaded.
    pub fn calendar<Tz: TimeZone>(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        tz: &Tz,
    ) -> Result<BTreeMap<NaiveDate, DayMark>> {
        let records = self.attendance_records()?;
        let protectors = self.protector_usage()?;
        let user_data = self.user_data()?;
        Ok(mark_days(
            &records,
            &protectors,
            &user_data.rest_days,
            from,
            to,
            tz,
        ))
    }

    /// Delete every stored collection and the points balance.
    ///
    /// # Errors
    /// Returns the first store error; earlier keys stay deleted.
    pub fn reset_all_data(&self) -> Result<()> {
        for key in keys::ALL {
            self.store.delete(key)?;
        }
        info!("reset all data");
        self.emit(Event::DataReset { at: Utc::now() });
        Ok(())
    }
}
