//! # Gymstreak Core Library
//!
//! Core logic for a gym attendance tracker that rewards consistent visits with
//! a streak counter, a points balance and purchasable streak protectors. The
//! `gymstreak` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Streak engine**: a pure function from check-ins, protector dates and
//!   rest weekdays (plus an explicit "today") to [`StreakStats`]
//! - **Storage**: a [`KeyValueStore`] holding JSON collections, backed by
//!   SQLite in production and [`MemoryStore`] in tests, plus TOML configuration
//! - **Tracker**: [`GymTracker`] performs every mutation (check-in, protector
//!   purchase, rest days, locations) and feeds the engine
//!
//! ## Key Components
//!
//! - [`compute_stats`]: streak computation
//! - [`GymTracker`]: collaborator service over a store
//! - [`PointsLedger`]: points credit/debit
//! - [`Database`]: SQLite key-value persistence
//! - [`Config`]: application configuration management

pub mod attendance;
pub mod calendar;
pub mod error;
pub mod events;
pub mod ledger;
pub mod storage;
pub mod streak;
pub mod tracker;

pub use attendance::{AttendanceRecord, Coordinate, GymLocation, ProtectorUsage, RestDays, UserData};
pub use calendar::{mark_days, DayMark};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::{Event, EventLog, EventSink, NullSink, TracingSink};
pub use ledger::PointsLedger;
pub use storage::{Config, Database, KeyValueStore, MemoryStore, PointsConfig};
pub use streak::{
    compute_stats, compute_stats_with, dates_between, SameDayPolicy, StreakConfig, StreakRun,
    StreakStats,
};
pub use tracker::GymTracker;
