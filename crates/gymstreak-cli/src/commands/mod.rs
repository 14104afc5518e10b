pub mod calendar;
pub mod checkin;
pub mod config;
pub mod location;
pub mod points;
pub mod protector;
pub mod reset;
pub mod rest_days;
pub mod stats;

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use gymstreak_core::{Config, Database, GymTracker, TracingSink};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the tracker over the on-disk database and config.
///
/// Tracker events go to the debug log, shown with `--verbose`.
pub fn open_tracker() -> Result<GymTracker<Database>, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load()?;
    Ok(GymTracker::new(db, config).with_events(TracingSink))
}

/// Noon local time on `date`, or now when no date is given.
pub fn local_instant(date: Option<NaiveDate>) -> Result<DateTime<Local>, Box<dyn std::error::Error>> {
    match date {
        None => Ok(Local::now()),
        Some(d) => {
            let naive = d
                .and_hms_opt(12, 0, 0)
                .ok_or_else(|| format!("invalid date: {d}"))?;
            Local
                .from_local_datetime(&naive)
                .earliest()
                .ok_or_else(|| format!("no local time for {d}").into())
        }
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
