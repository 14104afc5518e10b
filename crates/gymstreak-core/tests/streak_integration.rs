//! Integration tests for the tracker over the SQLite store.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use gymstreak_core::{Config, Database, GymTracker, KeyValueStore, StreakRun};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn evening(d: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&d.and_hms_opt(19, 30, 0).unwrap())
}

#[test]
fn test_month_of_training_with_weekends_off() {
    let db = Database::open_memory().unwrap();
    let tracker = GymTracker::new(db, Config::default());
    tracker.update_rest_days(&[0, 6]).unwrap();

    // Weekdays of the first two weeks of January 2024 (Mon 1st .. Fri 12th)
    let mut day = date(2024, 1, 1);
    while day <= date(2024, 1, 12) {
        if !tracker.user_data().unwrap().rest_days.covers(day) {
            tracker.register_attendance("gym-1", &evening(day)).unwrap();
        }
        day += Duration::days(1);
    }

    // Weekend bridges Fri 5th to Mon 8th
    let stats = tracker.streak_stats(&evening(date(2024, 1, 14))).unwrap();
    assert_eq!(stats.current_streak, 12);
    assert_eq!(stats.best_streak, 12);
    assert_eq!(stats.total_days, 10);
    assert_eq!(tracker.points().unwrap(), 1000);

    // Tuesday 16th with Monday 15th missed: the run expires
    let stats = tracker.streak_stats(&evening(date(2024, 1, 16))).unwrap();
    assert_eq!(stats.current_streak, 0);
    assert_eq!(
        stats.streak_history,
        vec![StreakRun {
            start: date(2024, 1, 1),
            end: date(2024, 1, 12),
            days: 12
        }]
    );
}

#[test]
fn test_protector_rescues_missed_monday() {
    let db = Database::open_memory().unwrap();
    let tracker = GymTracker::new(db, Config::default());
    tracker.update_rest_days(&[0, 6]).unwrap();

    for d in [date(2024, 1, 11), date(2024, 1, 12)] {
        tracker.register_attendance("gym-1", &evening(d)).unwrap();
    }
    tracker.add_points(800).unwrap();

    let before = tracker.streak_stats(&evening(date(2024, 1, 16))).unwrap();
    assert_eq!(before.current_streak, 0);

    assert_eq!(tracker.use_streak_protector(date(2024, 1, 15)).unwrap(), 0);
    let after = tracker.streak_stats(&evening(date(2024, 1, 16))).unwrap();
    assert_eq!(after.current_streak, 2);
}

#[test]
fn test_state_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gymstreak.db");

    {
        let tracker = GymTracker::new(Database::open_at(&path).unwrap(), Config::default());
        tracker
            .register_attendance("gym-1", &evening(date(2024, 2, 1)))
            .unwrap();
        tracker
            .register_attendance("gym-1", &evening(date(2024, 2, 2)))
            .unwrap();
    }

    let tracker = GymTracker::new(Database::open_at(&path).unwrap(), Config::default());
    let stats = tracker.streak_stats(&evening(date(2024, 2, 3))).unwrap();
    assert_eq!(stats.current_streak, 2);
    assert_eq!(tracker.points().unwrap(), 200);
    assert!(tracker.store().get("attendance_records").unwrap().is_some());
}
