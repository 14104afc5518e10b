use chrono::{DateTime, Local};
use clap::Args;

use super::{open_tracker, print_json, CliResult};

#[derive(Args)]
pub struct CheckinArgs {
    /// Gym location id
    pub location_id: String,
    /// Check-in time (RFC 3339); defaults to now
    #[arg(long)]
    pub at: Option<DateTime<chrono::FixedOffset>>,
}

pub fn run(args: CheckinArgs) -> CliResult {
    let tracker = open_tracker()?;
    let at = args
        .at
        .map(|ts| ts.with_timezone(&Local))
        .unwrap_or_else(Local::now);
    let record = tracker.register_attendance(&args.location_id, &at)?;
    print_json(&record)?;
    eprintln!(
        "checked in, +{} points",
        tracker.config().points.checkin_reward
    );
    Ok(())
}
