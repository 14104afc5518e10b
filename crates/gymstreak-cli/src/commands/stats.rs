use chrono::NaiveDate;
use clap::Args;

use super::{local_instant, open_tracker, print_json, CliResult};

#[derive(Args)]
pub struct StatsArgs {
    /// Compute as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Args)]
pub struct HistoryArgs {
    /// Number of runs to show, most recent first
    #[arg(long, default_value = "3")]
    pub limit: usize,
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

pub fn run(args: StatsArgs) -> CliResult {
    let tracker = open_tracker()?;
    let stats = tracker.streak_stats(&local_instant(args.as_of)?)?;
    print_json(&stats)
}

pub fn history(args: HistoryArgs) -> CliResult {
    let tracker = open_tracker()?;
    let stats = tracker.streak_stats(&local_instant(args.as_of)?)?;
    let recent: Vec<_> = stats
        .streak_history
        .iter()
        .rev()
        .take(args.limit)
        .collect();
    print_json(&recent)
}
