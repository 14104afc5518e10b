use chrono::{Local, NaiveDate};
use clap::Subcommand;

use super::{open_tracker, print_json, CliResult};

#[derive(Subcommand)]
pub enum ProtectorAction {
    /// Spend points to protect a date (defaults to today)
    Use {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List protected dates
    List,
}

pub fn run(action: ProtectorAction) -> CliResult {
    let tracker = open_tracker()?;

    match action {
        ProtectorAction::Use { date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let balance = tracker.use_streak_protector(date)?;
            println!(
                "{}",
                serde_json::json!({ "date": date, "balance": balance })
            );
        }
        ProtectorAction::List => {
            let usage = tracker.protector_usage()?;
            print_json(&usage)?;
        }
    }
    Ok(())
}
