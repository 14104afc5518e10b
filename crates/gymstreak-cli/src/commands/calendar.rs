use std::collections::BTreeMap;

use chrono::{Datelike, Local, NaiveDate};
use clap::Args;

use super::{open_tracker, print_json, CliResult};

#[derive(Args)]
pub struct CalendarArgs {
    /// Month to show as YYYY-MM; defaults to the current month
    #[arg(long)]
    pub month: Option<String>,
}

fn month_bounds(month: Option<&str>) -> Result<(NaiveDate, NaiveDate), Box<dyn std::error::Error>> {
    let first = match month {
        Some(m) => NaiveDate::parse_from_str(&format!("{m}-01"), "%Y-%m-%d")
            .map_err(|e| format!("invalid month '{m}': {e}"))?,
        None => Local::now().date_naive().with_day(1).ok_or("invalid current date")?,
    };
    let next = first
        .checked_add_months(chrono::Months::new(1))
        .ok_or("month out of range")?;
    let last = next.pred_opt().ok_or("month out of range")?;
    Ok((first, last))
}

pub fn run(args: CalendarArgs) -> CliResult {
    let tracker = open_tracker()?;
    let (from, to) = month_bounds(args.month.as_deref())?;
    let marks = tracker.calendar(from, to, &Local)?;
    let keyed: BTreeMap<String, _> = marks
        .into_iter()
        .map(|(date, mark)| (date.format("%Y-%m-%d").to_string(), mark))
        .collect();
    print_json(&keyed)
}
