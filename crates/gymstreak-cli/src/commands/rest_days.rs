use clap::Subcommand;

use super::{open_tracker, print_json, CliResult};

#[derive(Subcommand)]
pub enum RestDaysAction {
    /// Print rest weekdays (0 = Sunday .. 6 = Saturday)
    Show,
    /// Replace rest weekdays; pass none to clear
    Set {
        days: Vec<u8>,
    },
}

pub fn run(action: RestDaysAction) -> CliResult {
    let tracker = open_tracker()?;

    match action {
        RestDaysAction::Show => {
            let data = tracker.user_data()?;
            print_json(&data.rest_days)?;
        }
        RestDaysAction::Set { days } => {
            let rest_days = tracker.update_rest_days(&days)?;
            print_json(&rest_days)?;
        }
    }
    Ok(())
}
