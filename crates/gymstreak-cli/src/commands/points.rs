use clap::Subcommand;

use super::{open_tracker, CliResult};

#[derive(Subcommand)]
pub enum PointsAction {
    /// Print the current balance
    Show,
    /// Credit points
    Add { amount: u64 },
}

pub fn run(action: PointsAction) -> CliResult {
    let tracker = open_tracker()?;

    let balance = match action {
        PointsAction::Show => tracker.points()?,
        PointsAction::Add { amount } => tracker.add_points(amount)?,
    };
    println!("{balance}");
    Ok(())
}
