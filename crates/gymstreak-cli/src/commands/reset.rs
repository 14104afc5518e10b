use clap::Args;

use super::{open_tracker, CliResult};

#[derive(Args)]
pub struct ResetArgs {
    /// Confirm deleting all attendance, protectors, rest days, locations and points
    #[arg(long)]
    pub yes: bool,
}

pub fn run(args: ResetArgs) -> CliResult {
    if !args.yes {
        return Err("refusing to reset without --yes".into());
    }
    open_tracker()?.reset_all_data()?;
    println!("all data reset");
    Ok(())
}
