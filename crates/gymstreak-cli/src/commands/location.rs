use chrono::Utc;
use clap::Subcommand;
use gymstreak_core::{Coordinate, GymLocation};

use super::{open_tracker, print_json, CliResult};

#[derive(Subcommand)]
pub enum LocationAction {
    /// Register a gym
    Add {
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// List registered gyms
    List,
    /// Remove a gym by id
    Remove { id: String },
}

pub fn run(action: LocationAction) -> CliResult {
    let tracker = open_tracker()?;

    match action {
        LocationAction::Add { name, lat, lon } => {
            let location = GymLocation::new(
                name,
                Coordinate {
                    latitude: lat,
                    longitude: lon,
                },
                Utc::now(),
            );
            tracker.save_location(location.clone())?;
            print_json(&location)?;
        }
        LocationAction::List => {
            print_json(&tracker.locations()?)?;
        }
        LocationAction::Remove { id } => {
            if !tracker.delete_location(&id)? {
                return Err(format!("no location with id {id}").into());
            }
            println!("ok");
        }
    }
    Ok(())
}
