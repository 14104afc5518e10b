mod config;
pub mod database;
pub mod kv;

pub use config::{Config, PointsConfig};
pub use database::Database;
pub use kv::{keys, KeyValueStore, MemoryStore};

use std::path::PathBuf;

/// Returns the gymstreak data directory, creating it if needed.
///
/// `GYMSTREAK_HOME` wins when set. Otherwise this is `~/.config/gymstreak[-dev]/`,
/// with `GYMSTREAK_ENV=dev` selecting the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("GYMSTREAK_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("GYMSTREAK_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("gymstreak-dev")
            } else {
                base_dir.join("gymstreak")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
