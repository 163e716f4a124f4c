mod config;
mod seed;

pub use config::{
    AdminConfig, AssetsConfig, Config, GarageConfig, LoggingConfig, PointsConfig, SeedConfig,
    SessionConfig,
};
pub use seed::Seed;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/dream-garage[-dev]/` based on DREAM_GARAGE_ENV.
///
/// Set DREAM_GARAGE_ENV=dev to use the development config directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DREAM_GARAGE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("dream-garage-dev")
    } else {
        base_dir.join("dream-garage")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
