//! On-disk state: TOML configuration and the JSON session snapshot.

mod config;
mod snapshot;

pub use config::{AssistantConfig, AssistantProvider, Config, DashboardConfig, EnergyConfig};
pub use snapshot::SessionSnapshot;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/juggler[-dev]/` based on JUGGLER_ENV.
///
/// Set JUGGLER_ENV=dev to use a separate development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("JUGGLER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("juggler-dev")
    } else {
        base_dir.join("juggler")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
