mod config;

pub use config::{Config, LifecycleConfig};

use std::path::PathBuf;

/// Returns `~/.config/modeshift[-dev]/` based on MODESHIFT_ENV.
///
/// Set MODESHIFT_ENV=dev to use the development config directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MODESHIFT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("modeshift-dev")
    } else {
        base_dir.join("modeshift")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
