mod config;

pub use config::{
    AiServiceConfig, AiServicesConfig, AppConfig, EngineConfig, LocationConfig,
    PreferencesConfig, ProfileConfig, UserConfig,
};

use std::path::PathBuf;

use crate::error::CoreError;

/// Returns `~/.config/masterbot[-dev]/` based on MASTERBOT_ENV.
///
/// Set MASTERBOT_ENV=dev to use a development config directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn config_dir() -> Result<PathBuf, CoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MASTERBOT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("masterbot-dev")
    } else {
        base_dir.join("masterbot")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
