//! JSON persistence for `settings.json` in the platform config directory.

use super::types::Settings;
use crate::core::constants::{APP_DIR, SETTINGS_FILE};
use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the app's config directory, creating it if needed.
pub fn app_dir() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or(ConfigError::NoConfigDir)?;
    let dir = base.join(APP_DIR);
    fs::create_dir_all(&dir).map_err(|source| ConfigError::Io {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Default location of the settings file.
pub fn settings_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dir()?.join(SETTINGS_FILE))
}

/// Read settings from `path`. A missing file yields defaults; a present but
/// unreadable or invalid file is an error.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load settings, logging and falling back to defaults on any failure.
pub fn load_settings_or_default(path: &Path) -> Settings {
    match load_settings_from(path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("using default settings: {e}");
            Settings::default()
        }
    }
}

/// Save settings as pretty-printed JSON.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(settings).map_err(ConfigError::Encode)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, json).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
