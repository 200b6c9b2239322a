//! User settings persisted as TOML.
//!
//! The default file lives in the platform config folder:
//! - macOS: ~/Library/Application Support/org.county-atlas.County-Atlas/
//! - Windows: %APPDATA%/county-atlas/County Atlas/config/
//! - Linux: ~/.config/countyatlas/
//!
//! Command-line flags override values loaded here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use atlas_model::{ColorConfig, MissingYearPolicy};

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "county-atlas";
const APP_NAME: &str = "County Atlas";
const CONFIG_FILENAME: &str = "settings.toml";

/// Persisted preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub missing_year: MissingYearPolicy,
    /// Region names file used instead of the built-in county list.
    pub regions_file: Option<PathBuf>,
    pub colors: ColorConfig,
}

/// Path of the default settings file, if the platform has a config folder.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Reads and parses one settings file.
pub fn read_settings(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read settings {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parse settings {}", path.display()))
}

/// Loads settings from `explicit` when given, else from the default file.
///
/// A broken explicit file is an error. A missing or broken default file
/// falls back to built-in defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        let settings = read_settings(path)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        return Ok(settings);
    }

    let Some(path) = settings_path() else {
        tracing::debug!("no platform config folder, using default settings");
        return Ok(Settings::default());
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    match read_settings(&path) {
        Ok(settings) => {
            tracing::debug!(path = %path.display(), "loaded settings");
            Ok(settings)
        }
        Err(error) => {
            tracing::warn!("{error:#}, using default settings");
            Ok(Settings::default())
        }
    }
}

/// Writes settings, creating the parent folder if needed.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config folder {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(settings).context("serialize settings")?;
    fs::write(path, content).with_context(|| format!("write settings {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved settings");
    Ok(())
}
