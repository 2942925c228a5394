//! Storage configuration: where collections live, under which keys, and
//! whether a fresh install starts with the demo dataset.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::Result;
use crate::storage::sanitize_relative_path;

pub const APPLICATIONS_KEY: &str = "interntrack-apps";
pub const OPPORTUNITIES_KEY: &str = "interntrack-opps";
pub const SETTINGS_FILE: &str = "settings.json";
pub const DATA_DIR_NAME: &str = "InternTrack";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub applications_key: String,
    pub opportunities_key: String,
    pub seed_demo_data: bool,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            applications_key: APPLICATIONS_KEY.to_string(),
            opportunities_key: OPPORTUNITIES_KEY.to_string(),
            seed_demo_data: true,
        }
    }

    /// Defaults for `data_dir`, overridden by its `settings.json` when that
    /// file exists and parses. A broken settings file is logged and ignored.
    pub fn load(data_dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::new(data_dir);
        let path = config.data_dir.join(SETTINGS_FILE);
        if !path.exists() {
            return config;
        }
        let settings = match read_settings(path.as_path()) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unreadable settings file");
                return config;
            }
        };
        if let Some(key) = settings.applications_key.filter(|k| usable_key(k)) {
            config.applications_key = key;
        }
        if let Some(key) = settings.opportunities_key.filter(|k| usable_key(k)) {
            config.opportunities_key = key;
        }
        if config.applications_key == config.opportunities_key {
            warn!(
                key = %config.applications_key,
                "both collections configured with the same key, using default keys"
            );
            config.applications_key = APPLICATIONS_KEY.to_string();
            config.opportunities_key = OPPORTUNITIES_KEY.to_string();
        }
        if let Some(seed) = settings.seed_demo_data {
            config.seed_demo_data = seed;
        }
        config
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Settings {
    applications_key: Option<String>,
    opportunities_key: Option<String>,
    seed_demo_data: Option<bool>,
}

/// A key must be non-blank and map to a file inside the data directory.
fn usable_key(key: &str) -> bool {
    if key.trim().is_empty() {
        return false;
    }
    match sanitize_relative_path(format!("{key}.json").as_str()) {
        Ok(_) => true,
        Err(err) => {
            warn!(key, error = %err, "ignoring storage key override");
            false
        }
    }
}

fn read_settings(path: &Path) -> Result<Settings> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(raw.as_str())?)
}

/// `<base>/InternTrack`, created if missing.
pub fn resolve_data_dir(base: &Path) -> Result<PathBuf> {
    let root = base.join(DATA_DIR_NAME);
    fs::create_dir_all(root.as_path())?;
    Ok(root)
}
