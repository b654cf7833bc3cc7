// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! All fields are optional in the file; missing or unparseable settings fall
//! back to the defaults below so a damaged config never prevents startup.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "StyleLens";

/// Directory of bundled style templates, relative to the working directory.
pub const DEFAULT_TEMPLATES_DIR: &str = "Styles_Template";
/// Directory containing the ONNX model artifact(s).
pub const DEFAULT_MODEL_DIR: &str = "models";
/// Camera device index opened when recording starts.
pub const DEFAULT_CAMERA_INDEX: u32 = 0;
/// Templates shown per catalog page. One value drives both the strip layout
/// and the max-page computation.
pub const DEFAULT_PAGE_SIZE: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
    #[serde(default)]
    pub model_dir: Option<PathBuf>,
    #[serde(default)]
    pub camera_index: Option<u32>,
    #[serde(default)]
    pub page_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates_dir: None,
            model_dir: None,
            camera_index: None,
            page_size: Some(DEFAULT_PAGE_SIZE),
        }
    }
}

impl Config {
    /// Templates directory with the default applied.
    pub fn templates_dir(&self) -> PathBuf {
        self.templates_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATES_DIR))
    }

    /// Model directory with the default applied.
    pub fn model_dir(&self) -> PathBuf {
        self.model_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR))
    }

    /// Camera device index with the default applied.
    pub fn camera_index(&self) -> u32 {
        self.camera_index.unwrap_or(DEFAULT_CAMERA_INDEX)
    }

    /// Catalog page size with the default applied; never zero.
    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| crate::error::Error::Config(e.to_string()))?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| crate::error::Error::Config(e.to_string()))?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content).map_err(|e| crate::error::Error::Config(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            templates_dir: Some(PathBuf::from("MyStyles")),
            model_dir: Some(PathBuf::from("models/adain")),
            camera_index: Some(2),
            page_size: Some(6),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.templates_dir, config.templates_dir);
        assert_eq!(loaded.model_dir, config.model_dir);
        assert_eq!(loaded.camera_index, config.camera_index);
        assert_eq!(loaded.page_size, config.page_size);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.templates_dir.is_none());
        assert_eq!(loaded.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn accessors_apply_defaults() {
        let config = Config {
            templates_dir: None,
            model_dir: None,
            camera_index: None,
            page_size: None,
        };
        assert_eq!(config.templates_dir(), PathBuf::from(DEFAULT_TEMPLATES_DIR));
        assert_eq!(config.model_dir(), PathBuf::from(DEFAULT_MODEL_DIR));
        assert_eq!(config.camera_index(), DEFAULT_CAMERA_INDEX);
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn zero_page_size_is_clamped_to_one() {
        let config = Config {
            page_size: Some(0),
            ..Config::default()
        };
        assert_eq!(config.page_size(), 1);
    }
}
