//! Session configuration
//!
//! Resolution order, later wins: built-in defaults (platform directories),
//! the TOML config file, `GRIDFORM_*` environment variables.

use std::path::{Path, PathBuf};

use directories::{ProjectDirs, UserDirs};
use serde::Deserialize;

use crate::error::{Error, Result};
use gridform_store::STORAGE_KEY;

/// Environment variable overriding [`Config::data_dir`]
pub const ENV_DATA_DIR: &str = "GRIDFORM_DATA_DIR";

/// Environment variable overriding [`Config::download_dir`]
pub const ENV_DOWNLOAD_DIR: &str = "GRIDFORM_DOWNLOAD_DIR";

/// Where the grid is saved and where exports go
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the durable slot file
    pub data_dir: PathBuf,
    /// Directory exports are written into
    pub download_dir: PathBuf,
    /// Slot name the grid is saved under
    pub storage_key: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = project_dirs()
            .map(|p| p.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".gridform"));

        let download_dir = UserDirs::new()
            .and_then(|u| u.download_dir().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            data_dir,
            download_dir,
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "gridform")
}

impl Config {
    /// Default location of the config file, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|p| p.config_dir().join("config.toml"))
    }

    /// Load the configuration
    ///
    /// An explicit `path` must exist. Without one, the default config file is
    /// read when present. Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        Ok(config.with_env_overrides(|name| std::env::var_os(name).map(PathBuf::from)))
    }

    /// Read a TOML config file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse TOML text
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Apply `GRIDFORM_*` overrides looked up through `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = dir;
        }
        if let Some(dir) = lookup(ENV_DOWNLOAD_DIR) {
            self.download_dir = dir;
        }
        self
    }
}
