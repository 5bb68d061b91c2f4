use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

/// Application configuration, read from an optional JSON file.
/// Every field has a default, so an empty object is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    log_config: PathBuf,
    log_level: String,
    default_rules: Option<Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_config: PathBuf::from("log4rs.yaml"),
            log_level: "info".to_string(),
            default_rules: None,
        }
    }
}

impl Config {
    /// Load the config from the given file, or use the defaults if there is none.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let file = BufReader::new(File::open(path)?);
                Ok(serde_json::from_reader(file)?)
            }
            None => Ok(Self::default()),
        }
    }

    /// Path to a log4rs file config. Used in preference to the built-in console
    /// logger when it exists.
    pub fn log_config(&self) -> &Path {
        &self.log_config
    }

    /// Level for the built-in console logger. Unrecognised levels fall back to `info`.
    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Voter screening rules for elections that do not bring their own.
    pub fn default_rules(&self) -> Option<&Value> {
        self.default_rules.as_ref()
    }
}
