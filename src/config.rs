use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::LapboardError;
use crate::dashboard::{
    FIRST_YEAR, LATEST_YEAR, Selection,
    commentary::{DEFAULT_COMMENTARY_CALLS, MAX_COMMENTARY_CALLS, MIN_COMMENTARY_CALLS},
};
use crate::telemetry::FileBasedSource;

const CONFIG_DIR_NAME: &str = "lapboard";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Telemetry cache directory, defaults to the platform cache directory
    pub cache_dir: Option<PathBuf>,
    pub year: i32,
    pub commentary_enabled: bool,
    pub max_commentary_calls: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            year: LATEST_YEAR,
            commentary_enabled: false,
            max_commentary_calls: DEFAULT_COMMENTARY_CALLS,
        }
    }
}

impl AppConfig {
    fn config_path() -> Result<PathBuf, LapboardError> {
        Ok(dirs::config_dir()
            .ok_or(LapboardError::NoConfigDir)?
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME))
    }

    pub fn from_local_file() -> Result<Option<Self>, LapboardError> {
        Self::from_file(&Self::config_path()?)
    }

    pub fn from_file(config_path: &PathBuf) -> Result<Option<Self>, LapboardError> {
        if !config_path.exists() {
            return Ok(None);
        }
        let file = std::fs::File::open(config_path)
            .map_err(|e| LapboardError::ConfigIOError { source: e })?;
        serde_json::from_reader(file)
            .map(Some)
            .map_err(|e| LapboardError::ConfigSerializeError { source: e })
    }

    pub fn save(&self) -> Result<(), LapboardError> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &PathBuf) -> Result<(), LapboardError> {
        if let Some(parent) = config_path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| LapboardError::ConfigIOError { source: e })?;
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| LapboardError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| LapboardError::ConfigSerializeError { source: e })
    }

    /// Open the telemetry cache: explicit override, then config, then platform default
    pub fn open_source(&self, cli_override: Option<PathBuf>) -> Result<FileBasedSource, LapboardError> {
        match cli_override.or_else(|| self.cache_dir.clone()) {
            Some(dir) => FileBasedSource::new(dir),
            None => FileBasedSource::new_default(),
        }
    }

    /// Selection the dashboard starts from. Values edited by hand into the
    /// config file are clamped to what the controls offer.
    pub fn initial_selection(&self) -> Selection {
        Selection {
            year: self.year.clamp(FIRST_YEAR, LATEST_YEAR),
            commentary_enabled: self.commentary_enabled,
            max_commentary_calls: self
                .max_commentary_calls
                .clamp(MIN_COMMENTARY_CALLS, MAX_COMMENTARY_CALLS),
            ..Default::default()
        }
    }
}
