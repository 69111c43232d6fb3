// Telemetry sources: where event schedules and session laps come from

use std::{
    fs::{self, File},
    io::{BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use super::{EventCatalog, LapRecord, SessionSelection};
use crate::errors::LapboardError;

const SCHEDULE_FILE_NAME: &str = "schedule.json";

/// Interface to the provider of schedules and lap data.
///
/// Implementations may fail for any reason (missing data, I/O, network). Callers
/// are expected to go through [`super::TelemetryLoader`], which turns failures
/// into values.
pub trait TelemetrySource {
    /// Load the event schedule for a season
    fn event_schedule(&self, year: i32) -> Result<EventCatalog, LapboardError>;

    /// Load every lap of every driver for a session
    fn session_laps(&self, selection: &SessionSelection) -> Result<Vec<LapRecord>, LapboardError>;
}

/// Source backed by an on-disk telemetry cache.
///
/// Layout:
/// ```text
/// <root>/<year>/schedule.json
/// <root>/<year>/<round:02>_<code>.jsonl
/// ```
pub struct FileBasedSource {
    cache_path: PathBuf,
}

impl FileBasedSource {
    /// Create a new source rooted at `cache_path`, creating the directory if needed
    pub fn new(cache_path: PathBuf) -> Result<Self, LapboardError> {
        if !cache_path.exists() {
            fs::create_dir_all(&cache_path)
                .map_err(|e| LapboardError::SourceIOError { source: e })?;
        }
        debug!("Using telemetry cache at {:?}", cache_path);
        Ok(Self { cache_path })
    }

    /// Create a source in the default application cache directory
    pub fn new_default() -> Result<Self, LapboardError> {
        Self::new(Self::default_cache_path()?)
    }

    pub fn default_cache_path() -> Result<PathBuf, LapboardError> {
        let cache_dir = dirs::cache_dir().ok_or(LapboardError::NoCacheDir)?;
        Ok(cache_dir.join("lapboard"))
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    fn schedule_path(&self, year: i32) -> PathBuf {
        self.cache_path
            .join(year.to_string())
            .join(SCHEDULE_FILE_NAME)
    }

    fn session_path(&self, selection: &SessionSelection) -> PathBuf {
        self.cache_path.join(selection.year.to_string()).join(format!(
            "{:02}_{}.jsonl",
            selection.round_number, selection.session_code
        ))
    }

    /// Write the schedule for a season, replacing any previous one
    pub fn store_schedule(&self, year: i32, catalog: &EventCatalog) -> Result<(), LapboardError> {
        let path = self.schedule_path(year);
        create_parent(&path)?;
        let file = File::create(&path).map_err(|e| LapboardError::WriterError { source: e })?;
        serde_json::to_writer_pretty(BufWriter::new(file), catalog).map_err(|e| {
            LapboardError::SourceParseError {
                path: path.display().to_string(),
                source: e,
            }
        })
    }

    /// Write the laps of a session as JSON lines, replacing any previous data
    pub fn store_session_laps(
        &self,
        selection: &SessionSelection,
        laps: &[LapRecord],
    ) -> Result<(), LapboardError> {
        let path = self.session_path(selection);
        create_parent(&path)?;
        let file = File::create(&path).map_err(|e| LapboardError::WriterError { source: e })?;
        let mut writer = BufWriter::new(file);
        for lap in laps {
            let line = serde_json::to_string(lap).map_err(|e| LapboardError::SourceParseError {
                path: path.display().to_string(),
                source: e,
            })?;
            writeln!(writer, "{}", line).map_err(|e| LapboardError::WriterError { source: e })?;
        }
        writer
            .flush()
            .map_err(|e| LapboardError::WriterError { source: e })
    }
}

fn create_parent(path: &Path) -> Result<(), LapboardError> {
    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| LapboardError::WriterError { source: e })?;
    }
    Ok(())
}

impl TelemetrySource for FileBasedSource {
    fn event_schedule(&self, year: i32) -> Result<EventCatalog, LapboardError> {
        let path = self.schedule_path(year);
        if !path.exists() {
            return Err(LapboardError::MissingScheduleData { year });
        }

        let content =
            fs::read_to_string(&path).map_err(|e| LapboardError::SourceIOError { source: e })?;
        let catalog: EventCatalog =
            serde_json::from_str(&content).map_err(|e| LapboardError::SourceParseError {
                path: path.display().to_string(),
                source: e,
            })?;

        debug!("Loaded {} events for {}", catalog.events.len(), year);
        Ok(catalog)
    }

    fn session_laps(&self, selection: &SessionSelection) -> Result<Vec<LapRecord>, LapboardError> {
        let path = self.session_path(selection);
        if !path.exists() {
            return Err(LapboardError::MissingSessionData {
                year: selection.year,
                round: selection.round_number,
                session_code: selection.session_code.to_string(),
            });
        }

        let rows = serde_jsonlines::json_lines::<serde_json::Value, _>(&path)
            .map_err(|e| LapboardError::SourceIOError { source: e })?;

        // bad rows are handed on to the lap table, only unattributable ones are dropped
        let mut laps = Vec::new();
        for (line, row) in rows.enumerate() {
            let value = match row {
                Ok(value) => value,
                Err(e) if matches!(e.kind(), ErrorKind::InvalidData | ErrorKind::UnexpectedEof) => {
                    warn!("Skipping unreadable line {} of {:?}: {}", line + 1, path, e);
                    continue;
                }
                Err(e) => return Err(LapboardError::SourceIOError { source: e }),
            };
            match LapRecord::from_value(value) {
                Some(lap) => laps.push(lap),
                None => warn!("Skipping line {} of {:?}: no driver", line + 1, path),
            }
        }

        info!("Loaded {:?}, found {} laps", path, laps.len());
        Ok(laps)
    }
}
