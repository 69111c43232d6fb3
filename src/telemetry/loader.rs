use log::{error, info};

use super::{EventCatalog, LapRecord, SessionSelection, TelemetrySource};

/// Outcome of a request to the telemetry source.
///
/// Failures are carried as a human readable reason. A `Loaded` value may still
/// be empty, callers decide what an empty result means for them.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadResult<T = Vec<LapRecord>> {
    Loaded(T),
    LoadFailed(String),
}

/// Boundary between the dashboard and a [`TelemetrySource`]: nothing the
/// source raises gets past it.
pub struct TelemetryLoader<'s> {
    source: &'s dyn TelemetrySource,
}

impl<'s> TelemetryLoader<'s> {
    pub fn new(source: &'s dyn TelemetrySource) -> Self {
        Self { source }
    }

    pub fn load_schedule(&self, year: i32) -> LoadResult<EventCatalog> {
        match self.source.event_schedule(year) {
            Ok(catalog) => LoadResult::Loaded(catalog),
            Err(e) => {
                error!("Failed to load event schedule for {}: {}", year, e);
                LoadResult::LoadFailed(e.to_string())
            }
        }
    }

    pub fn load(&self, selection: &SessionSelection) -> LoadResult {
        match self.source.session_laps(selection) {
            Ok(laps) => {
                info!(
                    "Loaded {} laps for {} round {} {}",
                    laps.len(),
                    selection.year,
                    selection.round_number,
                    selection.session_code
                );
                LoadResult::Loaded(laps)
            }
            Err(e) => {
                error!("Failed to load session {:?}: {}", selection, e);
                LoadResult::LoadFailed(e.to_string())
            }
        }
    }
}
