use itertools::Itertools;
use log::{debug, warn};
use simple_moving_average::{SMA, SumTreeSMA};

use super::format::{NOT_AVAILABLE, format_duration};
use crate::telemetry::LapRecord;

/// Number of laps averaged by the pace line
pub const PACE_WINDOW_LAPS: usize = 3;

/// A lap ready to be rendered: every value is already a display string.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayLapRow {
    pub lap_number: u32,
    pub lap_time: String,
    pub compound: String,
    pub tyre_life: String,
    pub pit_out_time: String,
    pub pit_in_time: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BuildResult {
    Rows(Vec<DisplayLapRow>),
    NoDataForDriver,
    BuildFailed(String),
}

/// Projects the laps of a loaded session into per-driver tables.
pub struct LapTableBuilder<'l> {
    laps: &'l [LapRecord],
}

impl<'l> LapTableBuilder<'l> {
    pub fn new(laps: &'l [LapRecord]) -> Self {
        Self { laps }
    }

    /// Distinct drivers across the whole session, sorted alphabetically.
    pub fn drivers(&self) -> Vec<String> {
        self.laps
            .iter()
            .map(|l| l.driver.clone())
            .unique()
            .sorted()
            .collect_vec()
    }

    fn driver_laps<'a>(&'a self, driver: &'a str) -> impl Iterator<Item = &'l LapRecord> + 'a {
        self.laps.iter().filter(move |l| l.driver == driver)
    }

    pub fn build(&self, driver: &str) -> BuildResult {
        let mut rows = Vec::new();
        for lap in self.driver_laps(driver) {
            match project(lap) {
                Ok(row) => rows.push(row),
                Err(reason) => {
                    warn!("Could not build lap table for {}: {}", driver, reason);
                    return BuildResult::BuildFailed(reason);
                }
            }
        }

        if rows.is_empty() {
            return BuildResult::NoDataForDriver;
        }
        debug!("Built {} rows for {}", rows.len(), driver);
        BuildResult::Rows(rows)
    }

    /// (lap number, lap time in seconds) for every timed lap of the driver
    pub fn lap_time_series(&self, driver: &str) -> Vec<[f64; 2]> {
        self.driver_laps(driver)
            .filter_map(|l| {
                l.lap_time
                    .map(|t| [l.lap_number as f64, t.as_secs_f64()])
            })
            .collect()
    }
}

/// Moving average of lap times over the last [`PACE_WINDOW_LAPS`] timed laps.
pub fn pace_series(lap_times: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let mut average: SumTreeSMA<f64, f64, PACE_WINDOW_LAPS> = SumTreeSMA::new();
    lap_times
        .iter()
        .map(|[lap, seconds]| {
            average.add_sample(*seconds);
            [*lap, average.get_average()]
        })
        .collect()
}

fn project(lap: &LapRecord) -> Result<DisplayLapRow, String> {
    if let Some(reason) = &lap.decode_error {
        return Err(format!("lap record for {} could not be read: {}", lap.driver, reason));
    }
    if lap.lap_number == 0 {
        return Err(format!("lap record for {} has lap number 0", lap.driver));
    }

    let tyre_life = match lap.tyre_life {
        Some(life) if !life.is_finite() || life < 0. => {
            return Err(format!(
                "lap {} for {} has invalid tyre life {}",
                lap.lap_number, lap.driver, life
            ));
        }
        Some(life) => life.to_string(),
        None => NOT_AVAILABLE.to_string(),
    };

    Ok(DisplayLapRow {
        lap_number: lap.lap_number,
        lap_time: format_duration(lap.lap_time),
        compound: lap
            .compound
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        tyre_life,
        pit_out_time: format_duration(lap.pit_out_time),
        pit_in_time: format_duration(lap.pit_in_time),
    })
}
