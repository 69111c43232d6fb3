use log::debug;

use super::lap_table::DisplayLapRow;
use crate::errors::LapboardError;

pub const MIN_COMMENTARY_CALLS: u32 = 1;
pub const MAX_COMMENTARY_CALLS: u32 = 20;
pub const DEFAULT_COMMENTARY_CALLS: u32 = 5;

/// Ceiling on the number of commentary lines produced per render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommentaryBudget {
    max_calls: u32,
}

impl CommentaryBudget {
    pub fn new(max_calls: u32) -> Result<Self, LapboardError> {
        if !(MIN_COMMENTARY_CALLS..=MAX_COMMENTARY_CALLS).contains(&max_calls) {
            return Err(LapboardError::InvalidUserInput {
                field: "max commentary calls".to_string(),
                reason: format!(
                    "{} is outside {}..={}",
                    max_calls, MIN_COMMENTARY_CALLS, MAX_COMMENTARY_CALLS
                ),
            });
        }
        Ok(Self { max_calls })
    }

    pub fn max_calls(&self) -> u32 {
        self.max_calls
    }
}

impl Default for CommentaryBudget {
    fn default() -> Self {
        Self {
            max_calls: DEFAULT_COMMENTARY_CALLS,
        }
    }
}

/// Templated per-lap commentary. No model is consulted: each line is built
/// from the row it describes.
pub struct CommentaryEmitter {
    enabled: bool,
}

impl CommentaryEmitter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn emit(&self, rows: &[DisplayLapRow], driver: &str, budget: CommentaryBudget) -> Vec<String> {
        if !self.enabled {
            return Vec::new();
        }

        let lines: Vec<String> = rows
            .iter()
            .take(budget.max_calls() as usize)
            .map(|row| {
                format!(
                    "Lap {}: {} set a time of {} on {} tires.",
                    row.lap_number, driver, row.lap_time, row.compound
                )
            })
            .collect();
        debug!("Emitted {} of {} commentary lines", lines.len(), budget.max_calls());
        lines
    }
}
