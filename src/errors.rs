// Error types for lapboard

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum LapboardError {
    // Session selection errors
    #[snafu(display("Event '{event}' not found in the {year} schedule"))]
    NotFound { event: String, year: i32 },

    // Errors while reading from the telemetry source
    #[snafu(display("No event schedule available for {year}"))]
    MissingScheduleData { year: i32 },
    #[snafu(display("No lap data cached for {year} round {round} {session_code}"))]
    MissingSessionData {
        year: i32,
        round: u32,
        session_code: String,
    },
    #[snafu(display("Error reading telemetry source: {source}"))]
    SourceIOError { source: io::Error },
    #[snafu(display("Malformed telemetry data in {path}: {source}"))]
    SourceParseError {
        path: String,
        source: serde_json::Error,
    },
    #[snafu(display("Could not find a cache directory for telemetry data"))]
    NoCacheDir,

    // Errors for the telemetry store writer
    #[snafu(display("Error writing telemetry store: {source}"))]
    WriterError { source: io::Error },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },

    // User input validation errors
    #[snafu(display("Invalid user input: {field} - {reason}"))]
    InvalidUserInput { field: String, reason: String },
}
