// Library interface for lapboard
// This allows integration tests and benches to access internal modules

pub mod config;
pub mod dashboard;
pub mod errors;
pub mod report;
pub mod telemetry;

// Re-export commonly used types
pub use config::AppConfig;
pub use dashboard::{DashboardController, DashboardState, DashboardView, Notice, NoticeLevel, Selection};
pub use errors::LapboardError;
pub use telemetry::{
    Event, EventCatalog, FileBasedSource, LapRecord, SessionCode, SessionSelection, SessionType,
    TelemetrySource,
};
