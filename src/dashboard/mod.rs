// Dashboard controller: turns a user selection into everything the
// presentation layer renders for it

pub mod commentary;
pub mod format;
pub mod lap_table;
pub mod selector;

use log::{debug, warn};

use crate::errors::LapboardError;
use crate::telemetry::{Event, LoadResult, SessionType, TelemetryLoader, TelemetrySource};

use commentary::{CommentaryBudget, CommentaryEmitter, DEFAULT_COMMENTARY_CALLS};
use format::country_flag;
use lap_table::{BuildResult, DisplayLapRow, LapTableBuilder};
use selector::SessionSelector;

pub const PAGE_TITLE: &str = "🏎️ Formula 1 Dashboard with Commentary";
pub const FIRST_YEAR: i32 = 2016;
pub const LATEST_YEAR: i32 = 2025;

pub const EMPTY_SESSION_WARNING: &str = "No lap data available for this session.";
pub const COMMENTARY_DISABLED_NOTICE: &str = "Commentary is disabled. Enable it in the sidebar.";

/// Seasons offered to the user, newest first
pub fn supported_years() -> impl Iterator<Item = i32> {
    (FIRST_YEAR..=LATEST_YEAR).rev()
}

pub fn validate_year(year: i32) -> Result<i32, LapboardError> {
    if !(FIRST_YEAR..=LATEST_YEAR).contains(&year) {
        return Err(LapboardError::InvalidUserInput {
            field: "year".to_string(),
            reason: format!("must be between {} and {}", FIRST_YEAR, LATEST_YEAR),
        });
    }
    Ok(year)
}

/// Everything the user can change. Any difference between two selections
/// restarts the dashboard from scratch.
///
/// `event_name` and `driver` may be left unset, in which case the first
/// selectable event and the first driver of the session are used.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub year: i32,
    pub event_name: Option<String>,
    pub session_type: SessionType,
    pub driver: Option<String>,
    pub commentary_enabled: bool,
    pub max_commentary_calls: u32,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            year: LATEST_YEAR,
            event_name: None,
            session_type: SessionType::Practice1,
            driver: None,
            commentary_enabled: false,
            max_commentary_calls: DEFAULT_COMMENTARY_CALLS,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DashboardState {
    #[default]
    Idle,
    SelectionChanged,
    SessionLoading,
    SessionEmpty,
    SessionLoadFailed,
    SessionLoaded,
    DriverLoading,
    DriverEmpty,
    DriverBuildFailed,
    Ready,
}

impl DashboardState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DashboardState::SessionEmpty
                | DashboardState::SessionLoadFailed
                | DashboardState::DriverEmpty
                | DashboardState::DriverBuildFailed
                | DashboardState::Ready
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// What the presentation layer renders after a selection cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardView {
    pub state: DashboardState,
    /// Selectable events of the chosen season
    pub events: Vec<Event>,
    /// Event actually shown, after defaulting
    pub event_name: Option<String>,
    pub session_title: Option<String>,
    pub drivers: Vec<String>,
    /// Driver actually shown, after defaulting
    pub driver: Option<String>,
    pub table_heading: Option<String>,
    pub rows: Vec<DisplayLapRow>,
    pub lap_times: Vec<[f64; 2]>,
    pub commentary: Vec<String>,
    pub notices: Vec<Notice>,
}

impl DashboardView {
    pub fn notices_at(&self, level: NoticeLevel) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(move |n| n.level == level)
    }
}

struct Cycle {
    state: DashboardState,
    view: DashboardView,
}

impl Cycle {
    fn transition(&mut self, next: DashboardState) {
        debug!("Dashboard state {:?} -> {:?}", self.state, next);
        self.state = next;
        self.view.state = next;
    }

    fn notice(&mut self, level: NoticeLevel, message: String) {
        self.view.notices.push(Notice { level, message });
    }

    fn fail(&mut self, state: DashboardState, level: NoticeLevel, message: String) {
        warn!("{}", message);
        self.notice(level, message);
        self.transition(state);
    }

    fn run(&mut self, source: &dyn TelemetrySource, selection: &Selection) {
        self.transition(DashboardState::SessionLoading);
        let loader = TelemetryLoader::new(source);

        let catalog = match loader.load_schedule(selection.year) {
            LoadResult::Loaded(catalog) => catalog,
            LoadResult::LoadFailed(reason) => {
                return self.fail(
                    DashboardState::SessionLoadFailed,
                    NoticeLevel::Error,
                    format!("Error loading event schedule: {}", reason),
                );
            }
        };
        let selector = SessionSelector::new(selection.year, &catalog);
        self.view.events = selector.selectable_events().into_iter().cloned().collect();

        let Some(event_name) = selection
            .event_name
            .clone()
            .or_else(|| self.view.events.first().map(|e| e.name.clone()))
        else {
            return self.fail(
                DashboardState::SessionEmpty,
                NoticeLevel::Warning,
                format!("No events available for {}.", selection.year),
            );
        };
        self.view.event_name = Some(event_name.clone());

        let session = match selector.resolve(&event_name, selection.session_type) {
            Ok(session) => session,
            Err(e) => {
                return self.fail(
                    DashboardState::SessionLoadFailed,
                    NoticeLevel::Error,
                    format!("Error loading session: {}", e),
                );
            }
        };
        let country = catalog
            .find(&event_name)
            .map(|e| e.country.as_str())
            .unwrap_or_default();
        self.view.session_title = Some(format!(
            "{} {} {} - {}",
            country_flag(country),
            event_name,
            selection.year,
            selection.session_type
        ));

        let laps = match loader.load(&session) {
            LoadResult::Loaded(laps) => laps,
            LoadResult::LoadFailed(reason) => {
                return self.fail(
                    DashboardState::SessionLoadFailed,
                    NoticeLevel::Error,
                    format!("Error loading session: {}", reason),
                );
            }
        };
        if laps.is_empty() {
            return self.fail(
                DashboardState::SessionEmpty,
                NoticeLevel::Warning,
                EMPTY_SESSION_WARNING.to_string(),
            );
        }

        self.transition(DashboardState::SessionLoaded);
        self.notice(
            NoticeLevel::Success,
            format!("{} loaded for {}", selection.session_type, event_name),
        );
        let builder = LapTableBuilder::new(&laps);
        self.view.drivers = builder.drivers();

        let Some(driver) = selection
            .driver
            .clone()
            .or_else(|| self.view.drivers.first().cloned())
        else {
            return self.fail(
                DashboardState::SessionEmpty,
                NoticeLevel::Warning,
                EMPTY_SESSION_WARNING.to_string(),
            );
        };
        self.view.driver = Some(driver.clone());

        self.transition(DashboardState::DriverLoading);
        let rows = match builder.build(&driver) {
            BuildResult::Rows(rows) => rows,
            BuildResult::NoDataForDriver => {
                return self.fail(
                    DashboardState::DriverEmpty,
                    NoticeLevel::Warning,
                    format!("No lap data found for driver {} in this session.", driver),
                );
            }
            BuildResult::BuildFailed(reason) => {
                return self.fail(
                    DashboardState::DriverBuildFailed,
                    NoticeLevel::Error,
                    format!("Error building lap table for {}: {}", driver, reason),
                );
            }
        };
        self.view.table_heading = Some(format!("Lap Times - {}", driver));
        self.view.lap_times = builder.lap_time_series(&driver);
        self.view.rows = rows;
        self.transition(DashboardState::Ready);

        let emitter = CommentaryEmitter::new(selection.commentary_enabled);
        if !emitter.is_enabled() {
            self.notice(NoticeLevel::Info, COMMENTARY_DISABLED_NOTICE.to_string());
            return;
        }
        match CommentaryBudget::new(selection.max_commentary_calls) {
            Ok(budget) => {
                self.view.commentary = emitter.emit(&self.view.rows, &driver, budget);
                self.notice(
                    NoticeLevel::Success,
                    format!(
                        "Total commentary lines used: {} / {}",
                        self.view.commentary.len(),
                        budget.max_calls()
                    ),
                );
            }
            Err(e) => self.notice(NoticeLevel::Error, e.to_string()),
        }
    }
}

/// Drives a selection through schedule lookup, session load, table build and
/// commentary. Failures end the current cycle with a notice; the next
/// selection always starts again from [`DashboardState::Idle`].
pub struct DashboardController {
    source: Box<dyn TelemetrySource>,
    cycle: Cycle,
}

impl DashboardController {
    pub fn new(source: Box<dyn TelemetrySource>) -> Self {
        Self {
            source,
            cycle: Cycle {
                state: DashboardState::Idle,
                view: DashboardView::default(),
            },
        }
    }

    /// Swap the telemetry source, e.g. after the cache directory changed
    pub fn set_source(&mut self, source: Box<dyn TelemetrySource>) {
        self.source = source;
        self.cycle.transition(DashboardState::Idle);
        self.cycle.view = DashboardView::default();
    }

    pub fn state(&self) -> DashboardState {
        self.cycle.state
    }

    pub fn view(&self) -> &DashboardView {
        &self.cycle.view
    }

    pub fn on_selection_changed(&mut self, selection: &Selection) -> &DashboardView {
        self.cycle.transition(DashboardState::Idle);
        self.cycle.view = DashboardView::default();
        self.cycle.transition(DashboardState::SelectionChanged);
        self.cycle.run(self.source.as_ref(), selection);
        &self.cycle.view
    }
}
