mod ui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use egui::Vec2;
use lapboard::{
    AppConfig, DashboardController, LapboardError, Selection, SessionType,
    dashboard::{commentary::DEFAULT_COMMENTARY_CALLS, selector::SessionSelector, validate_year},
    report,
    telemetry::{LoadResult, TelemetryLoader},
};
use log::warn;
use ui::dashboard::LapDashboardApp;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Log even in release builds
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the graphical dashboard
    Dashboard {
        #[arg(short, long)]
        cache_dir: Option<PathBuf>,

        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Print one driver's laps for a session
    Laps {
        #[arg(short, long)]
        year: i32,

        #[arg(short, long)]
        event: String,

        #[arg(short, long, default_value = "Race", value_parser = parse_session_type)]
        session: SessionType,

        #[arg(short, long)]
        driver: Option<String>,

        #[arg(long)]
        commentary: bool,

        #[arg(short, long, default_value_t = DEFAULT_COMMENTARY_CALLS)]
        max_calls: u32,

        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
    /// List the selectable events of a season
    Events {
        #[arg(short, long)]
        year: i32,

        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
}

fn parse_session_type(value: &str) -> Result<SessionType, String> {
    SessionType::from_label(value).ok_or_else(|| {
        format!(
            "unknown session '{}', expected one of: {}",
            value,
            SessionType::ALL.map(|t| t.label()).join(", ")
        )
    })
}

fn load_config() -> AppConfig {
    match AppConfig::from_local_file() {
        Ok(Some(config)) => config,
        Ok(None) => AppConfig::default(),
        Err(e) => {
            warn!("Ignoring unreadable config file: {}", e);
            AppConfig::default()
        }
    }
}

fn dashboard(cache_dir: Option<PathBuf>, year: Option<i32>) -> Result<(), LapboardError> {
    let mut app_config = load_config();
    if let Some(year) = year {
        app_config.year = validate_year(year)?;
    }
    let source = app_config.open_source(cache_dir)?;
    let cache_path = source.cache_path().to_path_buf();
    let controller = DashboardController::new(Box::new(source));

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options
        .viewport
        .with_title("F1 Live Dashboard")
        .with_inner_size(Vec2::new(1200., 800.));

    eframe::run_native(
        "Lapboard",
        native_options,
        Box::new(|cc| {
            Ok(Box::new(LapDashboardApp::new(
                controller, app_config, cache_path, cc,
            )))
        }),
    )
    .expect("could not start app");
    Ok(())
}

fn laps(selection: Selection, cache_dir: Option<PathBuf>) -> Result<(), LapboardError> {
    validate_year(selection.year)?;
    let source = load_config().open_source(cache_dir)?;
    let mut controller = DashboardController::new(Box::new(source));
    print!("{}", report::render_view(controller.on_selection_changed(&selection)));
    Ok(())
}

fn events(year: i32, cache_dir: Option<PathBuf>) -> Result<(), LapboardError> {
    validate_year(year)?;
    let source = load_config().open_source(cache_dir)?;
    match TelemetryLoader::new(&source).load_schedule(year) {
        LoadResult::Loaded(catalog) => {
            let selector = SessionSelector::new(year, &catalog);
            let events: Vec<_> = selector.selectable_events().into_iter().cloned().collect();
            print!("{}", report::render_events(year, &events));
        }
        LoadResult::LoadFailed(reason) => println!("[error] {}", reason),
    }
    Ok(())
}

fn main() {
    let cli = Args::parse();

    if cfg!(debug_assertions) || cli.verbose {
        colog::init();
    }

    ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    })
    .expect("Could not set Ctrl-C handler");

    match cli.command {
        Commands::Dashboard { cache_dir, year } => {
            dashboard(cache_dir, year).expect("Error while running the dashboard")
        }
        Commands::Laps {
            year,
            event,
            session,
            driver,
            commentary,
            max_calls,
            cache_dir,
        } => {
            let selection = Selection {
                year,
                event_name: Some(event),
                session_type: session,
                driver,
                commentary_enabled: commentary,
                max_commentary_calls: max_calls,
            };
            laps(selection, cache_dir).expect("Error while loading laps")
        }
        Commands::Events { year, cache_dir } => {
            events(year, cache_dir).expect("Error while listing events")
        }
    };
}
