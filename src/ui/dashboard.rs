use std::path::PathBuf;

use egui::{Color32, Layout, RichText, Ui};
use egui_dropdown::DropDownBox;
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, Line, PlotPoints};
use log::{error, info};

use super::{PALETTE_MAROON, PALETTE_ORANGE, default_visuals, show_notice};
use lapboard::config::AppConfig;
use lapboard::dashboard::{
    DashboardController, DashboardView, NoticeLevel, PAGE_TITLE, Selection,
    commentary::{MAX_COMMENTARY_CALLS, MIN_COMMENTARY_CALLS},
    format::country_flag,
    lap_table::{PACE_WINDOW_LAPS, pace_series},
    supported_years,
};
use lapboard::telemetry::{FileBasedSource, SessionType};

const TABLE_ROW_HEIGHT: f32 = 18.0;
const CHART_HEIGHT: f32 = 220.0;

/// `LapDashboardApp` is the graphical front end of the dashboard.
///
/// The sidebar edits a [`Selection`]; whenever it differs from the one last
/// applied the controller runs a new cycle and the resulting
/// [`DashboardView`] is rendered until the next change.
pub struct LapDashboardApp {
    controller: DashboardController,
    app_config: AppConfig,
    cache_dir: PathBuf,
    selection: Selection,
    applied: Option<Selection>,
    view: DashboardView,
    driver_input: String,
}

impl LapDashboardApp {
    pub fn new(
        controller: DashboardController,
        app_config: AppConfig,
        cache_dir: PathBuf,
        cc: &eframe::CreationContext<'_>,
    ) -> Self {
        cc.egui_ctx.set_visuals(default_visuals());

        let selection = app_config.initial_selection();

        Self {
            controller,
            app_config,
            cache_dir,
            selection,
            applied: None,
            view: DashboardView::default(),
            driver_input: String::new(),
        }
    }

    fn show_session_controls(&mut self, ui: &mut Ui) {
        ui.heading(RichText::new("Session Controls").color(Color32::WHITE));
        ui.separator();

        let previous = self.selection.clone();

        egui::ComboBox::from_label("Select Year")
            .selected_text(self.selection.year.to_string())
            .show_ui(ui, |ui| {
                for year in supported_years() {
                    ui.selectable_value(&mut self.selection.year, year, year.to_string());
                }
            });
        if previous.year != self.selection.year {
            self.selection.event_name = None;
        }

        let selected_event = self.selection.event_name.clone().unwrap_or_default();
        egui::ComboBox::from_label("Select Grand Prix")
            .selected_text(selected_event)
            .width(220.)
            .show_ui(ui, |ui| {
                for event in &self.view.events {
                    ui.selectable_value(
                        &mut self.selection.event_name,
                        Some(event.name.clone()),
                        format!("{} {}", country_flag(&event.country), event.name),
                    );
                }
            });

        ui.add_space(5.0);
        ui.label(RichText::new("Session").color(Color32::WHITE));
        for session_type in SessionType::ALL {
            ui.radio_value(
                &mut self.selection.session_type,
                session_type,
                session_type.label(),
            );
        }

        ui.add_space(5.0);
        ui.checkbox(
            &mut self.selection.commentary_enabled,
            "Enable Commentary",
        );
        ui.add(
            egui::Slider::new(
                &mut self.selection.max_commentary_calls,
                MIN_COMMENTARY_CALLS..=MAX_COMMENTARY_CALLS,
            )
            .text("Max commentary lines"),
        );

        // a different session means a different driver list
        if previous.year != self.selection.year
            || previous.event_name != self.selection.event_name
            || previous.session_type != self.selection.session_type
        {
            self.selection.driver = None;
        }

        ui.add_space(10.0);
        ui.separator();
        ui.label(
            RichText::new(format!("Cache: {}", self.cache_dir.display()))
                .color(Color32::GRAY)
                .small(),
        );
        if ui.button("📂 Cache folder").clicked()
            && let Some(path) = rfd::FileDialog::new().pick_folder()
        {
            self.change_cache_dir(path);
        }
    }

    fn change_cache_dir(&mut self, path: PathBuf) {
        match FileBasedSource::new(path.clone()) {
            Ok(source) => {
                info!("Switching telemetry cache to {:?}", path);
                self.controller.set_source(Box::new(source));
                self.app_config.cache_dir = Some(path.clone());
                self.cache_dir = path;
                self.applied = None;
            }
            Err(e) => error!("Could not use {:?} as telemetry cache: {}", path, e),
        }
    }

    fn refresh_if_changed(&mut self) {
        if self.applied.as_ref() == Some(&self.selection) {
            return;
        }

        self.view = self.controller.on_selection_changed(&self.selection).clone();
        // keep the widgets in sync with the defaults the controller picked
        if self.selection.event_name.is_none() {
            self.selection.event_name = self.view.event_name.clone();
        }
        if self.selection.driver.is_none() {
            self.selection.driver = self.view.driver.clone();
        }
        self.driver_input = self.selection.driver.clone().unwrap_or_default();
        self.applied = Some(self.selection.clone());
    }

    fn show_driver_selector(&mut self, ui: &mut Ui) {
        ui.with_layout(Layout::left_to_right(egui::Align::Center), |ui| {
            ui.label(RichText::new("Select Driver: ").color(Color32::WHITE));
            ui.add(
                DropDownBox::from_iter(
                    &self.view.drivers,
                    "driver_dropbox",
                    &mut self.driver_input,
                    |ui, text| ui.selectable_label(false, text),
                )
                .filter_by_input(false),
            );
        });

        if self.selection.driver.as_deref() != Some(self.driver_input.as_str())
            && self.view.drivers.contains(&self.driver_input)
        {
            self.selection.driver = Some(self.driver_input.clone());
        }
    }
}

fn show_lap_table(ui: &mut Ui, view: &DashboardView) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(false)
        .max_scroll_height(320.)
        .columns(Column::auto().at_least(70.), 6)
        .header(20.0, |mut header| {
            for title in [
                "Lap",
                "Lap time",
                "Compound",
                "Tyre life",
                "Pit out",
                "Pit in",
            ] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for row in &view.rows {
                body.row(TABLE_ROW_HEIGHT, |mut table_row| {
                    for value in [
                        row.lap_number.to_string(),
                        row.lap_time.clone(),
                        row.compound.clone(),
                        row.tyre_life.clone(),
                        row.pit_out_time.clone(),
                        row.pit_in_time.clone(),
                    ] {
                        table_row.col(|ui| {
                            ui.label(value);
                        });
                    }
                });
            }
        });
}

fn show_lap_chart(ui: &mut Ui, view: &DashboardView) {
    if view.lap_times.is_empty() {
        return;
    }
    egui_plot::Plot::new("lap_times")
        .height(CHART_HEIGHT)
        .show_background(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new("Lap time (s)", PlotPoints::new(view.lap_times.clone()))
                    .color(PALETTE_ORANGE),
            );
            plot_ui.line(
                Line::new(
                    format!("{}-lap pace", PACE_WINDOW_LAPS),
                    PlotPoints::new(pace_series(&view.lap_times)),
                )
                .color(Color32::LIGHT_GRAY),
            );
        });
}

impl eframe::App for LapDashboardApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.app_config.year = self.selection.year;
        self.app_config.commentary_enabled = self.selection.commentary_enabled;
        self.app_config.max_commentary_calls = self.selection.max_commentary_calls;

        if let Err(e) = self.app_config.save() {
            error!("Error while saving config file: {}", e);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("session_controls")
            .resizable(false)
            .min_width(260.0)
            .show(ctx, |ui| {
                self.show_session_controls(ui);
            });

        self.refresh_if_changed();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading(RichText::new(PAGE_TITLE).color(Color32::WHITE).strong());
                if let Some(title) = &self.view.session_title {
                    ui.label(RichText::new(title).color(PALETTE_MAROON).size(18.));
                }
                ui.separator();

                for notice in self.view.notices.iter().filter(|n| n.level != NoticeLevel::Info) {
                    show_notice(ui, notice);
                }

                if !self.view.drivers.is_empty() {
                    self.show_driver_selector(ui);
                }

                if let Some(heading) = &self.view.table_heading {
                    ui.add_space(5.0);
                    ui.label(RichText::new(heading).color(Color32::WHITE).size(16.));
                    show_lap_table(ui, &self.view);
                    ui.add_space(5.0);
                    show_lap_chart(ui, &self.view);
                }

                if !self.view.commentary.is_empty() {
                    ui.add_space(5.0);
                    ui.label(RichText::new("🤖 Commentary").color(Color32::WHITE));
                    for line in &self.view.commentary {
                        ui.label(RichText::new(line).color(Color32::LIGHT_BLUE));
                    }
                }

                for notice in self.view.notices_at(NoticeLevel::Info) {
                    show_notice(ui, notice);
                }
            });
        });
    }
}
