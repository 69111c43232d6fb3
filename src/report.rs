// Plain text rendering of a dashboard view for the command line

use std::fmt::Write;

use crate::dashboard::{DashboardView, NoticeLevel, PAGE_TITLE, format::country_flag};
use crate::telemetry::Event;

const TABLE_HEADERS: [&str; 6] = ["Lap", "LapTime", "Compound", "TyreLife", "PitOutTime", "PitInTime"];

fn notice_prefix(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "[ok]",
        NoticeLevel::Info => "[info]",
        NoticeLevel::Warning => "[warn]",
        NoticeLevel::Error => "[error]",
    }
}

pub fn render_view(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", PAGE_TITLE);
    if let Some(title) = &view.session_title {
        let _ = writeln!(out, "{}", title);
    }
    out.push('\n');

    for notice in view.notices.iter().filter(|n| n.level != NoticeLevel::Info) {
        let _ = writeln!(out, "{} {}", notice_prefix(notice.level), notice.message);
    }

    if let Some(heading) = &view.table_heading {
        let _ = writeln!(out, "\n{}", heading);
        let cells: Vec<[String; 6]> = view
            .rows
            .iter()
            .map(|r| {
                [
                    r.lap_number.to_string(),
                    r.lap_time.clone(),
                    r.compound.clone(),
                    r.tyre_life.clone(),
                    r.pit_out_time.clone(),
                    r.pit_in_time.clone(),
                ]
            })
            .collect();

        let mut widths = TABLE_HEADERS.map(str::len);
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header = TABLE_HEADERS.map(str::to_string);
        for row in std::iter::once(&header).chain(cells.iter()) {
            let line = row
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join("  ");
            let _ = writeln!(out, "{}", line.trim_end());
        }
    }

    if !view.commentary.is_empty() {
        let _ = writeln!(out, "\nCommentary");
        for line in &view.commentary {
            let _ = writeln!(out, "  {}", line);
        }
    }

    for notice in view.notices_at(NoticeLevel::Info) {
        let _ = writeln!(out, "{} {}", notice_prefix(notice.level), notice.message);
    }
    out
}

pub fn render_events(year: i32, events: &[Event]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} season", year);
    for event in events {
        let _ = writeln!(
            out,
            "{:>2}  {} {}",
            event.round_number,
            country_flag(&event.country),
            event.name
        );
    }
    out
}
