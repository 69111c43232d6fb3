use egui::{Color32, RichText, Ui, Visuals, style::Widgets};

use lapboard::dashboard::{Notice, NoticeLevel};

pub(crate) mod dashboard;

pub(crate) const PALETTE_BLACK: Color32 = Color32::from_rgb(12, 12, 12);
pub(crate) const PALETTE_BROWN: Color32 = Color32::from_rgb(72, 30, 20);
pub(crate) const PALETTE_MAROON: Color32 = Color32::from_rgb(155, 57, 34);
pub(crate) const PALETTE_ORANGE: Color32 = Color32::from_rgb(242, 97, 63);

pub(crate) fn default_visuals() -> Visuals {
    Visuals {
        dark_mode: true,
        hyperlink_color: PALETTE_MAROON,
        faint_bg_color: PALETTE_BROWN,
        extreme_bg_color: PALETTE_BLACK,
        panel_fill: PALETTE_BLACK,
        button_frame: true,
        widgets: Widgets::dark(),
        striped: true,
        ..Default::default()
    }
}

fn notice_style(level: NoticeLevel) -> (&'static str, Color32) {
    match level {
        NoticeLevel::Success => ("✓", Color32::GREEN),
        NoticeLevel::Info => ("ℹ", Color32::LIGHT_BLUE),
        NoticeLevel::Warning => ("⚠", Color32::YELLOW),
        NoticeLevel::Error => ("✖", Color32::RED),
    }
}

pub(crate) fn show_notice(ui: &mut Ui, notice: &Notice) {
    let (icon, color) = notice_style(notice.level);
    let mut text = RichText::new(format!("{} {}", icon, notice.message)).color(color);
    if notice.level == NoticeLevel::Error {
        text = text.strong();
    }
    ui.label(text);
}
