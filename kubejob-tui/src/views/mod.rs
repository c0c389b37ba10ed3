//! Screens and panels of the dashboard.

pub mod alert;
pub mod audit;
pub mod audit_detail;
pub mod cluster;
pub mod header;
pub mod jobs;
pub mod log_viewer;
pub mod login;
pub mod overview;

use kubejob_ui::Buffer;
use kubejob_ui::Rect;
use kubejob_ui::Style;
use kubejob_ui::text::Align;
use kubejob_ui::text::align_offset;
use kubejob_ui::text::display_width;

/// Dashboard tabs, in header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Jobs,
    Audit,
    Cluster,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Jobs, Tab::Audit, Tab::Cluster];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Jobs => "Active Jobs",
            Tab::Audit => "Audit Trail",
            Tab::Cluster => "Cluster Info",
        }
    }

    /// Tab bound to a number key (`1`..`4`).
    pub fn from_digit(c: char) -> Option<Tab> {
        let index = c.to_digit(10)?.checked_sub(1)?;
        Tab::ALL.get(index as usize).copied()
    }
}

/// Draws `text` centered in `area`, one line per `\n`.
pub(crate) fn draw_centered(buf: &mut Buffer, area: Rect, text: &str, style: Style) {
    let lines: Vec<&str> = text.lines().collect();
    let top = area.y + area.height.saturating_sub(lines.len() as u16) / 2;
    for (i, line) in lines.iter().enumerate() {
        let y = top + i as u16;
        if y >= area.bottom() {
            break;
        }
        let offset = align_offset(display_width(line), area.width as usize, Align::Center) as u16;
        buf.put_str(area.x + offset, y, line, area.width - offset, style);
    }
}

/// Splits text into lines no wider than `width`, breaking long lines hard.
pub(crate) fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for line in text.lines() {
        let mut current = String::new();
        let mut current_width = 0;
        for c in line.chars() {
            let w = kubejob_ui::text::char_width(c);
            if current_width + w > width && !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(c);
            current_width += w;
        }
        out.push(current);
    }
    out
}
