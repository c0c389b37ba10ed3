//! Overlay chrome shared by the dashboard dialogs.

use crate::buffer::Buffer;
use crate::rect::Rect;
use crate::style::Style;
use crate::style::Theme;
use crate::text::display_width;
use crate::text::truncate_to_width;

/// Label of the close control drawn in a modal's title bar.
pub const CLOSE_LABEL: &str = "[x]";

/// Darkens everything outside `panel`.
pub fn draw_backdrop(buf: &mut Buffer, panel: Rect, theme: &Theme) {
    let screen = buf.area();
    for y in 0..screen.height {
        for x in 0..screen.width {
            if panel.contains(x, y) {
                continue;
            }
            if let Some(cell) = buf.get_mut(x, y) {
                cell.bg = theme.backdrop;
                cell.fg = theme.border;
            }
        }
    }
}

/// Draws a bordered box with `title` and returns the inner area.
pub fn draw_frame(buf: &mut Buffer, area: Rect, title: &str, theme: &Theme) -> Rect {
    if area.width < 2 || area.height < 2 {
        return Rect::new(area.x, area.y, 0, 0);
    }

    let border = Style::new(theme.border, theme.surface);
    buf.fill(area, theme.surface());

    let right = area.right() - 1;
    let bottom = area.bottom() - 1;
    for x in area.x + 1..right {
        buf.put_str(x, area.y, "─", 1, border);
        buf.put_str(x, bottom, "─", 1, border);
    }
    for y in area.y + 1..bottom {
        buf.put_str(area.x, y, "│", 1, border);
        buf.put_str(right, y, "│", 1, border);
    }
    buf.put_str(area.x, area.y, "┌", 1, border);
    buf.put_str(right, area.y, "┐", 1, border);
    buf.put_str(area.x, bottom, "└", 1, border);
    buf.put_str(right, bottom, "┘", 1, border);

    if !title.is_empty() && area.width > 4 {
        let title = truncate_to_width(title, (area.width - 4) as usize);
        buf.put_str(
            area.x + 2,
            area.y,
            &format!(" {} ", title),
            area.width - 3,
            theme.surface().bold(),
        );
    }

    area.inset(1)
}

/// Draws the close control into the top border and returns its hit box.
pub fn draw_close_button(buf: &mut Buffer, frame: Rect, theme: &Theme) -> Rect {
    let width = display_width(CLOSE_LABEL) as u16;
    if frame.width < width + 2 {
        return Rect::default();
    }
    let x = frame.right() - width - 1;
    buf.put_str(x, frame.y, CLOSE_LABEL, width, theme.button());
    Rect::new(x, frame.y, width, 1)
}

/// Draws a `[ label ]` button and returns its hit box.
pub fn draw_button(buf: &mut Buffer, x: u16, y: u16, label: &str, style: Style) -> Rect {
    let text = format!("[ {} ]", label);
    let width = display_width(&text) as u16;
    let written = buf.put_str(x, y, &text, width, style);
    Rect::new(x, y, written, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_inner_area() {
        let mut buf = Buffer::new(20, 6);
        let inner = draw_frame(&mut buf, Rect::new(2, 1, 10, 4), "Hi", &Theme::DEFAULT);
        assert_eq!(inner, Rect::new(3, 2, 8, 2));
        assert!(buf.row_text(1).starts_with("  ┌─ Hi ─"));
    }

    #[test]
    fn test_button_hit_box() {
        let mut buf = Buffer::new(20, 1);
        let hit = draw_button(&mut buf, 1, 0, "Done", Theme::DEFAULT.button());
        assert_eq!(hit, Rect::new(1, 0, 8, 1));
        assert_eq!(buf.row_text(0).trim_end(), " [ Done ]");
    }
}
