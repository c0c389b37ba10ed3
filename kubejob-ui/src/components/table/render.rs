//! Drawing the table into a buffer.
//!
//! Layout, top to bottom: a toolbar line with the row count and the
//! "Configure Columns" button, the header line, then one line per row. The
//! header and rows are drawn onto a canvas as wide as all visible columns
//! and the horizontally scrolled window of it is copied into the target.

use super::column::CellContent;
use super::panel::PANEL_TITLE;
use super::sort::SortDirection;
use super::state::ColumnSpan;
use super::state::Geometry;
use super::state::Table;
use super::value::TableRow;
use crate::buffer::Buffer;
use crate::components::modal::draw_button;
use crate::rect::Rect;
use crate::style::Style;
use crate::style::Theme;
use crate::text::Align;
use crate::text::align_offset;
use crate::text::display_width;
use crate::text::truncate_to_width;

fn sort_arrow(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "▲",
        SortDirection::Desc => "▼",
    }
}

impl<R: TableRow> Table<R> {
    /// Draws the table into `area` and, when open, the configuration panel
    /// over the whole buffer.
    pub fn render(&mut self, buf: &mut Buffer, area: Rect, theme: &Theme) {
        let (toolbar, rest) = area.split_top(1);
        let (header, body) = rest.split_top(1);
        self.geometry = Geometry {
            area,
            toolbar_button: Rect::default(),
            header,
            body,
        };
        if area.is_empty() {
            return;
        }

        self.clamp_scroll();
        self.scroll_columns(0);

        self.draw_toolbar(buf, toolbar, theme);

        let spans = self.spans();
        let content_width = spans.last().map(|s| s.end()).unwrap_or(0);
        let rows_shown = if self.rows.is_empty() {
            0
        } else {
            (body.height as usize).min(self.rows.len() - self.scroll_y)
        };

        buf.fill(header, theme.surface());
        buf.fill(body, theme.base());

        if content_width > 0 && header.height > 0 {
            let mut canvas = Buffer::new(content_width, 1 + rows_shown as u16);
            canvas.fill(canvas.area(), theme.base());
            self.draw_header(&mut canvas, &spans, theme);
            for line in 0..rows_shown {
                self.draw_row(&mut canvas, &spans, line, theme);
            }

            let window = area
                .width
                .min(content_width.saturating_sub(self.scroll_x));
            buf.blit(
                &canvas,
                self.scroll_x,
                Rect::new(area.x, header.y, window, 1 + rows_shown as u16),
            );
        }

        if self.rows.is_empty() && body.height > 0 {
            let visible_width = content_width.saturating_sub(self.scroll_x);
            let span_width = if visible_width == 0 {
                body.width
            } else {
                body.width.min(visible_width)
            };
            let text = truncate_to_width(&self.empty_text, span_width as usize);
            let offset = align_offset(display_width(&text), span_width as usize, Align::Center);
            buf.put_str(
                body.x + offset as u16,
                body.y,
                &text,
                span_width,
                theme.muted().italic(),
            );
        }

        if self.panel.is_some() {
            self.render_panel(buf, theme);
        }
    }

    fn draw_toolbar(&mut self, buf: &mut Buffer, toolbar: Rect, theme: &Theme) {
        buf.fill(toolbar, theme.base());

        let mut summary = format!(" {} rows", self.rows.len());
        if let Some(sort) = &self.sort {
            let label = self
                .column(&sort.key)
                .map(|c| c.label())
                .unwrap_or(sort.key.as_str());
            summary.push_str(&format!("  sorted by {} {}", label, sort_arrow(sort.direction)));
        }
        buf.put_str(toolbar.x, toolbar.y, &summary, toolbar.width, theme.muted());

        let button_width = display_width(PANEL_TITLE) as u16 + 4;
        if toolbar.width > button_width + summary.len() as u16 {
            self.geometry.toolbar_button = draw_button(
                buf,
                toolbar.right() - button_width,
                toolbar.y,
                PANEL_TITLE,
                theme.button(),
            );
        }
    }

    fn draw_header(&self, canvas: &mut Buffer, spans: &[ColumnSpan], theme: &Theme) {
        let base = Style::new(theme.muted, theme.surface).bold();
        canvas.fill(Rect::new(0, 0, canvas.width(), 1), base);
        let cursor_key = self.column_cursor_key();

        for (span, cell) in spans.iter().zip(self.header_cells()) {
            let indicator = cell.sort.map(sort_arrow).unwrap_or("");
            let room = span.width.saturating_sub(1) as usize;
            let label_room = room.saturating_sub(display_width(indicator) + 1);

            let mut style = base;
            if cell.sort.is_some() {
                style = style.fg(theme.accent);
            }
            if cell.key.is_some() && cell.key.as_deref() == cursor_key {
                style = style.underline();
            }

            let label = truncate_to_width(&cell.label, label_room);
            let written = canvas.put_str(span.start, 0, &label, label_room as u16, style);
            if !indicator.is_empty() {
                canvas.put_str(
                    span.start + written + 1,
                    0,
                    indicator,
                    1,
                    Style::new(theme.accent, theme.surface),
                );
            }

            canvas.put_str(
                span.handle(),
                0,
                "│",
                1,
                Style::new(theme.border, theme.surface),
            );
        }
    }

    fn draw_row(&self, canvas: &mut Buffer, spans: &[ColumnSpan], line: usize, theme: &Theme) {
        let position = self.scroll_y + line;
        let source = self.order[position];
        let row = &self.rows[source];
        let y = line as u16 + 1;

        let bg = if position == self.cursor {
            theme.selection
        } else if position % 2 == 1 {
            theme.surface
        } else {
            theme.background
        };
        let base = Style::new(theme.text, bg);
        canvas.fill(Rect::new(0, y, canvas.width(), 1), base);

        for span in spans {
            let room = span.width.saturating_sub(1);
            let Some(key) = &span.key else {
                canvas.put_str(
                    span.start,
                    y,
                    &(position + 1).to_string(),
                    room,
                    Style::new(theme.muted, bg),
                );
                continue;
            };
            let Some(column) = self.column(key) else {
                continue;
            };

            let content = column.cell(row);
            let style = match &content {
                CellContent::Text(_) => base,
                CellContent::Styled { tone, .. } => Style::new(theme.tone(*tone), bg).bold(),
                CellContent::Action { .. } => Style::new(theme.accent, bg).bold().underline(),
            };
            let text = truncate_to_width(&content.display(), room as usize);
            canvas.put_str(span.start, y, &text, room, style);
        }
    }
}
