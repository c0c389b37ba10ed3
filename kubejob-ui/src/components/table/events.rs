//! Pointer and keyboard handling for the table.

use log::trace;

use super::column::CellContent;
use super::state::Table;
use super::state::TableEvent;
use super::value::TableRow;
use crate::CELL_UNITS;
use crate::components::Component;
use crate::components::EventResult;
use crate::event::Key;
use crate::event::KeyCombo;
use crate::event::ScrollDirection;
use crate::text::display_width;

/// Horizontal scroll per key press or wheel notch, in cells.
const HORIZONTAL_SCROLL_AMOUNT: i32 = 4;

fn units(x: u16) -> i32 {
    x as i32 * CELL_UNITS as i32
}

impl<R: TableRow> Table<R> {
    /// Content column under screen column `x`.
    fn content_x(&self, x: u16) -> Option<u16> {
        let area = self.geometry.area;
        if x < area.x || x >= area.right() {
            return None;
        }
        Some(x - area.x + self.scroll_x)
    }

    fn on_header_press(&mut self, x: u16) -> EventResult {
        let Some(cx) = self.content_x(x) else {
            return EventResult::Ignored;
        };
        let spans = self.spans();
        let Some(span) = spans.iter().find(|s| cx >= s.start && cx < s.end()) else {
            return EventResult::Consumed;
        };
        let Some(key) = span.key.clone() else {
            // Row-number column: no sort, no resize.
            return EventResult::Consumed;
        };

        if cx == span.handle() {
            if self.begin_resize(&key, units(x)) {
                return EventResult::StartDrag;
            }
            return EventResult::Consumed;
        }

        trace!("header press on {}", key);
        self.toggle_sort(&key);
        EventResult::Consumed
    }

    /// Id of the action control under content column `cx` in row `index`.
    fn action_at(&self, cx: u16, index: usize) -> Option<String> {
        let spans = self.spans();
        let span = spans.iter().find(|s| cx >= s.start && cx < s.end())?;
        let column = self.column(span.key.as_deref()?)?;
        let CellContent::Action { label, id } = column.cell(&self.rows[index]) else {
            return None;
        };
        // Only the drawn label is clickable.
        let label_width = display_width(&format!("[{}]", label)) as u16;
        let hit = cx < span.start + label_width.min(span.width.saturating_sub(1));
        hit.then_some(id)
    }

    fn on_body_press(&mut self, x: u16, y: u16) -> EventResult {
        let body = self.geometry.body;
        let position = self.scroll_y + (y - body.y) as usize;
        let Some(&index) = self.order.get(position) else {
            return EventResult::Consumed;
        };
        self.cursor = position;

        if let Some(id) = self.content_x(x).and_then(|cx| self.action_at(cx, index)) {
            self.events.push(TableEvent::Action { index, id });
            return EventResult::Consumed;
        }

        if self.row_activation {
            self.events.push(TableEvent::RowActivated { index });
        }
        EventResult::Consumed
    }
}

impl<R: TableRow> Component for Table<R> {
    fn on_press(&mut self, x: u16, y: u16) -> EventResult {
        if self.panel.is_some() {
            return self.panel_press(x, y);
        }

        let geometry = self.geometry.clone();
        if !geometry.area.contains(x, y) {
            return EventResult::Ignored;
        }
        if geometry.toolbar_button.contains(x, y) {
            self.open_config();
            return EventResult::Consumed;
        }
        if geometry.header.contains(x, y) {
            return self.on_header_press(x);
        }
        if geometry.body.contains(x, y) {
            return self.on_body_press(x, y);
        }
        EventResult::Consumed
    }

    fn on_drag(&mut self, x: u16, _y: u16) -> EventResult {
        if !self.is_resizing() {
            return EventResult::Ignored;
        }
        self.resize_to(units(x));
        EventResult::Consumed
    }

    fn on_release(&mut self, x: u16, _y: u16) -> EventResult {
        if !self.is_resizing() {
            return EventResult::Ignored;
        }
        self.resize_to(units(x));
        self.end_resize();
        EventResult::Consumed
    }

    fn on_scroll(&mut self, direction: ScrollDirection, amount: u16) -> EventResult {
        if self.panel.is_some() {
            return EventResult::Consumed;
        }
        let amount = amount as isize;
        match direction {
            ScrollDirection::Up => self.scroll_rows(-amount),
            ScrollDirection::Down => self.scroll_rows(amount),
            ScrollDirection::Left => self.scroll_columns(-HORIZONTAL_SCROLL_AMOUNT),
            ScrollDirection::Right => self.scroll_columns(HORIZONTAL_SCROLL_AMOUNT),
        }
        EventResult::Consumed
    }

    fn on_key(&mut self, key: &KeyCombo) -> EventResult {
        if self.panel.is_some() {
            return self.panel_key(key);
        }
        if key.modifiers.ctrl || key.modifiers.alt {
            return EventResult::Ignored;
        }

        let page = self.page_size() as isize;
        match key.key {
            Key::Up => self.move_cursor(-1),
            Key::Down => self.move_cursor(1),
            Key::PageUp => self.move_cursor(-page),
            Key::PageDown => self.move_cursor(page),
            Key::Home => self.move_cursor(isize::MIN),
            Key::End => self.move_cursor(isize::MAX),
            Key::Left => self.scroll_columns(-HORIZONTAL_SCROLL_AMOUNT),
            Key::Right => self.scroll_columns(HORIZONTAL_SCROLL_AMOUNT),
            Key::Enter => {
                if !self.activate_cursor() {
                    return EventResult::Ignored;
                }
            }
            Key::Char('c') => self.open_config(),
            Key::Char('[') => self.move_column_cursor(-1),
            Key::Char(']') => self.move_column_cursor(1),
            Key::Char('s') => {
                if let Some(key) = self.column_cursor_key().map(str::to_string) {
                    self.toggle_sort(&key);
                }
            }
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }
}
