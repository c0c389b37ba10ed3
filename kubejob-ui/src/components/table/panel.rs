//! Column configuration panel.
//!
//! A modal listing every column, hidden ones included, in current order.
//! Each entry has a visibility toggle and up/down move controls, disabled at
//! the ends of the list. Changes apply immediately; closing keeps them.

use log::debug;

use super::state::MoveDirection;
use super::state::Table;
use super::value::TableRow;
use crate::buffer::Buffer;
use crate::components::EventResult;
use crate::components::modal::draw_backdrop;
use crate::components::modal::draw_button;
use crate::components::modal::draw_close_button;
use crate::components::modal::draw_frame;
use crate::event::Key;
use crate::event::KeyCombo;
use crate::rect::Rect;
use crate::style::Style;
use crate::style::Theme;
use crate::text::truncate_to_width;

pub const PANEL_TITLE: &str = "Configure Columns";
const PANEL_WIDTH: u16 = 46;
const DONE_LABEL: &str = "Done";

/// Panel state while open.
#[derive(Debug, Clone, Default)]
pub(crate) struct ConfigPanel {
    /// Highlighted entry, in configuration order.
    pub selected: usize,
    /// First listed entry when the list is taller than the panel.
    pub offset: usize,
    pub geometry: PanelGeometry,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PanelGeometry {
    pub frame: Rect,
    pub list: Rect,
    pub close: Rect,
    pub done: Rect,
}

impl PanelGeometry {
    fn toggle_hit(&self, x: u16) -> bool {
        x >= self.list.x + 2 && x < self.list.x + 5
    }

    fn up_x(&self) -> u16 {
        self.list.right().saturating_sub(4)
    }

    fn down_x(&self) -> u16 {
        self.list.right().saturating_sub(2)
    }
}

impl<R: TableRow> Table<R> {
    pub fn open_config(&mut self) {
        debug!("opening column configuration");
        self.end_resize();
        self.panel = Some(ConfigPanel::default());
    }

    /// Closes the panel; every change made while open is kept.
    pub fn close_config(&mut self) {
        self.panel = None;
    }

    pub fn is_config_open(&self) -> bool {
        self.panel.is_some()
    }

    fn panel_selected(&self) -> usize {
        self.panel.as_ref().map(|p| p.selected).unwrap_or(0)
    }

    fn set_panel_selected(&mut self, selected: usize) {
        let last = self.state.len().saturating_sub(1);
        if let Some(panel) = &mut self.panel {
            panel.selected = selected.min(last);
        }
    }

    fn toggle_entry(&mut self, index: usize) {
        if let Some(key) = self.state.get(index).map(|s| s.key.clone()) {
            self.toggle_visibility(&key);
        }
    }

    fn move_entry(&mut self, index: usize, direction: MoveDirection) {
        if self.move_column(index, direction) {
            let selected = match direction {
                MoveDirection::Up => index - 1,
                MoveDirection::Down => index + 1,
            };
            self.set_panel_selected(selected);
        }
    }

    pub(super) fn panel_key(&mut self, key: &KeyCombo) -> EventResult {
        let selected = self.panel_selected();
        match key.key {
            Key::Escape | Key::Enter => self.close_config(),
            Key::Char('c') => self.close_config(),
            Key::Up if key.modifiers.shift => self.move_entry(selected, MoveDirection::Up),
            Key::Down if key.modifiers.shift => self.move_entry(selected, MoveDirection::Down),
            Key::Char('K') => self.move_entry(selected, MoveDirection::Up),
            Key::Char('J') => self.move_entry(selected, MoveDirection::Down),
            Key::Up | Key::Char('k') => self.set_panel_selected(selected.saturating_sub(1)),
            Key::Down | Key::Char('j') => self.set_panel_selected(selected + 1),
            Key::Space | Key::Char('v') => self.toggle_entry(selected),
            _ => {}
        }
        // Modal: keys never reach the rest of the screen.
        EventResult::Consumed
    }

    pub(super) fn panel_press(&mut self, x: u16, y: u16) -> EventResult {
        let Some(panel) = &self.panel else {
            return EventResult::Ignored;
        };
        let geometry = panel.geometry.clone();
        let offset = panel.offset;

        if !geometry.frame.contains(x, y) {
            // Backdrop click.
            self.close_config();
            return EventResult::Consumed;
        }
        if geometry.close.contains(x, y) || geometry.done.contains(x, y) {
            self.close_config();
            return EventResult::Consumed;
        }

        if geometry.list.contains(x, y) {
            let index = offset + (y - geometry.list.y) as usize;
            if index < self.state.len() {
                self.set_panel_selected(index);
                if geometry.toggle_hit(x) {
                    self.toggle_entry(index);
                } else if x == geometry.up_x() {
                    self.move_entry(index, MoveDirection::Up);
                } else if x == geometry.down_x() {
                    self.move_entry(index, MoveDirection::Down);
                }
            }
        }
        EventResult::Consumed
    }

    /// Draws the panel centered over the whole buffer.
    pub(super) fn render_panel(&mut self, buf: &mut Buffer, theme: &Theme) {
        let count = self.state.len();
        let Some(panel) = &mut self.panel else {
            return;
        };

        let screen = buf.area();
        // Border, list, blank line, buttons, border.
        let wanted = count as u16 + 4;
        let frame = screen.centered(PANEL_WIDTH, wanted.max(5));
        draw_backdrop(buf, frame, theme);
        let inner = draw_frame(buf, frame, PANEL_TITLE, theme);
        let close = draw_close_button(buf, frame, theme);

        let list_height = inner.height.saturating_sub(2);
        let list = Rect::new(inner.x, inner.y, inner.width, list_height);

        let mut geometry = PanelGeometry {
            frame,
            list,
            close,
            done: Rect::default(),
        };

        let visible_rows = list_height as usize;
        if visible_rows > 0 {
            if panel.selected < panel.offset {
                panel.offset = panel.selected;
            } else if panel.selected >= panel.offset + visible_rows {
                panel.offset = panel.selected + 1 - visible_rows;
            }
        }

        for (row, index) in (panel.offset..count).take(visible_rows).enumerate() {
            let state = &self.state[index];
            let label = self
                .columns
                .iter()
                .find(|c| c.key() == state.key)
                .map(|c| c.label())
                .unwrap_or(state.key.as_str());

            let y = list.y + row as u16;
            let selected = index == panel.selected;
            let bg = if selected {
                theme.selection
            } else {
                theme.surface
            };
            buf.fill(list.row(row as u16), Style::new(theme.text, bg));

            let marker = if selected { ">" } else { " " };
            buf.put_str(list.x, y, marker, 1, Style::new(theme.accent, bg));

            let (toggle, toggle_fg) = if state.visible {
                ("[x]", theme.accent)
            } else {
                ("[ ]", theme.muted)
            };
            buf.put_str(list.x + 2, y, toggle, 3, Style::new(toggle_fg, bg));

            let label_fg = if state.visible {
                theme.text
            } else {
                theme.muted
            };
            let label_width = list.width.saturating_sub(11) as usize;
            buf.put_str(
                list.x + 6,
                y,
                &truncate_to_width(label, label_width),
                label_width as u16,
                Style::new(label_fg, bg),
            );

            let arrow = |enabled: bool| {
                if enabled {
                    Style::new(theme.accent, bg).bold()
                } else {
                    Style::new(theme.border, bg).dim()
                }
            };
            buf.put_str(geometry.up_x(), y, "▲", 1, arrow(index > 0));
            buf.put_str(geometry.down_x(), y, "▼", 1, arrow(index + 1 < count));
        }

        let button_y = inner.bottom().saturating_sub(1);
        let done_width = DONE_LABEL.len() as u16 + 4;
        geometry.done = draw_button(
            buf,
            inner.right().saturating_sub(done_width),
            button_y,
            DONE_LABEL,
            theme.button(),
        );
        panel.geometry = geometry;
    }
}
