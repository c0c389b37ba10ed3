//! Single-line text input.

use std::mem;

use super::Component;
use super::EventResult;
use crate::buffer::Buffer;
use crate::event::Key;
use crate::event::KeyCombo;
use crate::rect::Rect;
use crate::style::Style;
use crate::style::Theme;

/// Something the parent should react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInputEvent {
    /// The value changed.
    Changed,
    /// Enter was pressed.
    Submitted,
}

/// An editable line of text with an optional mask character.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    /// Cursor position in chars.
    cursor: usize,
    mask: Option<char>,
    placeholder: String,
    area: Rect,
    events: Vec<TextInputEvent>,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders every character as `mask`, for passwords.
    pub fn masked(mut self, mask: char) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Takes the events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<TextInputEvent> {
        mem::take(&mut self.events)
    }

    /// Area covered by the last render.
    pub fn area(&self) -> Rect {
        self.area
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(idx, _)| idx)
            .unwrap_or(self.value.len())
    }

    fn insert(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.value.insert(idx, c);
        self.cursor += 1;
        self.events.push(TextInputEvent::Changed);
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.value.remove(idx);
        self.events.push(TextInputEvent::Changed);
    }

    fn delete(&mut self) {
        if self.cursor >= self.value.chars().count() {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.value.remove(idx);
        self.events.push(TextInputEvent::Changed);
    }

    fn display_chars(&self) -> Vec<char> {
        match self.mask {
            Some(mask) => self.value.chars().map(|_| mask).collect(),
            None => self.value.chars().collect(),
        }
    }

    /// Draws the input. The cursor is shown only when `focused`.
    pub fn render(&mut self, buf: &mut Buffer, area: Rect, theme: &Theme, focused: bool) {
        self.area = area;
        if area.is_empty() {
            return;
        }

        let bg = if focused { theme.surface_alt } else { theme.surface };
        let style = Style::new(theme.text, bg);
        buf.fill(area, style);

        if self.value.is_empty() {
            buf.put_str(
                area.x,
                area.y,
                &self.placeholder,
                area.width,
                Style::new(theme.muted, bg).italic(),
            );
        } else {
            // Keep the cursor in view; one cell is reserved for it at the end.
            let chars = self.display_chars();
            let visible = area.width.saturating_sub(1) as usize;
            let start = self.cursor.saturating_sub(visible);
            let shown: String = chars[start..].iter().collect();
            buf.put_str(area.x, area.y, &shown, area.width, style);
        }

        if focused {
            let visible = area.width.saturating_sub(1) as usize;
            let offset = self.cursor.min(visible) as u16;
            if let Some(cell) = buf.get_mut(area.x + offset, area.y) {
                cell.fg = theme.background;
                cell.bg = theme.accent;
            }
        }
    }
}

impl Component for TextInput {
    fn on_key(&mut self, key: &KeyCombo) -> EventResult {
        if key.modifiers.ctrl || key.modifiers.alt {
            return EventResult::Ignored;
        }

        match key.key {
            Key::Char(c) => self.insert(c),
            Key::Space => self.insert(' '),
            Key::Backspace => self.backspace(),
            Key::Delete => self.delete(),
            Key::Left => self.cursor = self.cursor.saturating_sub(1),
            Key::Right => self.cursor = (self.cursor + 1).min(self.value.chars().count()),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.value.chars().count(),
            Key::Enter => self.events.push(TextInputEvent::Submitted),
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }

    fn on_press(&mut self, x: u16, y: u16) -> EventResult {
        if self.area.contains(x, y) {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}
