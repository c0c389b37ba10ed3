//! Display-width aware string helpers.

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Horizontal placement of text inside a wider slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Cuts `s` to `max_width` cells, ending in `…` when anything was cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target_width = max_width - 1;
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = char_width(ch);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result.push('…');
    result
}

/// Column offset that places text of `text_width` cells within `available`.
pub fn align_offset(text_width: usize, available: usize, align: Align) -> usize {
    if text_width >= available {
        return 0;
    }

    match align {
        Align::Left => 0,
        Align::Center => (available - text_width) / 2,
        Align::Right => available - text_width,
    }
}

/// Cuts a string to `max_width` cells without an ellipsis, for scrolled
/// views where the cut is expected.
pub fn take_width(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (idx, ch) in s.char_indices() {
        let w = char_width(ch);
        if width + w > max_width {
            return &s[..idx];
        }
        width += w;
    }
    s
}
