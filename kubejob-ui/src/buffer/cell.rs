use crate::style::Rgb;
use crate::style::Style;
use crate::style::TextStyle;
use crate::style::Theme;

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: TextStyle,
    /// Second column of a double-width character; never written out.
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(' ').with_style(Theme::DEFAULT.base())
    }
}

impl Cell {
    pub fn new(char: char) -> Self {
        Self {
            char,
            fg: Rgb::default(),
            bg: Rgb::default(),
            style: TextStyle::new(),
            wide_continuation: false,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.fg = style.fg;
        self.bg = style.bg;
        self.style = style.text;
        self
    }
}
