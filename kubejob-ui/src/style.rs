//! Colors, text attributes and the dashboard theme.

/// A 24-bit terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Text attributes of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
}

impl TextStyle {
    pub const fn new() -> Self {
        Self {
            bold: false,
            dim: false,
            italic: false,
            underline: false,
        }
    }
}

/// Foreground, background and attributes applied to drawn text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub text: TextStyle,
}

impl Style {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            text: TextStyle::new(),
        }
    }

    pub const fn fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    pub const fn bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    pub const fn bold(mut self) -> Self {
        self.text.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.text.dim = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.text.italic = true;
        self
    }

    pub const fn underline(mut self) -> Self {
        self.text.underline = true;
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Theme::DEFAULT.base()
    }
}

/// Semantic color of a piece of content, resolved through a [`Theme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Tone {
    #[default]
    Default,
    Muted,
    Accent,
    Success,
    Warning,
    Danger,
    Info,
}

/// Dashboard palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb,
    pub surface: Rgb,
    pub surface_alt: Rgb,
    pub border: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub accent: Rgb,
    pub success: Rgb,
    pub warning: Rgb,
    pub danger: Rgb,
    pub info: Rgb,
    pub selection: Rgb,
    pub backdrop: Rgb,
}

impl Theme {
    /// Dark slate palette.
    pub const DEFAULT: Theme = Theme {
        background: Rgb::new(15, 23, 42),
        surface: Rgb::new(30, 41, 59),
        surface_alt: Rgb::new(51, 65, 85),
        border: Rgb::new(71, 85, 105),
        text: Rgb::new(226, 232, 240),
        muted: Rgb::new(148, 163, 184),
        accent: Rgb::new(96, 165, 250),
        success: Rgb::new(74, 222, 128),
        warning: Rgb::new(251, 146, 60),
        danger: Rgb::new(248, 113, 113),
        info: Rgb::new(56, 189, 248),
        selection: Rgb::new(30, 58, 138),
        backdrop: Rgb::new(8, 12, 22),
    };

    pub fn tone(&self, tone: Tone) -> Rgb {
        match tone {
            Tone::Default => self.text,
            Tone::Muted => self.muted,
            Tone::Accent => self.accent,
            Tone::Success => self.success,
            Tone::Warning => self.warning,
            Tone::Danger => self.danger,
            Tone::Info => self.info,
        }
    }

    /// Plain text on the page background.
    pub fn base(&self) -> Style {
        Style::new(self.text, self.background)
    }

    /// Plain text on a card or panel.
    pub fn surface(&self) -> Style {
        Style::new(self.text, self.surface)
    }

    pub fn muted(&self) -> Style {
        Style::new(self.muted, self.background)
    }

    /// Clickable control label.
    pub fn button(&self) -> Style {
        Style::new(self.accent, self.surface_alt).bold()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::DEFAULT
    }
}
