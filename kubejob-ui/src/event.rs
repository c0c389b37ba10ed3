//! Input events, converted from crossterm.

use crossterm::event::Event as CrosstermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use log::trace;

/// Logical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };
}

/// A key with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key without modifiers.
    pub const fn key(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub const fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub const fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    /// True for `Char(c)` without ctrl/alt (shift is implied by the char).
    pub fn is_char(&self, c: char) -> bool {
        self.key == Key::Char(c) && !self.modifiers.ctrl && !self.modifiers.alt
    }

    /// True for `Ctrl+c`.
    pub fn is_ctrl(&self, c: char) -> bool {
        self.modifiers.ctrl && matches!(self.key, Key::Char(k) if k.eq_ignore_ascii_case(&c))
    }
}

/// Wheel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Dashboard input event.
///
/// Pointer positions are absolute screen cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(KeyCombo),
    /// Primary button pressed.
    Press { x: u16, y: u16 },
    /// Pointer moved with the primary button held.
    Drag { x: u16, y: u16 },
    /// Primary button released.
    Release { x: u16, y: u16 },
    Scroll {
        direction: ScrollDirection,
        x: u16,
        y: u16,
        amount: u16,
    },
    Resize { width: u16, height: u16 },
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        shift: mods.contains(KeyModifiers::SHIFT),
        alt: mods.contains(KeyModifiers::ALT),
    }
}

fn convert_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::BackTab => Some(Key::BackTab),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        _ => None,
    }
}

pub fn convert_key_event(event: KeyEvent) -> Option<KeyCombo> {
    let key = convert_key(event.code)?;
    Some(KeyCombo::new(key, convert_modifiers(event.modifiers)))
}

pub fn convert_mouse_event(event: MouseEvent) -> Option<Input> {
    let (x, y) = (event.column, event.row);
    let scroll = |direction| {
        Some(Input::Scroll {
            direction,
            x,
            y,
            amount: 3,
        })
    };

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Input::Press { x, y }),
        MouseEventKind::Drag(MouseButton::Left) => Some(Input::Drag { x, y }),
        MouseEventKind::Up(MouseButton::Left) => Some(Input::Release { x, y }),
        MouseEventKind::ScrollUp => scroll(ScrollDirection::Up),
        MouseEventKind::ScrollDown => scroll(ScrollDirection::Down),
        MouseEventKind::ScrollLeft => scroll(ScrollDirection::Left),
        MouseEventKind::ScrollRight => scroll(ScrollDirection::Right),
        _ => None,
    }
}

/// Converts a crossterm event; key releases and repeats are dropped.
pub fn convert_event(event: CrosstermEvent) -> Option<Input> {
    match event {
        CrosstermEvent::Key(key_event) => {
            if key_event.kind != KeyEventKind::Press {
                trace!("ignoring non-press key event {:?}", key_event.code);
                return None;
            }
            convert_key_event(key_event).map(Input::Key)
        }
        CrosstermEvent::Mouse(mouse_event) => convert_mouse_event(mouse_event),
        CrosstermEvent::Resize(width, height) => Some(Input::Resize { width, height }),
        _ => None,
    }
}
