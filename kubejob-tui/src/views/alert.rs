//! Blocking message box.

use kubejob_ui::Buffer;
use kubejob_ui::Rect;
use kubejob_ui::Theme;
use kubejob_ui::components::Component;
use kubejob_ui::components::EventResult;
use kubejob_ui::components::modal::draw_backdrop;
use kubejob_ui::components::modal::draw_button;
use kubejob_ui::components::modal::draw_frame;
use kubejob_ui::event::Key;
use kubejob_ui::event::KeyCombo;
use kubejob_ui::text::display_width;

use super::wrap_lines;

const MAX_WIDTH: u16 = 60;

/// A message the user must acknowledge before anything else reacts.
#[derive(Debug)]
pub struct Alert {
    message: String,
    ok: Rect,
    dismissed: bool,
}

impl Alert {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ok: Rect::default(),
            dismissed: false,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    pub fn render(&mut self, buf: &mut Buffer, theme: &Theme) {
        let screen = buf.area();
        let text_width = self
            .message
            .lines()
            .map(display_width)
            .max()
            .unwrap_or(0) as u16;
        let width = (text_width + 6).clamp(24, MAX_WIDTH).min(screen.width);
        let lines = wrap_lines(&self.message, width.saturating_sub(4) as usize);
        let height = (lines.len() as u16 + 5).min(screen.height);

        let frame = screen.centered(width, height);
        draw_backdrop(buf, frame, theme);
        let inner = draw_frame(buf, frame, "Notice", theme);

        for (i, line) in lines.iter().enumerate() {
            let y = inner.y + 1 + i as u16;
            if y >= inner.bottom() {
                break;
            }
            buf.put_str(inner.x + 1, y, line, inner.width.saturating_sub(2), theme.surface());
        }

        let ok_x = inner.x + inner.width.saturating_sub(6) / 2;
        self.ok = draw_button(buf, ok_x, inner.bottom().saturating_sub(1), "OK", theme.button());
    }
}

impl Component for Alert {
    fn on_key(&mut self, key: &KeyCombo) -> EventResult {
        if matches!(key.key, Key::Enter | Key::Escape | Key::Space) {
            self.dismissed = true;
        }
        EventResult::Consumed
    }

    fn on_press(&mut self, x: u16, y: u16) -> EventResult {
        if self.ok.contains(x, y) {
            self.dismissed = true;
        }
        EventResult::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_acknowledgement_dismisses() {
        let mut alert = Alert::new("Invalid credentials / API unavailable");

        alert.on_key(&KeyCombo::key(Key::Char('x')));
        assert!(!alert.is_dismissed());

        alert.on_key(&KeyCombo::key(Key::Enter));
        assert!(alert.is_dismissed());
    }

    #[test]
    fn test_ok_button_dismisses() {
        let mut alert = Alert::new("Please enter both username and password");
        let mut buf = Buffer::new(80, 24);
        alert.render(&mut buf, &Theme::DEFAULT);

        alert.on_press(0, 0);
        assert!(!alert.is_dismissed());

        let ok = alert.ok;
        alert.on_press(ok.x, ok.y);
        assert!(alert.is_dismissed());
    }
}
