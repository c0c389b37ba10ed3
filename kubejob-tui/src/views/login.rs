//! Sign-in screen.

use kubejob_ui::Buffer;
use kubejob_ui::Rect;
use kubejob_ui::Theme;
use kubejob_ui::components::Component;
use kubejob_ui::components::EventResult;
use kubejob_ui::components::modal::draw_button;
use kubejob_ui::components::modal::draw_frame;
use kubejob_ui::components::text_input::TextInput;
use kubejob_ui::components::text_input::TextInputEvent;
use kubejob_ui::event::Key;
use kubejob_ui::event::KeyCombo;

use super::header::TITLE;

const CARD_WIDTH: u16 = 44;
const CARD_HEIGHT: u16 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Username,
    Password,
}

/// Username and password typed in by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default)]
struct Geometry {
    username: Rect,
    password: Rect,
    submit: Rect,
}

#[derive(Debug)]
pub struct LoginView {
    username: TextInput,
    password: TextInput,
    focus: Field,
    pending: bool,
    submitted: Option<Submission>,
    geometry: Geometry,
}

impl Default for LoginView {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginView {
    pub fn new() -> Self {
        Self {
            username: TextInput::new().placeholder("admin"),
            password: TextInput::new().masked('•').placeholder("password"),
            focus: Field::Username,
            pending: false,
            submitted: None,
            geometry: Geometry::default(),
        }
    }

    /// Marks a sign-in attempt as in flight; input is ignored meanwhile.
    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    /// Takes the submission queued by Enter or the sign-in button.
    pub fn take_submission(&mut self) -> Option<Submission> {
        self.submitted.take()
    }

    /// Clears the password after a failed attempt.
    pub fn reset_password(&mut self) {
        self.password.clear();
        self.submitted = None;
        self.focus = Field::Password;
    }

    fn submit(&mut self) {
        if self.pending {
            return;
        }
        self.submitted = Some(Submission {
            username: self.username.value().to_string(),
            password: self.password.value().to_string(),
        });
    }

    fn focused(&mut self) -> &mut TextInput {
        match self.focus {
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Username => Field::Password,
            Field::Password => Field::Username,
        };
    }

    pub fn render(&mut self, buf: &mut Buffer, area: Rect, theme: &Theme) {
        buf.fill(area, theme.base());

        let card = area.centered(CARD_WIDTH, CARD_HEIGHT);
        let inner = draw_frame(buf, card, TITLE, theme);
        if inner.height < 8 {
            return;
        }

        let surface = theme.surface();
        let muted = surface.fg(theme.muted);
        buf.put_str(inner.x + 1, inner.y, "Sign in to the scaler", inner.width, muted);

        let field_width = inner.width.saturating_sub(2);
        buf.put_str(inner.x + 1, inner.y + 2, "Username", inner.width, surface.bold());
        self.geometry.username = Rect::new(inner.x + 1, inner.y + 3, field_width, 1);
        let focus = self.focus;
        self.username.render(
            buf,
            self.geometry.username,
            theme,
            focus == Field::Username && !self.pending,
        );

        buf.put_str(inner.x + 1, inner.y + 4, "Password", inner.width, surface.bold());
        self.geometry.password = Rect::new(inner.x + 1, inner.y + 5, field_width, 1);
        self.password.render(
            buf,
            self.geometry.password,
            theme,
            focus == Field::Password && !self.pending,
        );

        let label = if self.pending { "Signing in..." } else { "Sign In" };
        self.geometry.submit = draw_button(buf, inner.x + 1, inner.y + 7, label, theme.button());
    }
}

impl Component for LoginView {
    fn on_key(&mut self, key: &KeyCombo) -> EventResult {
        if self.pending {
            return EventResult::Consumed;
        }

        match key.key {
            Key::Tab | Key::BackTab | Key::Up | Key::Down => {
                self.toggle_focus();
                return EventResult::Consumed;
            }
            _ => {}
        }

        let result = self.focused().on_key(key);
        let events = self.focused().drain_events();
        if events.contains(&TextInputEvent::Submitted) {
            self.submit();
        }
        result
    }

    fn on_press(&mut self, x: u16, y: u16) -> EventResult {
        if self.pending {
            return EventResult::Consumed;
        }

        if self.geometry.username.contains(x, y) {
            self.focus = Field::Username;
        } else if self.geometry.password.contains(x, y) {
            self.focus = Field::Password;
        } else if self.geometry.submit.contains(x, y) {
            self.submit();
        } else {
            return EventResult::Ignored;
        }
        EventResult::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(view: &mut LoginView, s: &str) {
        for c in s.chars() {
            view.on_key(&KeyCombo::key(Key::Char(c)));
        }
    }

    #[test]
    fn test_enter_submits_both_fields() {
        let mut view = LoginView::new();
        type_str(&mut view, "admin");
        view.on_key(&KeyCombo::key(Key::Tab));
        type_str(&mut view, "secret");
        view.on_key(&KeyCombo::key(Key::Enter));

        assert_eq!(
            view.take_submission(),
            Some(Submission {
                username: "admin".into(),
                password: "secret".into(),
            })
        );
        assert_eq!(view.take_submission(), None);
    }

    #[test]
    fn test_pending_blocks_input() {
        let mut view = LoginView::new();
        view.set_pending(true);
        type_str(&mut view, "x");
        view.on_key(&KeyCombo::key(Key::Enter));

        assert_eq!(view.take_submission(), None);
    }

    #[test]
    fn test_password_is_masked() {
        let mut view = LoginView::new();
        view.on_key(&KeyCombo::key(Key::Tab));
        type_str(&mut view, "hunter2");

        let mut buf = Buffer::new(80, 24);
        let area = buf.area();
        view.render(&mut buf, area, &Theme::DEFAULT);

        let screen: String = (0..24).map(|y| buf.row_text(y)).collect();
        assert!(!screen.contains("hunter2"));
        assert!(screen.contains("•••••••"));
    }

    #[test]
    fn test_click_submit_button() {
        let mut view = LoginView::new();
        let mut buf = Buffer::new(80, 24);
        let area = buf.area();
        view.render(&mut buf, area, &Theme::DEFAULT);

        let submit = view.geometry.submit;
        view.on_press(submit.x, submit.y);

        let submission = view.take_submission().unwrap();
        assert!(submission.username.is_empty());
    }
}
