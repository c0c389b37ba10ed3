//! Title bar and tab strip.

use kubejob_ui::Buffer;
use kubejob_ui::Rect;
use kubejob_ui::Style;
use kubejob_ui::Theme;
use kubejob_ui::components::modal::draw_button;
use kubejob_ui::text::display_width;

use super::Tab;

pub const TITLE: &str = "KubeJob Fabric";

/// Header hit boxes from the last render.
#[derive(Debug, Default)]
pub struct Header {
    tabs: Vec<(Tab, Rect)>,
    logout: Rect,
}

impl Header {
    /// Draws the two header rows at the top of `area`.
    pub fn render(
        &mut self,
        buf: &mut Buffer,
        area: Rect,
        active: Tab,
        status: &str,
        user: Option<&str>,
        theme: &Theme,
    ) {
        self.tabs.clear();
        if area.height < 2 {
            return;
        }

        let bar = Style::new(theme.text, theme.surface);
        buf.fill(Rect::new(area.x, area.y, area.width, 2), bar);
        buf.put_str(area.x + 1, area.y, TITLE, area.width, bar.fg(theme.accent).bold());

        let logout_width = display_width("[ Logout ]") as u16;
        let logout_x = area.right().saturating_sub(logout_width + 1);
        self.logout = draw_button(buf, logout_x, area.y, "Logout", theme.button());

        let mut right = String::new();
        if !status.is_empty() {
            right.push_str(status);
        }
        if let Some(user) = user {
            if !right.is_empty() {
                right.push_str(" · ");
            }
            right.push_str(user);
        }
        let right_width = display_width(&right) as u16;
        let title_end = area.x + 2 + display_width(TITLE) as u16;
        if logout_x > right_width + 1 && logout_x - right_width - 1 > title_end {
            buf.put_str(
                logout_x - right_width - 1,
                area.y,
                &right,
                right_width,
                bar.fg(theme.muted),
            );
        }

        let mut x = area.x + 1;
        let y = area.y + 1;
        for (i, tab) in Tab::ALL.iter().enumerate() {
            let label = format!(" {} {} ", i + 1, tab.label());
            let style = if *tab == active {
                Style::new(theme.text, theme.selection).bold()
            } else {
                bar.fg(theme.muted)
            };
            let width = buf.put_str(x, y, &label, area.right().saturating_sub(x), style);
            self.tabs.push((*tab, Rect::new(x, y, width, 1)));
            x += width + 1;
            if x >= area.right() {
                break;
            }
        }
    }

    pub fn tab_at(&self, x: u16, y: u16) -> Option<Tab> {
        self.tabs
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(tab, _)| *tab)
    }

    pub fn is_logout(&self, x: u16, y: u16) -> bool {
        self.logout.contains(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabs_are_clickable() {
        let mut buf = Buffer::new(100, 2);
        let mut header = Header::default();
        let area = buf.area();
        header.render(&mut buf, area, Tab::Jobs, "Stable", Some("admin"), &Theme::DEFAULT);

        let row = buf.row_text(1);
        let x = row.find("Audit Trail").unwrap() as u16;
        assert_eq!(header.tab_at(x, 1), Some(Tab::Audit));
        assert_eq!(header.tab_at(x, 0), None);

        assert!(buf.row_text(0).starts_with(" KubeJob Fabric"));
        assert!(buf.row_text(0).contains("Stable · admin"));
        assert!(header.is_logout(97, 0));
    }
}
