//! Job log modal: a [`LogView`] plus the feed that fills it.

use kubejob_lib::poll::Subscription;
use kubejob_ui::Buffer;
use kubejob_ui::Theme;
use kubejob_ui::components::log_view::LogView;
use kubejob_ui::components::log_view::TimeRange;
use kubejob_ui::components::modal::draw_backdrop;

pub struct JobLogs {
    view: LogView,
    feed: Option<Subscription>,
}

impl JobLogs {
    pub fn new(job: impl Into<String>) -> Self {
        Self {
            view: LogView::new(job),
            feed: None,
        }
    }

    pub fn view(&self) -> &LogView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut LogView {
        &mut self.view
    }

    /// Swaps in a new feed, cancelling the previous one.
    pub fn replace_feed(&mut self, feed: Subscription) {
        if let Some(previous) = self.feed.replace(feed) {
            previous.cancel();
        }
    }

    /// Whether a delivery for `job` over `range` belongs to the current feed.
    pub fn accepts(&self, job: &str, range: TimeRange) -> bool {
        self.view.job() == job && self.view.time_range() == range
    }

    pub fn render(&mut self, buf: &mut Buffer, theme: &Theme) {
        let screen = buf.area();
        let frame = screen.centered(
            (screen.width.saturating_mul(9) / 10).max(40),
            (screen.height.saturating_mul(17) / 20).max(10),
        );
        draw_backdrop(buf, frame, theme);
        self.view.render(buf, frame, theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_only_current_job_and_range() {
        let mut logs = JobLogs::new("worker-a");
        assert!(logs.accepts("worker-a", TimeRange::All));
        assert!(!logs.accepts("worker-b", TimeRange::All));

        logs.view_mut().set_time_range(TimeRange::Last15Minutes);
        assert!(!logs.accepts("worker-a", TimeRange::All));
        assert!(logs.accepts("worker-a", TimeRange::Last15Minutes));
    }
}
