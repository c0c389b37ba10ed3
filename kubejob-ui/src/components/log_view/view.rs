//! The log viewer: chrome around a [`LogPipeline`].

use std::mem;

use log::debug;

use super::pipeline::LogPipeline;
use crate::buffer::Buffer;
use crate::components::Component;
use crate::components::EventResult;
use crate::components::modal::draw_button;
use crate::components::modal::draw_close_button;
use crate::components::modal::draw_frame;
use crate::components::text_input::TextInput;
use crate::components::text_input::TextInputEvent;
use crate::event::Key;
use crate::event::KeyCombo;
use crate::event::ScrollDirection;
use crate::rect::Rect;
use crate::style::Style;
use crate::style::Theme;
use crate::style::Tone;
use crate::text::display_width;
use crate::text::take_width;

pub const EMPTY_LOGS_TEXT: &str = "No logs match your filter or range.";

/// Trailing window requested from the log source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum TimeRange {
    #[default]
    All,
    Last5Minutes,
    Last15Minutes,
    LastHour,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::All,
        TimeRange::Last5Minutes,
        TimeRange::Last15Minutes,
        TimeRange::LastHour,
    ];

    /// Value forwarded as `since_minutes`; `0` means unbounded.
    pub fn minutes(self) -> u32 {
        match self {
            TimeRange::All => 0,
            TimeRange::Last5Minutes => 5,
            TimeRange::Last15Minutes => 15,
            TimeRange::LastHour => 60,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::All => "All Time",
            TimeRange::Last5Minutes => "Last 5 Minutes",
            TimeRange::Last15Minutes => "Last 15 Minutes",
            TimeRange::LastHour => "Last 1 Hour",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// State of the log feed, shown as a badge next to the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedStatus {
    #[default]
    Connecting,
    Live,
    Failed,
}

impl FeedStatus {
    pub fn label(self) -> &'static str {
        match self {
            FeedStatus::Connecting => "Connecting...",
            FeedStatus::Live => "Live",
            FeedStatus::Failed => "Connection Failed",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            FeedStatus::Connecting => Tone::Warning,
            FeedStatus::Live => Tone::Success,
            FeedStatus::Failed => Tone::Danger,
        }
    }
}

/// Something the parent should react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogViewEvent {
    /// The data source must be re-queried with the new range.
    TimeRangeChanged(TimeRange),
    /// The viewer asked to be closed.
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Filter,
    Body,
}

#[derive(Debug, Clone, Default)]
struct Geometry {
    frame: Rect,
    close: Rect,
    range: Rect,
    order: Rect,
    body: Rect,
}

/// Live log viewer for one job.
///
/// Raw text comes from outside (see [`set_logs`](Self::set_logs)); the
/// viewer filters and orders it and, in ascending order, sticks to the end
/// after every recompute.
#[derive(Debug)]
pub struct LogView {
    job: String,
    pipeline: LogPipeline,
    filter: TextInput,
    time_range: TimeRange,
    status: FeedStatus,
    focus: Focus,
    scroll: usize,
    /// Pipeline generation the scroll position last followed.
    followed: u64,
    geometry: Geometry,
    events: Vec<LogViewEvent>,
}

impl LogView {
    pub fn new(job: impl Into<String>) -> Self {
        Self {
            job: job.into(),
            pipeline: LogPipeline::new(),
            filter: TextInput::new().placeholder("Filter logs..."),
            time_range: TimeRange::default(),
            status: FeedStatus::default(),
            focus: Focus::Body,
            scroll: 0,
            followed: 0,
            geometry: Geometry::default(),
            events: Vec::new(),
        }
    }

    pub fn job(&self) -> &str {
        &self.job
    }

    pub fn status(&self) -> FeedStatus {
        self.status
    }

    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    pub fn lines(&self) -> &[String] {
        self.pipeline.lines()
    }

    pub fn is_descending(&self) -> bool {
        self.pipeline.is_descending()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// A successful fetch: replaces the text and marks the feed live.
    pub fn set_logs(&mut self, raw: impl Into<String>) {
        self.pipeline.set_raw(raw);
        self.status = FeedStatus::Live;
    }

    /// A failed fetch: content stays, the badge flips.
    pub fn fetch_failed(&mut self) {
        self.status = FeedStatus::Failed;
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        let filter = filter.into();
        if self.filter.value() != filter {
            self.filter.set_value(filter.clone());
        }
        self.pipeline.set_filter(filter);
    }

    pub fn toggle_order(&mut self) {
        self.pipeline.toggle_order();
    }

    /// Changes the range and queues [`LogViewEvent::TimeRangeChanged`].
    pub fn set_time_range(&mut self, range: TimeRange) {
        if range == self.time_range {
            return;
        }
        debug!("log range for {} -> {}", self.job, range.label());
        self.time_range = range;
        self.events.push(LogViewEvent::TimeRangeChanged(range));
    }

    pub fn cycle_time_range(&mut self) {
        self.set_time_range(self.time_range.next());
    }

    /// Takes the events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<LogViewEvent> {
        mem::take(&mut self.events)
    }

    fn page_size(&self) -> usize {
        (self.geometry.body.height as usize).max(1)
    }

    fn max_scroll(&self) -> usize {
        self.lines().len().saturating_sub(self.page_size())
    }

    fn scroll_by(&mut self, delta: isize) {
        self.scroll = self.scroll.saturating_add_signed(delta).min(self.max_scroll());
    }

    fn sync_filter(&mut self) {
        let changed = self
            .filter
            .drain_events()
            .iter()
            .any(|e| *e == TextInputEvent::Changed);
        if changed {
            self.pipeline.set_filter(self.filter.value().to_string());
        }
    }

    /// Draws the viewer as a framed box filling `area`.
    pub fn render(&mut self, buf: &mut Buffer, area: Rect, theme: &Theme) {
        let title = format!("Logs: {}", self.job);
        let inner = draw_frame(buf, area, &title, theme);
        let close = draw_close_button(buf, area, theme);

        // Status badge after the title.
        let badge_x = area.x + display_width(&title) as u16 + 5;
        let badge = format!("● {}", self.status.label());
        if badge_x < close.x {
            buf.put_str(
                badge_x,
                area.y,
                &badge,
                close.x.saturating_sub(badge_x + 1),
                Style::new(theme.tone(self.status.tone()), theme.surface).bold(),
            );
        }

        let (controls, rest) = inner.split_top(1);
        let (_, body) = rest.split_top(1);

        let order_label = if self.is_descending() {
            "Newest First"
        } else {
            "Oldest First"
        };
        let order_width = display_width(order_label) as u16 + 4;
        let range_label = format!("{} ▾", self.time_range.label());
        let range_width = display_width(&range_label) as u16 + 4;

        let filter_width = controls
            .width
            .saturating_sub(order_width + range_width + 2);
        let filter_area = Rect::new(controls.x, controls.y, filter_width, 1);
        self.filter
            .render(buf, filter_area, theme, self.focus == Focus::Filter);

        let range_x = filter_area.right() + 1;
        let range = draw_button(buf, range_x, controls.y, &range_label, theme.button());
        let order_style = if self.is_descending() {
            Style::new(theme.background, theme.accent).bold()
        } else {
            theme.button()
        };
        let order = draw_button(buf, range.right() + 1, controls.y, order_label, order_style);

        self.geometry = Geometry {
            frame: area,
            close,
            range,
            order,
            body,
        };

        // Stick to the end after a recompute while ascending.
        let generation = self.pipeline.generation();
        if generation != self.followed {
            if !self.is_descending() {
                self.scroll = self.max_scroll();
            }
            self.followed = generation;
        }
        self.scroll = self.scroll.min(self.max_scroll());

        let body_style = Style::new(theme.text, theme.background);
        buf.fill(body, body_style);

        let lines = self.pipeline.lines();
        if lines.is_empty() {
            buf.put_str(
                body.x + 1,
                body.y,
                EMPTY_LOGS_TEXT,
                body.width.saturating_sub(1),
                Style::new(theme.muted, theme.background).italic(),
            );
            return;
        }

        for (row, line) in lines
            .iter()
            .skip(self.scroll)
            .take(body.height as usize)
            .enumerate()
        {
            let shown = take_width(line, body.width as usize);
            buf.put_str(body.x, body.y + row as u16, shown, body.width, body_style);
        }
    }
}

impl Component for LogView {
    fn on_key(&mut self, key: &KeyCombo) -> EventResult {
        if key.key == Key::Escape {
            self.events.push(LogViewEvent::Close);
            return EventResult::Consumed;
        }
        if matches!(key.key, Key::Tab | Key::BackTab) {
            self.focus = match self.focus {
                Focus::Filter => Focus::Body,
                Focus::Body => Focus::Filter,
            };
            return EventResult::Consumed;
        }

        if self.focus == Focus::Filter {
            let result = self.filter.on_key(key);
            self.sync_filter();
            return result;
        }

        if key.modifiers.ctrl || key.modifiers.alt {
            return EventResult::Ignored;
        }
        let page = self.page_size() as isize;
        match key.key {
            Key::Up | Key::Char('k') => self.scroll_by(-1),
            Key::Down | Key::Char('j') => self.scroll_by(1),
            Key::PageUp => self.scroll_by(-page),
            Key::PageDown => self.scroll_by(page),
            Key::Home => self.scroll = 0,
            Key::End => self.scroll = self.max_scroll(),
            Key::Char('t') => self.cycle_time_range(),
            Key::Char('o') => self.toggle_order(),
            Key::Char('/') => self.focus = Focus::Filter,
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }

    fn on_press(&mut self, x: u16, y: u16) -> EventResult {
        let geometry = self.geometry.clone();
        if !geometry.frame.contains(x, y) {
            return EventResult::Ignored;
        }

        if geometry.close.contains(x, y) {
            self.events.push(LogViewEvent::Close);
        } else if self.filter.area().contains(x, y) {
            self.focus = Focus::Filter;
        } else if geometry.range.contains(x, y) {
            self.cycle_time_range();
        } else if geometry.order.contains(x, y) {
            self.toggle_order();
        } else if geometry.body.contains(x, y) {
            self.focus = Focus::Body;
        }
        EventResult::Consumed
    }

    fn on_scroll(&mut self, direction: ScrollDirection, amount: u16) -> EventResult {
        match direction {
            ScrollDirection::Up => self.scroll_by(-(amount as isize)),
            ScrollDirection::Down => self.scroll_by(amount as isize),
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> String {
        (0..n)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_time_range_cycle_and_minutes() {
        let minutes: Vec<u32> = TimeRange::ALL.iter().map(|r| r.minutes()).collect();
        assert_eq!(minutes, vec![0, 5, 15, 60]);
        assert_eq!(TimeRange::LastHour.next(), TimeRange::All);
    }

    #[test]
    fn test_status_transitions() {
        let mut view = LogView::new("job");
        assert_eq!(view.status().label(), "Connecting...");
        view.set_logs("a");
        assert_eq!(view.status().label(), "Live");
        view.fetch_failed();
        assert_eq!(view.status().label(), "Connection Failed");
        assert_eq!(view.lines(), ["a"]);
    }

    #[test]
    fn test_range_change_emits_once() {
        let mut view = LogView::new("job");
        view.set_time_range(TimeRange::Last15Minutes);
        view.set_time_range(TimeRange::Last15Minutes);
        assert_eq!(
            view.drain_events(),
            vec![LogViewEvent::TimeRangeChanged(TimeRange::Last15Minutes)]
        );
    }

    #[test]
    fn test_ascending_sticks_to_end() {
        let mut view = LogView::new("job");
        let mut buf = Buffer::new(60, 14);
        view.set_logs(numbered(50));
        let area = buf.area();
        view.render(&mut buf, area, &Theme::DEFAULT);
        // 14 rows: 2 border, 1 controls, 1 spacer leaves 10 body rows.
        assert_eq!(view.scroll_offset(), 40);

        view.on_key(&KeyCombo::key(Key::Home));
        assert_eq!(view.scroll_offset(), 0);
        view.set_logs(numbered(60));
        let area = buf.area();
        view.render(&mut buf, area, &Theme::DEFAULT);
        assert_eq!(view.scroll_offset(), 50);
    }

    #[test]
    fn test_descending_does_not_follow() {
        let mut view = LogView::new("job");
        let mut buf = Buffer::new(60, 14);
        view.toggle_order();
        view.set_logs(numbered(50));
        let area = buf.area();
        view.render(&mut buf, area, &Theme::DEFAULT);
        assert_eq!(view.scroll_offset(), 0);
        assert_eq!(view.lines()[0], "line 49");
    }

    #[test]
    fn test_filter_typing_updates_lines() {
        let mut view = LogView::new("job");
        view.set_logs("Error one\nok\nerror two");
        view.on_key(&KeyCombo::key(Key::Tab));
        for c in "ERR".chars() {
            view.on_key(&KeyCombo::key(Key::Char(c)));
        }
        assert_eq!(view.lines(), ["Error one", "error two"]);
    }

    #[test]
    fn test_empty_placeholder_rendered() {
        let mut view = LogView::new("job");
        let mut buf = Buffer::new(60, 10);
        let area = buf.area();
        view.render(&mut buf, area, &Theme::DEFAULT);
        assert!(buf.row_text(3).contains(EMPTY_LOGS_TEXT));
    }

    #[test]
    fn test_escape_requests_close() {
        let mut view = LogView::new("job");
        view.on_key(&KeyCombo::key(Key::Escape));
        assert_eq!(view.drain_events(), vec![LogViewEvent::Close]);
    }
}
