//! Modal showing one audit record and its historical log file.

use kubejob_lib::model::AuditRecord;
use kubejob_lib::model::format_timestamp;
use kubejob_lib::poll::Subscription;
use kubejob_ui::Buffer;
use kubejob_ui::Rect;
use kubejob_ui::Theme;
use kubejob_ui::components::Component;
use kubejob_ui::components::EventResult;
use kubejob_ui::components::modal::draw_backdrop;
use kubejob_ui::components::modal::draw_close_button;
use kubejob_ui::components::modal::draw_frame;
use kubejob_ui::event::Key;
use kubejob_ui::event::KeyCombo;
use kubejob_ui::event::ScrollDirection;

use super::wrap_lines;

pub const NO_LOG_FILE_TEXT: &str = "No log file associated with this record.";
pub const LOADING_LOG_TEXT: &str = "Loading log file...";

/// State of the historical log behind an audit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoricalLog {
    /// The record names no log file.
    Missing,
    Loading,
    Loaded(String),
    Failed { path: String, message: String },
}

impl HistoricalLog {
    pub fn text(&self) -> String {
        match self {
            HistoricalLog::Missing => NO_LOG_FILE_TEXT.to_string(),
            HistoricalLog::Loading => LOADING_LOG_TEXT.to_string(),
            HistoricalLog::Loaded(text) => text.clone(),
            HistoricalLog::Failed { path, message } => {
                format!("Failed to retrieve log file: {}\nError: {}", path, message)
            }
        }
    }
}

#[derive(Debug, Default)]
struct Geometry {
    frame: Rect,
    close: Rect,
    body: Rect,
}

pub struct AuditDetail {
    record: AuditRecord,
    log: HistoricalLog,
    scroll: usize,
    line_count: usize,
    closed: bool,
    geometry: Geometry,
    /// In-flight log fetch; dropped (and cancelled) with the modal.
    fetch: Option<Subscription>,
}

impl AuditDetail {
    pub fn new(record: AuditRecord) -> Self {
        let log = if record.log_file().is_some() {
            HistoricalLog::Loading
        } else {
            HistoricalLog::Missing
        };
        Self {
            record,
            log,
            scroll: 0,
            line_count: 0,
            closed: false,
            geometry: Geometry::default(),
            fetch: None,
        }
    }

    pub fn record(&self) -> &AuditRecord {
        &self.record
    }

    pub fn log(&self) -> &HistoricalLog {
        &self.log
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn attach_fetch(&mut self, fetch: Subscription) {
        self.fetch = Some(fetch);
    }

    /// Applies the result of the log fetch.
    pub fn set_log(&mut self, result: Result<String, String>) {
        self.fetch = None;
        let path = self.record.log_file().unwrap_or_default().to_string();
        self.log = match result {
            Ok(text) => HistoricalLog::Loaded(text),
            Err(message) => HistoricalLog::Failed { path, message },
        };
        self.scroll = 0;
    }

    fn scroll_by(&mut self, delta: isize) {
        let max = self
            .line_count
            .saturating_sub(self.geometry.body.height as usize);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    pub fn render(&mut self, buf: &mut Buffer, theme: &Theme) {
        let screen = buf.area();
        let width = (screen.width.saturating_mul(9) / 10).max(40);
        let height = (screen.height.saturating_mul(9) / 10).max(12);
        let frame = screen.centered(width, height);
        draw_backdrop(buf, frame, theme);

        let title = format!("Audit Record #{}", self.record.id);
        let inner = draw_frame(buf, frame, &title, theme);
        self.geometry.frame = frame;
        self.geometry.close = draw_close_button(buf, frame, theme);

        let record = &self.record;
        let fields = [
            ("Message ID", record.message_id.clone()),
            ("Job Type", record.job_type.clone()),
            ("Worker Pod", record.worker_pod.clone()),
            ("Queued At", format_timestamp(record.queued_at.as_deref())),
            ("Processed At", format_timestamp(record.processed_at.as_deref())),
            ("Duration", format!("{}ms", record.duration_ms)),
            ("Log File", record.log_file().unwrap_or("-").to_string()),
        ];

        let surface = theme.surface();
        let text_width = inner.width.saturating_sub(2);
        for (i, (label, value)) in fields.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.bottom() {
                return;
            }
            buf.put_str(inner.x + 1, y, label, 14, surface.fg(theme.muted));
            buf.put_str(inner.x + 16, y, value, text_width.saturating_sub(15), surface);
        }

        let top = fields.len() as u16 + 1;
        let (_, body) = inner.split_top(top);
        if body.height < 2 {
            return;
        }
        for x in body.x..body.right() {
            buf.put_str(x, body.y, "─", 1, surface.fg(theme.border));
        }
        let body = body.shrink(1, 1, 0, 1);
        self.geometry.body = body;

        let style = match self.log {
            HistoricalLog::Loaded(_) => surface,
            HistoricalLog::Failed { .. } => surface.fg(theme.danger),
            _ => surface.fg(theme.muted).italic(),
        };
        let lines = wrap_lines(&self.log.text(), body.width as usize);
        self.line_count = lines.len();
        self.scroll_by(0);
        for (i, line) in lines.iter().skip(self.scroll).take(body.height as usize).enumerate() {
            buf.put_str(body.x, body.y + i as u16, line, body.width, style);
        }
    }
}

impl Component for AuditDetail {
    fn on_key(&mut self, key: &KeyCombo) -> EventResult {
        let page = (self.geometry.body.height as isize).max(1);
        match key.key {
            Key::Escape | Key::Char('q') => self.closed = true,
            Key::Up | Key::Char('k') => self.scroll_by(-1),
            Key::Down | Key::Char('j') => self.scroll_by(1),
            Key::PageUp => self.scroll_by(-page),
            Key::PageDown => self.scroll_by(page),
            Key::Home => self.scroll = 0,
            Key::End => self.scroll_by(isize::MAX),
            _ => {}
        }
        EventResult::Consumed
    }

    fn on_press(&mut self, x: u16, y: u16) -> EventResult {
        if self.geometry.close.contains(x, y) || !self.geometry.frame.contains(x, y) {
            self.closed = true;
        }
        EventResult::Consumed
    }

    fn on_scroll(&mut self, direction: ScrollDirection, amount: u16) -> EventResult {
        match direction {
            ScrollDirection::Up => self.scroll_by(-(amount as isize)),
            ScrollDirection::Down => self.scroll_by(amount as isize),
            _ => {}
        }
        EventResult::Consumed
    }
}
