//! Audit Trail tab.

use kubejob_lib::model::AuditRecord;
use kubejob_lib::model::format_timestamp;
use kubejob_ui::Buffer;
use kubejob_ui::Rect;
use kubejob_ui::Theme;
use kubejob_ui::Tone;
use kubejob_ui::components::table::CellContent;
use kubejob_ui::components::table::Column;
use kubejob_ui::components::table::Table;
use kubejob_ui::components::table::TableRow;
use kubejob_ui::components::table::Value;

use super::draw_centered;

pub const LOADING_AUDIT_TEXT: &str = "Loading audit trail...";

/// An audit record as a table row.
#[derive(Debug, Clone)]
pub struct AuditRow(pub AuditRecord);

impl TableRow for AuditRow {
    fn field(&self, key: &str) -> Value {
        let record = &self.0;
        match key {
            "message_id" => Value::from(&record.message_id),
            "job_type" => Value::from(&record.job_type),
            "worker_pod" => Value::from(&record.worker_pod),
            "queued_at" => Value::from(record.queued_at.as_deref()),
            "processed_at" => Value::from(record.processed_at.as_deref()),
            "duration_ms" => Value::from(record.duration_ms),
            "status" => Value::from(&record.status),
            _ => Value::Null,
        }
    }
}

pub fn columns() -> Vec<Column<AuditRow>> {
    vec![
        Column::new("message_id", "Message ID")
            .width(120)
            .render(|row: &AuditRow| CellContent::text(row.0.short_message_id())),
        Column::new("job_type", "Job Type").width(140),
        Column::new("worker_pod", "Worker Pod").width(200),
        Column::new("queued_at", "Queued At")
            .width(110)
            .render(|row: &AuditRow| CellContent::text(format_timestamp(row.0.queued_at.as_deref()))),
        Column::new("processed_at", "Processed At").width(110).render(|row: &AuditRow| {
            CellContent::text(format_timestamp(row.0.processed_at.as_deref()))
        }),
        Column::new("duration_ms", "Duration")
            .width(90)
            .render(|row: &AuditRow| CellContent::text(format!("{}ms", row.0.duration_ms))),
        Column::new("status", "Status")
            .width(80)
            .unsortable()
            .render(|_: &AuditRow| CellContent::styled("Done", Tone::Success)),
    ]
}

/// Audit grid plus its first-load state.
pub struct AuditView {
    table: Table<AuditRow>,
    loaded: bool,
}

impl Default for AuditView {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditView {
    pub fn new() -> Self {
        Self {
            table: Table::new(columns()).show_row_number(true).on_row_click(),
            loaded: false,
        }
    }

    pub fn table(&self) -> &Table<AuditRow> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut Table<AuditRow> {
        &mut self.table
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn set_records(&mut self, records: Vec<AuditRecord>) {
        self.loaded = true;
        self.table.set_rows(records.into_iter().map(AuditRow).collect());
    }

    /// Ends the loading state after a failed fetch; rows already shown stay.
    pub fn fetch_failed(&mut self) {
        self.loaded = true;
    }

    /// Record at a source index reported by a table event.
    pub fn record(&self, index: usize) -> Option<&AuditRecord> {
        self.table.rows().get(index).map(|row| &row.0)
    }

    pub fn render(&mut self, buf: &mut Buffer, area: Rect, theme: &Theme) {
        if !self.is_loaded() && self.table.rows().is_empty() {
            draw_centered(buf, area, LOADING_AUDIT_TEXT, theme.muted());
            return;
        }
        self.table.render(buf, area, theme);
    }
}

#[cfg(test)]
mod tests {
    use kubejob_ui::components::Component;
    use kubejob_ui::components::table::TableEvent;

    use super::*;

    fn record(id: i64, duration_ms: i64) -> AuditRecord {
        AuditRecord {
            id,
            message_id: format!("{:08}-abcdef", id),
            job_type: "generic".into(),
            worker_pod: "worker-a".into(),
            duration_ms,
            status: "COMPLETED".into(),
            ..Default::default()
        }
    }

    fn screen(buf: &Buffer) -> String {
        (0..buf.height())
            .map(|y| buf.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_loading_until_first_records() {
        let mut view = AuditView::new();
        let mut buf = Buffer::new(140, 8);
        let area = buf.area();
        view.render(&mut buf, area, &Theme::DEFAULT);
        assert!(screen(&buf).contains(LOADING_AUDIT_TEXT));

        view.set_records(Vec::new());
        let mut buf = Buffer::new(140, 8);
        let area = buf.area();
        view.render(&mut buf, area, &Theme::DEFAULT);
        assert!(!screen(&buf).contains(LOADING_AUDIT_TEXT));
        assert!(screen(&buf).contains("No data available"));
    }

    #[test]
    fn test_failed_first_fetch_shows_empty_table() {
        let mut view = AuditView::new();
        view.fetch_failed();
        let mut buf = Buffer::new(140, 8);
        let area = buf.area();
        view.render(&mut buf, area, &Theme::DEFAULT);

        assert!(view.is_loaded());
        assert!(!screen(&buf).contains(LOADING_AUDIT_TEXT));
        assert!(screen(&buf).contains("No data available"));
    }

    #[test]
    fn test_failed_fetch_keeps_records() {
        let mut view = AuditView::new();
        view.set_records(vec![record(7, 1250)]);
        view.fetch_failed();
        assert_eq!(view.record(0).map(|r| r.id), Some(7));
    }

    #[test]
    fn test_cells_are_formatted() {
        let mut view = AuditView::new();
        view.set_records(vec![record(7, 1250)]);
        let mut buf = Buffer::new(140, 8);
        let area = buf.area();
        view.render(&mut buf, area, &Theme::DEFAULT);

        let text = screen(&buf);
        assert!(text.contains("Sl. No"));
        assert!(text.contains("00000007..."));
        assert!(text.contains("1250ms"));
        assert!(text.contains("Done"));
    }

    #[test]
    fn test_sort_by_duration_and_activate() {
        let mut view = AuditView::new();
        view.set_records(vec![record(1, 300), record(2, 5), record(3, 40)]);
        view.table_mut().toggle_sort("duration_ms");

        let mut buf = Buffer::new(140, 8);
        let area = buf.area();
        view.render(&mut buf, area, &Theme::DEFAULT);
        view.table_mut().on_press(20, 2);

        let events = view.table_mut().drain_events();
        assert_eq!(events, vec![TableEvent::RowActivated { index: 1 }]);
        assert_eq!(view.record(1).map(|r| r.id), Some(2));
    }
}
