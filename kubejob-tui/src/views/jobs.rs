//! Active Jobs tab.

use kubejob_lib::model::Job;
use kubejob_lib::model::JobStatus;
use kubejob_ui::Tone;
use kubejob_ui::components::table::CellContent;
use kubejob_ui::components::table::Column;
use kubejob_ui::components::table::Table;
use kubejob_ui::components::table::TableRow;
use kubejob_ui::components::table::Value;

/// Action id of the per-row "Logs" control.
pub const LOGS_ACTION: &str = "logs";

pub const EMPTY_JOBS_TEXT: &str = "No active jobs";

/// A job as a table row.
#[derive(Debug, Clone)]
pub struct JobRow(pub Job);

impl TableRow for JobRow {
    fn field(&self, key: &str) -> Value {
        let job = &self.0;
        match key {
            "name" => Value::from(&job.name),
            "type" => Value::from(&job.job_type),
            "status" => Value::from(&job.status),
            "start_time" => Value::from(&job.start_time),
            "processed" => Value::from(job.processed),
            _ => Value::Null,
        }
    }
}

pub fn status_tone(status: JobStatus) -> Tone {
    match status {
        JobStatus::Running => Tone::Info,
        JobStatus::Succeeded => Tone::Success,
        JobStatus::Failed => Tone::Danger,
        JobStatus::Terminating => Tone::Warning,
        JobStatus::Other => Tone::Muted,
    }
}

pub fn columns() -> Vec<Column<JobRow>> {
    vec![
        Column::new("name", "Job Name").width(240),
        Column::new("type", "Type").width(140),
        Column::new("status", "Status").width(120).render(|row: &JobRow| {
            CellContent::styled(&row.0.status, status_tone(row.0.status_kind()))
        }),
        Column::new("start_time", "Start Time").width(100),
        Column::new("processed", "Processed").width(100),
        Column::new("actions", "Actions")
            .width(80)
            .unsortable()
            .render(|_: &JobRow| CellContent::action("Logs", LOGS_ACTION)),
    ]
}

/// Jobs grid. Rows are not activatable; the "Logs" action opens the viewer.
pub fn jobs_table() -> Table<JobRow> {
    Table::new(columns()).empty_text(EMPTY_JOBS_TEXT)
}
