//! `/audit` records.

use chrono::DateTime;
use chrono::Local;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;

/// One processed message from the audit trail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditRecord {
    pub id: i64,
    pub message_id: String,
    pub job_type: String,
    pub worker_pod: String,
    pub queued_at: Option<String>,
    pub picked_at: Option<String>,
    pub processed_at: Option<String>,
    pub duration_ms: i64,
    pub status: String,
    pub log_file: Option<String>,
}

impl AuditRecord {
    /// Path of the historical log file, if the worker recorded one.
    pub fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref().filter(|path| !path.is_empty())
    }

    /// First eight characters of the message id followed by `...`.
    pub fn short_message_id(&self) -> String {
        let prefix: String = self.message_id.chars().take(8).collect();
        format!("{}...", prefix)
    }
}

/// Formats a backend timestamp as `HH:MM:SS.mmm`.
///
/// Missing values render as `-`; values that do not parse are returned as is.
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return "-".to_string();
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format("%H:%M:%S%.3f").to_string();
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, pattern) {
            return parsed.format("%H:%M:%S%.3f").to_string();
        }
    }

    raw.to_string()
}
