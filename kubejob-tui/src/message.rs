//! Results delivered from background tasks to the event loop.

use kubejob_lib::ScalerClient;
use kubejob_lib::error::ApiError;
use kubejob_lib::error::LoginError;
use kubejob_lib::model::AuditRecord;
use kubejob_lib::model::ClusterInfo;
use kubejob_lib::model::Stats;
use kubejob_ui::components::log_view::TimeRange;

/// A fetch completion.
///
/// Every message carries the session epoch it was started under; the app
/// drops messages from an earlier epoch (a previous login, or a session
/// that has since been logged out).
#[derive(Debug)]
pub enum Message {
    Stats {
        epoch: u64,
        result: Result<Stats, ApiError>,
    },
    Audit {
        epoch: u64,
        result: Result<Vec<AuditRecord>, ApiError>,
    },
    Cluster {
        epoch: u64,
        result: Result<ClusterInfo, ApiError>,
    },
    JobLogs {
        epoch: u64,
        job: String,
        range: TimeRange,
        result: Result<String, ApiError>,
    },
    AuditLog {
        epoch: u64,
        record_id: i64,
        result: Result<String, ApiError>,
    },
    Login {
        epoch: u64,
        result: Result<(ScalerClient, Stats), LoginError>,
    },
}

impl Message {
    pub fn epoch(&self) -> u64 {
        match self {
            Message::Stats { epoch, .. }
            | Message::Audit { epoch, .. }
            | Message::Cluster { epoch, .. }
            | Message::JobLogs { epoch, .. }
            | Message::AuditLog { epoch, .. }
            | Message::Login { epoch, .. } => *epoch,
        }
    }

    /// The error of an authenticated fetch, if this message carries one.
    pub fn fetch_error(&self) -> Option<&ApiError> {
        match self {
            Message::Stats { result: Err(e), .. }
            | Message::Audit { result: Err(e), .. }
            | Message::Cluster { result: Err(e), .. }
            | Message::JobLogs { result: Err(e), .. }
            | Message::AuditLog { result: Err(e), .. } => Some(e),
            _ => None,
        }
    }

    /// Short name for logs.
    pub fn source(&self) -> &'static str {
        match self {
            Message::Stats { .. } => "stats",
            Message::Audit { .. } => "audit",
            Message::Cluster { .. } => "cluster",
            Message::JobLogs { .. } => "job-logs",
            Message::AuditLog { .. } => "audit-log",
            Message::Login { .. } => "login",
        }
    }
}
