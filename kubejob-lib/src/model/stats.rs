//! `/stats` payload: aggregate metrics and the current job list.

use serde::Deserialize;
use serde::Serialize;

/// Capacity shown when the scaler does not report `max_jobs`.
pub const DEFAULT_MAX_JOBS: u64 = 50;

/// Response from `GET /stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub metrics: Metrics,
    pub jobs: Vec<Job>,
}

/// Aggregate scaler metrics.
///
/// Every field tolerates absence; the scaler fills some of them only after
/// its first control-loop pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    /// Ready messages across all queues.
    pub queue_depth: u64,
    /// Delivered but unacknowledged messages.
    pub unacked: u64,
    pub active_jobs: u64,
    pub max_jobs: u64,
    pub total_consumed: u64,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    /// Mean processing time over the last ten minutes, in milliseconds.
    pub avg_latency: f64,
    /// Messages processed in the last minute.
    pub throughput: u64,
    pub status_msg: String,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            queue_depth: 0,
            unacked: 0,
            active_jobs: 0,
            max_jobs: DEFAULT_MAX_JOBS,
            total_consumed: 0,
            cpu_percent: 0.0,
            memory_percent: 0.0,
            avg_latency: 0.0,
            throughput: 0,
            status_msg: String::new(),
        }
    }
}

impl Metrics {
    /// Queue pressure bucket for the current depth.
    pub fn queue_pressure(&self) -> QueuePressure {
        QueuePressure::from_depth(self.queue_depth)
    }
}

/// Coarse queue pressure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueuePressure {
    Normal,
    High,
    Critical,
}

impl QueuePressure {
    pub fn from_depth(depth: u64) -> Self {
        if depth > 10_000 {
            Self::Critical
        } else if depth > 5_000 {
            Self::High
        } else {
            Self::Normal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

/// A worker job as reported by the scaler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    pub name: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub status: String,
    /// Wall-clock start (`HH:MM:SS`) or `-`.
    pub start_time: String,
    pub processed: u64,
}

impl Default for Job {
    fn default() -> Self {
        Self {
            name: String::new(),
            job_type: "generic".to_string(),
            status: String::new(),
            start_time: "-".to_string(),
            processed: 0,
        }
    }
}

impl Job {
    pub fn status_kind(&self) -> JobStatus {
        JobStatus::parse(&self.status)
    }
}

/// Known job states, used for badge colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Running,
    Succeeded,
    Failed,
    Terminating,
    Other,
}

impl JobStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "Running" => Self::Running,
            "Succeeded" => Self::Succeeded,
            "Failed" => Self::Failed,
            "Terminating" => Self::Terminating,
            _ => Self::Other,
        }
    }
}
