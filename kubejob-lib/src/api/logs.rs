//! `GET /logs/{job}`

use crate::ScalerClient;
use crate::error::ApiError;

impl ScalerClient {
    /// Fetches the raw log text of a running job.
    ///
    /// `since_minutes` limits the window to the trailing minutes; `0` means
    /// the whole log.
    pub async fn job_logs(&self, job_name: &str, since_minutes: u32) -> Result<String, ApiError> {
        self.get_text(&job_logs_path(job_name, since_minutes)).await
    }
}

pub(crate) fn job_logs_path(job_name: &str, since_minutes: u32) -> String {
    format!(
        "/logs/{}?since_minutes={}",
        urlencoding::encode(job_name),
        since_minutes
    )
}
