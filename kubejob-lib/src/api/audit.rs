//! `GET /audit` and `GET /audit/log`

use crate::ScalerClient;
use crate::error::ApiError;
use crate::model::AuditRecord;

/// Number of audit records the dashboard asks for.
pub const DEFAULT_AUDIT_LIMIT: u32 = 100;

impl ScalerClient {
    /// Fetches the most recent audit records, newest first.
    pub async fn audit(&self, limit: u32) -> Result<Vec<AuditRecord>, ApiError> {
        self.get_json(&audit_path(limit)).await
    }

    /// Fetches the raw historical log written for one audit record.
    pub async fn audit_log(&self, file_path: &str) -> Result<String, ApiError> {
        self.get_text(&audit_log_path(file_path)).await
    }
}

pub(crate) fn audit_path(limit: u32) -> String {
    format!("/audit?limit={}", limit)
}

pub(crate) fn audit_log_path(file_path: &str) -> String {
    format!("/audit/log?file_path={}", urlencoding::encode(file_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_path() {
        assert_eq!(audit_path(DEFAULT_AUDIT_LIMIT), "/audit?limit=100");
    }

    #[test]
    fn test_audit_log_path_is_encoded() {
        assert_eq!(
            audit_log_path("/logs/spend analysis/msg 1.log"),
            "/audit/log?file_path=%2Flogs%2Fspend%20analysis%2Fmsg%201.log"
        );
    }
}
