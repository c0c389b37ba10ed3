//! `GET /stats`

use crate::ScalerClient;
use crate::error::ApiError;
use crate::model::Stats;

impl ScalerClient {
    /// Fetches global metrics and the current job list.
    pub async fn stats(&self) -> Result<Stats, ApiError> {
        self.get_json("/stats").await
    }
}
