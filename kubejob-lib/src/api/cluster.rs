//! `GET /cluster-info`

use crate::ScalerClient;
use crate::error::ApiError;
use crate::model::ClusterInfo;

impl ScalerClient {
    /// Fetches the node, pod and event snapshot.
    pub async fn cluster_info(&self) -> Result<ClusterInfo, ApiError> {
        self.get_json("/cluster-info").await
    }
}
