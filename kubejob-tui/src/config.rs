//! Dashboard configuration.

use std::time::Duration;

use kubejob_lib::DEFAULT_TIMEOUT;
use kubejob_lib::ScalerClient;
use kubejob_lib::error::ApiError;
use log::info;

use crate::settings::SCALER_URL_KEY;
use crate::settings::SettingsError;
use crate::settings::SettingsProvider;

/// Scaler URL baked in at build time, e.g.
/// `KUBEJOB_SCALER_URL=https://scaler.internal cargo build`.
pub const DEFAULT_SCALER_URL: &str = match option_env!("KUBEJOB_SCALER_URL") {
    Some(url) => url,
    None => "http://localhost:8080",
};

/// Endpoints, timeout and polling cadences.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub scaler_url: String,
    pub timeout: Duration,
    pub stats_interval: Duration,
    pub audit_interval: Duration,
    pub cluster_interval: Duration,
    pub logs_interval: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            scaler_url: DEFAULT_SCALER_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            stats_interval: Duration::from_secs(2),
            audit_interval: Duration::from_secs(5),
            cluster_interval: Duration::from_secs(5),
            logs_interval: Duration::from_secs(2),
        }
    }
}

impl DashboardConfig {
    /// Defaults, with the scaler URL taken from the settings store when set.
    pub async fn load(settings: &SettingsProvider) -> Result<Self, SettingsError> {
        let defaults = Self::default();
        let scaler_url = settings
            .get_or(SCALER_URL_KEY, defaults.scaler_url.clone())
            .await?;
        info!("scaler url: {}", scaler_url);
        Ok(Self {
            scaler_url,
            ..defaults
        })
    }

    /// Builds the unauthenticated client every session derives from.
    pub fn client(&self) -> Result<ScalerClient, ApiError> {
        ScalerClient::builder()
            .url(self.scaler_url.clone())
            .timeout(Some(self.timeout))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults_without_override() {
        let config = DashboardConfig::load(&SettingsProvider::in_memory())
            .await
            .unwrap();

        assert_eq!(config.scaler_url, DEFAULT_SCALER_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.stats_interval, Duration::from_secs(2));
        assert_eq!(config.audit_interval, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_settings_override_url() {
        let settings = SettingsProvider::in_memory();
        settings
            .set(SCALER_URL_KEY, &"http://scaler.local:9000".to_string())
            .await
            .unwrap();

        let config = DashboardConfig::load(&settings).await.unwrap();
        let client = config.client().unwrap();

        assert_eq!(client.base_url(), "http://scaler.local:9000");
        assert!(!client.is_authenticated());
    }
}
