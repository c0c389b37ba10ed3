//! Settings backend trait.

use async_trait::async_trait;

use super::SettingsError;

/// Raw byte storage behind a [`SettingsProvider`](super::SettingsProvider).
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError>;

    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError>;

    async fn delete(&self, key: &str) -> Result<(), SettingsError>;
}
