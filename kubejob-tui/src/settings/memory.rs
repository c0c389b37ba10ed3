//! Volatile settings backend.

use async_trait::async_trait;
use dashmap::DashMap;

use super::SettingsBackend;
use super::SettingsError;

/// Keeps settings in process memory only.
///
/// Used when no data directory is available, and in tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: DashMap<String, Vec<u8>>,
}

#[async_trait]
impl SettingsBackend for MemoryBackend {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        Ok(self.values.get(key).map(|value| value.clone()))
    }

    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        self.values.remove(key);
        Ok(())
    }
}
