//! Typed key-value settings.
//!
//! Holds the persisted session credential and the scaler URL override.

mod backend;
mod memory;
mod sqlite;

pub use backend::SettingsBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Encoded Basic-Auth credential of the signed-in user.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Base URL of the scaler, overriding the build-time default.
pub const SCALER_URL_KEY: &str = "scaler_url";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
}

/// Typed settings provider.
///
/// Wraps a [`SettingsBackend`] with bincode serialization. Cheap to clone.
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsProvider {
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// A provider that forgets everything on exit.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::default())
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        match self.backend.get_bytes(key).await? {
            Some(bytes) => Ok(Some(
                bincode::deserialize(&bytes).map_err(SettingsError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    /// Returns `default` when the key is absent.
    pub async fn get_or<T: DeserializeOwned>(
        &self,
        key: &str,
        default: T,
    ) -> Result<T, SettingsError> {
        Ok(self.get(key).await?.unwrap_or(default))
    }

    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let bytes = bincode::serialize(value).map_err(SettingsError::Serialization)?;
        self.backend.set_bytes(key, bytes).await
    }

    /// Deletes a key. Deleting a missing key is not an error.
    pub async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        self.backend.delete(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_typed_round_trip() {
        let settings = SettingsProvider::in_memory();

        settings
            .set(SCALER_URL_KEY, &"http://scaler:9000".to_string())
            .await
            .unwrap();

        let url: Option<String> = settings.get(SCALER_URL_KEY).await.unwrap();
        assert_eq!(url.as_deref(), Some("http://scaler:9000"));
    }

    #[tokio::test]
    async fn test_get_or_and_delete() {
        let settings = SettingsProvider::in_memory();
        settings.set(AUTH_TOKEN_KEY, &"abc".to_string()).await.unwrap();

        settings.delete(AUTH_TOKEN_KEY).await.unwrap();
        settings.delete(AUTH_TOKEN_KEY).await.unwrap();

        let token = settings
            .get_or(AUTH_TOKEN_KEY, "none".to_string())
            .await
            .unwrap();
        assert_eq!(token, "none");
    }

    #[tokio::test]
    async fn test_wrong_type_is_deserialization_error() {
        let settings = SettingsProvider::in_memory();
        settings.set("flag", &true).await.unwrap();

        let result: Result<Option<String>, _> = settings.get("flag").await;
        assert!(matches!(result, Err(SettingsError::Deserialization(_))));
    }
}
