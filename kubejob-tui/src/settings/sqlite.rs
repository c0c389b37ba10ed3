//! The dashboard's on-disk settings store.
//!
//! One `settings` table in `<data dir>/settings.db` maps a key such as
//! `auth_token` or `scaler_url` to its bincode-encoded value. Reads are
//! served from an in-process cache after the first hit; writes go to SQLite
//! before the cache, so a failed write never shows up as a stored value.

use std::path::Path;

use async_sqlite::Client;
use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;

use super::SettingsBackend;
use super::SettingsError;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value BLOB NOT NULL
)";

const SELECT_VALUE: &str = "SELECT value FROM settings WHERE key = ?";

const UPSERT_VALUE: &str = "INSERT INTO settings (key, value) VALUES (?, ?)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value";

const DELETE_VALUE: &str = "DELETE FROM settings WHERE key = ?";

/// Persists the session credential and the scaler URL override across
/// restarts.
pub struct SqliteBackend {
    client: Client,
    /// Values already read or written by this process.
    cache: DashMap<String, Vec<u8>>,
}

impl SqliteBackend {
    /// Opens the store at `path`, creating the file and table on first run.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let client = async_sqlite::ClientBuilder::new()
            .path(path)
            .open()
            .await?;

        client.conn(|conn| conn.execute(CREATE_TABLE, [])).await?;

        debug!("settings store opened at {}", path.display());
        Ok(Self {
            client,
            cache: DashMap::new(),
        })
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        if let Some(value) = self.cache.get(key) {
            return Ok(Some(value.clone()));
        }

        let lookup = key.to_string();
        let stored = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare(SELECT_VALUE)?;
                let mut rows = stmt.query([&lookup])?;
                match rows.next()? {
                    Some(row) => Ok(Some(row.get::<_, Vec<u8>>(0)?)),
                    None => Ok(None),
                }
            })
            .await?;

        if let Some(value) = &stored {
            self.cache.insert(key.to_string(), value.clone());
        }
        Ok(stored)
    }

    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        let row = (key.to_string(), value.clone());
        self.client
            .conn(move |conn| conn.execute(UPSERT_VALUE, rusqlite::params![&row.0, &row.1]))
            .await?;

        debug!("setting {} stored ({} bytes)", key, value.len());
        self.cache.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        let lookup = key.to_string();
        self.client
            .conn(move |conn| conn.execute(DELETE_VALUE, [&lookup]))
            .await?;

        debug!("setting {} cleared", key);
        self.cache.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::settings::AUTH_TOKEN_KEY;
    use crate::settings::SCALER_URL_KEY;
    use crate::settings::SettingsProvider;

    fn scratch_db(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "kubejob-settings-{}-{}.db",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        path
    }

    async fn open(path: &Path) -> SettingsProvider {
        SettingsProvider::new(SqliteBackend::open(path).await.unwrap())
    }

    #[tokio::test]
    async fn test_credential_survives_reopen() {
        let path = scratch_db("reopen");

        {
            let settings = open(&path).await;
            settings
                .set(AUTH_TOKEN_KEY, &"YWRtaW46YWRtaW4=".to_string())
                .await
                .unwrap();
        }

        let settings = open(&path).await;
        let token: Option<String> = settings.get(AUTH_TOKEN_KEY).await.unwrap();
        assert_eq!(token.as_deref(), Some("YWRtaW46YWRtaW4="));

        settings.delete(AUTH_TOKEN_KEY).await.unwrap();
        let token: Option<String> = settings.get(AUTH_TOKEN_KEY).await.unwrap();
        assert_eq!(token, None);

        drop(settings);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_overwrite_replaces_stored_url() {
        let path = scratch_db("overwrite");

        {
            let settings = open(&path).await;
            settings
                .set(SCALER_URL_KEY, &"http://old:8080".to_string())
                .await
                .unwrap();
            settings
                .set(SCALER_URL_KEY, &"http://new:8080".to_string())
                .await
                .unwrap();
        }

        let settings = open(&path).await;
        let url: Option<String> = settings.get(SCALER_URL_KEY).await.unwrap();
        assert_eq!(url.as_deref(), Some("http://new:8080"));

        drop(settings);
        let _ = std::fs::remove_file(&path);
    }
}
