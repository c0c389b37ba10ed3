//! Credential persistence.
//!
//! The encoded credential is the only state that survives a restart. A
//! stored credential is trusted as is; the first 401 from any poller ends
//! the session.

use kubejob_lib::ScalerClient;
use kubejob_lib::auth::Credential;
use log::info;

use crate::settings::AUTH_TOKEN_KEY;
use crate::settings::SettingsError;
use crate::settings::SettingsProvider;

#[derive(Clone)]
pub struct SessionStore {
    settings: SettingsProvider,
    anonymous: ScalerClient,
}

impl SessionStore {
    pub fn new(settings: SettingsProvider, client: ScalerClient) -> Self {
        Self {
            settings,
            anonymous: client.without_credential(),
        }
    }

    /// Client without a credential, used for the login probe.
    pub fn anonymous(&self) -> &ScalerClient {
        &self.anonymous
    }

    /// Rebuilds an authenticated client from the stored credential.
    pub async fn restore(&self) -> Result<Option<ScalerClient>, SettingsError> {
        let token: Option<String> = self.settings.get(AUTH_TOKEN_KEY).await?;
        Ok(token.filter(|token| !token.is_empty()).map(|token| {
            info!("restoring stored session");
            self.anonymous.with_credential(Credential::from_token(token))
        }))
    }

    /// Persists the credential of a freshly signed-in client.
    pub async fn save(&self, client: &ScalerClient) -> Result<(), SettingsError> {
        match client.credential() {
            Some(credential) => {
                self.settings
                    .set(AUTH_TOKEN_KEY, &credential.token().to_string())
                    .await
            }
            None => self.clear().await,
        }
    }

    pub async fn clear(&self) -> Result<(), SettingsError> {
        self.settings.delete(AUTH_TOKEN_KEY).await
    }
}
