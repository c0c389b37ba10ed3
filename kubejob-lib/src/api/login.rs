//! Credential probe against `/stats`.

use log::info;
use log::warn;

use crate::ScalerClient;
use crate::auth::Credential;
use crate::error::LoginError;
use crate::model::Stats;

impl ScalerClient {
    /// Signs in with a username and password.
    ///
    /// The credential is verified by fetching `/stats` with it. On success
    /// returns a client bound to the credential together with the first
    /// stats snapshot; `self` is left untouched either way.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(ScalerClient, Stats), LoginError> {
        if username.is_empty() || password.is_empty() {
            return Err(LoginError::MissingFields);
        }

        let authed = self.with_credential(Credential::from_login(username, password));
        match authed.stats().await {
            Ok(stats) => {
                info!("signed in to {} as {}", self.base_url(), username);
                Ok((authed, stats))
            }
            Err(err) => {
                warn!("login probe against {} failed: {}", self.base_url(), err);
                Err(LoginError::from(err))
            }
        }
    }
}
