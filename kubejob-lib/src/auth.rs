//! Basic-Auth credential

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde::Serialize;

/// A Basic-Auth credential: `base64(username:password)`.
///
/// The encoded form is what gets persisted between runs and what goes on the
/// wire as `Authorization: Basic <credential>`. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential(String);

impl Credential {
    /// Encodes a username/password pair.
    pub fn from_login(username: &str, password: &str) -> Self {
        Self(STANDARD.encode(format!("{}:{}", username, password)))
    }

    /// Wraps an already encoded credential (e.g. one restored from storage).
    pub fn from_token(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The encoded credential.
    pub fn token(&self) -> &str {
        &self.0
    }

    /// The `Authorization` header value.
    pub fn header_value(&self) -> String {
        format!("Basic {}", self.0)
    }

    /// Decodes the username, if the token is well formed.
    pub fn username(&self) -> Option<String> {
        let bytes = STANDARD.decode(&self.0).ok()?;
        let decoded = String::from_utf8(bytes).ok()?;
        decoded.split_once(':').map(|(user, _)| user.to_string())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_username_and_password() {
        let credential = Credential::from_login("admin", "secret");
        assert_eq!(credential.token(), "YWRtaW46c2VjcmV0");
        assert_eq!(credential.header_value(), "Basic YWRtaW46c2VjcmV0");
    }

    #[test]
    fn test_username_round_trip() {
        let credential = Credential::from_token("YWRtaW46c2VjcmV0");
        assert_eq!(credential.username().as_deref(), Some("admin"));
        assert_eq!(Credential::from_token("%%%").username(), None);
    }

    #[test]
    fn test_debug_is_redacted() {
        let credential = Credential::from_login("admin", "secret");
        let printed = format!("{:?}", credential);
        assert!(!printed.contains("YWRtaW46"));
    }
}
