//! Login error types

use super::ApiError;

/// Errors that can occur while signing in.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Username or password left empty.
    #[error("Please enter both username and password")]
    MissingFields,

    /// The scaler answered but refused the credential.
    #[error("Invalid credentials / API unavailable")]
    Rejected(#[source] ApiError),

    /// The scaler could not be reached or answered with garbage.
    #[error("Invalid credentials / API unavailable")]
    Unavailable(#[source] ApiError),
}

impl From<ApiError> for LoginError {
    fn from(err: ApiError) -> Self {
        if err.status_code().is_some_and(|s| s == 401 || s == 403) {
            Self::Rejected(err)
        } else {
            Self::Unavailable(err)
        }
    }
}
