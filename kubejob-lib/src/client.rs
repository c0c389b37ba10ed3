//! Main ScalerClient

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::Response;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;

use crate::auth::Credential;
use crate::error::ApiError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The client for the scaler HTTP API.
///
/// The credential is part of the client value rather than process-wide
/// state: [`with_credential`](Self::with_credential) and
/// [`without_credential`](Self::without_credential) derive new clients that
/// share the underlying connection pool. Cheap to clone.
///
/// # Example
///
/// ```ignore
/// use kubejob_lib::ScalerClient;
///
/// let client = ScalerClient::builder()
///     .url("http://localhost:8080")
///     .timeout(Duration::from_secs(5))
///     .build()?;
///
/// let (authed, stats) = client.login("admin", "admin").await?;
/// ```
#[derive(Clone)]
pub struct ScalerClient {
    inner: Arc<ScalerClientInner>,
}

struct ScalerClientInner {
    base_url: String,
    http_client: Client,
    timeout: Option<Duration>,
    credential: Option<Credential>,
}

impl ScalerClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ScalerClientBuilder<Missing> {
        ScalerClientBuilder::new()
    }

    /// Returns the base URL of the scaler.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the credential attached to every request, if any.
    pub fn credential(&self) -> Option<&Credential> {
        self.inner.credential.as_ref()
    }

    /// Returns `true` if requests carry an `Authorization` header.
    pub fn is_authenticated(&self) -> bool {
        self.inner.credential.is_some()
    }

    /// Derives a client that authenticates every request with `credential`.
    pub fn with_credential(&self, credential: Credential) -> Self {
        self.derive(Some(credential))
    }

    /// Derives a client that sends no `Authorization` header.
    pub fn without_credential(&self) -> Self {
        self.derive(None)
    }

    fn derive(&self, credential: Option<Credential>) -> Self {
        Self {
            inner: Arc::new(ScalerClientInner {
                base_url: self.inner.base_url.clone(),
                http_client: self.inner.http_client.clone(),
                timeout: self.inner.timeout,
                credential,
            }),
        }
    }

    /// Joins a path (with optional query string) onto the base URL.
    pub fn url(&self, path_and_query: &str) -> String {
        format!(
            "{}/{}",
            self.inner.base_url.trim_end_matches('/'),
            path_and_query.trim_start_matches('/')
        )
    }

    /// Starts a GET request with the session's credential and timeout applied.
    pub fn get(&self, path_and_query: &str) -> RequestBuilder {
        let mut request = self.inner.http_client.get(self.url(path_and_query));

        if let Some(credential) = &self.inner.credential {
            request = request.header(AUTHORIZATION, credential.header_value());
        }

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        request
    }

    /// Builds (without sending) the GET request for a path.
    pub fn build_request(&self, path_and_query: &str) -> Result<reqwest::Request, ApiError> {
        self.get(path_and_query).build().map_err(ApiError::from)
    }

    /// Sends a request and turns non-success statuses into [`ApiError::Http`].
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|err| self.classify(err))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            body
        };
        debug!("scaler answered HTTP {}: {}", status.as_u16(), message);
        Err(ApiError::http(status.as_u16(), message))
    }

    fn classify(&self, err: reqwest::Error) -> ApiError {
        match (err.is_timeout(), self.inner.timeout) {
            (true, Some(timeout)) => ApiError::Timeout(timeout),
            _ => ApiError::Network(err),
        }
    }

    /// GETs a path and decodes the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(self.get(path_and_query)).await?;
        let body = response.text().await.map_err(|err| self.classify(err))?;
        serde_json::from_str(&body).map_err(|err| ApiError::parse_with_body(err.to_string(), body))
    }

    /// GETs a path and returns the body as text.
    pub(crate) async fn get_text(&self, path_and_query: &str) -> Result<String, ApiError> {
        let response = self.send(self.get(path_and_query)).await?;
        response.text().await.map_err(|err| self.classify(err))
    }
}

impl std::fmt::Debug for ScalerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalerClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`ScalerClient`].
///
/// The base URL is required and checked at compile time; it is validated
/// when [`build`](ScalerClientBuilder::build) is called.
pub struct ScalerClientBuilder<Url> {
    url: Url,
    timeout: Option<Duration>,
    credential: Option<Credential>,
    http_client: Option<Client>,
}

impl ScalerClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            timeout: Some(DEFAULT_TIMEOUT),
            credential: None,
            http_client: None,
        }
    }

    /// Sets the scaler base URL, e.g. `http://localhost:8080`.
    pub fn url(self, url: impl Into<String>) -> ScalerClientBuilder<Set<String>> {
        ScalerClientBuilder {
            url: Set(url.into()),
            timeout: self.timeout,
            credential: self.credential,
            http_client: self.http_client,
        }
    }
}

impl Default for ScalerClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ScalerClientBuilder<U> {
    /// Sets the per-request timeout. `None` disables it.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attaches a credential to every request.
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Uses a custom `reqwest::Client`.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ScalerClientBuilder<Set<String>> {
    /// Builds the client.
    pub fn build(self) -> Result<ScalerClient, ApiError> {
        let Set(base_url) = self.url;
        let parsed =
            url::Url::parse(&base_url).map_err(|err| ApiError::InvalidUrl(format!("{}: {}", base_url, err)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(base_url));
        }

        Ok(ScalerClient {
            inner: Arc::new(ScalerClientInner {
                base_url: base_url.trim_end_matches('/').to_string(),
                http_client: self.http_client.unwrap_or_default(),
                timeout: self.timeout,
                credential: self.credential,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ScalerClient {
        ScalerClient::builder()
            .url("http://localhost:8080/")
            .build()
            .unwrap()
    }

    #[test]
    fn test_url_joining() {
        let client = client();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/stats"), "http://localhost:8080/stats");
        assert_eq!(
            client.url("audit?limit=100"),
            "http://localhost:8080/audit?limit=100"
        );
    }

    #[test]
    fn test_rejects_invalid_url() {
        assert!(matches!(
            ScalerClient::builder().url("not a url").build(),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            ScalerClient::builder().url("ftp://example.com").build(),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_unauthenticated_request_has_no_header() {
        let request = client().build_request("/stats").unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_authenticated_request_carries_basic_header() {
        let authed = client().with_credential(Credential::from_login("admin", "secret"));
        let request = authed.build_request("/stats").unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Basic YWRtaW46c2VjcmV0"
        );
    }

    #[test]
    fn test_without_credential_strips_header() {
        let authed = client().with_credential(Credential::from_login("admin", "secret"));
        let anonymous = authed.without_credential();
        assert!(authed.is_authenticated());
        assert!(!anonymous.is_authenticated());
        let request = anonymous.build_request("/stats").unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }
}
