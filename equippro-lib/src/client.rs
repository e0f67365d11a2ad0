//! Main EquipProClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::TokenProvider;
use crate::error::ApiError;
use crate::error::Error;

/// The client for the EquipPro REST API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely. Every request carries `Authorization: Bearer` with
/// the token from the configured [`TokenProvider`].
///
/// # Example
///
/// ```ignore
/// use equippro_lib::{EquipProClient, auth::StaticTokenProvider};
///
/// let client = EquipProClient::builder()
///     .url("http://localhost:8080")
///     .token_provider(StaticTokenProvider::new("my-token"))
///     .build()?;
///
/// let technicians = client.technicians().await?;
/// ```
#[derive(Clone)]
pub struct EquipProClient {
    inner: Arc<EquipProClientInner>,
}

struct EquipProClientInner {
    base_url: Url,
    token_provider: Arc<dyn TokenProvider>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for EquipProClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EquipProClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl EquipProClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> EquipProClientBuilder<Missing, Missing> {
        EquipProClientBuilder::new()
    }

    /// Returns the base URL of the API.
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    fn build_url(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.inner.base_url.as_str().trim_end_matches('/'),
            path
        )
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers
    }

    /// Makes an authenticated HTTP request.
    ///
    /// Non-2xx responses are returned as [`ApiError::Http`]; there is no
    /// retry.
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<reqwest::Response, Error> {
        let url = self.build_url(path);
        let token = self.inner.token_provider.get_token().await?;

        let mut headers = self.default_headers();
        if body.is_some() {
            headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        }

        log::debug!("{} {}", method, url);

        let mut request = self
            .inner
            .http_client
            .request(method.clone(), &url)
            .headers(headers)
            .bearer_auth(&token.access_token);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            log::warn!("{} {} failed with {}", method, url, status);
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            Err(Error::Api(ApiError::http(status.as_u16(), message)))
        }
    }

    /// GETs `path` and deserializes the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let response = self.request(Method::GET, path, None).await?;
        parse_json(response).await
    }

    /// Sends `payload` as JSON with `method`, discarding the response body.
    pub(crate) async fn send_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        payload: &B,
    ) -> Result<(), Error> {
        let body = serde_json::to_string(payload)
            .map_err(|e| ApiError::parse(format!("failed to serialize request: {}", e)))?;
        self.request(method, path, Some(body)).await?;
        Ok(())
    }
}

async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
    let body = response.text().await.map_err(ApiError::from)?;
    serde_json::from_str(&body)
        .map_err(|e| Error::Api(ApiError::parse_with_body(e.to_string(), body)))
}

/// Encodes one path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`EquipProClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The API base URL
/// - `token_provider` - A [`TokenProvider`] implementation
///
/// # Example
///
/// ```ignore
/// let client = EquipProClient::builder()
///     .url("http://localhost:8080")
///     .token_provider(session)
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub struct EquipProClientBuilder<U, P> {
    url: U,
    token_provider: P,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl EquipProClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for EquipProClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> EquipProClientBuilder<Missing, P> {
    /// Sets the API base URL.
    ///
    /// The URL is validated by [`build`](EquipProClientBuilder::build).
    pub fn url(self, url: impl Into<String>) -> EquipProClientBuilder<Set<String>, P> {
        EquipProClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> EquipProClientBuilder<U, Missing> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> EquipProClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        EquipProClientBuilder {
            url: self.url,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, P> EquipProClientBuilder<U, P> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl EquipProClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`EquipProClient`].
    ///
    /// This method is only available when both `url` and `token_provider` have been set.
    pub fn build(self) -> Result<EquipProClient, Error> {
        let base_url = Url::parse(&self.url.0)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.url.0, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{}: unsupported scheme {}",
                self.url.0,
                base_url.scheme()
            ))
            .into());
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(EquipProClient {
            inner: Arc::new(EquipProClientInner {
                base_url,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;

    #[test]
    fn test_build_url_joins_without_double_slash() {
        let client = EquipProClient::builder()
            .url("http://localhost:8080/")
            .token_provider(StaticTokenProvider::new("t"))
            .build()
            .unwrap();
        assert_eq!(
            client.build_url("/tickets/ticket/3"),
            "http://localhost:8080/tickets/ticket/3"
        );
    }

    #[test]
    fn test_rejects_invalid_urls() {
        let err = EquipProClient::builder()
            .url("not a url")
            .token_provider(StaticTokenProvider::new("t"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::InvalidUrl(_))));

        let err = EquipProClient::builder()
            .url("ftp://example.com")
            .token_provider(StaticTokenProvider::new("t"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("AB 12/3"), "AB%2012%2F3");
    }
}
