//! Remote HTTP/HTTPS config server source.

use super::{ConfigRequest, ConfigSource};
use crate::error::{ConfigError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Authentication method for HTTP requests.
#[derive(Clone)]
pub enum HttpAuth {
    /// No authentication
    None,
    /// Basic authentication (username, password)
    Basic(String, String),
}

impl std::fmt::Debug for HttpAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Basic(username, _) => write!(f, "Basic({}, ***)", username),
        }
    }
}

/// HTTP-based config server source.
///
/// Issues `GET {url}/{application}/{profiles}/{label}` and returns the body.
///
/// # Examples
///
/// ```rust,no_run
/// use cloud_config_client::sources::HttpSource;
/// use std::time::Duration;
///
/// # fn example() -> cloud_config_client::error::Result<()> {
/// let source = HttpSource::builder()
///     .with_url("http://localhost:8888")
///     .with_basic_auth("user", "secret")
///     .with_timeout(Duration::from_secs(5))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpSource {
    base_url: String,
    client: Client,
    auth: HttpAuth,
}

impl HttpSource {
    /// Create a new builder for constructing an HTTP source.
    pub fn builder() -> HttpSourceBuilder {
        HttpSourceBuilder::new()
    }

    /// The full URL for `request`.
    pub fn url_for(&self, request: &ConfigRequest) -> String {
        format!("{}{}", self.base_url, request.path())
    }
}

#[async_trait]
impl ConfigSource for HttpSource {
    async fn fetch(&self, request: &ConfigRequest) -> Result<Vec<u8>> {
        let url = self.url_for(request);
        debug!(url = %url, "requesting configuration");

        let mut builder = self.client.get(&url);
        if let HttpAuth::Basic(username, password) = &self.auth {
            builder = builder.basic_auth(username, Some(password));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ConfigError::LoadError(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "config server returned an error status");
            return Err(ConfigError::LoadError(format!(
                "HTTP request failed with status {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ConfigError::LoadError(format!("Failed to read response body: {}", e)))?;

        Ok(body.to_vec())
    }

    fn name(&self) -> String {
        format!("http:{}", self.base_url)
    }
}

/// Builder for constructing an `HttpSource`.
pub struct HttpSourceBuilder {
    url: Option<String>,
    username: String,
    password: String,
    timeout: Duration,
    use_system_proxy: bool,
}

impl HttpSourceBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: None,
            username: String::new(),
            password: String::new(),
            timeout: Duration::from_secs(10),
            use_system_proxy: true,
        }
    }

    /// Set the base URL of the config server, e.g. `http://localhost:8888`.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set Basic authentication.
    ///
    /// Credentials are only sent when both the username and the password are
    /// non-empty.
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Default is 10 seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ignore proxy settings from the environment (`HTTP_PROXY` and friends).
    pub fn without_proxy(mut self) -> Self {
        self.use_system_proxy = false;
        self
    }

    /// Build the HTTP source.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No URL is provided
    /// - The HTTP client cannot be constructed
    pub fn build(self) -> Result<HttpSource> {
        let url = self
            .url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ConfigError::LoadError("URL is required for HttpSource".to_string()))?;

        let mut client = Client::builder().timeout(self.timeout);
        if !self.use_system_proxy {
            client = client.no_proxy();
        }
        let client = client
            .build()
            .map_err(|e| ConfigError::LoadError(format!("Failed to create HTTP client: {}", e)))?;

        let auth = if self.username.is_empty() || self.password.is_empty() {
            HttpAuth::None
        } else {
            HttpAuth::Basic(self.username, self.password)
        };

        Ok(HttpSource {
            base_url: url.trim_end_matches('/').to_string(),
            client,
            auth,
        })
    }
}

impl Default for HttpSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let source = HttpSource::builder()
            .with_url("https://example.com/config/")
            .with_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(source.base_url, "https://example.com/config");
        assert_eq!(source.name(), "http:https://example.com/config");
    }

    #[test]
    fn test_builder_no_url() {
        assert!(HttpSource::builder().build().is_err());
        assert!(HttpSource::builder().with_url("").build().is_err());
    }

    #[test]
    fn test_builder_with_basic_auth() {
        let source = HttpSource::builder()
            .with_url("https://example.com")
            .with_basic_auth("user", "pass")
            .build()
            .unwrap();

        assert!(matches!(source.auth, HttpAuth::Basic(ref u, ref p) if u == "user" && p == "pass"));
    }

    #[test]
    fn test_partial_credentials_are_ignored() {
        let source = HttpSource::builder()
            .with_url("https://example.com")
            .with_basic_auth("user", "")
            .build()
            .unwrap();

        assert!(matches!(source.auth, HttpAuth::None));
    }

    #[test]
    fn test_url_for() {
        let source = HttpSource::builder()
            .with_url("http://localhost:8888/")
            .build()
            .unwrap();
        let request = ConfigRequest::new("smfg-inventory")
            .with_profile("dev")
            .with_label("master");

        assert_eq!(
            source.url_for(&request),
            "http://localhost:8888/smfg-inventory/dev/master"
        );
    }

    #[test]
    fn test_debug_hides_password() {
        let auth = HttpAuth::Basic("user".to_string(), "secret".to_string());
        let rendered = format!("{:?}", auth);
        assert!(!rendered.contains("secret"));
    }
}
