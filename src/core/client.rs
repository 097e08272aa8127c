//! Loads configuration from a config server.

use crate::core::Config;
use crate::error::{ConfigError, Result};
use crate::sources::{ConfigRequest, ConfigSource, HttpSource, parse_response};
use tracing::info;

/// Fetches a [`ConfigRequest`] from a [`ConfigSource`] and merges the
/// response into a [`Config`].
///
/// Every call to [`load`](Self::load) performs a fresh request; nothing is
/// cached between calls.
///
/// # Examples
///
/// ```rust,no_run
/// use cloud_config_client::prelude::*;
///
/// # async fn example() -> Result<()> {
/// let source = HttpSource::builder()
///     .with_url("http://localhost:8888")
///     .build()?;
/// let request = ConfigRequest::new("inventory")
///     .with_profile("dev")
///     .with_label("master");
///
/// let config = ConfigClient::new(source, request).load().await?;
/// println!("{:?}", config.get("test.property"));
/// # Ok(())
/// # }
/// ```
pub struct ConfigClient {
    source: Box<dyn ConfigSource>,
    request: ConfigRequest,
}

impl ConfigClient {
    /// Create a client for `request` served by `source`.
    pub fn new<S: ConfigSource + 'static>(source: S, request: ConfigRequest) -> Self {
        Self {
            source: Box::new(source),
            request,
        }
    }

    /// The request this client issues.
    pub fn request(&self) -> &ConfigRequest {
        &self.request
    }

    /// Fetch, parse and merge the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source cannot be reached or answers with an error status
    /// - The response body is not a valid config server envelope
    pub async fn load(&self) -> Result<Config> {
        let body = self.source.fetch(&self.request).await?;
        let config = parse_response(&body)?;

        info!(
            source = %self.source.name(),
            application = %self.request.application(),
            profiles = %self.request.profile_list(),
            label = self.request.label().unwrap_or("<default>"),
            property_sources = config.details().map_or(0, |d| d.property_sources.len()),
            keys = config.len(),
            "loaded remote configuration"
        );

        Ok(config)
    }

    /// Blocking variant of [`load`](Self::load).
    ///
    /// Runs the request on a private current-thread runtime.
    ///
    /// # Errors
    ///
    /// Besides the errors of [`load`](Self::load), fails with
    /// [`ConfigError::LoadError`] when called from inside a tokio runtime;
    /// use `load().await` there instead.
    pub fn load_blocking(&self) -> Result<Config> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(ConfigError::LoadError(
                "load_blocking cannot run inside an async runtime; use load().await".to_string(),
            ));
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ConfigError::LoadError(format!("Failed to create runtime: {}", e)))?;

        runtime.block_on(self.load())
    }
}

/// Load configuration for `application` from the server at `url`.
///
/// `label` may be empty to use the server's default label.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> cloud_config_client::error::Result<()> {
/// let config = cloud_config_client::load(
///     "http://localhost:8888",
///     "smfg-inventory",
///     "master",
///     ["dev"],
/// )
/// .await?;
/// assert_eq!(config.get("test.property"), Some("dev"));
/// # Ok(())
/// # }
/// ```
pub async fn load<I, S>(url: &str, application: &str, label: &str, profiles: I) -> Result<Config>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    load_with_credentials(url, application, label, "", "", profiles).await
}

/// Like [`load`], authenticating with HTTP Basic credentials.
///
/// Credentials are only sent when both `username` and `password` are
/// non-empty.
pub async fn load_with_credentials<I, S>(
    url: &str,
    application: &str,
    label: &str,
    username: &str,
    password: &str,
    profiles: I,
) -> Result<Config>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let source = HttpSource::builder()
        .with_url(url)
        .with_basic_auth(username, password)
        .build()?;
    let request = ConfigRequest::new(application)
        .with_profiles(profiles)
        .with_label(label);

    ConfigClient::new(source, request).load().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StaticSource {
        body: &'static str,
    }

    #[async_trait]
    impl ConfigSource for StaticSource {
        async fn fetch(&self, _request: &ConfigRequest) -> Result<Vec<u8>> {
            Ok(self.body.as_bytes().to_vec())
        }

        fn name(&self) -> String {
            "static".to_string()
        }
    }

    const BODY: &str = r#"{
        "name": "app",
        "profiles": ["dev"],
        "propertySources": [
            {"name": "app-dev.yml", "source": {"x": "1"}},
            {"name": "app.yml", "source": {"x": "2", "y": "3"}}
        ]
    }"#;

    #[tokio::test]
    async fn test_load() {
        let client = ConfigClient::new(StaticSource { body: BODY }, ConfigRequest::new("app"));
        let config = client.load().await.unwrap();

        assert_eq!(config.get("x"), Some("1"));
        assert_eq!(config.get("y"), Some("3"));
        assert_eq!(client.request().application(), "app");
    }

    #[test]
    fn test_load_blocking() {
        let client = ConfigClient::new(StaticSource { body: BODY }, ConfigRequest::new("app"));
        let config = client.load_blocking().unwrap();
        assert_eq!(config.len(), 2);
    }

    #[tokio::test]
    async fn test_load_blocking_inside_runtime_is_rejected() {
        let client = ConfigClient::new(StaticSource { body: BODY }, ConfigRequest::new("app"));
        assert!(matches!(
            client.load_blocking(),
            Err(ConfigError::LoadError(_))
        ));
    }

    #[tokio::test]
    async fn test_load_invalid_body() {
        let client = ConfigClient::new(StaticSource { body: "not json" }, ConfigRequest::new("app"));
        assert!(matches!(
            client.load().await,
            Err(ConfigError::DeserializationError(_))
        ));
    }
}
