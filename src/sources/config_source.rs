//! Configuration source trait.

use crate::error::Result;
use crate::sources::ConfigRequest;
use async_trait::async_trait;

/// Trait for anything that can answer a [`ConfigRequest`] with a raw
/// response body.
///
/// [`HttpSource`](crate::sources::HttpSource) talks to a real config server.
/// Implement this trait to serve responses from elsewhere, e.g. a fixture in
/// tests or a sidecar that proxies the server.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Fetch the raw response body for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be completed.
    async fn fetch(&self, request: &ConfigRequest) -> Result<Vec<u8>>;

    /// Get a human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;
}
