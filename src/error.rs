//! Error types for cloud-config-client.

/// Result type alias for cloud-config-client operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when fetching or reading configuration.
///
/// Flattening and merging never fail; every variant here comes from the
/// transport, from parsing a document, or from reading a typed value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to load configuration from the server.
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    /// Failed to deserialize the server's response envelope.
    #[error("Failed to deserialize configuration: {0}")]
    DeserializationError(String),

    /// Failed to parse a YAML, JSON or TOML document.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// The document format could not be determined or is not compiled in.
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A property exists but could not be parsed into the requested type.
    #[error("Property '{key}' has an invalid value: {reason}")]
    InvalidValue {
        /// The dotted property key
        key: String,
        /// Why the value was rejected
        reason: String,
    },

    /// One or more required properties are absent.
    #[error("Missing required properties: {}", .0.join(", "))]
    MissingProperties(Vec<String>),

    /// Generic error for other cases.
    #[error("Configuration error: {0}")]
    Other(String),
}
