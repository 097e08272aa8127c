//! # cloud-config-client
//!
//! Client for Spring Cloud Config style configuration servers.
//!
//! ## Overview
//!
//! A config server answers `GET /{application}/{profiles}/{label}` with an
//! ordered list of property sources, most specific first. This crate:
//! - Fetches that response (optionally with HTTP Basic credentials)
//! - Flattens each source into dotted `key.path = value` pairs
//! - Merges the sources so the most specific definition of a key wins
//! - Exposes single-key reads through [`Config`](core::Config)
//!
//! A full process configuration is usually layered as
//! `local files < remote server < environment variables < command-line args`.
//! This crate covers the remote layer only.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cloud_config_client::prelude::*;
//!
//! # async fn example() -> cloud_config_client::error::Result<()> {
//! let config = cloud_config_client::load(
//!     "http://localhost:8888",
//!     "inventory",
//!     "master",
//!     ["dev"],
//! )
//! .await?;
//!
//! match config.get("server.port") {
//!     Some(port) => println!("port: {}", port),
//!     None => println!("port not configured"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The merge and flatten steps are usable without a server:
//!
//! ```rust
//! use cloud_config_client::prelude::*;
//!
//! let flat = flatten_yaml("second:\n  b:\n    grandchild: [a, b]\n").unwrap();
//! assert_eq!(flat["second.b.grandchild"], "a,b");
//!
//! let merged = merge(&[
//!     Source::new("A", [("x", "1")]),
//!     Source::new("B", [("x", "2"), ("y", "3")]),
//! ]);
//! assert_eq!(merged["x"], "1");
//! ```
//!
//! ## Known limitation
//!
//! Flattening keeps strings, integers and lists of those. Floats, booleans
//! and nulls are dropped, so `enabled: true` never reaches the flat map.
//! Server responses are not affected: JSON booleans and numbers in a
//! property source are read as their text before flattening.
//!
//! ## Feature Flags
//!
//! - `remote` (default): HTTP fetching with `reqwest` on `tokio`
//! - `yaml` (default): YAML documents
//! - `toml`: TOML documents
//!
//! JSON documents are always supported.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod sources;

#[cfg(feature = "remote")]
pub use crate::core::{load, load_with_credentials};

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{
        Config, Document, FlatMap, Format, Source, Value, flatten, flatten_into, merge,
    };
    pub use crate::error::{ConfigError, Result};
    pub use crate::sources::{ConfigDetails, ConfigRequest, parse_response};

    #[cfg(feature = "yaml")]
    pub use crate::core::flatten_yaml;

    #[cfg(feature = "remote")]
    pub use crate::core::ConfigClient;
    #[cfg(feature = "remote")]
    pub use crate::sources::{ConfigSource, HttpSource};
}
