//! Configuration source implementations.

mod envelope;
mod request;

#[cfg(feature = "remote")]
mod config_source;
#[cfg(feature = "remote")]
mod remote;

pub use envelope::{ConfigDetails, PropertySource, parse_response};
pub use request::{ConfigRequest, DEFAULT_PROFILE};

#[cfg(feature = "remote")]
pub use config_source::ConfigSource;
#[cfg(feature = "remote")]
pub use remote::{HttpAuth, HttpSource, HttpSourceBuilder};
