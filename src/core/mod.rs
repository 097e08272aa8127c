//! Core configuration types: documents, flattening, merging and the
//! merged [`Config`].

mod config;
mod document;
mod flatten;
mod merge;

#[cfg(feature = "remote")]
mod client;

pub use config::Config;
pub use document::{Document, Format, Value};
pub use flatten::{FlatMap, flatten, flatten_into};
pub use merge::{Source, merge};

#[cfg(feature = "yaml")]
pub use flatten::flatten_yaml;

#[cfg(feature = "remote")]
pub use client::{ConfigClient, load, load_with_credentials};
