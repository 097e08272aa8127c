//! Flattening of nested documents into dotted-path key/value pairs.
//!
//! Coercion rules:
//! - strings are stored verbatim
//! - integers are stored in base 10
//! - tables are walked, with the table's path as the prefix
//! - arrays become one comma-separated string; elements that are neither
//!   strings nor integers contribute an empty segment
//!
//! # Known limitation
//!
//! Floats, booleans and nulls are **not** stored. A key such as
//! `feature.enabled: true` is absent from the flat map after flattening.
//! Each dropped path is reported at `debug` level through `tracing`.

use crate::core::{Document, Value};
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::debug;

/// Flat mapping from dotted key path to string value.
pub type FlatMap = BTreeMap<String, String>;

/// Flatten a document into a new [`FlatMap`].
///
/// Only leaves produce entries; a table never has an entry of its own.
///
/// # Examples
///
/// ```rust
/// use cloud_config_client::core::{flatten, Document, Value};
///
/// let mut server = Document::new();
/// server.insert("port", 8080);
/// server.insert("hosts", vec!["a", "b"]);
///
/// let mut doc = Document::new();
/// doc.insert("server", server);
///
/// let flat = flatten(&doc);
/// assert_eq!(flat.get("server.port").map(String::as_str), Some("8080"));
/// assert_eq!(flat.get("server.hosts").map(String::as_str), Some("a,b"));
/// assert!(!flat.contains_key("server"));
/// ```
pub fn flatten(document: &Document) -> FlatMap {
    let mut flat = FlatMap::new();
    flatten_into("", document, &mut flat);
    flat
}

/// Flatten `document` into an existing map under `prefix`.
///
/// Entries already in `flat` are overwritten when a path collides. An empty
/// prefix places the document's keys at the top level.
pub fn flatten_into(prefix: &str, document: &Document, flat: &mut FlatMap) {
    for (key, value) in document {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::String(s) => {
                flat.insert(path, s.clone());
            }
            Value::Integer(i) => {
                flat.insert(path, i.to_string());
            }
            Value::Table(table) => flatten_into(&path, table, flat),
            Value::Array(items) => {
                let csv = items.iter().map(list_element).collect::<Vec<_>>().join(",");
                flat.insert(path, csv);
            }
            Value::Float(_) | Value::Boolean(_) | Value::Null => {
                debug!(path = %path, kind = value.kind(), "dropping unsupported value");
            }
        }
    }
}

/// Parse a YAML document and flatten it.
///
/// # Errors
///
/// Returns [`crate::error::ConfigError::ParseError`] if the YAML is
/// malformed or its root is not a mapping.
///
/// # Examples
///
/// ```rust
/// use cloud_config_client::core::flatten_yaml;
///
/// let flat = flatten_yaml("third:\n  child: [3, 4]\nfourth: 7\n").unwrap();
/// assert_eq!(flat["third.child"], "3,4");
/// assert_eq!(flat["fourth"], "7");
/// ```
#[cfg(feature = "yaml")]
pub fn flatten_yaml(text: &str) -> crate::error::Result<FlatMap> {
    Document::from_yaml_str(text).map(|doc| flatten(&doc))
}

fn list_element(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Integer(i) => Cow::Owned(i.to_string()),
        _ => Cow::Borrowed(""),
    }
}
