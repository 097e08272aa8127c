//! Nested configuration documents.
//!
//! A [`Document`] is the parsed form of one YAML, JSON or TOML property
//! source before flattening. Keys are always strings: any non-string keys a
//! YAML decoder produces are resolved here, while the document is built, so
//! the flattener never has to look at them.

use crate::error::{ConfigError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A single value inside a [`Document`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string scalar.
    String(String),
    /// An integer scalar.
    Integer(i64),
    /// A nested table.
    Table(Document),
    /// An ordered list.
    Array(Vec<Value>),
    /// A floating point scalar. Not carried into the flat map.
    Float(f64),
    /// A boolean scalar. Not carried into the flat map.
    Boolean(bool),
    /// An explicit null. Not carried into the flat map.
    Null,
}

impl Value {
    /// Short name of the value's kind, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Table(_) => "table",
            Self::Array(_) => "array",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Null => "null",
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Self::Table(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML (`.yaml`, `.yml`)
    Yaml,
    /// JSON (`.json`)
    Json,
    /// TOML (`.toml`)
    Toml,
}

impl Format {
    /// Detect the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] when the path has no
    /// extension or the extension is not one of the supported ones.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ConfigError::UnsupportedFormat(format!(
                    "Unable to determine file format for: {}",
                    path.display()
                ))
            })?;

        match extension {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(format!(
                "Unsupported file extension: {}. Supported: .yaml, .yml, .toml, .json",
                extension
            ))),
        }
    }
}

/// A nested, string-keyed configuration document.
///
/// Iteration order is sorted by key, which keeps flattening deterministic.
///
/// # Examples
///
/// ```rust
/// use cloud_config_client::core::{Document, Value};
///
/// let doc: Document = [
///     ("name".to_string(), Value::from("orders")),
///     ("port".to_string(), Value::from(8080)),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(doc.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: BTreeMap<String, Value>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value for the key if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Look up a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Iterate over top-level entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a document in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] if the text is malformed or its
    /// root is not a map, and [`ConfigError::UnsupportedFormat`] if the
    /// format's cargo feature is disabled.
    pub fn parse(text: &str, format: Format) -> Result<Self> {
        match format {
            Format::Json => Self::from_json_str(text),
            #[cfg(feature = "yaml")]
            Format::Yaml => Self::from_yaml_str(text),
            #[cfg(feature = "toml")]
            Format::Toml => Self::from_toml_str(text),
            #[allow(unreachable_patterns)]
            other => Err(ConfigError::UnsupportedFormat(format!(
                "{:?} support is not enabled",
                other
            ))),
        }
    }

    /// Read and parse a file, detecting the format from its extension.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use cloud_config_client::core::Document;
    ///
    /// # fn example() -> cloud_config_client::error::Result<()> {
    /// let doc = Document::from_path("config/application.yaml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let text = fs::read_to_string(path)?;
        Self::parse(&text, format)
    }

    /// Parse a JSON document. The root must be an object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let root: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| ConfigError::ParseError(format!("Invalid JSON: {}", e)))?;

        match root {
            serde_json::Value::Object(map) => Ok(Self::from(map)),
            other => Err(ConfigError::ParseError(format!(
                "Expected a JSON object at root level, found {}",
                Value::from(other).kind()
            ))),
        }
    }

    /// Parse a YAML document. The root must be a mapping; an empty document
    /// yields an empty `Document`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cloud_config_client::core::{Document, Value};
    ///
    /// let doc = Document::from_yaml_str("server:\n  port: 8080\n").unwrap();
    /// assert!(matches!(doc.get("server"), Some(Value::Table(_))));
    /// ```
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }

        let root: serde_yaml::Value = serde_yaml::from_str(text)
            .map_err(|e| ConfigError::ParseError(format!("Invalid YAML: {}", e)))?;

        match yaml::untag(root) {
            serde_yaml::Value::Null => Ok(Self::new()),
            serde_yaml::Value::Mapping(mapping) => {
                let mut doc = Self::new();
                yaml::fill_table(mapping, &mut doc);
                Ok(doc)
            }
            other => Err(ConfigError::ParseError(format!(
                "Expected a YAML mapping at root level, found {}",
                yaml::to_value(other).kind()
            ))),
        }
    }

    /// Parse a TOML document.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(text)
            .map_err(|e| ConfigError::ParseError(format!("Invalid TOML: {}", e)))?;
        Ok(Self::from(table))
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Document {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect()
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if n.is_u64() {
                    // Integers past i64::MAX keep their exact decimal form.
                    Self::String(n.to_string())
                } else {
                    n.as_f64().map_or(Self::Null, Self::Float)
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Table(Document::from(map)),
        }
    }
}

#[cfg(feature = "toml")]
impl From<toml::Table> for Document {
    fn from(table: toml::Table) -> Self {
        table
            .into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect()
    }
}

#[cfg(feature = "toml")]
impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Self::String(s),
            toml::Value::Integer(i) => Self::Integer(i),
            toml::Value::Float(f) => Self::Float(f),
            toml::Value::Boolean(b) => Self::Boolean(b),
            toml::Value::Datetime(dt) => Self::String(dt.to_string()),
            toml::Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            toml::Value::Table(table) => Self::Table(Document::from(table)),
        }
    }
}

#[cfg(feature = "yaml")]
mod yaml {
    use super::{Document, Value};
    use serde_yaml::Value as YamlValue;
    use tracing::debug;

    pub(super) fn untag(value: YamlValue) -> YamlValue {
        match value {
            YamlValue::Tagged(tagged) => untag(tagged.value),
            other => other,
        }
    }

    /// Copy a YAML mapping into `table`.
    ///
    /// A key that is itself a mapping is spliced into `table`, as is the
    /// mapping value of any other non-string key. Remaining non-string keys
    /// are dropped.
    pub(super) fn fill_table(mapping: serde_yaml::Mapping, table: &mut Document) {
        for (key, value) in mapping {
            match untag(key) {
                YamlValue::String(key) => {
                    table.insert(key, to_value(value));
                }
                YamlValue::Mapping(inner) => fill_table(inner, table),
                other => match untag(value) {
                    YamlValue::Mapping(inner) => fill_table(inner, table),
                    _ => debug!(key = ?other, "dropping entry with non-string key"),
                },
            }
        }
    }

    pub(super) fn to_value(value: YamlValue) -> Value {
        match value {
            YamlValue::Null => Value::Null,
            YamlValue::Bool(b) => Value::Boolean(b),
            YamlValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if n.is_u64() {
                    Value::String(n.to_string())
                } else {
                    n.as_f64().map_or(Value::Null, Value::Float)
                }
            }
            YamlValue::String(s) => Value::String(s),
            YamlValue::Sequence(items) => Value::Array(items.into_iter().map(to_value).collect()),
            YamlValue::Mapping(mapping) => {
                let mut table = Document::new();
                fill_table(mapping, &mut table);
                Value::Table(table)
            }
            YamlValue::Tagged(tagged) => to_value(tagged.value),
        }
    }
}
