//! Precedence-aware merging of property sources.

use crate::core::{Document, FlatMap, flatten};
use tracing::debug;

/// One named layer of flat configuration, such as a single file served by
/// the config server.
///
/// # Examples
///
/// ```rust
/// use cloud_config_client::core::Source;
///
/// let source = Source::new("application-dev.yml", [("server.port", "9090")]);
/// assert_eq!(source.get("server.port"), Some("9090"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    name: String,
    values: FlatMap,
}

impl Source {
    /// Create a source from already-flat key/value pairs.
    pub fn new<I, K, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Create a source by flattening a nested document.
    pub fn from_document(name: impl Into<String>, document: &Document) -> Self {
        Self {
            name: name.into(),
            values: flatten(document),
        }
    }

    /// The source's identifying label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The source's flat values.
    pub fn values(&self) -> &FlatMap {
        &self.values
    }

    /// Look up a single key in this source only.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of keys defined by this source.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether this source defines no keys.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Merge an ordered list of sources into one flat map.
///
/// Index 0 is the highest priority source. Sources are applied from the last
/// to the first, each overwriting what came before, so the final value for a
/// key is the one from the earliest source that defines it.
///
/// # Examples
///
/// ```rust
/// use cloud_config_client::core::{merge, Source};
///
/// let merged = merge(&[
///     Source::new("A", [("x", "1")]),
///     Source::new("B", [("x", "2"), ("y", "3")]),
/// ]);
///
/// assert_eq!(merged["x"], "1");
/// assert_eq!(merged["y"], "3");
/// ```
pub fn merge(sources: &[Source]) -> FlatMap {
    let mut merged = FlatMap::new();

    for source in sources.iter().rev() {
        debug!(source = %source.name, keys = source.len(), "merging property source");
        merged.extend(
            source
                .values
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        assert!(merge(&[]).is_empty());
    }

    #[test]
    fn test_single_source() {
        let merged = merge(&[Source::new("only", [("port", "8080"), ("host", "localhost")])]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged["port"], "8080");
        assert_eq!(merged["host"], "localhost");
    }

    #[test]
    fn test_first_source_wins() {
        let merged = merge(&[
            Source::new("A", [("x", "1")]),
            Source::new("B", [("x", "2"), ("y", "3")]),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged["x"], "1");
        assert_eq!(merged["y"], "3");
    }

    #[test]
    fn test_precedence_across_three_layers() {
        let merged = merge(&[
            Source::new("app-prod.yml", [("db.url", "prod")]),
            Source::new("app.yml", [("db.url", "default"), ("db.pool", "5")]),
            Source::new("application.yml", [("db.pool", "1"), ("log.level", "info")]),
        ]);

        assert_eq!(merged["db.url"], "prod");
        assert_eq!(merged["db.pool"], "5");
        assert_eq!(merged["log.level"], "info");
    }

    #[test]
    fn test_empty_string_overrides() {
        let merged = merge(&[
            Source::new("A", [("x", "")]),
            Source::new("B", [("x", "fallback")]),
        ]);
        assert_eq!(merged.get("x").map(String::as_str), Some(""));
    }

    #[test]
    fn test_from_document_flattens() {
        let mut inner = Document::new();
        inner.insert("port", 8080);
        let mut doc = Document::new();
        doc.insert("server", inner);

        let source = Source::from_document("nested", &doc);
        assert_eq!(source.name(), "nested");
        assert_eq!(source.get("server.port"), Some("8080"));
        assert_eq!(source.len(), 1);
    }
}
