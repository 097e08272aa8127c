//! The merged configuration returned to callers.

use crate::core::{FlatMap, Source, merge};
use crate::error::{ConfigError, Result};
use crate::sources::ConfigDetails;
use std::fmt;
use std::str::FromStr;

/// Merged, flat configuration plus the server response it came from.
///
/// Values are read by dotted key. An absent key is `None`; a key whose value
/// is the empty string is `Some("")`.
///
/// # Examples
///
/// ```rust
/// use cloud_config_client::core::{Config, Source};
///
/// let config = Config::from_sources(&[
///     Source::new("app-dev.yml", [("server.port", "9090"), ("banner", "")]),
///     Source::new("app.yml", [("server.port", "8080")]),
/// ]);
///
/// assert_eq!(config.get("server.port"), Some("9090"));
/// assert_eq!(config.get("banner"), Some(""));
/// assert_eq!(config.get("missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    values: FlatMap,
    details: Option<ConfigDetails>,
}

impl Config {
    /// Wrap an already merged flat map.
    pub fn new(values: FlatMap) -> Self {
        Self {
            values,
            details: None,
        }
    }

    /// Merge ordered sources, index 0 having the highest priority.
    pub fn from_sources(sources: &[Source]) -> Self {
        Self::new(merge(sources))
    }

    /// Merge the property sources of a server response and keep the
    /// response for later inspection.
    pub fn from_details(details: ConfigDetails) -> Self {
        Self {
            values: merge(&details.sources()),
            details: Some(details),
        }
    }

    /// Get the highest priority value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Whether `key` is defined by any source.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Get a list value, splitting the comma-separated form that lists are
    /// flattened into. An empty value is an empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cloud_config_client::core::{Config, Source};
    ///
    /// let config = Config::from_sources(&[Source::new("s", [("hosts", "a,b,c")])]);
    /// assert_eq!(config.get_list("hosts"), Some(vec!["a", "b", "c"]));
    /// ```
    pub fn get_list(&self, key: &str) -> Option<Vec<&str>> {
        self.get(key).map(|raw| {
            if raw.is_empty() {
                Vec::new()
            } else {
                raw.split(',').collect()
            }
        })
    }

    /// Get a value parsed into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the key exists but its value
    /// does not parse.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cloud_config_client::core::{Config, Source};
    ///
    /// # fn example() -> cloud_config_client::error::Result<()> {
    /// let config = Config::from_sources(&[Source::new("s", [("server.port", "8080")])]);
    /// let port: Option<u16> = config.get_parsed("server.port")?;
    /// assert_eq!(port, Some(8080));
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_parsed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.get(key)
            .map(|raw| {
                raw.parse::<T>().map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    /// Check that every key in `keys` is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingProperties`] naming all absent keys.
    pub fn require(&self, keys: &[&str]) -> Result<()> {
        let missing: Vec<String> = keys
            .iter()
            .filter(|key| !self.contains_key(key))
            .map(|key| key.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingProperties(missing))
        }
    }

    /// Iterate over all key/value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no keys.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The merged flat map.
    pub fn values(&self) -> &FlatMap {
        &self.values
    }

    /// The server response, when this config came from one.
    pub fn details(&self) -> Option<&ConfigDetails> {
        self.details.as_ref()
    }

    /// Consume the config, keeping only the flat map.
    pub fn into_values(self) -> FlatMap {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config::from_sources(&[
            Source::new("high", [("a", "1"), ("empty", ""), ("port", "80")]),
            Source::new("low", [("a", "2"), ("b", "x,y"), ("port", "eighty")]),
        ])
    }

    #[test]
    fn test_get_absent_vs_empty() {
        let config = sample();
        assert_eq!(config.get("empty"), Some(""));
        assert_eq!(config.get("nope"), None);
        assert!(config.contains_key("empty"));
        assert!(!config.contains_key("nope"));
    }

    #[test]
    fn test_get_list() {
        let config = sample();
        assert_eq!(config.get_list("b"), Some(vec!["x", "y"]));
        assert_eq!(config.get_list("empty"), Some(Vec::new()));
        assert_eq!(config.get_list("nope"), None);
    }

    #[test]
    fn test_get_parsed() {
        let config = sample();
        assert_eq!(config.get_parsed::<u16>("port").unwrap(), Some(80));
        assert_eq!(config.get_parsed::<u16>("nope").unwrap(), None);
        assert!(matches!(
            config.get_parsed::<u16>("b"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_require() {
        let config = sample();
        assert!(config.require(&["a", "b"]).is_ok());

        match config.require(&["a", "c", "d"]) {
            Err(ConfigError::MissingProperties(missing)) => assert_eq!(missing, vec!["c", "d"]),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_iter_and_len() {
        let config = sample();
        assert_eq!(config.len(), 4);
        let keys: Vec<_> = config.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b", "empty", "port"]);
        assert!(config.details().is_none());
    }

    #[test]
    fn test_default_is_empty() {
        let config = Config::default();
        assert!(config.is_empty());
        assert_eq!(config.into_values(), FlatMap::new());
    }
}
