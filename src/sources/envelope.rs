//! The config server's JSON response envelope.

use crate::core::{Config, Document, Source};
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// The full body returned by the config server.
///
/// Property sources are ordered most specific first: index 0 has the
/// highest priority.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDetails {
    /// Application name the server resolved.
    #[serde(default)]
    pub name: String,
    /// Active profiles.
    #[serde(default)]
    pub profiles: Vec<String>,
    /// Branch or tag the configuration came from.
    #[serde(default)]
    pub label: Option<String>,
    /// Backend version, e.g. a git commit id.
    #[serde(default)]
    pub version: Option<String>,
    /// Backend state marker.
    #[serde(default)]
    pub state: Option<String>,
    /// Ordered property sources.
    #[serde(default)]
    pub property_sources: Vec<PropertySource>,
}

impl ConfigDetails {
    /// Flatten every property source, keeping the server's order.
    pub fn sources(&self) -> Vec<Source> {
        self.property_sources
            .iter()
            .map(PropertySource::to_source)
            .collect()
    }
}

/// One property source as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySource {
    /// Usually the file the values came from.
    pub name: String,
    /// The raw values. Servers normally send these flat, but nested objects
    /// are flattened the same way as a local document.
    #[serde(default)]
    pub source: serde_json::Map<String, serde_json::Value>,
}

impl PropertySource {
    /// Convert into a flat [`Source`].
    ///
    /// JSON booleans and numbers are kept as their text (`false`, `0.5`), so
    /// a server-side `false` still overrides lower-priority sources. Nulls and
    /// list elements are handled as in a local document.
    pub fn to_source(&self) -> Source {
        let document: Document = wire_map(&self.source).into();
        Source::from_document(&self.name, &document)
    }
}

/// Stringify the scalars of a wire object, recursing into nested objects.
fn wire_map(
    map: &serde_json::Map<String, serde_json::Value>,
) -> serde_json::Map<String, serde_json::Value> {
    map.iter()
        .map(|(key, value)| (key.clone(), wire_value(value)))
        .collect()
}

fn wire_value(value: &serde_json::Value) -> serde_json::Value {
    use serde_json::Value as Json;

    match value {
        Json::Bool(b) => Json::String(b.to_string()),
        Json::Number(n) => Json::String(n.to_string()),
        Json::Object(map) => Json::Object(wire_map(map)),
        other => other.clone(),
    }
}

/// Decode a config server response body into a merged [`Config`].
///
/// # Errors
///
/// Returns [`ConfigError::DeserializationError`] if the body is not a valid
/// response envelope.
///
/// # Examples
///
/// ```rust
/// use cloud_config_client::sources::parse_response;
///
/// let body = br#"{
///     "name": "orders",
///     "profiles": ["dev"],
///     "propertySources": [
///         {"name": "orders-dev.yml", "source": {"x": "1"}},
///         {"name": "orders.yml", "source": {"x": "2", "y": "3"}}
///     ]
/// }"#;
///
/// let config = parse_response(body).unwrap();
/// assert_eq!(config.get("x"), Some("1"));
/// assert_eq!(config.get("y"), Some("3"));
/// ```
pub fn parse_response(body: &[u8]) -> Result<Config> {
    let details: ConfigDetails = serde_json::from_slice(body).map_err(|e| {
        ConfigError::DeserializationError(format!("Failed to parse JSON: {}", e))
    })?;

    Ok(Config::from_details(details))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_envelope() {
        let body = json!({
            "name": "inventory",
            "profiles": ["dev", "local"],
            "label": "master",
            "version": "a1b2c3",
            "state": null,
            "propertySources": [
                {"name": "inventory-dev.yml", "source": {"test.property": "dev"}},
                {"name": "application.yml", "source": {"test.property": "default", "other": 1}}
            ]
        });

        let config = parse_response(body.to_string().as_bytes()).unwrap();
        assert_eq!(config.get("test.property"), Some("dev"));
        assert_eq!(config.get("other"), Some("1"));

        let details = config.details().unwrap();
        assert_eq!(details.name, "inventory");
        assert_eq!(details.profiles, vec!["dev", "local"]);
        assert_eq!(details.label.as_deref(), Some("master"));
        assert_eq!(details.version.as_deref(), Some("a1b2c3"));
        assert_eq!(details.state, None);
        assert_eq!(details.property_sources.len(), 2);
    }

    #[test]
    fn test_nested_source_values_are_flattened() {
        let body = json!({
            "name": "app",
            "propertySources": [
                {"name": "nested", "source": {"server": {"port": 8080}, "hosts": ["a", "b"]}}
            ]
        });

        let config = parse_response(body.to_string().as_bytes()).unwrap();
        assert_eq!(config.get("server.port"), Some("8080"));
        assert_eq!(config.get("hosts"), Some("a,b"));
    }

    #[test]
    fn test_wire_booleans_and_numbers_keep_priority() {
        let body = json!({
            "name": "app",
            "propertySources": [
                {"name": "app-dev.yml", "source": {"feature.enabled": false, "ratio": 0.5}},
                {"name": "app.yml", "source": {"feature.enabled": "true", "ratio": "1", "retries": 3}}
            ]
        });

        let config = parse_response(body.to_string().as_bytes()).unwrap();
        assert_eq!(config.get("feature.enabled"), Some("false"));
        assert_eq!(config.get("ratio"), Some("0.5"));
        assert_eq!(config.get("retries"), Some("3"));
    }

    #[test]
    fn test_wire_null_is_not_stored() {
        let body = json!({
            "name": "app",
            "propertySources": [
                {"name": "app-dev.yml", "source": {"feature.flag": null, "server": {"debug": true}}}
            ]
        });

        let config = parse_response(body.to_string().as_bytes()).unwrap();
        assert_eq!(config.get("feature.flag"), None);
        assert_eq!(config.get("server.debug"), Some("true"));
    }

    #[test]
    fn test_missing_property_sources() {
        let config = parse_response(br#"{"name": "app"}"#).unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_invalid_body() {
        let result = parse_response(b"<html>not json</html>");
        assert!(matches!(result, Err(ConfigError::DeserializationError(_))));
    }

    #[test]
    fn test_sources_keep_server_order() {
        let details: ConfigDetails = serde_json::from_value(json!({
            "name": "app",
            "propertySources": [
                {"name": "first", "source": {}},
                {"name": "second", "source": {}}
            ]
        }))
        .unwrap();

        let names: Vec<_> = details
            .sources()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
