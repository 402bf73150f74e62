//! Feature attribute access.
//!
//! Styles are resolved from a handful of named attributes. Anything that
//! can look up an attribute by name is a [`Feature`].

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};
use symbology_common::BreakpointValue;

/// A scalar feature attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Number(f64),
    Text(String),
}

impl AttributeValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            AttributeValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Convert a JSON property; `null`, arrays and objects are no value.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(AttributeValue::Number),
            Value::String(s) => Some(AttributeValue::Text(s.clone())),
            Value::Bool(b) => Some(AttributeValue::Text(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Number(n) => write!(f, "{}", n),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<&AttributeValue> for BreakpointValue {
    fn from(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Number(n) => BreakpointValue::Number(*n),
            AttributeValue::Text(s) => BreakpointValue::Text(s.clone()),
        }
    }
}

/// Read access to the attributes of a feature.
pub trait Feature {
    fn attribute(&self, name: &str) -> Option<AttributeValue>;
}

impl<F: Feature + ?Sized> Feature for &F {
    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        (**self).attribute(name)
    }
}

impl Feature for HashMap<String, AttributeValue> {
    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        self.get(name).cloned()
    }
}

/// GeoJSON feature properties.
impl Feature for Map<String, Value> {
    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        self.get(name).and_then(AttributeValue::from_json)
    }
}

/// Ordered attribute set, mostly for building features by hand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureProperties {
    entries: Vec<(String, AttributeValue)>,
}

impl FeatureProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an attribute.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl Feature for FeatureProperties {
    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_properties() {
        let Value::Object(props) = json!({
            "species": "fox",
            "count": 3,
            "tagged": true,
            "notes": null,
            "tags": ["a"]
        }) else {
            panic!("Expected object");
        };

        assert_eq!(props.attribute("species"), Some("fox".into()));
        assert_eq!(props.attribute("count"), Some(AttributeValue::Number(3.0)));
        assert_eq!(props.attribute("tagged"), Some("true".into()));
        assert_eq!(props.attribute("notes"), None);
        assert_eq!(props.attribute("tags"), None);
        assert_eq!(props.attribute("missing"), None);
    }

    #[test]
    fn test_properties_builder_replaces() {
        let props = FeatureProperties::new()
            .with("species", "fox")
            .with("size", 2.0)
            .with("species", "owl");

        assert_eq!(props.len(), 2);
        assert_eq!(props.attribute("species"), Some("owl".into()));
        assert_eq!(props.iter().next().map(|(n, _)| n), Some("species"));
    }

    #[test]
    fn test_text_as_number() {
        assert_eq!(AttributeValue::from(" 4.5 ").as_number(), Some(4.5));
        assert_eq!(AttributeValue::from("big").as_number(), None);
        assert_eq!(AttributeValue::Number(7.0).to_string(), "7");
    }

    #[test]
    fn test_reference_is_feature() {
        let mut map = HashMap::new();
        map.insert("name".to_string(), AttributeValue::from("Dune"));

        fn name_of<F: Feature>(feature: F) -> Option<AttributeValue> {
            feature.attribute("name")
        }
        assert_eq!(name_of(&map), Some("Dune".into()));
    }
}
