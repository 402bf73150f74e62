//! Test data generators for feature properties and symbology files.
//!
//! These generators create predictable, verifiable feature attribute sets
//! and temporary files that can be used across the test suite.

use std::io::Write;

use serde_json::{Map, Value};
use tempfile::NamedTempFile;

/// Builds a GeoJSON-style property map from key/value pairs.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use test_utils::feature_properties;
///
/// let props = feature_properties(&[("species", json!("fox")), ("size", json!(3))]);
/// assert_eq!(props["species"], "fox");
/// ```
pub fn feature_properties(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

/// Creates `count` features with a `species` attribute cycling through
/// the given names, a numeric `id` and a `name` label.
///
/// # Example
///
/// ```
/// use test_utils::species_features;
///
/// let features = species_features(&["fox", "owl"], 3);
/// assert_eq!(features[2]["species"], "fox");
/// assert_eq!(features[1]["name"], "owl-1");
/// ```
pub fn species_features(species: &[&str], count: usize) -> Vec<Map<String, Value>> {
    (0..count)
        .map(|i| {
            let name = species[i % species.len()];
            feature_properties(&[
                ("id", Value::from(i as u64)),
                ("species", Value::from(name)),
                ("name", Value::from(format!("{}-{}", name, i))),
            ])
        })
        .collect()
}

/// Creates features with a numeric attribute stepping from `start` by
/// `step`.
pub fn numeric_features(
    attribute: &str,
    start: f64,
    step: f64,
    count: usize,
) -> Vec<Map<String, Value>> {
    (0..count)
        .map(|i| feature_properties(&[(attribute, Value::from(start + step * i as f64))]))
        .collect()
}

/// Writes a JSON value to a temporary file that lives as long as the
/// returned handle.
pub fn write_temp_json(value: &Value) -> std::io::Result<NamedTempFile> {
    let contents = serde_json::to_string_pretty(value)?;
    write_temp_file(&contents, ".json")
}

/// Writes arbitrary contents to a temporary file with the given suffix.
pub fn write_temp_file(contents: &str, suffix: &str) -> std::io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_species_features_cycle() {
        let features = species_features(&["fox", "owl"], 5);
        assert_eq!(features.len(), 5);
        assert_eq!(features[0]["species"], "fox");
        assert_eq!(features[1]["species"], "owl");
        assert_eq!(features[4]["species"], "fox");
        assert_eq!(features[3]["id"], 3);
    }

    #[test]
    fn test_numeric_features() {
        let features = numeric_features("depth", 10.0, 2.5, 3);
        assert_eq!(features[2]["depth"], 15.0);
    }

    #[test]
    fn test_write_temp_json() {
        let file = write_temp_json(&json!({"a": 1})).unwrap();
        let contents = std::fs::read_to_string(file.path()).unwrap();
        let value: Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value, json!({"a": 1}));
        assert!(file.path().extension().is_some_and(|e| e == "json"));
    }
}
