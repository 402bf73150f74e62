//! Subcommand implementations. Each returns the text to print.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::{json, Map, Value};
use style_engine::{EngineConfig, StyleResolver};
use symbology_common::Symbology;
use tracing::info;

pub fn load_symbology(path: &Path) -> Result<Symbology> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let symbology = Symbology::from_json_str(&contents)
        .with_context(|| format!("failed to decode symbology {}", path.display()))?;
    info!(kind = %symbology.kind(), path = %path.display(), "Loaded symbology");
    Ok(symbology)
}

/// Feature properties from a JSON array of objects or a GeoJSON
/// FeatureCollection.
pub fn load_features(path: &Path) -> Result<Vec<Map<String, Value>>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    parse_features(value)
}

fn parse_features(value: Value) -> Result<Vec<Map<String, Value>>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut collection) => match collection.remove("features") {
            Some(Value::Array(features)) => features
                .into_iter()
                .map(|mut feature| {
                    feature
                        .get_mut("properties")
                        .map(Value::take)
                        .unwrap_or(Value::Null)
                })
                .collect(),
            _ => bail!("expected a FeatureCollection with a features array"),
        },
        _ => bail!("expected an array of feature properties or a FeatureCollection"),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(properties) => Ok(properties),
            Value::Null => Ok(Map::new()),
            other => bail!("feature {} has non-object properties: {}", i, other),
        })
        .collect()
}

pub fn describe(symbology: &Symbology) -> String {
    let mut lines = vec![
        format!("kind: {}", symbology.kind()),
        format!("describes area: {}", symbology.describes_area()),
        format!("describes radius: {}", symbology.describes_radius()),
    ];

    if let Some(base) = symbology.vector_base() {
        lines.push(format!("fill: {}", base.fill_color().css_rgba()));
        lines.push(format!(
            "stroke: {} width {}",
            base.stroke_color().css_rgba(),
            base.stroke_width
        ));
    }
    if let Some(raster) = symbology.as_raster() {
        lines.push(format!("opacity: {}", raster.opacity));
        if let Some(unit) = &raster.unit {
            lines.push(format!("unit: {} ({})", unit.measurement, unit.unit));
        }
    }

    lines.join("\n")
}

pub fn normalize(symbology: &Symbology) -> Result<String> {
    Ok(serde_json::to_string_pretty(&symbology.to_dict()?)?)
}

pub fn payload(symbology: &Symbology) -> Result<String> {
    match symbology {
        Symbology::ColorizerRaster(raster) => Ok(raster.colorizer_request_payload()?),
        other => bail!("{} symbologies have no colorizer payload", other.kind()),
    }
}

pub fn resolve(
    symbology: &Symbology,
    features: &[Map<String, Value>],
    config: &EngineConfig,
) -> Result<String> {
    let mut provider = StyleResolver::new(config.clone()).resolve(symbology)?;

    let styles = features
        .iter()
        .map(|feature| serde_json::to_value(provider.style_for(feature).as_ref()))
        .collect::<serde_json::Result<Vec<_>>>()?;

    let cache = provider.cache_stats().map(|stats| {
        json!({
            "hits": stats.hits,
            "misses": stats.misses,
            "entries": stats.entries,
            "evictions": stats.evictions,
        })
    });

    Ok(serde_json::to_string_pretty(&json!({
        "styles": styles,
        "cache": cache,
    }))?)
}

pub fn highlight(symbology: &Symbology) -> Result<String> {
    Ok(serde_json::to_string_pretty(
        &symbology.highlight_variant().to_dict()?,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{fixtures, species_features, write_temp_json};

    fn load(dict: &Value) -> Symbology {
        let file = write_temp_json(dict).unwrap();
        load_symbology(file.path()).unwrap()
    }

    #[test]
    fn test_describe_simple_vector() {
        let text = describe(&load(&fixtures::simple_vector_dict()));
        assert!(text.contains("kind: SIMPLE_VECTOR"));
        assert!(text.contains("describes area: true"));
        assert!(text.contains("describes radius: false"));
        assert!(text.contains("fill: rgba(255,0,0,1)"));
    }

    #[test]
    fn test_normalize_is_stable() {
        let symbology = load(&fixtures::complex_vector_dict());
        let once = normalize(&symbology).unwrap();
        let value: Value = serde_json::from_str(&once).unwrap();
        assert_eq!(value, fixtures::complex_vector_dict());
    }

    #[test]
    fn test_unsupported_kind_fails() {
        let file = write_temp_json(&json!({"symbologyType": "HEATMAP"})).unwrap();
        let err = load_symbology(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("HEATMAP"));
    }

    #[test]
    fn test_payload_requires_colorizer_raster() {
        let raster = load(&fixtures::mapping_colorizer_raster_dict());
        assert!(payload(&raster).unwrap().contains("\"breakpoints\""));

        let vector = load(&fixtures::simple_vector_dict());
        assert!(payload(&vector).is_err());
    }

    #[test]
    fn test_resolve_reports_cache() {
        let symbology = load(&fixtures::complex_point_dict());
        let mut features = species_features(&["fox", "owl"], 4);
        for feature in &mut features {
            feature.remove("name");
        }

        let output = resolve(&symbology, &features, &EngineConfig::default()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["styles"].as_array().unwrap().len(), 4);
        assert_eq!(value["cache"]["misses"], 2);
        assert_eq!(value["cache"]["hits"], 2);
        assert_eq!(value["styles"][0]["image"]["fill"]["color"], json!([255, 165, 0, 1.0]));
    }

    #[test]
    fn test_parse_feature_collection() {
        let collection = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"species": "fox"}},
                {"type": "Feature", "properties": null}
            ]
        });
        let features = parse_features(collection).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0]["species"], "fox");
        assert!(features[1].is_empty());

        assert!(parse_features(json!("nope")).is_err());
        assert!(parse_features(json!([1, 2])).is_err());
    }

    #[test]
    fn test_highlight_of_vector() {
        let output = highlight(&load(&fixtures::simple_vector_dict())).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["fillRGBA"], json!([0, 153, 255, 1]));
        assert_eq!(value["symbologyType"], "SIMPLE_VECTOR");
    }
}
