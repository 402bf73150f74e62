//! Common test fixtures for symbology tests.
//!
//! This module provides pre-defined symbology dictionaries that represent
//! the layers a map client typically persists.

use serde_json::{json, Value};

/// Common RGBA color arrays for testing.
pub mod colors {
    pub const RED: [f64; 4] = [255.0, 0.0, 0.0, 1.0];
    pub const BLACK: [f64; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const WHITE: [f64; 4] = [255.0, 255.0, 255.0, 1.0];

    /// Fill used for foxes in the species colorizer
    pub const ORANGE: [f64; 4] = [255.0, 165.0, 0.0, 1.0];

    /// Fill used for owls in the species colorizer
    pub const GRAY: [f64; 4] = [128.0, 128.0, 128.0, 1.0];

    /// Semi-transparent blue
    pub const GLASS_BLUE: [f64; 4] = [0.0, 0.0, 255.0, 0.5];
}

/// The simple vector dictionary used throughout the round-trip tests.
pub fn simple_vector_dict() -> Value {
    json!({
        "symbologyType": "SIMPLE_VECTOR",
        "fillRGBA": [255, 0, 0, 1],
        "strokeRGBA": [0, 0, 0, 1],
        "strokeWidth": 1
    })
}

pub fn simple_point_dict() -> Value {
    json!({
        "symbologyType": "SIMPLE_POINT",
        "fillRGBA": [0, 0, 255, 0.5],
        "strokeRGBA": [0, 0, 0, 1],
        "strokeWidth": 2,
        "radius": 8
    })
}

/// Palette colorizer mapping `fox` to orange and `owl` to gray.
pub fn species_colorizer() -> Value {
    json!({
        "type": "palette",
        "breakpoints": [
            {"rgba": [255, 165, 0, 1], "value": "fox"},
            {"rgba": [128, 128, 128, 1], "value": "owl"}
        ]
    })
}

/// Complex point colored by `species` and labelled by `name`.
pub fn complex_point_dict() -> Value {
    json!({
        "symbologyType": "COMPLEX_POINT",
        "fillRGBA": [255, 0, 0, 1],
        "strokeRGBA": [0, 0, 0, 1],
        "strokeWidth": 1,
        "radius": 5,
        "colorizer": species_colorizer(),
        "colorAttribute": "species",
        "textAttribute": "name",
        "textColor": [255, 255, 255, 1],
        "textStrokeWidth": 1
    })
}

/// Complex point whose radius is taken from the `population` attribute.
pub fn sized_point_dict() -> Value {
    json!({
        "symbologyType": "COMPLEX_POINT",
        "fillRGBA": [0, 128, 0, 1],
        "strokeRGBA": [0, 0, 0, 1],
        "strokeWidth": 1,
        "radius": 4,
        "radiusAttribute": "population"
    })
}

/// Complex vector labelled by `label`, colored by a numeric gradient on
/// `depth`.
pub fn complex_vector_dict() -> Value {
    json!({
        "symbologyType": "COMPLEX_VECTOR",
        "fillRGBA": [255, 0, 0, 1],
        "strokeRGBA": [0, 0, 0, 1],
        "strokeWidth": 3,
        "colorizer": {
            "type": "gradient",
            "breakpoints": [
                {"rgba": [0, 0, 255, 1], "value": 0},
                {"rgba": [0, 255, 0, 1], "value": 100},
                {"rgba": [255, 255, 0, 1], "value": 1000}
            ]
        },
        "colorAttribute": "depth",
        "textAttribute": "label",
        "textColor": [0, 0, 0, 1],
        "textStrokeWidth": 1
    })
}

/// Clustered point with only its colors given; the reserved cluster
/// attributes are filled in on decode.
pub fn clustered_point_dict() -> Value {
    json!({
        "symbologyType": "CLUSTERED_POINT",
        "fillRGBA": [255, 0, 0, 1],
        "strokeRGBA": [0, 0, 0, 1],
        "strokeWidth": 1,
        "radius": 5
    })
}

pub fn icon_point_dict() -> Value {
    json!({
        "symbologyType": "ICON_POINT",
        "uri": "assets/icons/lighthouse.png",
        "color": [255, 0, 0, 0.8],
        "rotation": 90,
        "scale": 1.5,
        "opacity": 0.9
    })
}

pub fn raster_dict() -> Value {
    json!({
        "symbologyType": "RASTER",
        "opacity": 0.8,
        "hue": 0,
        "saturation": 0,
        "unit": {
            "measurement": "temperature",
            "unit": "C",
            "min": -40,
            "max": 40,
            "interpolation": 1,
            "classes": []
        }
    })
}

pub fn mapping_colorizer_raster_dict() -> Value {
    json!({
        "symbologyType": "MAPPING_COLORIZER_RASTER",
        "opacity": 1,
        "hue": 0,
        "saturation": 0,
        "unit": {
            "measurement": "elevation",
            "unit": "m",
            "min": 0,
            "max": 8848,
            "interpolation": 1,
            "classes": []
        },
        "colorizer": {
            "type": "gradient",
            "breakpoints": [
                {"rgba": [0, 0, 0, 1], "value": 0},
                {"rgba": [255, 255, 255, 1], "value": 8848}
            ]
        },
        "noDataColor": {"rgba": [0, 0, 0, 0], "value": "NoData"},
        "overflowColor": {"rgba": [255, 0, 255, 1], "value": "Overflow"}
    })
}

/// Colorizer raster over a discrete land cover unit, without a colorizer.
pub fn land_cover_raster_dict() -> Value {
    json!({
        "symbologyType": "MAPPING_COLORIZER_RASTER",
        "unit": {
            "measurement": "land cover",
            "unit": "class",
            "interpolation": 2,
            "classes": [[1, "water"], [2, "forest"], [3, "urban"]]
        }
    })
}

/// One dictionary per discriminant, keyed by the discriminant name.
pub fn all_symbology_dicts() -> Vec<(&'static str, Value)> {
    vec![
        ("RASTER", raster_dict()),
        ("SIMPLE_POINT", simple_point_dict()),
        ("CLUSTERED_POINT", clustered_point_dict()),
        ("SIMPLE_VECTOR", simple_vector_dict()),
        ("MAPPING_COLORIZER_RASTER", mapping_colorizer_raster_dict()),
        ("ICON_POINT", icon_point_dict()),
        ("COMPLEX_POINT", complex_point_dict()),
        ("COMPLEX_VECTOR", complex_vector_dict()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_tagged() {
        for (name, dict) in all_symbology_dicts() {
            assert_eq!(dict["symbologyType"], name);
        }
    }

    #[test]
    fn test_fixture_names_are_unique() {
        let mut names: Vec<_> = all_symbology_dicts().into_iter().map(|(n, _)| n).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 8);
    }
}
