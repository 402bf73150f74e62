//! Dictionary form of symbologies.
//!
//! A dictionary is a JSON object tagged with a `symbologyType`
//! discriminant, carrying the fields of the matching configuration shape.
//! Numbers are written the way JSON producers write them: integral values
//! without a fractional part.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, SymbologyError};
use crate::symbology::{
    ColorizerRasterSymbology, ComplexPointSymbology, ComplexVectorSymbology, IconPointSymbology,
    IconSymbologyConfig, RasterSymbology, RasterSymbologyConfig, Symbology, SymbologyKind,
    VectorSymbologyConfig,
};

/// Name of the discriminant field.
pub const DISCRIMINANT_FIELD: &str = "symbologyType";

impl Symbology {
    /// Decode a tagged dictionary.
    ///
    /// Unknown discriminants fail with [`SymbologyError::UnsupportedVariant`].
    pub fn from_dict(dict: &Value) -> Result<Self> {
        let object = dict
            .as_object()
            .ok_or_else(|| SymbologyError::invalid_dict("symbology dictionary must be an object"))?;

        let tag = object
            .get(DISCRIMINANT_FIELD)
            .ok_or_else(|| SymbologyError::missing_field(DISCRIMINANT_FIELD, "untagged"))?
            .as_str()
            .ok_or_else(|| {
                SymbologyError::invalid_dict(format!("{} must be a string", DISCRIMINANT_FIELD))
            })?;

        let kind: SymbologyKind = tag.parse()?;
        debug!(kind = %kind, "Decoding symbology");

        let symbology = match kind {
            SymbologyKind::IconPoint => {
                let config: IconSymbologyConfig = decode(dict, kind)?;
                Symbology::IconPoint(IconPointSymbology::from_config(&config))
            }
            SymbologyKind::SimplePoint => {
                let config = simple_fields(vector_config(dict, kind)?, true);
                Symbology::ComplexPoint(ComplexPointSymbology::from_config(&config))
            }
            SymbologyKind::ClusteredPoint => {
                let config = vector_config(dict, kind)?;
                Symbology::ComplexPoint(ComplexPointSymbology::cluster(&config))
            }
            SymbologyKind::ComplexPoint => {
                let config = vector_config(dict, kind)?;
                Symbology::ComplexPoint(ComplexPointSymbology::from_config(&config))
            }
            SymbologyKind::SimpleVector => {
                let config = simple_fields(vector_config(dict, kind)?, false);
                Symbology::ComplexVector(ComplexVectorSymbology::from_config(&config))
            }
            SymbologyKind::ComplexVector => {
                let config = vector_config(dict, kind)?;
                Symbology::ComplexVector(ComplexVectorSymbology::from_config(&config))
            }
            SymbologyKind::Raster => {
                let config: RasterSymbologyConfig = decode(dict, kind)?;
                Symbology::Raster(RasterSymbology::from_config(&config))
            }
            SymbologyKind::MappingColorizerRaster => {
                let config: RasterSymbologyConfig = decode(dict, kind)?;
                Symbology::ColorizerRaster(ColorizerRasterSymbology::from_config(&config))
            }
        };

        Ok(symbology)
    }

    /// Encode as a tagged dictionary; the inverse of [`Symbology::from_dict`].
    ///
    /// The discriminant is canonicalized: a complex vector or point with no
    /// value-driven attributes, an empty colorizer and default text styling
    /// is written as `SIMPLE_VECTOR`/`SIMPLE_POINT`, whatever tag it was
    /// decoded from.
    pub fn to_dict(&self) -> Result<Value> {
        let kind = self.kind();
        let mut dict = match self {
            Symbology::SimpleVector(s) => to_object(&s.to_config())?,
            Symbology::SimplePoint(s) => to_object(&s.to_config())?,
            Symbology::ComplexVector(s) if kind == SymbologyKind::SimpleVector => {
                to_object(&simple_fields(s.to_config(), false))?
            }
            Symbology::ComplexVector(s) => to_object(&s.to_config())?,
            Symbology::ComplexPoint(s) if kind == SymbologyKind::SimplePoint => {
                to_object(&simple_fields(s.to_config(), true))?
            }
            Symbology::ComplexPoint(s) => to_object(&s.to_config())?,
            Symbology::IconPoint(s) => to_object(&s.to_config())?,
            Symbology::Raster(s) => to_object(&s.to_config())?,
            Symbology::ColorizerRaster(s) => to_object(&s.to_config())?,
        };

        dict.insert(
            DISCRIMINANT_FIELD.to_string(),
            Value::String(kind.as_str().to_string()),
        );

        let mut dict = Value::Object(dict);
        normalize_numbers(&mut dict);
        Ok(dict)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let dict: Value = serde_json::from_str(json)?;
        Self::from_dict(&dict)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_dict()?)?)
    }
}

fn decode<T: DeserializeOwned>(dict: &Value, kind: SymbologyKind) -> Result<T> {
    serde_json::from_value(dict.clone())
        .map_err(|e| SymbologyError::invalid_dict(format!("{}: {}", kind, e)))
}

/// Vector dictionaries must carry a fill color.
fn vector_config(dict: &Value, kind: SymbologyKind) -> Result<VectorSymbologyConfig> {
    let config: VectorSymbologyConfig = decode(dict, kind)?;
    if config.fill_rgba.is_none() {
        return Err(SymbologyError::missing_field("fillRGBA", kind.as_str()));
    }
    Ok(config)
}

/// Keep only the fields of the simple vector/point dictionaries.
fn simple_fields(config: VectorSymbologyConfig, with_radius: bool) -> VectorSymbologyConfig {
    VectorSymbologyConfig {
        fill_rgba: config.fill_rgba,
        stroke_rgba: config.stroke_rgba,
        stroke_width: config.stroke_width,
        radius: if with_radius { config.radius } else { None },
        ..Default::default()
    }
}

fn to_object<T: Serialize>(config: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(config)? {
        Value::Object(map) => Ok(map),
        other => Err(SymbologyError::invalid_dict(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

/// Largest integer an f64 holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Rewrite integral floats as integers, recursively.
pub fn normalize_numbers(value: &mut Value) {
    let integral = match value {
        Value::Array(items) => {
            items.iter_mut().for_each(normalize_numbers);
            return;
        }
        Value::Object(map) => {
            map.values_mut().for_each(normalize_numbers);
            return;
        }
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER),
        _ => None,
    };

    if let Some(f) = integral {
        *value = Value::from(f as i64);
    }
}
