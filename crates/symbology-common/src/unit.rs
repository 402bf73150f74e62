//! Measurement units attached to raster data.

use serde::{Deserialize, Serialize};

/// How values of a unit relate to each other.
///
/// Serialized as its numeric code (`0`, `1`, `2`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Interpolation {
    #[default]
    Unknown,
    Continuous,
    Discrete,
}

impl From<Interpolation> for u8 {
    fn from(interpolation: Interpolation) -> Self {
        match interpolation {
            Interpolation::Unknown => 0,
            Interpolation::Continuous => 1,
            Interpolation::Discrete => 2,
        }
    }
}

impl TryFrom<u8> for Interpolation {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Interpolation::Unknown),
            1 => Ok(Interpolation::Continuous),
            2 => Ok(Interpolation::Discrete),
            other => Err(format!("unknown interpolation code {}", other)),
        }
    }
}

/// A measurement unit with an optional declared value range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub measurement: String,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default)]
    pub interpolation: Interpolation,
    /// Class values and their labels, for discrete units.
    #[serde(default)]
    pub classes: Vec<(f64, String)>,
}

impl Unit {
    pub fn new(measurement: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            measurement: measurement.into(),
            unit: unit.into(),
            min: None,
            max: None,
            interpolation: Interpolation::Unknown,
            classes: Vec::new(),
        }
    }

    /// The catch-all unit for data without a declared measurement.
    pub fn default_unit() -> Self {
        Self::new("raw", "unknown")
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn with_class(mut self, value: f64, label: impl Into<String>) -> Self {
        self.classes.push((value, label.into()));
        self
    }

    pub fn range(&self) -> Option<(f64, f64)> {
        Some((self.min?, self.max?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_dict() {
        let json = r#"{"measurement":"temperature","unit":"C","min":-40,"max":40,"interpolation":1,"classes":[]}"#;
        let unit: Unit = serde_json::from_str(json).unwrap();
        assert_eq!(unit.interpolation, Interpolation::Continuous);
        assert_eq!(unit.range(), Some((-40.0, 40.0)));
    }

    #[test]
    fn test_unknown_interpolation_code() {
        let json = r#"{"measurement":"x","unit":"y","interpolation":7}"#;
        assert!(serde_json::from_str::<Unit>(json).is_err());
    }

    #[test]
    fn test_classes() {
        let json = r#"{"measurement":"landcover","unit":"class","interpolation":2,"classes":[[1,"water"],[2,"forest"]]}"#;
        let unit: Unit = serde_json::from_str(json).unwrap();
        assert_eq!(unit.classes[1], (2.0, "forest".to_string()));
        assert_eq!(unit.range(), None);
    }
}
