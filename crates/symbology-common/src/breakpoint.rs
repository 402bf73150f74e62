//! Color breakpoints: a color paired with a numeric or labelled value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::Color;

/// The value side of a breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BreakpointValue {
    Number(f64),
    Text(String),
}

impl BreakpointValue {
    /// Numeric view of the value; text is parsed when it holds a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            BreakpointValue::Number(n) => Some(*n),
            BreakpointValue::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            BreakpointValue::Text(s) => Some(s),
            BreakpointValue::Number(_) => None,
        }
    }
}

impl fmt::Display for BreakpointValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakpointValue::Number(n) => write!(f, "{}", n),
            BreakpointValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for BreakpointValue {
    fn from(value: f64) -> Self {
        BreakpointValue::Number(value)
    }
}

impl From<&str> for BreakpointValue {
    fn from(value: &str) -> Self {
        BreakpointValue::Text(value.to_string())
    }
}

impl From<String> for BreakpointValue {
    fn from(value: String) -> Self {
        BreakpointValue::Text(value)
    }
}

/// A single (value, color) pair of a colorizer, also used to wrap the
/// fill, stroke, no-data and overflow colors of a symbology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorBreakpoint {
    pub rgba: Color,
    pub value: BreakpointValue,
}

impl ColorBreakpoint {
    pub fn new(rgba: Color, value: impl Into<BreakpointValue>) -> Self {
        Self {
            rgba,
            value: value.into(),
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.rgba = color;
    }

    /// Projection to the raster service's breakpoint format.
    pub fn to_mapping_breakpoint(&self) -> MappingBreakpoint {
        MappingBreakpoint {
            value: self.value.as_number(),
            color: self.rgba.css_rgba(),
        }
    }
}

/// Breakpoint as sent to the raster tile service: value and color only.
///
/// Labels never reach the service; a value that is not numeric is omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingBreakpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::TRANSPARENT;

    #[test]
    fn test_untagged_value() {
        let bp: ColorBreakpoint =
            serde_json::from_str(r#"{"rgba":[255,165,0,1],"value":"fox"}"#).unwrap();
        assert_eq!(bp.value, BreakpointValue::Text("fox".into()));

        let bp: ColorBreakpoint =
            serde_json::from_str(r#"{"rgba":[0,0,0,1],"value":12.5}"#).unwrap();
        assert_eq!(bp.value.as_number(), Some(12.5));
    }

    #[test]
    fn test_mapping_breakpoint_drops_labels() {
        let nodata = ColorBreakpoint::new(TRANSPARENT, "NoData");
        let json = serde_json::to_string(&nodata.to_mapping_breakpoint()).unwrap();
        assert_eq!(json, r#"{"color":"rgba(0,0,0,0)"}"#);

        let numeric = ColorBreakpoint::new(TRANSPARENT, "42");
        assert_eq!(numeric.to_mapping_breakpoint().value, Some(42.0));
    }
}
