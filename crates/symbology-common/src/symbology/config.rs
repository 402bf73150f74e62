//! Editable configuration shapes for symbologies.
//!
//! Every field is optional; unset fields take the variant's defaults when a
//! symbology is built. The same shapes, plus a `symbologyType` tag, form the
//! persisted dictionaries.

use serde::{Deserialize, Serialize};

use crate::breakpoint::ColorBreakpoint;
use crate::color::Color;
use crate::colorizer::Colorizer;
use crate::unit::Unit;

/// Configuration of the vector family (simple/complex, vector/point).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorSymbologyConfig {
    #[serde(rename = "fillRGBA", default, skip_serializing_if = "Option::is_none")]
    pub fill_rgba: Option<Color>,

    #[serde(rename = "strokeRGBA", default, skip_serializing_if = "Option::is_none")]
    pub stroke_rgba: Option<Color>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colorizer: Option<Colorizer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_attribute: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_attribute: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Color>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_stroke_width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_attribute: Option<String>,
}

/// Configuration of an icon point symbology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IconSymbologyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Icon tint; only applied when not fully transparent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,

    /// Rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

/// Configuration of the raster family (plain and colorizer-backed).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterSymbologyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colorizer: Option<Colorizer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_data_color: Option<ColorBreakpoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overflow_color: Option<ColorBreakpoint>,
}

/// The re-edit projection of any symbology.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbologyConfig {
    Vector(VectorSymbologyConfig),
    Icon(IconSymbologyConfig),
    Raster(RasterSymbologyConfig),
}

/// Treat empty attribute names like unset ones.
pub(crate) fn attribute_name(name: &Option<String>) -> Option<String> {
    name.as_ref().filter(|n| !n.is_empty()).cloned()
}
