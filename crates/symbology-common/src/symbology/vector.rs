//! Vector symbologies: areas, lines and points.

use crate::breakpoint::ColorBreakpoint;
use crate::color::{
    Color, DEFAULT_VECTOR_FILL_COLOR, DEFAULT_VECTOR_STROKE_COLOR, TRANSPARENT, WHITE,
};
use crate::colorizer::Colorizer;

use super::config::{attribute_name, IconSymbologyConfig, VectorSymbologyConfig};

/// Default radius of point symbologies, in pixels.
pub const DEFAULT_POINT_RADIUS: f64 = 5.0;

pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

pub const DEFAULT_ICON_URI: &str = "assets/icons/happyWhale.png";

/// Radius field written by the upstream point clustering transform.
pub const CLUSTER_RADIUS_ATTRIBUTE: &str = "___radius";

/// Point count field written by the upstream point clustering transform.
pub const CLUSTER_COUNT_ATTRIBUTE: &str = "___numberOfPoints";

/// Text stroke width used when none is configured: 10% of the stroke
/// width, rounded up.
pub fn default_text_stroke_width(stroke_width: f64) -> f64 {
    (stroke_width * 0.1).ceil()
}

/// Fill, stroke and stroke width shared by all area-describing variants.
///
/// Colors are wrapped in breakpoints for editing; the breakpoint labels are
/// display-only and do not take part in equality.
#[derive(Debug, Clone)]
pub struct VectorBase {
    pub fill: ColorBreakpoint,
    pub stroke: ColorBreakpoint,
    pub stroke_width: f64,
}

impl Default for VectorBase {
    fn default() -> Self {
        Self {
            fill: ColorBreakpoint::new(DEFAULT_VECTOR_FILL_COLOR, "Default fill color"),
            stroke: ColorBreakpoint::new(DEFAULT_VECTOR_STROKE_COLOR, "Default stroke color"),
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl PartialEq for VectorBase {
    fn eq(&self, other: &Self) -> bool {
        self.fill.rgba == other.fill.rgba
            && self.stroke.rgba == other.stroke.rgba
            && self.stroke_width == other.stroke_width
    }
}

impl VectorBase {
    pub fn from_config(config: &VectorSymbologyConfig) -> Self {
        let mut base = Self::default();
        if let Some(fill) = config.fill_rgba {
            base.fill.set_color(fill);
        }
        if let Some(stroke) = config.stroke_rgba {
            base.stroke.set_color(stroke);
        }
        if let Some(width) = config.stroke_width {
            base.stroke_width = width;
        }
        base
    }

    pub fn fill_color(&self) -> Color {
        self.fill.rgba
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke.rgba
    }

    fn write_config(&self, config: &mut VectorSymbologyConfig) {
        config.fill_rgba = Some(self.fill_color());
        config.stroke_rgba = Some(self.stroke_color());
        config.stroke_width = Some(self.stroke_width);
    }
}

/// Value-driven coloring and labelling shared by the complex variants.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexAttributes {
    pub colorizer: Colorizer,
    pub color_attribute: Option<String>,
    pub text_attribute: Option<String>,
    pub text_color: Color,
    pub text_stroke_width: f64,
}

impl ComplexAttributes {
    pub fn from_config(config: &VectorSymbologyConfig, stroke_width: f64) -> Self {
        Self {
            colorizer: config.colorizer.clone().unwrap_or_else(Colorizer::empty),
            color_attribute: attribute_name(&config.color_attribute),
            text_attribute: attribute_name(&config.text_attribute),
            text_color: config.text_color.unwrap_or(WHITE),
            text_stroke_width: config
                .text_stroke_width
                .unwrap_or_else(|| default_text_stroke_width(stroke_width)),
        }
    }

    /// Plain attributes: nothing value-driven and default text styling.
    pub fn is_plain(&self, stroke_width: f64) -> bool {
        self.color_attribute.is_none()
            && self.text_attribute.is_none()
            && self.colorizer.is_empty()
            && self.text_color == WHITE
            && self.text_stroke_width == default_text_stroke_width(stroke_width)
    }

    pub fn set_color_attribute(&mut self, name: impl Into<String>, colorizer: Colorizer) {
        self.colorizer = colorizer;
        self.color_attribute = Some(name.into()).filter(|n: &String| !n.is_empty());
    }

    pub fn unset_color_attribute(&mut self) {
        self.color_attribute = None;
        self.colorizer = Colorizer::empty();
    }

    /// Replace the colorizer if it differs; returns whether it changed.
    pub fn set_or_update_colorizer(&mut self, colorizer: Colorizer) -> bool {
        if self.colorizer == colorizer {
            return false;
        }
        self.colorizer = colorizer;
        true
    }

    fn write_config(&self, config: &mut VectorSymbologyConfig) {
        config.colorizer = Some(self.colorizer.clone());
        config.color_attribute = self.color_attribute.clone();
        config.text_attribute = self.text_attribute.clone();
        config.text_color = Some(self.text_color);
        config.text_stroke_width = Some(self.text_stroke_width);
    }
}

/// Constant fill and stroke for areas and lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleVectorSymbology {
    pub base: VectorBase,
}

impl SimpleVectorSymbology {
    pub fn from_config(config: &VectorSymbologyConfig) -> Self {
        Self {
            base: VectorBase::from_config(config),
        }
    }

    pub fn to_config(&self) -> VectorSymbologyConfig {
        let mut config = VectorSymbologyConfig::default();
        self.base.write_config(&mut config);
        config
    }

    /// The equivalent complex symbology without value-driven attributes.
    pub fn to_complex(&self) -> ComplexVectorSymbology {
        ComplexVectorSymbology::from_config(&self.to_config())
    }
}

/// Constant circles of a fixed radius.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplePointSymbology {
    pub base: VectorBase,
    pub radius: f64,
}

impl Default for SimplePointSymbology {
    fn default() -> Self {
        Self {
            base: VectorBase::default(),
            radius: DEFAULT_POINT_RADIUS,
        }
    }
}

impl SimplePointSymbology {
    pub fn from_config(config: &VectorSymbologyConfig) -> Self {
        Self {
            base: VectorBase::from_config(config),
            radius: config.radius.unwrap_or(DEFAULT_POINT_RADIUS),
        }
    }

    pub fn to_config(&self) -> VectorSymbologyConfig {
        let mut config = VectorSymbologyConfig::default();
        self.base.write_config(&mut config);
        config.radius = Some(self.radius);
        config
    }

    pub fn to_complex(&self) -> ComplexPointSymbology {
        ComplexPointSymbology::from_config(&self.to_config())
    }
}

/// Areas and lines colored and labelled from feature attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexVectorSymbology {
    pub base: VectorBase,
    pub attributes: ComplexAttributes,
}

impl ComplexVectorSymbology {
    pub fn from_config(config: &VectorSymbologyConfig) -> Self {
        let base = VectorBase::from_config(config);
        let attributes = ComplexAttributes::from_config(config, base.stroke_width);
        Self { base, attributes }
    }

    /// Whether this symbology has nothing value-driven and encodes as a
    /// simple vector.
    pub fn is_plain(&self) -> bool {
        self.attributes.is_plain(self.base.stroke_width)
    }

    pub fn to_config(&self) -> VectorSymbologyConfig {
        let mut config = VectorSymbologyConfig::default();
        self.base.write_config(&mut config);
        self.attributes.write_config(&mut config);
        config
    }
}

/// Circles colored, sized and labelled from feature attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexPointSymbology {
    pub base: VectorBase,
    pub attributes: ComplexAttributes,
    pub radius: f64,
    pub radius_attribute: Option<String>,
}

impl ComplexPointSymbology {
    pub fn from_config(config: &VectorSymbologyConfig) -> Self {
        let base = VectorBase::from_config(config);
        let attributes = ComplexAttributes::from_config(config, base.stroke_width);
        Self {
            base,
            attributes,
            radius: config.radius.unwrap_or(DEFAULT_POINT_RADIUS),
            radius_attribute: attribute_name(&config.radius_attribute),
        }
    }

    /// Point symbology for the output of the clustering transform: radius
    /// and label always come from the reserved cluster fields.
    pub fn cluster(config: &VectorSymbologyConfig) -> Self {
        let mut config = config.clone();
        config.radius_attribute = Some(CLUSTER_RADIUS_ATTRIBUTE.to_string());
        config.text_attribute = Some(CLUSTER_COUNT_ATTRIBUTE.to_string());
        Self::from_config(&config)
    }

    pub fn is_cluster(&self) -> bool {
        self.radius_attribute.as_deref() == Some(CLUSTER_RADIUS_ATTRIBUTE)
            && self.attributes.text_attribute.as_deref() == Some(CLUSTER_COUNT_ATTRIBUTE)
    }

    /// Whether this symbology has nothing value-driven and encodes as a
    /// simple point.
    pub fn is_plain(&self) -> bool {
        self.radius_attribute.is_none() && self.attributes.is_plain(self.base.stroke_width)
    }

    pub fn to_config(&self) -> VectorSymbologyConfig {
        let mut config = VectorSymbologyConfig::default();
        self.base.write_config(&mut config);
        self.attributes.write_config(&mut config);
        config.radius = Some(self.radius);
        config.radius_attribute = self.radius_attribute.clone();
        config
    }
}

/// Points drawn as an image.
#[derive(Debug, Clone, PartialEq)]
pub struct IconPointSymbology {
    pub uri: String,
    pub tint: Color,
    /// Rotation in degrees.
    pub rotation: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl Default for IconPointSymbology {
    fn default() -> Self {
        Self {
            uri: DEFAULT_ICON_URI.to_string(),
            tint: TRANSPARENT,
            rotation: 0.0,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

impl IconPointSymbology {
    pub fn from_config(config: &IconSymbologyConfig) -> Self {
        let defaults = Self::default();
        Self {
            uri: config.uri.clone().unwrap_or(defaults.uri),
            tint: config.color.unwrap_or(defaults.tint),
            rotation: config.rotation.unwrap_or(defaults.rotation),
            scale: config.scale.unwrap_or(defaults.scale),
            opacity: config.opacity.unwrap_or(defaults.opacity),
        }
    }

    pub fn to_config(&self) -> IconSymbologyConfig {
        IconSymbologyConfig {
            uri: Some(self.uri.clone()),
            color: (self.tint != TRANSPARENT).then_some(self.tint),
            rotation: Some(self.rotation),
            scale: Some(self.scale),
            opacity: Some(self.opacity),
        }
    }
}
