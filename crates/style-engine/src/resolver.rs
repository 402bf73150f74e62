//! Style resolution: from a symbology to a style provider.
//!
//! Symbologies without value-driven attributes resolve to one constant
//! style. Complex symbologies resolve to a [`FeatureStyler`] that builds a
//! style per distinct combination of attribute values and caches it.
//!
//! ```text
//! resolve(symbology)
//!      │
//!      ├─► simple vector/point, icon ──► StyleProvider::Constant
//!      │
//!      ├─► complex vector/point ───────► StyleProvider::PerFeature
//!      │                                      │
//!      │                      style_for(feature)
//!      │                                      ├─► key from attribute values
//!      │                                      ├─► cache hit: shared style
//!      │                                      └─► miss: build and insert
//!      │
//!      └─► raster ─────────────────────► EngineError::NotStylable
//! ```

use std::sync::Arc;

use symbology_common::symbology::{
    ComplexAttributes, ComplexPointSymbology, ComplexVectorSymbology, IconPointSymbology,
    VectorBase,
};
use symbology_common::{Color, Symbology, SymbologyError, SymbologyKind};
use tracing::{debug, trace};

use crate::cache::{style_key, CacheStats, StyleCache};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::feature::{AttributeValue, Feature};
use crate::style::{Fill, IconStyle, Stroke, Style, TextStyle};

/// Turns symbologies into style providers.
#[derive(Debug, Clone, Default)]
pub struct StyleResolver {
    config: EngineConfig,
}

impl StyleResolver {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build a provider for a vector symbology.
    ///
    /// Each call returns a provider with its own empty cache. Raster
    /// symbologies fail with [`EngineError::NotStylable`].
    pub fn resolve(&self, symbology: &Symbology) -> Result<StyleProvider> {
        let kind = symbology.kind();
        debug!(kind = %kind, "Resolving style provider");

        let provider = match symbology {
            Symbology::SimpleVector(s) => StyleProvider::constant(area_style(&s.base)),
            Symbology::SimplePoint(s) => {
                StyleProvider::constant(circle_style(&s.base, s.radius))
            }
            Symbology::ComplexVector(s) if kind == SymbologyKind::SimpleVector => {
                StyleProvider::constant(area_style(&s.base))
            }
            Symbology::ComplexPoint(s) if kind == SymbologyKind::SimplePoint => {
                StyleProvider::constant(circle_style(&s.base, s.radius))
            }
            Symbology::ComplexVector(s) => StyleProvider::PerFeature(FeatureStyler::new(
                StyledSymbology::Vector(s.clone()),
                self.config.style_cache_capacity,
            )),
            Symbology::ComplexPoint(s) => StyleProvider::PerFeature(FeatureStyler::new(
                StyledSymbology::Point(s.clone()),
                self.config.style_cache_capacity,
            )),
            Symbology::IconPoint(s) => StyleProvider::constant(self.icon_style(s)),
            Symbology::Raster(_) | Symbology::ColorizerRaster(_) => {
                return Err(EngineError::NotStylable(kind));
            }
        };

        Ok(provider)
    }

    /// Provider for selected features: the highlight variant, resolved.
    pub fn resolve_highlight(&self, symbology: &Symbology) -> Result<StyleProvider> {
        self.resolve(&symbology.highlight_variant())
    }

    fn icon_style(&self, icon: &IconPointSymbology) -> Style {
        let src = if icon.uri.trim().is_empty() {
            self.config.default_icon_uri.clone()
        } else {
            icon.uri.clone()
        };

        Style::icon(IconStyle {
            src,
            anchor: [0.5, 0.5],
            rotation: icon.rotation.to_radians(),
            scale: icon.scale,
            opacity: icon.opacity,
            color: (icon.tint.a > 0.0).then_some(icon.tint),
        })
    }
}

fn area_style(base: &VectorBase) -> Style {
    Style::area(base.fill_color(), Stroke::from_base(base))
}

fn circle_style(base: &VectorBase, radius: f64) -> Style {
    Style::circle(radius, base.fill_color(), Stroke::from_base(base))
}

/// Source of styles for the features of one layer.
pub enum StyleProvider {
    /// The same style for every feature.
    Constant(Arc<Style>),
    /// A style computed from each feature's attributes.
    PerFeature(FeatureStyler),
}

impl StyleProvider {
    fn constant(style: Style) -> Self {
        StyleProvider::Constant(Arc::new(style))
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, StyleProvider::Constant(_))
    }

    /// Style of one feature. Never fails; unusable attribute values fall
    /// back to the symbology's base color and radius.
    pub fn style_for(&mut self, feature: &dyn Feature) -> Arc<Style> {
        match self {
            StyleProvider::Constant(style) => Arc::clone(style),
            StyleProvider::PerFeature(styler) => styler.style_for(feature),
        }
    }

    /// Cache statistics; constant providers have no cache.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        match self {
            StyleProvider::Constant(_) => None,
            StyleProvider::PerFeature(styler) => Some(styler.cache_stats()),
        }
    }

    pub fn clear_cache(&mut self) {
        if let StyleProvider::PerFeature(styler) = self {
            styler.clear_cache();
        }
    }
}

impl std::fmt::Debug for StyleProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleProvider::Constant(style) => f.debug_tuple("Constant").field(style).finish(),
            StyleProvider::PerFeature(styler) => f
                .debug_struct("PerFeature")
                .field("stats", &styler.cache_stats())
                .finish(),
        }
    }
}

#[derive(Debug, Clone)]
enum StyledSymbology {
    Vector(ComplexVectorSymbology),
    Point(ComplexPointSymbology),
}

impl StyledSymbology {
    fn base(&self) -> &VectorBase {
        match self {
            StyledSymbology::Vector(s) => &s.base,
            StyledSymbology::Point(s) => &s.base,
        }
    }

    fn attributes(&self) -> &ComplexAttributes {
        match self {
            StyledSymbology::Vector(s) => &s.attributes,
            StyledSymbology::Point(s) => &s.attributes,
        }
    }

    fn radius_attribute(&self) -> Option<&str> {
        match self {
            StyledSymbology::Vector(_) => None,
            StyledSymbology::Point(s) => s.radius_attribute.as_deref(),
        }
    }
}

/// Per-feature style function of a complex symbology, with its own cache.
///
/// The symbology is copied in; later edits to the caller's symbology need a
/// new styler.
pub struct FeatureStyler {
    symbology: StyledSymbology,
    cache: StyleCache,
}

/// Attribute values of one feature that determine its style.
struct FeatureValues {
    color: Option<AttributeValue>,
    text: Option<AttributeValue>,
    radius: Option<AttributeValue>,
}

impl FeatureStyler {
    fn new(symbology: StyledSymbology, capacity: usize) -> Self {
        Self {
            symbology,
            cache: StyleCache::new(capacity),
        }
    }

    pub fn style_for(&mut self, feature: &dyn Feature) -> Arc<Style> {
        let attributes = self.symbology.attributes();
        let lookup = |name: Option<&str>| name.and_then(|name| feature.attribute(name));

        let values = FeatureValues {
            color: lookup(attributes.color_attribute.as_deref()),
            text: lookup(attributes.text_attribute.as_deref()),
            radius: lookup(self.symbology.radius_attribute()),
        };

        let mut key_parts = vec![values.color.as_ref(), values.text.as_ref()];
        if let StyledSymbology::Point(_) = self.symbology {
            key_parts.push(values.radius.as_ref());
        }
        let key = style_key(&key_parts);

        let symbology = &self.symbology;
        self.cache.get_or_insert_with(key, || {
            trace!("Building style for new attribute combination");
            build_style(symbology, &values)
        })
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

fn build_style(symbology: &StyledSymbology, values: &FeatureValues) -> Style {
    let base = symbology.base();
    let attributes = symbology.attributes();

    let fill = values
        .color
        .as_ref()
        .and_then(|value| feature_color(attributes, value))
        .unwrap_or_else(|| base.fill_color());
    let stroke = Stroke::from_base(base);
    let text = values
        .text
        .as_ref()
        .and_then(|value| text_style(base, attributes, value));

    let style = match symbology {
        StyledSymbology::Vector(_) => Style::area(fill, stroke),
        StyledSymbology::Point(point) => {
            let radius = values
                .radius
                .as_ref()
                .and_then(|value| feature_radius(point, value))
                .unwrap_or(point.radius);
            Style::circle(radius, fill, stroke)
        }
    };

    style.with_text(text)
}

/// Colorizer color of a feature value, if a breakpoint matches.
fn feature_color(attributes: &ComplexAttributes, value: &AttributeValue) -> Option<Color> {
    if let AttributeValue::Number(n) = value {
        if n.is_nan() {
            let err = SymbologyError::invalid_attribute(
                attributes.color_attribute.as_deref().unwrap_or_default(),
                "NaN is not comparable",
            );
            debug!(error = %err, "Using base fill color");
            return None;
        }
    }

    attributes
        .colorizer
        .breakpoint_for_value(&value.into(), false)
        .map(|bp| bp.rgba)
}

fn feature_radius(point: &ComplexPointSymbology, value: &AttributeValue) -> Option<f64> {
    match value.as_number() {
        Some(radius) if radius.is_finite() && radius > 0.0 => Some(radius),
        _ => {
            let err = SymbologyError::invalid_attribute(
                point.radius_attribute.as_deref().unwrap_or_default(),
                format!("'{}' is not a positive number", value),
            );
            debug!(error = %err, "Using base radius");
            None
        }
    }
}

/// Label style; empty labels are not drawn.
fn text_style(
    base: &VectorBase,
    attributes: &ComplexAttributes,
    value: &AttributeValue,
) -> Option<TextStyle> {
    let text = value.to_string();
    if text.is_empty() {
        return None;
    }

    Some(TextStyle {
        text,
        fill: Fill {
            color: attributes.text_color,
        },
        stroke: Stroke {
            color: base.stroke_color(),
            width: attributes.text_stroke_width,
        },
    })
}
