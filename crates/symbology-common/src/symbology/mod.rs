//! The symbology variant model.
//!
//! A [`Symbology`] is a closed set of styling descriptions for vector and
//! raster layers. Capabilities that the variants share (area/radius
//! description, highlighting, configuration) are plain functions matching
//! on the variant.
//!
//! Simple vector and simple point symbologies have a complex counterpart
//! without value-driven attributes (see [`ComplexVectorSymbology::is_plain`]);
//! the two forms encode to the same dictionary and compare equal.

pub mod config;
pub mod raster;
pub mod vector;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::color::{DEFAULT_VECTOR_HIGHLIGHT_FILL_COLOR, DEFAULT_VECTOR_HIGHLIGHT_STROKE_COLOR};
use crate::error::SymbologyError;

pub use config::{
    IconSymbologyConfig, RasterSymbologyConfig, SymbologyConfig, VectorSymbologyConfig,
};
pub use raster::{ColorizerRasterSymbology, MappingColorizerPayload, RasterSymbology};
pub use vector::{
    default_text_stroke_width, ComplexAttributes, ComplexPointSymbology, ComplexVectorSymbology,
    IconPointSymbology, SimplePointSymbology, SimpleVectorSymbology, VectorBase,
    CLUSTER_COUNT_ATTRIBUTE, CLUSTER_RADIUS_ATTRIBUTE, DEFAULT_ICON_URI, DEFAULT_POINT_RADIUS,
    DEFAULT_STROKE_WIDTH,
};

/// Discriminant of a symbology dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbologyKind {
    Raster,
    SimplePoint,
    ClusteredPoint,
    SimpleVector,
    MappingColorizerRaster,
    IconPoint,
    ComplexPoint,
    ComplexVector,
}

impl SymbologyKind {
    pub const ALL: [SymbologyKind; 8] = [
        SymbologyKind::Raster,
        SymbologyKind::SimplePoint,
        SymbologyKind::ClusteredPoint,
        SymbologyKind::SimpleVector,
        SymbologyKind::MappingColorizerRaster,
        SymbologyKind::IconPoint,
        SymbologyKind::ComplexPoint,
        SymbologyKind::ComplexVector,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SymbologyKind::Raster => "RASTER",
            SymbologyKind::SimplePoint => "SIMPLE_POINT",
            SymbologyKind::ClusteredPoint => "CLUSTERED_POINT",
            SymbologyKind::SimpleVector => "SIMPLE_VECTOR",
            SymbologyKind::MappingColorizerRaster => "MAPPING_COLORIZER_RASTER",
            SymbologyKind::IconPoint => "ICON_POINT",
            SymbologyKind::ComplexPoint => "COMPLEX_POINT",
            SymbologyKind::ComplexVector => "COMPLEX_VECTOR",
        }
    }

    pub fn is_raster(&self) -> bool {
        matches!(
            self,
            SymbologyKind::Raster | SymbologyKind::MappingColorizerRaster
        )
    }
}

impl fmt::Display for SymbologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymbologyKind {
    type Err = SymbologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SymbologyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SymbologyError::UnsupportedVariant(s.to_string()))
    }
}

/// A renderable styling description for one layer.
#[derive(Debug, Clone)]
pub enum Symbology {
    SimpleVector(SimpleVectorSymbology),
    SimplePoint(SimplePointSymbology),
    ComplexVector(ComplexVectorSymbology),
    ComplexPoint(ComplexPointSymbology),
    IconPoint(IconPointSymbology),
    Raster(RasterSymbology),
    ColorizerRaster(ColorizerRasterSymbology),
}

impl Symbology {
    /// The discriminant this symbology encodes with.
    pub fn kind(&self) -> SymbologyKind {
        match self {
            Symbology::SimpleVector(_) => SymbologyKind::SimpleVector,
            Symbology::SimplePoint(_) => SymbologyKind::SimplePoint,
            Symbology::ComplexVector(s) if s.is_plain() => SymbologyKind::SimpleVector,
            Symbology::ComplexVector(_) => SymbologyKind::ComplexVector,
            Symbology::ComplexPoint(s) if s.is_cluster() => SymbologyKind::ClusteredPoint,
            Symbology::ComplexPoint(s) if s.is_plain() => SymbologyKind::SimplePoint,
            Symbology::ComplexPoint(_) => SymbologyKind::ComplexPoint,
            Symbology::IconPoint(_) => SymbologyKind::IconPoint,
            Symbology::Raster(_) => SymbologyKind::Raster,
            Symbology::ColorizerRaster(_) => SymbologyKind::MappingColorizerRaster,
        }
    }

    pub fn describes_area(&self) -> bool {
        matches!(
            self,
            Symbology::SimpleVector(_)
                | Symbology::SimplePoint(_)
                | Symbology::ComplexVector(_)
                | Symbology::ComplexPoint(_)
        )
    }

    pub fn describes_radius(&self) -> bool {
        matches!(self, Symbology::SimplePoint(_) | Symbology::ComplexPoint(_))
    }

    pub fn is_raster(&self) -> bool {
        matches!(self, Symbology::Raster(_) | Symbology::ColorizerRaster(_))
    }

    /// Strict equality against a possibly absent operand.
    pub fn equals(&self, other: Option<&Symbology>) -> bool {
        other.is_some_and(|other| self == other)
    }

    /// Fill, stroke and stroke width, for the area-describing variants.
    pub fn vector_base(&self) -> Option<&VectorBase> {
        match self {
            Symbology::SimpleVector(s) => Some(&s.base),
            Symbology::SimplePoint(s) => Some(&s.base),
            Symbology::ComplexVector(s) => Some(&s.base),
            Symbology::ComplexPoint(s) => Some(&s.base),
            _ => None,
        }
    }

    fn vector_base_mut(&mut self) -> Option<&mut VectorBase> {
        match self {
            Symbology::SimpleVector(s) => Some(&mut s.base),
            Symbology::SimplePoint(s) => Some(&mut s.base),
            Symbology::ComplexVector(s) => Some(&mut s.base),
            Symbology::ComplexPoint(s) => Some(&mut s.base),
            _ => None,
        }
    }

    /// The plain raster part of either raster variant.
    pub fn as_raster(&self) -> Option<&RasterSymbology> {
        match self {
            Symbology::Raster(r) => Some(r),
            Symbology::ColorizerRaster(c) => Some(&c.raster),
            _ => None,
        }
    }

    /// A copy drawn with the highlight fill and stroke, for selected
    /// features. Variants without fill and stroke are copied unchanged.
    pub fn highlight_variant(&self) -> Symbology {
        let mut highlight = self.clone();
        if let Some(base) = highlight.vector_base_mut() {
            base.fill.set_color(DEFAULT_VECTOR_HIGHLIGHT_FILL_COLOR);
            base.stroke.set_color(DEFAULT_VECTOR_HIGHLIGHT_STROKE_COLOR);
        }
        highlight
    }

    /// The re-edit projection.
    pub fn to_config(&self) -> SymbologyConfig {
        match self {
            Symbology::SimpleVector(s) => SymbologyConfig::Vector(s.to_config()),
            Symbology::SimplePoint(s) => SymbologyConfig::Vector(s.to_config()),
            Symbology::ComplexVector(s) => SymbologyConfig::Vector(s.to_config()),
            Symbology::ComplexPoint(s) => SymbologyConfig::Vector(s.to_config()),
            Symbology::IconPoint(s) => SymbologyConfig::Icon(s.to_config()),
            Symbology::Raster(s) => SymbologyConfig::Raster(s.to_config()),
            Symbology::ColorizerRaster(s) => SymbologyConfig::Raster(s.to_config()),
        }
    }

    /// Simple variants in their complex form; everything else as is.
    fn canonical(&self) -> Cow<'_, Symbology> {
        match self {
            Symbology::SimpleVector(s) => Cow::Owned(Symbology::ComplexVector(s.to_complex())),
            Symbology::SimplePoint(s) => Cow::Owned(Symbology::ComplexPoint(s.to_complex())),
            other => Cow::Borrowed(other),
        }
    }
}

impl PartialEq for Symbology {
    fn eq(&self, other: &Self) -> bool {
        match (self.canonical().as_ref(), other.canonical().as_ref()) {
            (Symbology::ComplexVector(a), Symbology::ComplexVector(b)) => a == b,
            (Symbology::ComplexPoint(a), Symbology::ComplexPoint(b)) => a == b,
            (Symbology::IconPoint(a), Symbology::IconPoint(b)) => a == b,
            (Symbology::Raster(a), Symbology::Raster(b)) => a == b,
            (Symbology::ColorizerRaster(a), Symbology::ColorizerRaster(b)) => a == b,
            _ => false,
        }
    }
}

impl From<SimpleVectorSymbology> for Symbology {
    fn from(s: SimpleVectorSymbology) -> Self {
        Symbology::SimpleVector(s)
    }
}

impl From<SimplePointSymbology> for Symbology {
    fn from(s: SimplePointSymbology) -> Self {
        Symbology::SimplePoint(s)
    }
}

impl From<ComplexVectorSymbology> for Symbology {
    fn from(s: ComplexVectorSymbology) -> Self {
        Symbology::ComplexVector(s)
    }
}

impl From<ComplexPointSymbology> for Symbology {
    fn from(s: ComplexPointSymbology) -> Self {
        Symbology::ComplexPoint(s)
    }
}

impl From<IconPointSymbology> for Symbology {
    fn from(s: IconPointSymbology) -> Self {
        Symbology::IconPoint(s)
    }
}

impl From<RasterSymbology> for Symbology {
    fn from(s: RasterSymbology) -> Self {
        Symbology::Raster(s)
    }
}

impl From<ColorizerRasterSymbology> for Symbology {
    fn from(s: ColorizerRasterSymbology) -> Self {
        Symbology::ColorizerRaster(s)
    }
}
