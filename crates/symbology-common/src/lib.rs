//! Symbology data model shared by the styling engine and its tools.
//!
//! - Color and breakpoint primitives
//! - Colorizers and measurement units
//! - The [`Symbology`] variant model and its dictionary form

pub mod breakpoint;
pub mod color;
pub mod colorizer;
pub mod dict;
pub mod error;
pub mod layer;
pub mod symbology;
pub mod unit;

pub use breakpoint::{BreakpointValue, ColorBreakpoint, MappingBreakpoint};
pub use color::{Color, RgbaTuple};
pub use colorizer::{Colorizer, ColorizerType};
pub use dict::DISCRIMINANT_FIELD;
pub use error::{Result, SymbologyError};
pub use layer::LayerId;
pub use symbology::{
    ColorizerRasterSymbology, ComplexPointSymbology, ComplexVectorSymbology, IconPointSymbology,
    RasterSymbology, SimplePointSymbology, SimpleVectorSymbology, Symbology, SymbologyConfig,
    SymbologyKind,
};
pub use unit::{Interpolation, Unit};
