//! Style engine for symbology-driven map layers.
//!
//! - [`StyleResolver`] turns a vector [`Symbology`](symbology_common::Symbology)
//!   into a [`StyleProvider`], caching per-feature styles by attribute values
//! - [`RasterLayerSource`] keeps raster tile request parameters in step with
//!   data, projection and symbology changes
//! - [`TileLoadTracker`] reports a raster layer's loading status
//!
//! # Example
//!
//! ```ignore
//! use style_engine::{EngineConfig, FeatureProperties, StyleResolver};
//! use symbology_common::Symbology;
//!
//! let symbology = Symbology::from_json_str(&json)?;
//! let mut provider = StyleResolver::new(EngineConfig::from_env()).resolve(&symbology)?;
//!
//! let feature = FeatureProperties::new().with("species", "fox");
//! let style = provider.style_for(&feature);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod feature;
pub mod layer;
pub mod raster;
pub mod resolver;
pub mod style;
pub mod tile_status;

// Re-export commonly used types at crate root
pub use cache::{CacheStats, StyleCache};
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use feature::{AttributeValue, Feature, FeatureProperties};
pub use layer::VectorLayerStyle;
pub use raster::{RasterDataUpdate, RasterLayerSource, RasterRequestParams, RefreshOutcome, TimeToken};
pub use resolver::{FeatureStyler, StyleProvider, StyleResolver};
pub use style::{CircleStyle, Fill, IconStyle, ImageStyle, Stroke, Style, TextStyle};
pub use tile_status::{LayerStatusSink, LoadingState, SourcePhase, StatusLog, TileLoadTracker};
