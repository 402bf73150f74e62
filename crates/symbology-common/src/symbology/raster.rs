//! Raster symbologies: plain tint and colorizer-backed rendering.

use serde::Serialize;
use tracing::warn;

use crate::breakpoint::{ColorBreakpoint, MappingBreakpoint};
use crate::color::TRANSPARENT;
use crate::colorizer::{Colorizer, ColorizerType};
use crate::error::{Result, SymbologyError};
use crate::unit::{Interpolation, Unit};

use super::config::RasterSymbologyConfig;

/// Opacity, hue and saturation applied to a raster layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSymbology {
    pub opacity: f64,
    pub hue: f64,
    pub saturation: f64,
    pub unit: Option<Unit>,
}

impl Default for RasterSymbology {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            hue: 0.0,
            saturation: 0.0,
            unit: None,
        }
    }
}

impl RasterSymbology {
    pub fn from_config(config: &RasterSymbologyConfig) -> Self {
        let defaults = Self::default();
        Self {
            opacity: config.opacity.unwrap_or(defaults.opacity),
            hue: config.hue.unwrap_or(defaults.hue),
            saturation: config.saturation.unwrap_or(defaults.saturation),
            unit: config.unit.clone(),
        }
    }

    fn interpolation(&self) -> Interpolation {
        self.unit
            .as_ref()
            .map(|u| u.interpolation)
            .unwrap_or_default()
    }

    pub fn is_continuous(&self) -> bool {
        self.interpolation() == Interpolation::Continuous
    }

    pub fn is_discrete(&self) -> bool {
        self.interpolation() == Interpolation::Discrete
    }

    /// True when there is no unit or its interpolation is unknown.
    pub fn is_unknown(&self) -> bool {
        self.interpolation() == Interpolation::Unknown
    }

    pub fn to_config(&self) -> RasterSymbologyConfig {
        RasterSymbologyConfig {
            opacity: Some(self.opacity),
            hue: Some(self.hue),
            saturation: Some(self.saturation),
            unit: self.unit.clone(),
            ..Default::default()
        }
    }
}

/// Raster rendered through a colorizer by the tile service.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorizerRasterSymbology {
    pub raster: RasterSymbology,
    pub colorizer: Colorizer,
    pub no_data_color: ColorBreakpoint,
    pub overflow_color: ColorBreakpoint,
}

/// Body of the `colors` request parameter sent to the raster tile service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingColorizerPayload {
    #[serde(rename = "type")]
    pub kind: ColorizerType,
    pub nodata: MappingBreakpoint,
    pub overflow: MappingBreakpoint,
    pub breakpoints: Vec<MappingBreakpoint>,
}

impl ColorizerRasterSymbology {
    /// Build from a configuration; without a colorizer a grayscale one is
    /// synthesized from the unit, or an empty one if that is impossible.
    pub fn from_config(config: &RasterSymbologyConfig) -> Self {
        let raster = RasterSymbology::from_config(config);
        let colorizer = match &config.colorizer {
            Some(colorizer) => colorizer.clone(),
            None => default_colorizer(raster.unit.as_ref()),
        };

        Self {
            raster,
            colorizer,
            no_data_color: config
                .no_data_color
                .clone()
                .unwrap_or_else(|| ColorBreakpoint::new(TRANSPARENT, "NoData")),
            overflow_color: config
                .overflow_color
                .clone()
                .unwrap_or_else(|| ColorBreakpoint::new(TRANSPARENT, "Overflow")),
        }
    }

    pub fn payload(&self) -> MappingColorizerPayload {
        MappingColorizerPayload {
            kind: self.colorizer.kind,
            nodata: self.no_data_color.to_mapping_breakpoint(),
            overflow: self.overflow_color.to_mapping_breakpoint(),
            breakpoints: self.colorizer.mapping_breakpoints(),
        }
    }

    /// The `colors` request parameter for the raster tile service.
    pub fn colorizer_request_payload(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.payload())?)
    }

    pub fn to_config(&self) -> RasterSymbologyConfig {
        RasterSymbologyConfig {
            colorizer: Some(self.colorizer.clone()),
            no_data_color: Some(self.no_data_color.clone()),
            overflow_color: Some(self.overflow_color.clone()),
            ..self.raster.to_config()
        }
    }
}

fn default_colorizer(unit: Option<&Unit>) -> Colorizer {
    let synthesized = unit
        .ok_or_else(|| SymbologyError::MissingColorizer("raster has no unit".to_string()))
        .and_then(Colorizer::grayscale);

    match synthesized {
        Ok(colorizer) => colorizer,
        Err(e) => {
            warn!(error = %e, "Falling back to an empty colorizer");
            Colorizer::empty()
        }
    }
}
