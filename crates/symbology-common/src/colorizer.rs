//! Colorizers: ordered breakpoints plus a mapping type.
//!
//! A colorizer answers two questions:
//!
//! - [`Colorizer::breakpoint_for_value`]: which breakpoint does a feature
//!   value fall into (used for vector styling, no interpolation)
//! - [`Colorizer::color_for_value`]: which color does a scalar map to
//!   (interpolated for gradients)

use serde::{Deserialize, Serialize};

use crate::breakpoint::{BreakpointValue, ColorBreakpoint, MappingBreakpoint};
use crate::color::{Color, BLACK, WHITE};
use crate::error::{Result, SymbologyError};
use crate::unit::{Interpolation, Unit};

/// How breakpoints map values to colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorizerType {
    /// Continuous ramp between breakpoints
    #[default]
    Gradient,
    /// Exact value to color lookup
    Palette,
    /// Continuous ramp in log10 space
    Logarithmic,
}

impl ColorizerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorizerType::Gradient => "gradient",
            ColorizerType::Palette => "palette",
            ColorizerType::Logarithmic => "logarithmic",
        }
    }
}

/// Ordered value to color mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Colorizer {
    #[serde(default)]
    pub breakpoints: Vec<ColorBreakpoint>,
    #[serde(rename = "type", default)]
    pub kind: ColorizerType,
}

impl Colorizer {
    pub fn new(breakpoints: Vec<ColorBreakpoint>, kind: ColorizerType) -> Self {
        Self { breakpoints, kind }
    }

    /// A gradient colorizer without breakpoints; matches nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Synthesize a grayscale colorizer for a unit.
    ///
    /// Discrete units with classes get one gray per class (palette); all
    /// other units get a black to white gradient over `min..=max`.
    pub fn grayscale(unit: &Unit) -> Result<Self> {
        if unit.interpolation == Interpolation::Discrete && !unit.classes.is_empty() {
            let steps = unit.classes.len().saturating_sub(1).max(1) as f64;
            let breakpoints = unit
                .classes
                .iter()
                .enumerate()
                .map(|(i, (value, _label))| {
                    let gray = (255.0 * i as f64 / steps).round() as u8;
                    ColorBreakpoint::new(Color::new(gray, gray, gray, 1.0), *value)
                })
                .collect();
            return Ok(Self::new(breakpoints, ColorizerType::Palette));
        }

        let (min, max) = unit.range().ok_or_else(|| {
            SymbologyError::MissingColorizer(format!(
                "unit '{}' ({}) declares no value range",
                unit.measurement, unit.unit
            ))
        })?;

        Ok(Self::new(
            vec![
                ColorBreakpoint::new(BLACK, min),
                ColorBreakpoint::new(WHITE, max),
            ],
            ColorizerType::Gradient,
        ))
    }

    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    pub fn first_breakpoint(&self) -> Option<&ColorBreakpoint> {
        self.breakpoints.first()
    }

    pub fn last_breakpoint(&self) -> Option<&ColorBreakpoint> {
        self.breakpoints.last()
    }

    pub fn add_breakpoint(&mut self, breakpoint: ColorBreakpoint) {
        self.breakpoints.push(breakpoint);
    }

    pub fn remove_breakpoint(&mut self, index: usize) -> Option<ColorBreakpoint> {
        (index < self.breakpoints.len()).then(|| self.breakpoints.remove(index))
    }

    /// Find the breakpoint a value falls into.
    ///
    /// Text values match text breakpoints exactly and otherwise fall through
    /// to the numeric lookup when they parse as numbers. Numbers match
    /// exactly on palettes; on ramps they select the last breakpoint not
    /// greater than the value, the first of a run of equal values winning.
    /// Values below every breakpoint, and values that match nothing, yield
    /// the first breakpoint only when `first_as_default` is set.
    pub fn breakpoint_for_value(
        &self,
        value: &BreakpointValue,
        first_as_default: bool,
    ) -> Option<&ColorBreakpoint> {
        if self.breakpoints.is_empty() {
            return None;
        }

        let found = match value {
            BreakpointValue::Text(text) => self
                .breakpoints
                .iter()
                .find(|bp| bp.value.as_text() == Some(text.as_str()))
                .or_else(|| {
                    text.trim()
                        .parse::<f64>()
                        .ok()
                        .and_then(|n| self.numeric_breakpoint(n))
                }),
            BreakpointValue::Number(n) => self.numeric_breakpoint(*n),
        };

        match found {
            Some(bp) => Some(bp),
            None if first_as_default => self.breakpoints.first(),
            None => None,
        }
    }

    fn numeric_breakpoint(&self, value: f64) -> Option<&ColorBreakpoint> {
        if value.is_nan() {
            return None;
        }

        match self.kind {
            ColorizerType::Palette => self
                .breakpoints
                .iter()
                .find(|bp| bp.value.as_number() == Some(value)),
            ColorizerType::Gradient | ColorizerType::Logarithmic => {
                let mut found: Option<(f64, &ColorBreakpoint)> = None;
                for bp in &self.breakpoints {
                    let Some(bp_value) = bp.value.as_number() else {
                        continue;
                    };
                    let better = match found {
                        None => true,
                        Some((best, _)) => bp_value > best,
                    };
                    if bp_value <= value && better {
                        found = Some((bp_value, bp));
                    }
                }
                found.map(|(_, bp)| bp)
            }
        }
    }

    /// Map a scalar to a color.
    ///
    /// Palettes only return exact matches. Ramps clamp to their end colors
    /// and interpolate between the bracketing breakpoints, logarithmic ramps
    /// in log10 space when both bracketing values are positive.
    pub fn color_for_value(&self, value: f64) -> Option<Color> {
        if value.is_nan() {
            return None;
        }

        if self.kind == ColorizerType::Palette {
            return self.numeric_breakpoint(value).map(|bp| bp.rgba);
        }

        let mut stops: Vec<(f64, Color)> = self
            .breakpoints
            .iter()
            .filter_map(|bp| bp.value.as_number().map(|v| (v, bp.rgba)))
            .collect();
        stops.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let first = stops.first()?;
        let last = stops.last()?;
        if value <= first.0 {
            return Some(first.1);
        }
        if value >= last.0 {
            return Some(last.1);
        }

        for pair in stops.windows(2) {
            let (low, high) = (pair[0], pair[1]);
            if value < high.0 {
                let t = match self.kind {
                    ColorizerType::Logarithmic if low.0 > 0.0 => {
                        (value.log10() - low.0.log10()) / (high.0.log10() - low.0.log10())
                    }
                    _ => (value - low.0) / (high.0 - low.0),
                };
                return Some(low.1.lerp(&high.1, t));
            }
        }

        Some(last.1)
    }

    /// Breakpoints projected to the raster service's format.
    pub fn mapping_breakpoints(&self) -> Vec<MappingBreakpoint> {
        self.breakpoints
            .iter()
            .map(ColorBreakpoint::to_mapping_breakpoint)
            .collect()
    }
}
