//! Raster tile source parameters and their refresh rules.
//!
//! The tile service is asked for `time` and `colors` parameters. When new
//! raster data arrives the parameters and url are updated in place; the
//! source itself is only recreated when the projection changes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use symbology_common::{LayerId, Symbology};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};

/// Point in time or time interval requested from the tile service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeToken {
    Instant(DateTime<Utc>),
    Interval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl TimeToken {
    pub fn interval(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end < start {
            return Err(EngineError::InvalidTime(format!(
                "interval ends before it starts: {} > {}",
                format_instant(&start),
                format_instant(&end)
            )));
        }
        Ok(TimeToken::Interval { start, end })
    }

    /// ISO-8601 form sent as the `time` parameter; intervals as
    /// `start/end`.
    pub fn as_request_string(&self) -> String {
        match self {
            TimeToken::Instant(t) => format_instant(t),
            TimeToken::Interval { start, end } if start == end => format_instant(start),
            TimeToken::Interval { start, end } => {
                format!("{}/{}", format_instant(start), format_instant(end))
            }
        }
    }
}

fn format_instant(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| EngineError::InvalidTime(format!("'{}': {}", s, e)))
}

impl fmt::Display for TimeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_request_string())
    }
}

impl FromStr for TimeToken {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((start, end)) => Self::interval(parse_instant(start)?, parse_instant(end)?),
            None => Ok(TimeToken::Instant(parse_instant(s)?)),
        }
    }
}

/// Request parameters of the tile source.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterRequestParams {
    pub time: String,
    /// Colorizer payload; only colorizer rasters send one.
    pub colors: Option<String>,
}

/// New raster data for a layer: where to fetch it, for when, in which
/// projection.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterDataUpdate {
    pub url: String,
    pub time: TimeToken,
    /// Projection code, e.g. `EPSG:3857`.
    pub projection: String,
}

/// What [`RasterLayerSource::apply`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub params_updated: bool,
    pub url_changed: bool,
    pub source_replaced: bool,
    pub refresh_requested: bool,
}

impl RefreshOutcome {
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// State of the tile source behind one raster layer.
#[derive(Debug, Clone)]
pub struct RasterLayerSource {
    layer: LayerId,
    url: String,
    projection: String,
    params: RasterRequestParams,
    opacity: f64,
    /// Incremented each time the source is recreated.
    generation: u64,
    refresh_layers_on_change: bool,
}

impl RasterLayerSource {
    pub fn new(
        layer: LayerId,
        data: &RasterDataUpdate,
        symbology: &Symbology,
        config: &EngineConfig,
    ) -> Result<Self> {
        let source = Self {
            layer,
            url: data.url.clone(),
            projection: data.projection.clone(),
            params: RasterRequestParams {
                time: data.time.as_request_string(),
                colors: colors_param(symbology)?,
            },
            opacity: raster_opacity(symbology)?,
            generation: 0,
            refresh_layers_on_change: config.refresh_layers_on_change,
        };

        debug!(layer = %source.layer, url = %source.url, "Created raster source");
        Ok(source)
    }

    /// Bring the source in line with new raster data.
    pub fn apply(
        &mut self,
        data: &RasterDataUpdate,
        symbology: &Symbology,
    ) -> Result<RefreshOutcome> {
        let time = data.time.as_request_string();
        let colors = colors_param(symbology)?;
        let mut outcome = RefreshOutcome::default();

        if self.params.time != time {
            self.params = RasterRequestParams {
                time: time.clone(),
                colors: colors.clone(),
            };
            outcome.params_updated = true;
        }

        let url_changed = self.url != data.url;

        if self.projection != data.projection {
            info!(
                layer = %self.layer,
                from = %self.projection,
                to = %data.projection,
                "Projection changed, recreating raster source"
            );
            self.projection = data.projection.clone();
            self.url = data.url.clone();
            self.params = RasterRequestParams { time, colors };
            self.generation += 1;
            outcome.source_replaced = true;
        }

        if url_changed {
            self.url = data.url.clone();
            outcome.url_changed = true;
        }

        outcome.refresh_requested = self.refresh_layers_on_change;

        debug!(layer = %self.layer, ?outcome, "Applied raster data update");
        Ok(outcome)
    }

    /// Pick up an edited symbology: opacity and colorizer payload only.
    ///
    /// Returns whether the request parameters changed.
    pub fn on_symbology_change(&mut self, symbology: &Symbology) -> Result<bool> {
        let colors = colors_param(symbology)?;
        self.opacity = raster_opacity(symbology)?;

        let changed = self.params.colors != colors;
        self.params.colors = colors;
        Ok(changed)
    }

    pub fn layer(&self) -> &LayerId {
        &self.layer
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn projection(&self) -> &str {
        &self.projection
    }

    pub fn params(&self) -> &RasterRequestParams {
        &self.params
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

fn colors_param(symbology: &Symbology) -> Result<Option<String>> {
    match symbology {
        Symbology::ColorizerRaster(raster) => Ok(Some(raster.colorizer_request_payload()?)),
        Symbology::Raster(_) => Ok(None),
        other => Err(EngineError::NotRaster(other.kind())),
    }
}

fn raster_opacity(symbology: &Symbology) -> Result<f64> {
    symbology
        .as_raster()
        .map(|raster| raster.opacity)
        .ok_or_else(|| EngineError::NotRaster(symbology.kind()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_token_format() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(
            TimeToken::Instant(t).as_request_string(),
            "2024-03-01T12:00:00.000Z"
        );

        let end = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        let interval = TimeToken::interval(t, end).unwrap();
        assert_eq!(
            interval.to_string(),
            "2024-03-01T12:00:00.000Z/2024-03-02T00:00:00.000Z"
        );
    }

    #[test]
    fn test_degenerate_interval_is_instant() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let interval = TimeToken::interval(t, t).unwrap();
        assert_eq!(interval.as_request_string(), TimeToken::Instant(t).as_request_string());
    }

    #[test]
    fn test_time_token_parse() {
        let token: TimeToken = "2024-03-01T00:00:00Z/2024-03-02T00:00:00+00:00".parse().unwrap();
        assert!(matches!(token, TimeToken::Interval { .. }));

        assert!(matches!(
            "2024-03-02T00:00:00Z/2024-03-01T00:00:00Z".parse::<TimeToken>(),
            Err(EngineError::InvalidTime(_))
        ));
        assert!("yesterday".parse::<TimeToken>().is_err());
    }

    #[test]
    fn test_outcome_noop() {
        assert!(RefreshOutcome::default().is_noop());
        let outcome = RefreshOutcome {
            url_changed: true,
            ..Default::default()
        };
        assert!(!outcome.is_noop());
    }
}
