//! Tile loading status of raster layers.
//!
//! Every tile load start, end and error event updates a pending counter;
//! the layer's status is reported to a [`LayerStatusSink`]. An error is
//! reported as soon as it happens, even while other tiles are still in
//! flight, and a later successful end can turn the status back to ok.

use serde::{Deserialize, Serialize};
use symbology_common::LayerId;
use tracing::{debug, warn};

/// Status reported for a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingState {
    Loading,
    Ok,
    Error,
}

/// Phase of the tile source itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourcePhase {
    #[default]
    Idle,
    Loading,
    Error,
}

/// Receiver of layer status reports, e.g. the project's layer list.
pub trait LayerStatusSink {
    fn report(&mut self, layer: &LayerId, state: LoadingState);
}

impl<F> LayerStatusSink for F
where
    F: FnMut(&LayerId, LoadingState),
{
    fn report(&mut self, layer: &LayerId, state: LoadingState) {
        self(layer, state)
    }
}

/// Sink that keeps every report, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusLog {
    pub reports: Vec<(LayerId, LoadingState)>,
}

impl StatusLog {
    pub fn states(&self) -> Vec<LoadingState> {
        self.reports.iter().map(|(_, state)| *state).collect()
    }

    pub fn last(&self) -> Option<LoadingState> {
        self.reports.last().map(|(_, state)| *state)
    }
}

impl LayerStatusSink for StatusLog {
    fn report(&mut self, layer: &LayerId, state: LoadingState) {
        self.reports.push((layer.clone(), state));
    }
}

/// Tracks in-flight tiles of one raster layer.
#[derive(Debug)]
pub struct TileLoadTracker<S> {
    layer: LayerId,
    sink: S,
    pending: usize,
    phase: SourcePhase,
}

impl<S: LayerStatusSink> TileLoadTracker<S> {
    pub fn new(layer: LayerId, sink: S) -> Self {
        Self {
            layer,
            sink,
            pending: 0,
            phase: SourcePhase::Idle,
        }
    }

    pub fn on_tile_load_start(&mut self) {
        self.pending += 1;
        self.phase = SourcePhase::Loading;
        self.sink.report(&self.layer, LoadingState::Loading);
    }

    pub fn on_tile_load_end(&mut self) {
        self.pending = self.pending.saturating_sub(1);
        if self.pending == 0 {
            self.phase = SourcePhase::Idle;
            debug!(layer = %self.layer, "All tiles loaded");
            self.sink.report(&self.layer, LoadingState::Ok);
        }
    }

    pub fn on_tile_load_error(&mut self) {
        self.pending = self.pending.saturating_sub(1);
        self.phase = SourcePhase::Error;
        warn!(layer = %self.layer, pending = self.pending, "Tile failed to load");
        self.sink.report(&self.layer, LoadingState::Error);
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn phase(&self) -> SourcePhase {
        self.phase
    }

    pub fn layer(&self) -> &LayerId {
        &self.layer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
