//! Styling state of one vector layer.

use std::sync::Arc;

use symbology_common::{LayerId, Symbology};
use tracing::info;

use crate::cache::CacheStats;
use crate::error::Result;
use crate::feature::Feature;
use crate::resolver::{StyleProvider, StyleResolver};
use crate::style::Style;

/// A vector layer's symbology with its resolved providers.
///
/// The symbology is only ever replaced as a whole. Replacing it with an
/// unequal one resolves fresh providers, so cached styles of the previous
/// symbology are dropped with them.
#[derive(Debug)]
pub struct VectorLayerStyle {
    layer: LayerId,
    resolver: StyleResolver,
    symbology: Symbology,
    provider: StyleProvider,
    highlight: StyleProvider,
}

impl VectorLayerStyle {
    pub fn new(layer: LayerId, resolver: StyleResolver, symbology: Symbology) -> Result<Self> {
        let provider = resolver.resolve(&symbology)?;
        let highlight = resolver.resolve_highlight(&symbology)?;
        Ok(Self {
            layer,
            resolver,
            symbology,
            provider,
            highlight,
        })
    }

    /// Replace the symbology; returns whether anything changed.
    pub fn set_symbology(&mut self, symbology: Symbology) -> Result<bool> {
        if self.symbology.equals(Some(&symbology)) {
            return Ok(false);
        }

        let provider = self.resolver.resolve(&symbology)?;
        let highlight = self.resolver.resolve_highlight(&symbology)?;
        info!(
            layer = %self.layer,
            from = %self.symbology.kind(),
            to = %symbology.kind(),
            "Symbology replaced"
        );

        self.symbology = symbology;
        self.provider = provider;
        self.highlight = highlight;
        Ok(true)
    }

    /// Style of a feature, drawn highlighted when selected.
    pub fn style_for(&mut self, feature: &dyn Feature, selected: bool) -> Arc<Style> {
        if selected {
            self.highlight.style_for(feature)
        } else {
            self.provider.style_for(feature)
        }
    }

    pub fn layer(&self) -> &LayerId {
        &self.layer
    }

    pub fn symbology(&self) -> &Symbology {
        &self.symbology
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.provider.cache_stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::FeatureProperties;
    use symbology_common::color::DEFAULT_VECTOR_HIGHLIGHT_FILL_COLOR;
    use symbology_common::symbology::{ComplexVectorSymbology, VectorSymbologyConfig};
    use symbology_common::Color;

    fn labelled(fill: Color) -> Symbology {
        ComplexVectorSymbology::from_config(&VectorSymbologyConfig {
            fill_rgba: Some(fill),
            text_attribute: Some("name".into()),
            ..Default::default()
        })
        .into()
    }

    #[test]
    fn test_equal_symbology_keeps_cache() {
        let red = Color::new(255, 0, 0, 1.0);
        let mut layer =
            VectorLayerStyle::new(LayerId::new("roads"), StyleResolver::default(), labelled(red))
                .unwrap();
        let feature = FeatureProperties::new().with("name", "A1");
        layer.style_for(&feature, false);

        assert!(!layer.set_symbology(labelled(red)).unwrap());
        assert_eq!(layer.cache_stats().unwrap().entries, 1);

        assert!(layer.set_symbology(labelled(Color::new(0, 0, 255, 1.0))).unwrap());
        assert_eq!(layer.cache_stats().unwrap().entries, 0);
    }

    #[test]
    fn test_selected_features_use_highlight() {
        let mut layer = VectorLayerStyle::new(
            LayerId::new("roads"),
            StyleResolver::default(),
            labelled(Color::new(255, 0, 0, 1.0)),
        )
        .unwrap();
        let feature = FeatureProperties::new().with("name", "A1");

        let style = layer.style_for(&feature, true);
        assert_eq!(style.fill_color(), Some(DEFAULT_VECTOR_HIGHLIGHT_FILL_COLOR));
        assert_eq!(style.text.as_ref().unwrap().text, "A1");
    }
}
