//! Tests for style resolution and per-provider caching.

use std::sync::Arc;

use serde_json::{json, Value};
use style_engine::{
    EngineConfig, EngineError, FeatureProperties, ImageStyle, StyleProvider, StyleResolver,
};
use symbology_common::{Color, IconPointSymbology, Symbology, SymbologyKind};
use test_utils::{
    assert_approx_eq, assert_rgba_eq, feature_properties, fixtures, numeric_features,
    species_features,
};

fn resolve(dict: &Value) -> StyleProvider {
    let symbology = Symbology::from_dict(dict).unwrap();
    StyleResolver::default().resolve(&symbology).unwrap()
}

const ORANGE: Color = Color::new(255, 165, 0, 1.0);
const GRAY: Color = Color::new(128, 128, 128, 1.0);

// ============================================================================
// Constant providers
// ============================================================================

#[test]
fn test_simple_vector_is_constant() {
    let mut provider = resolve(&fixtures::simple_vector_dict());
    assert!(provider.is_constant());
    assert!(provider.cache_stats().is_none());

    let a = provider.style_for(&FeatureProperties::new());
    let b = provider.style_for(&FeatureProperties::new().with("species", "fox"));
    assert!(Arc::ptr_eq(&a, &b));

    assert_eq!(a.fill_color(), Some(Color::new(255, 0, 0, 1.0)));
    let stroke = a.stroke.as_ref().unwrap();
    assert_eq!(stroke.color, Color::new(0, 0, 0, 1.0));
    assert_eq!(stroke.width, 1.0);
    assert!(a.image.is_none());
}

#[test]
fn test_simple_point_is_constant_circle() {
    let mut provider = resolve(&fixtures::simple_point_dict());
    assert!(provider.is_constant());

    let style = provider.style_for(&FeatureProperties::new());
    assert_eq!(style.circle_radius(), Some(8.0));
    assert_eq!(style.fill_color(), Some(Color::new(0, 0, 255, 0.5)));
    assert!(style.fill.is_none());
}

#[test]
fn test_icon_style() {
    let mut provider = resolve(&fixtures::icon_point_dict());
    assert!(provider.is_constant());

    let style = provider.style_for(&FeatureProperties::new());
    let Some(ImageStyle::Icon(icon)) = &style.image else {
        panic!("Expected icon image");
    };
    assert_eq!(icon.src, "assets/icons/lighthouse.png");
    assert_approx_eq!(icon.rotation, std::f64::consts::FRAC_PI_2, 1e-12);
    assert_eq!(icon.scale, 1.5);
    assert_eq!(icon.opacity, 0.9);
    assert_eq!(icon.anchor, [0.5, 0.5]);
    assert_eq!(icon.color, Some(Color::new(255, 0, 0, 0.8)));
}

#[test]
fn test_icon_tint_needs_alpha() {
    let dict = json!({"symbologyType": "ICON_POINT", "color": [255, 0, 0, 0]});
    let mut provider = resolve(&dict);
    let style = provider.style_for(&FeatureProperties::new());
    let Some(ImageStyle::Icon(icon)) = &style.image else {
        panic!("Expected icon image");
    };
    assert_eq!(icon.color, None);
    assert_eq!(icon.src, "assets/icons/happyWhale.png");
}

#[test]
fn test_icon_tint_follows_alpha() {
    let tint = Color::new(0, 128, 255, 1.0);
    let icon_style = |tint: Color| {
        let symbology = Symbology::IconPoint(IconPointSymbology {
            tint,
            ..Default::default()
        });
        let mut provider = StyleResolver::default().resolve(&symbology).unwrap();
        let style = provider.style_for(&FeatureProperties::new());
        match &style.image {
            Some(ImageStyle::Icon(icon)) => icon.color,
            _ => panic!("Expected icon image"),
        }
    };

    assert_eq!(icon_style(tint.with_alpha(0.0)), None);

    let faded = icon_style(tint.with_alpha(0.4)).unwrap();
    assert_rgba_eq!(faded.rgba_tuple(), (0, 128, 255, 0.4), 1e-9);
}

#[test]
fn test_rasters_are_not_stylable() {
    for dict in [fixtures::raster_dict(), fixtures::mapping_colorizer_raster_dict()] {
        let symbology = Symbology::from_dict(&dict).unwrap();
        let err = StyleResolver::default().resolve(&symbology).unwrap_err();
        assert!(matches!(err, EngineError::NotStylable(kind) if kind.is_raster()));
    }
}

// ============================================================================
// Per-feature providers
// ============================================================================

#[test]
fn test_complex_point_caching_scenario() {
    let mut provider = resolve(&fixtures::complex_point_dict());
    assert!(!provider.is_constant());

    let fox_a = feature_properties(&[("species", json!("fox"))]);
    let fox_b = feature_properties(&[("species", json!("fox")), ("id", json!(2))]);
    let owl = feature_properties(&[("species", json!("owl"))]);

    let first = provider.style_for(&fox_a);
    let second = provider.style_for(&fox_b);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.fill_color(), Some(ORANGE));

    let third = provider.style_for(&owl);
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(third.fill_color(), Some(GRAY));

    let stats = provider.cache_stats().unwrap();
    assert_eq!((stats.hits, stats.misses, stats.entries), (1, 2, 2));
}

#[test]
fn test_cache_idempotence() {
    let mut provider = resolve(&fixtures::complex_point_dict());
    let feature = feature_properties(&[("species", json!("owl")), ("name", json!("Hedwig"))]);

    let first = provider.style_for(&feature);
    let second = provider.style_for(&feature);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.text.as_ref().unwrap().text, "Hedwig");
}

#[test]
fn test_unmatched_value_uses_base_fill() {
    let mut provider = resolve(&fixtures::complex_point_dict());

    let badger = feature_properties(&[("species", json!("badger"))]);
    assert_eq!(
        provider.style_for(&badger).fill_color(),
        Some(Color::new(255, 0, 0, 1.0))
    );

    let unknown = FeatureProperties::new();
    assert_eq!(
        provider.style_for(&unknown).fill_color(),
        Some(Color::new(255, 0, 0, 1.0))
    );
}

#[test]
fn test_cache_isolation() {
    let orange = fixtures::complex_point_dict();
    let mut recolored = orange.clone();
    recolored["colorizer"]["breakpoints"][0]["rgba"] = json!([0, 0, 0, 1]);

    let sym_a = Symbology::from_dict(&orange).unwrap();
    let sym_b = Symbology::from_dict(&recolored).unwrap();
    assert_ne!(sym_a, sym_b);

    let resolver = StyleResolver::default();
    let mut a = resolver.resolve(&sym_a).unwrap();
    let mut b = resolver.resolve(&sym_b).unwrap();

    let fox = feature_properties(&[("species", json!("fox"))]);
    let from_a = a.style_for(&fox);
    let from_b = b.style_for(&fox);

    assert!(!Arc::ptr_eq(&from_a, &from_b));
    assert_eq!(from_a.fill_color(), Some(ORANGE));
    assert_eq!(from_b.fill_color(), Some(Color::new(0, 0, 0, 1.0)));
    assert_eq!(b.cache_stats().unwrap().hits, 0);
}

#[test]
fn test_number_and_text_values_are_cached_apart() {
    let dict = json!({
        "symbologyType": "COMPLEX_VECTOR",
        "fillRGBA": [255, 0, 0, 1],
        "colorAttribute": "class",
        "colorizer": {
            "type": "palette",
            "breakpoints": [
                {"rgba": [10, 10, 10, 1], "value": 1.0},
                {"rgba": [200, 200, 200, 1], "value": "1"}
            ]
        }
    });
    let numeric = FeatureProperties::new().with("class", 1.0);
    let textual = FeatureProperties::new().with("class", "1");

    let mut shared = resolve(&dict);
    let number_fill = shared.style_for(&numeric).fill_color();
    let text_fill = shared.style_for(&textual).fill_color();

    let mut fresh = resolve(&dict);
    assert_eq!(text_fill, fresh.style_for(&textual).fill_color());
    assert_eq!(number_fill, Some(Color::new(10, 10, 10, 1.0)));
    assert_eq!(text_fill, Some(Color::new(200, 200, 200, 1.0)));
    assert_eq!(shared.cache_stats().unwrap().entries, 2);
}

#[test]
fn test_each_resolution_has_fresh_cache() {
    let symbology = Symbology::from_dict(&fixtures::complex_point_dict()).unwrap();
    let resolver = StyleResolver::default();

    let mut first = resolver.resolve(&symbology).unwrap();
    for feature in species_features(&["fox", "owl"], 6) {
        first.style_for(&feature);
    }
    assert!(first.cache_stats().unwrap().entries > 0);

    let second = resolver.resolve(&symbology).unwrap();
    assert_eq!(second.cache_stats().unwrap().entries, 0);
}

#[test]
fn test_missing_text_attribute_scenario() {
    let mut provider = resolve(&fixtures::complex_vector_dict());

    let unlabelled = feature_properties(&[("depth", json!(50))]);
    let style = provider.style_for(&unlabelled);
    assert!(style.text.is_none());
    assert!(style.fill.is_some());

    let labelled = feature_properties(&[("depth", json!(50)), ("label", json!("Reef"))]);
    let style = provider.style_for(&labelled);
    let text = style.text.as_ref().unwrap();
    assert_eq!(text.text, "Reef");
    assert_eq!(text.fill.color, Color::new(0, 0, 0, 1.0));
    assert_eq!(text.stroke.width, 1.0);
}

#[test]
fn test_gradient_colorizer_buckets() {
    let mut provider = resolve(&fixtures::complex_vector_dict());
    let fill_at = |provider: &mut StyleProvider, depth: f64| {
        let feature = FeatureProperties::new().with("depth", depth);
        provider.style_for(&feature).fill_color()
    };

    assert_eq!(fill_at(&mut provider, 0.0), Some(Color::new(0, 0, 255, 1.0)));
    assert_eq!(fill_at(&mut provider, 99.0), Some(Color::new(0, 0, 255, 1.0)));
    assert_eq!(fill_at(&mut provider, 100.0), Some(Color::new(0, 255, 0, 1.0)));
    assert_eq!(fill_at(&mut provider, 5000.0), Some(Color::new(255, 255, 0, 1.0)));
    // Below every breakpoint: base fill
    assert_eq!(fill_at(&mut provider, -1.0), Some(Color::new(255, 0, 0, 1.0)));
}

#[test]
fn test_cluster_radius_and_label() {
    let mut provider = resolve(&fixtures::clustered_point_dict());
    let cluster = feature_properties(&[("___radius", json!(14)), ("___numberOfPoints", json!(23))]);

    let style = provider.style_for(&cluster);
    assert_eq!(style.circle_radius(), Some(14.0));
    assert_eq!(style.text.as_ref().unwrap().text, "23");

    let single = FeatureProperties::new();
    let style = provider.style_for(&single);
    assert_eq!(style.circle_radius(), Some(5.0));
    assert!(style.text.is_none());
}

#[test]
fn test_radius_attribute() {
    let symbology = Symbology::from_dict(&fixtures::sized_point_dict()).unwrap();
    assert_eq!(symbology.kind(), SymbologyKind::ComplexPoint);
    assert!(symbology.describes_radius());

    let mut provider = StyleResolver::default().resolve(&symbology).unwrap();
    let radii: Vec<_> = numeric_features("population", -2.0, 3.0, 4)
        .iter()
        .map(|feature| provider.style_for(feature).circle_radius())
        .collect();

    // Non-positive radius: base radius
    assert_eq!(radii, vec![Some(4.0), Some(1.0), Some(4.0), Some(7.0)]);
    let style = provider.style_for(&FeatureProperties::new());
    assert_eq!(style.circle_radius(), Some(4.0));
    assert_eq!(style.fill_color(), Some(Color::new(0, 128, 0, 1.0)));
}

#[test]
fn test_highlight_provider() {
    let symbology = Symbology::from_dict(&fixtures::simple_vector_dict()).unwrap();
    let mut provider = StyleResolver::default()
        .resolve_highlight(&symbology)
        .unwrap();
    let style = provider.style_for(&FeatureProperties::new());
    assert_eq!(style.fill_color(), Some(Color::new(0, 153, 255, 1.0)));
    assert_eq!(symbology.kind(), SymbologyKind::SimpleVector);
}

#[test]
fn test_cache_capacity_bounds_entries() {
    let config = EngineConfig {
        style_cache_capacity: 3,
        ..Default::default()
    };
    let symbology = Symbology::from_dict(&fixtures::complex_point_dict()).unwrap();
    let mut provider = StyleResolver::new(config).resolve(&symbology).unwrap();

    for feature in species_features(&["fox", "owl"], 10) {
        provider.style_for(&feature);
    }
    let stats = provider.cache_stats().unwrap();
    assert_eq!(stats.entries, 3);
    assert_eq!(stats.evictions, 7);

    provider.clear_cache();
    assert_eq!(provider.cache_stats().unwrap().entries, 0);
}
