//! Integration tests for mosaic-layout.
//!
//! These tests drive the public treemap API the way a dashboard screen does.

use mosaic_core::{Color, LayoutRng, Point, Size};
use mosaic_layout::{hit_test, layout_treemap, TreemapCache, TreemapEngine, WeightedItem};

// =============================================================================
// Fixtures
// =============================================================================

fn abc() -> Vec<WeightedItem> {
    vec![
        WeightedItem::new("A", 42.0),
        WeightedItem::new("B", 28.0),
        WeightedItem::new("C", 55.0),
    ]
}

fn subscriptions() -> Vec<WeightedItem> {
    [
        ("Netflix", 15.49, "#e50914"),
        ("Spotify", 9.99, "#1db954"),
        ("YouTube Premium", 13.99, "#ff0000"),
        ("iCloud+", 2.99, "#3693f3"),
        ("Disney+", 7.99, "#113ccf"),
        ("Notion", 8.0, "#000000"),
        ("Figma", 12.0, "#a259ff"),
        ("Gym", 35.0, "#ff9f1c"),
        ("Duolingo", 6.99, "#58cc02"),
        ("Xbox Game Pass", 16.99, "#107c10"),
    ]
    .into_iter()
    .map(|(name, value, color)| {
        WeightedItem::new(name, value).with_color(Color::from_hex(color).unwrap())
    })
    .collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_abc_scenario_areas() {
    let mut rng = LayoutRng::seeded(2024);
    let rects = layout_treemap(&abc(), Size::new(300.0, 200.0), &mut rng);

    assert_eq!(rects.len(), 3);
    let total: f32 = rects.iter().map(|r| r.area()).sum();
    assert!((total - 60_000.0).abs() < 0.5, "total area {total}");

    let expected = [("A", 20_160.0f32), ("B", 13_440.0), ("C", 26_400.0)];
    for (rect, (name, area)) in rects.iter().zip(expected) {
        assert_eq!(rect.item.name, name);
        assert!(
            (rect.area() - area).abs() < 0.5,
            "{name}: got {} expected {area}",
            rect.area()
        );
    }
}

#[test]
fn test_abc_scenario_holds_for_many_seeds() {
    for seed in 0..64 {
        let mut rng = LayoutRng::seeded(seed);
        let rects = layout_treemap(&abc(), Size::new(300.0, 200.0), &mut rng);
        let a = rects[0].area();
        let b = rects[1].area();
        let c = rects[2].area();
        assert!((a / b - 42.0 / 28.0).abs() < 1e-3);
        assert!((c / b - 55.0 / 28.0).abs() < 1e-3);
    }
}

#[test]
fn test_entropy_layouts_vary() {
    let items = subscriptions();
    let viewport = Size::new(360.0, 480.0);
    let mut engine = TreemapEngine::new();

    let first = engine.layout(&items, viewport);
    let varied = (0..8).any(|_| {
        let next = engine.layout(&items, viewport);
        next.iter()
            .zip(&first)
            .any(|(a, b)| a.bounds != b.bounds)
    });
    assert!(varied, "repeated layouts should not all be identical");
}

#[test]
fn test_fresh_entropy_engines_vary() {
    let items = subscriptions();
    let viewport = Size::new(360.0, 480.0);
    let reference = TreemapEngine::new().layout(&items, viewport);
    let varied = (0..8).any(|_| TreemapEngine::new().layout(&items, viewport) != reference);
    assert!(varied);
}

#[test]
fn test_seeded_layouts_repeat() {
    let items = subscriptions();
    let viewport = Size::new(360.0, 480.0);
    let a = TreemapEngine::seeded(77).layout(&items, viewport);
    let b = TreemapEngine::seeded(77).layout(&items, viewport);
    assert_eq!(a, b);
}

#[test]
fn test_every_item_placed_once() {
    let items = subscriptions();
    let mut rng = LayoutRng::seeded(8);
    let rects = layout_treemap(&items, Size::new(390.0, 300.0), &mut rng);

    let mut names: Vec<&str> = rects.iter().map(|r| r.item.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), items.len());
}

#[test]
fn test_colors_and_metadata_carried_through() {
    let items = vec![
        WeightedItem::new("Netflix", 15.49)
            .with_color(Color::from_hex("#e50914").unwrap())
            .with_metadata(serde_json::json!({ "renews": "2026-11-02" })),
        WeightedItem::new("Spotify", 9.99),
    ];
    let mut rng = LayoutRng::seeded(1);
    let rects = layout_treemap(&items, Size::new(200.0, 200.0), &mut rng);

    assert_eq!(rects[0].item.color.to_hex(), "#e50914");
    assert_eq!(rects[0].item.metadata["renews"], "2026-11-02");
    assert_eq!(rects[0].label_color(), Color::WHITE);
}

#[test]
fn test_tap_resolves_to_tile() {
    let items = subscriptions();
    let mut rng = LayoutRng::seeded(12);
    let rects = layout_treemap(&items, Size::new(300.0, 300.0), &mut rng);

    for rect in &rects {
        let hit = hit_test(&rects, &rect.bounds.center()).map(|r| r.index);
        assert_eq!(hit, Some(rect.index));
    }
    assert!(hit_test(&rects, &Point::new(-5.0, 10.0)).is_none());
}

#[test]
fn test_cache_keeps_layout_between_frames() {
    let items = subscriptions();
    let viewport = Size::new(360.0, 480.0);
    let mut engine = TreemapEngine::new();
    let mut cache = TreemapCache::new();

    let first = cache.get_or_layout(&items, viewport, &mut engine).to_vec();
    for _ in 0..5 {
        cache.advance_frame();
        let again = cache.get_or_layout(&items, viewport, &mut engine);
        assert_eq!(again, first.as_slice());
    }
    assert_eq!(cache.misses(), 1);
    assert_eq!(cache.hits(), 5);
}
