//! Layout caching for stable mosaics across re-renders.
//!
//! The treemap is randomized, so recomputing it on every frame would make
//! tiles jump around. Screens keep a [`TreemapCache`] and only pay for a new
//! layout when the items or the viewport actually change.

use mosaic_core::Size;
use std::collections::hash_map::{DefaultHasher, Entry};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::item::{LayoutRect, WeightedItem};
use crate::treemap::TreemapEngine;

/// Cache key derived from the item set and the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Hash of item names, weights, colors and metadata
    pub items_hash: u64,
    /// Viewport width bits
    pub width_bits: u32,
    /// Viewport height bits
    pub height_bits: u32,
}

impl CacheKey {
    /// Build the key for a layout request.
    #[must_use]
    pub fn new(items: &[WeightedItem], viewport: Size) -> Self {
        let mut hasher = DefaultHasher::new();
        items.len().hash(&mut hasher);
        for item in items {
            item.name.hash(&mut hasher);
            item.value.to_bits().hash(&mut hasher);
            for channel in [item.color.r, item.color.g, item.color.b, item.color.a] {
                channel.to_bits().hash(&mut hasher);
            }
            if !item.metadata.is_null() {
                item.metadata.to_string().hash(&mut hasher);
            }
        }
        let viewport = viewport.sanitized();
        Self {
            items_hash: hasher.finish(),
            width_bits: viewport.width.to_bits(),
            height_bits: viewport.height.to_bits(),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    rects: Vec<LayoutRect>,
    last_used_frame: u64,
}

/// Frames a layout survives without being requested.
///
/// A screen that is off-stage for a couple of renders (a tab switch, a
/// sheet on top) still finds its mosaic where it left it.
pub const DEFAULT_RETENTION_FRAMES: u64 = 2;

/// Memoizes treemap layouts per (items, viewport).
#[derive(Debug)]
pub struct TreemapCache {
    entries: HashMap<CacheKey, CacheEntry>,
    current_frame: u64,
    retention_frames: u64,
    hits: usize,
    misses: usize,
}

impl Default for TreemapCache {
    fn default() -> Self {
        Self::with_retention(DEFAULT_RETENTION_FRAMES)
    }
}

impl TreemapCache {
    /// Create a cache keeping layouts for [`DEFAULT_RETENTION_FRAMES`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache that drops a layout once it has gone `frames`
    /// renders without a request.
    #[must_use]
    pub fn with_retention(frames: u64) -> Self {
        Self {
            entries: HashMap::new(),
            current_frame: 0,
            retention_frames: frames,
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached layout, computing it with `engine` on a miss.
    pub fn get_or_layout(
        &mut self,
        items: &[WeightedItem],
        viewport: Size,
        engine: &mut TreemapEngine,
    ) -> &[LayoutRect] {
        let key = CacheKey::new(items, viewport);
        let frame = self.current_frame;
        match self.entries.entry(key) {
            Entry::Occupied(occupied) => {
                self.hits += 1;
                let entry = occupied.into_mut();
                entry.last_used_frame = frame;
                &entry.rects
            }
            Entry::Vacant(vacant) => {
                self.misses += 1;
                log::trace!("treemap cache miss for {} item(s)", items.len());
                let entry = vacant.insert(CacheEntry {
                    rects: engine.layout(items, viewport),
                    last_used_frame: frame,
                });
                &entry.rects
            }
        }
    }

    /// Look up a cached layout without computing one.
    #[must_use]
    pub fn get(&mut self, items: &[WeightedItem], viewport: Size) -> Option<&[LayoutRect]> {
        let frame = self.current_frame;
        if let Some(entry) = self.entries.get_mut(&CacheKey::new(items, viewport)) {
            entry.last_used_frame = frame;
            self.hits += 1;
            Some(&entry.rects)
        } else {
            self.misses += 1;
            None
        }
    }

    /// Drop the layout for one (items, viewport) pair so the next request
    /// produces a fresh arrangement.
    pub fn invalidate(&mut self, items: &[WeightedItem], viewport: Size) -> bool {
        self.entries
            .remove(&CacheKey::new(items, viewport))
            .is_some()
    }

    /// Forget every layout and reset the hit/miss counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Requests answered from the cache.
    #[must_use]
    pub const fn hits(&self) -> usize {
        self.hits
    }

    /// Requests that had no cached layout.
    #[must_use]
    pub const fn misses(&self) -> usize {
        self.misses
    }

    /// Mark a render boundary; layouts idle for longer than the retention
    /// window are dropped and will be rearranged on their next request.
    pub fn advance_frame(&mut self) {
        self.current_frame += 1;
        let oldest_kept = self.current_frame.saturating_sub(self.retention_frames);
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.last_used_frame >= oldest_kept);
        let evicted = before - self.entries.len();
        if evicted > 0 {
            log::trace!("treemap cache evicted {evicted} idle layout(s)");
        }
    }

    /// Number of cached layouts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no layout is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_core::Color;

    fn sample_items() -> Vec<WeightedItem> {
        vec![
            WeightedItem::new("Netflix", 15.49),
            WeightedItem::new("Spotify", 9.99),
            WeightedItem::new("iCloud", 2.99),
            WeightedItem::new("Gym", 35.0),
        ]
    }

    #[test]
    fn test_cache_new() {
        let cache = TreemapCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_cache_returns_stable_layout() {
        let mut cache = TreemapCache::new();
        let mut engine = TreemapEngine::new();
        let items = sample_items();
        let viewport = Size::new(300.0, 200.0);

        let first = cache.get_or_layout(&items, viewport, &mut engine).to_vec();
        let second = cache.get_or_layout(&items, viewport, &mut engine).to_vec();
        assert_eq!(first, second);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn test_cache_miss_on_resize() {
        let mut cache = TreemapCache::new();
        let mut engine = TreemapEngine::seeded(4);
        let items = sample_items();

        cache.get_or_layout(&items, Size::new(300.0, 200.0), &mut engine);
        cache.get_or_layout(&items, Size::new(320.0, 200.0), &mut engine);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn test_key_depends_on_values_and_colors() {
        let items = sample_items();
        let viewport = Size::new(10.0, 10.0);
        let base = CacheKey::new(&items, viewport);

        let mut reweighted = items.clone();
        reweighted[0].value = 16.49;
        assert_ne!(base, CacheKey::new(&reweighted, viewport));

        let mut recolored = items.clone();
        recolored[1].color = Color::rgb(0.1, 0.7, 0.3);
        assert_ne!(base, CacheKey::new(&recolored, viewport));

        assert_eq!(base, CacheKey::new(&items, viewport));
    }

    #[test]
    fn test_cache_get_without_compute() {
        let mut cache = TreemapCache::new();
        let items = sample_items();
        assert!(cache.get(&items, Size::new(1.0, 1.0)).is_none());
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn test_cache_invalidate() {
        let mut cache = TreemapCache::new();
        let mut engine = TreemapEngine::seeded(1);
        let items = sample_items();
        let viewport = Size::new(50.0, 50.0);

        cache.get_or_layout(&items, viewport, &mut engine);
        assert!(cache.invalidate(&items, viewport));
        assert!(!cache.invalidate(&items, viewport));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_evicts_stale_entries() {
        let mut cache = TreemapCache::new();
        let mut engine = TreemapEngine::seeded(2);
        let items = sample_items();
        let viewport = Size::new(100.0, 100.0);

        cache.get_or_layout(&items, viewport, &mut engine);
        cache.advance_frame();
        cache.advance_frame();
        assert_eq!(cache.len(), 1);
        cache.advance_frame();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_custom_retention() {
        let mut cache = TreemapCache::with_retention(0);
        let mut engine = TreemapEngine::seeded(2);
        let items = sample_items();
        let viewport = Size::new(100.0, 100.0);

        cache.get_or_layout(&items, viewport, &mut engine);
        cache.advance_frame();
        assert!(cache.is_empty());

        let mut cache = TreemapCache::with_retention(DEFAULT_RETENTION_FRAMES + 3);
        cache.get_or_layout(&items, viewport, &mut engine);
        for _ in 0..DEFAULT_RETENTION_FRAMES + 3 {
            cache.advance_frame();
        }
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_clear_resets_counters() {
        let mut cache = TreemapCache::new();
        let mut engine = TreemapEngine::seeded(3);
        cache.get_or_layout(&sample_items(), Size::new(10.0, 10.0), &mut engine);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.hits(), 0);
        assert_eq!(cache.misses(), 0);
    }
}
