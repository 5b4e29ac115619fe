#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::doc_markdown)]
//! Treemap layout engine for Mosaic.
//!
//! Maps a set of weighted items onto a rectangle so that each item's area is
//! proportional to its weight, producing an organic, randomized mosaic.
//!
//! - [`layout_treemap`]: top-level layout with an explicit random source
//! - [`TreemapEngine`]: owns a [`mosaic_core::LayoutRng`] (seeded or entropy)
//! - [`TreemapCache`]: keeps layouts stable across re-renders

mod cache;
mod item;
mod treemap;

pub use cache::{CacheKey, TreemapCache, DEFAULT_RETENTION_FRAMES};
pub use item::{hit_test, LayoutRect, WeightedItem};
pub use treemap::{
    layout_treemap, split_proportionally, subdivide_randomly, SplitAxis, TreemapEngine,
    MAX_TOP_LEVEL_GROUPS,
};
