//! Randomized proportional treemap.
//!
//! Items are shuffled, dealt round-robin into 2 to 4 groups, and each group
//! gets a slice of the viewport whose width (or height) fraction equals the
//! group's share of the total weight. Groups are then split recursively at
//! random indices, with the cut axis biased towards the longer side.
//!
//! Every split is exactly proportional, so each leaf ends up with
//! `value / total` of the viewport area. Only the arrangement is random.
//!
//! # Example
//!
//! ```
//! use mosaic_core::{LayoutRng, Size};
//! use mosaic_layout::{layout_treemap, WeightedItem};
//!
//! let items = vec![
//!     WeightedItem::new("A", 42.0),
//!     WeightedItem::new("B", 28.0),
//!     WeightedItem::new("C", 55.0),
//! ];
//! let mut rng = LayoutRng::seeded(1);
//! let rects = layout_treemap(&items, Size::new(300.0, 200.0), &mut rng);
//! let total: f32 = rects.iter().map(|r| r.area()).sum();
//! assert!((total - 60_000.0).abs() < 1.0);
//! ```

use mosaic_core::{LayoutRng, Rect, Size};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::item::{LayoutRect, WeightedItem};

/// Most groups the top-level split produces.
pub const MAX_TOP_LEVEL_GROUPS: usize = 4;

/// Direction of a cut through a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitAxis {
    /// Vertical cut: children sit side by side and share the width.
    Vertical,
    /// Horizontal cut: children are stacked and share the height.
    Horizontal,
}

/// An item with its input position and its weight relative to the
/// heaviest item, so sums stay finite however large the raw values are.
#[derive(Debug, Clone, Copy)]
struct Entry<'a> {
    index: usize,
    item: &'a WeightedItem,
    weight: f64,
}

fn entries(items: &[WeightedItem]) -> Vec<Entry<'_>> {
    let max = items
        .iter()
        .filter(|item| item.is_layoutable())
        .map(|item| item.value)
        .fold(0.0, f64::max);
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_layoutable())
        .map(|(index, item)| Entry {
            index,
            item,
            weight: item.value / max,
        })
        .collect()
}

/// Lay out `items` inside a `viewport` anchored at the origin.
///
/// Returns one [`LayoutRect`] per layoutable item, in input order. Items
/// with a non-finite or non-positive weight are skipped. A degenerate
/// viewport still yields one (zero-area) rectangle per item.
pub fn layout_treemap<R: Rng + ?Sized>(
    items: &[WeightedItem],
    viewport: Size,
    rng: &mut R,
) -> Vec<LayoutRect> {
    let viewport = viewport.sanitized();
    if viewport.is_degenerate() {
        log::debug!("treemap viewport {viewport:?} is degenerate; tiles will have zero area");
    }

    let mut working = entries(items);
    let dropped = items.len() - working.len();
    if dropped > 0 {
        log::debug!("treemap skipped {dropped} item(s) without a positive weight");
    }

    let bounds = Rect::from_size(viewport);
    let mut out = Vec::with_capacity(working.len());

    if working.len() <= 1 {
        subdivide(&working, bounds, rng, &mut out);
        return out;
    }

    working.shuffle(rng);
    let group_count = rng.gen_range(2..=MAX_TOP_LEVEL_GROUPS.min(working.len()));
    let mut groups: Vec<Vec<Entry<'_>>> = vec![Vec::new(); group_count];
    for (i, entry) in working.into_iter().enumerate() {
        groups[i % group_count].push(entry);
    }

    let axis = if rng.gen_bool(0.5) {
        SplitAxis::Vertical
    } else {
        SplitAxis::Horizontal
    };
    let weights: Vec<f64> = groups.iter().map(|g| total_weight(g)).collect();
    log::trace!("treemap top level: {group_count} groups, {axis:?} cut, weights {weights:?}");

    for (group, slice) in groups.iter().zip(split_proportionally(bounds, axis, &weights)) {
        subdivide(group, slice, rng, &mut out);
    }

    out.sort_by_key(|r| r.index);
    out
}

/// Recursively split `bounds` among `items` at random split points.
///
/// Unlike [`layout_treemap`] this keeps the given item order and never
/// groups round-robin: each level picks a random split index and an axis
/// biased by the aspect ratio of `bounds`. Output is in input order.
pub fn subdivide_randomly<R: Rng + ?Sized>(
    items: &[WeightedItem],
    bounds: Rect,
    rng: &mut R,
) -> Vec<LayoutRect> {
    let working = entries(items);
    let mut out = Vec::with_capacity(working.len());
    subdivide(&working, bounds, rng, &mut out);
    out.sort_by_key(|r| r.index);
    out
}

fn subdivide<R: Rng + ?Sized>(
    items: &[Entry<'_>],
    bounds: Rect,
    rng: &mut R,
    out: &mut Vec<LayoutRect>,
) {
    match items {
        [] => {}
        [only] => out.push(LayoutRect {
            index: only.index,
            bounds,
            item: only.item.clone(),
        }),
        _ => {
            let axis = biased_axis(bounds, rng);
            let split = rng.gen_range(1..items.len());
            let (head, tail) = items.split_at(split);
            let weights = [total_weight(head), total_weight(tail)];
            let slices = split_proportionally(bounds, axis, &weights);
            subdivide(head, slices[0], rng, out);
            subdivide(tail, slices[1], rng, out);
        }
    }
}

/// Choose a cut axis; wide rectangles favour a vertical cut.
fn biased_axis<R: Rng + ?Sized>(bounds: Rect, rng: &mut R) -> SplitAxis {
    let span = f64::from(bounds.width) + f64::from(bounds.height);
    let p_vertical = if span > 0.0 {
        (f64::from(bounds.width) / span).clamp(0.0, 1.0)
    } else {
        0.5
    };
    if rng.gen_bool(p_vertical) {
        SplitAxis::Vertical
    } else {
        SplitAxis::Horizontal
    }
}

fn total_weight(items: &[Entry<'_>]) -> f64 {
    items.iter().map(|entry| entry.weight).sum()
}

/// Cut `bounds` into consecutive slices whose share of the cut dimension
/// equals each weight's share of the total.
///
/// Edges are computed once from the cumulative weight, so neighbouring
/// slices share the same edge value and the last slice ends on the parent
/// edge. Weights are scaled by the largest one before summing; weights
/// that are not finite and positive get an empty slice.
///
/// Edges are absolute `f32` coordinates, so a sliver far from the origin
/// carries a rounding error of about one ulp of its offset. Its area share
/// is exact only up to that, which matters for tiles well under 1 px wide.
pub fn split_proportionally(bounds: Rect, axis: SplitAxis, weights: &[f64]) -> Vec<Rect> {
    let usable = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
    let max = weights.iter().copied().map(usable).fold(0.0, f64::max);
    let scaled: Vec<f64> = weights
        .iter()
        .map(|w| if max > 0.0 { usable(*w) / max } else { 0.0 })
        .collect();
    let total: f64 = scaled.iter().sum();
    let (start, extent) = match axis {
        SplitAxis::Vertical => (bounds.x, bounds.width),
        SplitAxis::Horizontal => (bounds.y, bounds.height),
    };
    let end = start + extent;

    let mut edges = Vec::with_capacity(weights.len() + 1);
    edges.push(start);
    let mut cumulative = 0.0;
    for (i, w) in scaled.iter().enumerate() {
        cumulative += w;
        let edge = if i + 1 == scaled.len() {
            end
        } else if total > 0.0 {
            start + (f64::from(extent) * cumulative / total) as f32
        } else {
            start
        };
        edges.push(edge);
    }

    edges
        .windows(2)
        .map(|pair| {
            let (lo, hi) = (pair[0], pair[1].max(pair[0]));
            match axis {
                SplitAxis::Vertical => Rect::new(lo, bounds.y, hi - lo, bounds.height),
                SplitAxis::Horizontal => Rect::new(bounds.x, lo, bounds.width, hi - lo),
            }
        })
        .collect()
}

/// Treemap layout driver that owns its random source.
///
/// Use [`TreemapEngine::new`] for visual variety between layouts and
/// [`TreemapEngine::seeded`] when the same input must give the same mosaic.
#[derive(Debug, Clone, Default)]
pub struct TreemapEngine {
    rng: LayoutRng,
}

impl TreemapEngine {
    /// Create an engine seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a deterministic engine.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(LayoutRng::seeded(seed))
    }

    /// Create an engine around an existing generator.
    #[must_use]
    pub const fn with_rng(rng: LayoutRng) -> Self {
        Self { rng }
    }

    /// Lay out `items` in `viewport`, advancing the internal generator.
    pub fn layout(&mut self, items: &[WeightedItem], viewport: Size) -> Vec<LayoutRect> {
        layout_treemap(items, viewport, &mut self.rng)
    }

    /// Seed of the internal generator, if it was seeded explicitly.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.rng.seed()
    }
}
