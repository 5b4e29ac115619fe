//! Treemap input and output types.

use mosaic_core::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// A named item whose weight decides how much of the viewport it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedItem {
    /// Display name, unique within one layout call
    pub name: String,
    /// Weight; only finite values > 0 are laid out
    pub value: f64,
    /// Fill color token
    #[serde(with = "mosaic_core::color::hex", default)]
    pub color: Color,
    /// Opaque caller data carried through to the output
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}

impl WeightedItem {
    /// Create an item with the default color and no metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            color: Color::default(),
            metadata: serde_json::Value::Null,
        }
    }

    /// Set the fill color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Attach caller metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Whether the item can take part in a layout (finite, positive weight).
    #[must_use]
    pub fn is_layoutable(&self) -> bool {
        self.value.is_finite() && self.value > 0.0
    }
}

/// Placement of one item inside the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    /// Position of the item in the input slice
    pub index: usize,
    /// Placed bounds in viewport coordinates
    pub bounds: Rect,
    /// The item placed here
    pub item: WeightedItem,
}

impl LayoutRect {
    /// Area covered by this rectangle.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.bounds.area()
    }

    /// Hit-test a pointer position (viewport coordinates).
    #[must_use]
    pub fn contains_point(&self, point: &Point) -> bool {
        self.bounds.contains_point(point)
    }

    /// Text color that stays legible on this tile's fill.
    #[must_use]
    pub fn label_color(&self) -> Color {
        self.item.color.readable_text_color()
    }
}

/// Find the tile under a pointer position.
///
/// Points on a shared edge resolve to the first tile in `rects` order.
#[must_use]
pub fn hit_test<'a>(rects: &'a [LayoutRect], point: &Point) -> Option<&'a LayoutRect> {
    rects.iter().find(|r| r.contains_point(point))
}
