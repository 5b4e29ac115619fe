//! Core types for Mosaic.
//!
//! This crate provides the foundational types shared by the layout and
//! chart engines:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color tokens: [`Color`] with hex parsing and WCAG contrast
//! - Randomness: [`LayoutRng`], the injectable source for randomized layouts

pub mod color;
mod geometry;
mod rng;

pub use color::{Color, ColorParseError};
pub use geometry::{Point, Rect, Size};
pub use rng::LayoutRng;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_color_lerp_stays_in_range(t in -1.0f32..2.0) {
            let c = Color::BLACK.lerp(&Color::WHITE, t);
            prop_assert!((0.0..=1.0).contains(&c.r));
            prop_assert!((0.0..=1.0).contains(&c.g));
            prop_assert!((0.0..=1.0).contains(&c.b));
        }

        #[test]
        fn prop_intersection_inside_both(
            x1 in -100.0f32..100.0, y1 in -100.0f32..100.0,
            w1 in 0.0f32..50.0, h1 in 0.0f32..50.0,
            x2 in -100.0f32..100.0, y2 in -100.0f32..100.0,
            w2 in 0.0f32..50.0, h2 in 0.0f32..50.0,
        ) {
            let a = Rect::new(x1, y1, w1, h1);
            let b = Rect::new(x2, y2, w2, h2);
            if let Some(i) = a.intersection(&b) {
                prop_assert!(i.width > 0.0 && i.height > 0.0);
                prop_assert!(i.x >= a.x && i.x >= b.x);
                prop_assert!(i.right() <= a.right().min(b.right()) + 1e-3);
            }
        }

        #[test]
        fn prop_sanitized_is_non_negative(w in any::<f32>(), h in any::<f32>()) {
            let s = Size::new(w, h).sanitized();
            prop_assert!(s.width >= 0.0 && s.height >= 0.0);
            prop_assert!(s.width.is_finite() && s.height.is_finite());
        }
    }
}
