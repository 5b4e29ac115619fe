#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::unwrap_used)]
//! Usage-chart curves for Mosaic.
//!
//! A usage chart is a piecewise quadratic curve through a fixed anchor
//! sequence per [`TimeRange`]. This crate provides:
//! - The shared curve definition: [`control_point`], [`segment`]
//! - Rendering helpers: [`curve_path`], [`to_svg_path`], [`polyline`]
//! - Pointer sampling: [`sample_curve`] returning a [`SampleResult`]
//! - Gesture-side marker state: [`Scrubber`]
//!
//! # Example
//!
//! ```
//! use mosaic_chart::{sample_curve, CurveAnchor, TimeRange};
//!
//! let anchors = vec![
//!     CurveAnchor::new(20.0, 160.0, 12.0, "Mon"),
//!     CurveAnchor::new(130.0, 100.0, 45.0, "Wed"),
//!     CurveAnchor::new(350.0, 60.0, 75.0, "Sun"),
//! ];
//! let sample = sample_curve(75.0, TimeRange::Weekly, &anchors).unwrap();
//! assert_eq!(sample.value, 29.0);
//! ```

mod anchor;
mod curve;
mod mode;
mod point;
mod sampler;
mod scrubber;

pub use anchor::{AnchorSet, CurveAnchor, CurveError};
pub use curve::{
    control_point, curve_path, polyline, segment, segments, to_svg_path, PathCommand,
    QuadraticBezier,
};
pub use mode::{CurveBlend, TimeRange};
pub use point::Point2D;
pub use sampler::{sample_curve, SampleResult};
pub use scrubber::{default_marker, ScrubPhase, Scrubber};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn weekly() -> Vec<CurveAnchor> {
        vec![
            CurveAnchor::new(20.0, 160.0, 12.0, "Mon"),
            CurveAnchor::new(130.0, 100.0, 45.0, "Wed"),
            CurveAnchor::new(350.0, 60.0, 75.0, "Sun"),
        ]
    }

    fn any_mode() -> impl Strategy<Value = TimeRange> {
        prop::sample::select(TimeRange::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_clamps_past_last_anchor(beyond in 0.0f64..10_000.0, mode in any_mode()) {
            let anchors = weekly();
            prop_assert_eq!(
                sample_curve(350.0 + beyond, mode, &anchors),
                sample_curve(350.0, mode, &anchors)
            );
        }

        #[test]
        fn prop_clamps_before_first_anchor(before in 0.0f64..10_000.0, mode in any_mode()) {
            let anchors = weekly();
            prop_assert_eq!(
                sample_curve(20.0 - before, mode, &anchors),
                sample_curve(20.0, mode, &anchors)
            );
        }

        #[test]
        fn prop_sample_is_continuous(x in 20.0f64..349.0, mode in any_mode()) {
            let anchors = weekly();
            let eps = 1e-3;
            let a = sample_curve(x, mode, &anchors).unwrap();
            let b = sample_curve(x + eps, mode, &anchors).unwrap();
            // Steepest slope on this curve is well under 5 px/px.
            prop_assert!((a.y - b.y).abs() <= 5.0 * eps);
            prop_assert!((a.exact_value - b.exact_value).abs() <= 1.0 * eps);
        }

        #[test]
        fn prop_marker_lies_on_drawn_path(x in 20.0f64..=350.0, mode in any_mode()) {
            let anchors = weekly();
            let sample = sample_curve(x, mode, &anchors).unwrap();
            let seg = segments(&anchors, mode).nth(sample.segment).unwrap();
            let on_path = seg.evaluate(sample.t);
            prop_assert!((on_path.x - sample.x).abs() < 1e-9);
            prop_assert!((on_path.y - sample.y).abs() < 1e-9);
        }

        #[test]
        fn prop_value_between_neighbours(x in 20.0f64..=350.0, mode in any_mode()) {
            let anchors = weekly();
            let s = sample_curve(x, mode, &anchors).unwrap();
            let lo = anchors[s.segment].value.min(anchors[s.segment + 1].value);
            let hi = anchors[s.segment].value.max(anchors[s.segment + 1].value);
            prop_assert!(s.exact_value >= lo - 1e-9 && s.exact_value <= hi + 1e-9);
        }
    }
}
