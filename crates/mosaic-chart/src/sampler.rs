//! Pointer-to-value sampling along a curve.
//!
//! Called on every pointer move while the user drags across a chart, so it
//! stays O(anchors) and performs no I/O.

use serde::{Deserialize, Serialize};

use crate::anchor::{AnchorSet, CurveAnchor};
use crate::curve::segment;
use crate::mode::TimeRange;

/// Where the marker sits for a given pointer position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleResult {
    /// Clamped pointer x
    pub x: f64,
    /// Curve y at `x`
    pub y: f64,
    /// Fraction along the bracketing segment (0 to 1)
    pub t: f64,
    /// Index of the left anchor of the bracketing segment
    pub segment: usize,
    /// Interpolated metric rounded for display
    pub value: f64,
    /// Interpolated metric before rounding
    pub exact_value: f64,
    /// Label of the nearer anchor
    pub label: String,
}

impl SampleResult {
    fn at_anchor(anchor: &CurveAnchor) -> Self {
        Self {
            x: anchor.x,
            y: anchor.y,
            t: 0.0,
            segment: 0,
            value: anchor.value.round(),
            exact_value: anchor.value,
            label: anchor.label.clone(),
        }
    }
}

/// Sample the curve through `anchors` at a raw pointer x.
///
/// The pointer is clamped to the anchors' x range, never rejected. Returns
/// `None` for an empty anchor list; a single anchor is returned as-is.
/// Anchors are expected in increasing x order (see [`AnchorSet`]).
#[must_use]
pub fn sample_curve(
    pointer_x: f64,
    mode: TimeRange,
    anchors: &[CurveAnchor],
) -> Option<SampleResult> {
    let (first, last) = match anchors {
        [] => return None,
        [only] => return Some(SampleResult::at_anchor(only)),
        [first, .., last] => (first, last),
    };

    // max/min rather than clamp: clamp panics on NaN bounds.
    let x = if pointer_x.is_finite() {
        pointer_x.max(first.x).min(last.x)
    } else {
        first.x
    };

    let index = anchors
        .windows(2)
        .position(|pair| pair[0].x <= x && x <= pair[1].x)
        .unwrap_or(anchors.len() - 2);
    let left = &anchors[index];
    let right = &anchors[index + 1];

    let span = right.x - left.x;
    let t = if span.abs() < f64::EPSILON {
        0.0
    } else {
        ((x - left.x) / span).clamp(0.0, 1.0)
    };

    let y = segment(left, right, mode.blend()).evaluate(t).y;
    let exact_value = (right.value - left.value).mul_add(t, left.value);
    let label = if t < 0.5 { &left.label } else { &right.label };

    Some(SampleResult {
        x,
        y,
        t,
        segment: index,
        value: exact_value.round(),
        exact_value,
        label: label.clone(),
    })
}

impl AnchorSet {
    /// Sample this validated curve at a raw pointer x.
    #[must_use]
    pub fn sample(&self, pointer_x: f64, mode: TimeRange) -> SampleResult {
        match sample_curve(pointer_x, mode, self.as_slice()) {
            Some(sample) => sample,
            // An AnchorSet always holds at least two anchors.
            None => SampleResult::at_anchor(self.first()),
        }
    }
}
