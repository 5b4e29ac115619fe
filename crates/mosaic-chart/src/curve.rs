//! Piecewise quadratic curve definition shared by drawing and sampling.
//!
//! A curve is a chain of quadratic Bezier segments, one per pair of
//! adjacent anchors. The control point of each segment comes from
//! [`control_point`] and nowhere else, so the drawn path and the scrub
//! marker always agree.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::anchor::CurveAnchor;
use crate::mode::{CurveBlend, TimeRange};
use crate::point::Point2D;

/// Quadratic Bezier segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticBezier {
    /// Start point
    pub p0: Point2D,
    /// Control point
    pub p1: Point2D,
    /// End point
    pub p2: Point2D,
}

impl QuadraticBezier {
    /// Create a new quadratic Bezier curve.
    #[must_use]
    pub const fn new(p0: Point2D, p1: Point2D, p2: Point2D) -> Self {
        Self { p0, p1, p2 }
    }

    /// Evaluate the curve at parameter t (0 to 1).
    #[must_use]
    pub fn evaluate(&self, t: f64) -> Point2D {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;
        let a = mt * mt;
        let b = 2.0 * mt * t;
        let c = t * t;

        Point2D::new(
            c.mul_add(self.p2.x, a.mul_add(self.p0.x, b * self.p1.x)),
            c.mul_add(self.p2.y, a.mul_add(self.p0.y, b * self.p1.y)),
        )
    }

    /// Convert to a polyline with given number of segments.
    #[must_use]
    pub fn to_polyline(&self, segments: usize) -> Vec<Point2D> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.evaluate(i as f64 / segments as f64))
            .collect()
    }

    /// Split curve at parameter t (De Casteljau).
    #[must_use]
    pub fn split(&self, t: f64) -> (Self, Self) {
        let t = t.clamp(0.0, 1.0);
        let p01 = self.p0.lerp(&self.p1, t);
        let p12 = self.p1.lerp(&self.p2, t);
        let mid = p01.lerp(&p12, t);

        (Self::new(self.p0, p01, mid), Self::new(mid, p12, self.p2))
    }
}

/// Control point for the segment between `left` and `right`.
///
/// x sits at the segment midpoint, which keeps the curve's x linear in t.
/// y is weighted towards `left` by `blend`.
#[must_use]
pub fn control_point(left: Point2D, right: Point2D, blend: CurveBlend) -> Point2D {
    let x = (left.x + right.x) / 2.0;
    let y = blend.overshoot.mul_add(
        left.y - right.y,
        blend
            .anchor_weight
            .mul_add(left.y, (1.0 - blend.anchor_weight) * right.y),
    );
    Point2D::new(x, y)
}

/// The Bezier segment joining two anchors under a blend.
#[must_use]
pub fn segment(left: &CurveAnchor, right: &CurveAnchor, blend: CurveBlend) -> QuadraticBezier {
    let p0 = Point2D::new(left.x, left.y);
    let p2 = Point2D::new(right.x, right.y);
    QuadraticBezier::new(p0, control_point(p0, p2, blend), p2)
}

/// Every segment of the curve through `anchors` for `mode`.
pub fn segments(
    anchors: &[CurveAnchor],
    mode: TimeRange,
) -> impl Iterator<Item = QuadraticBezier> + '_ {
    let blend = mode.blend();
    anchors
        .windows(2)
        .map(move |pair| segment(&pair[0], &pair[1], blend))
}

/// Drawing command for a path renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PathCommand {
    /// Move the pen without drawing.
    MoveTo {
        /// Destination
        to: Point2D,
    },
    /// Quadratic curve from the current point.
    QuadTo {
        /// Control point
        control: Point2D,
        /// Destination
        to: Point2D,
    },
}

/// Path commands for the curve through `anchors` in `mode`.
///
/// Empty for an empty anchor list; a lone anchor yields a single `MoveTo`.
#[must_use]
pub fn curve_path(mode: TimeRange, anchors: &[CurveAnchor]) -> Vec<PathCommand> {
    let Some(first) = anchors.first() else {
        return Vec::new();
    };

    let mut commands = Vec::with_capacity(anchors.len());
    commands.push(PathCommand::MoveTo {
        to: Point2D::new(first.x, first.y),
    });
    commands.extend(segments(anchors, mode).map(|seg| PathCommand::QuadTo {
        control: seg.p1,
        to: seg.p2,
    }));
    commands
}

/// Render path commands as SVG path data (`M x y Q cx cy x y ...`).
#[must_use]
pub fn to_svg_path(commands: &[PathCommand]) -> String {
    let mut out = String::new();
    for (i, command) in commands.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // Writing to a String cannot fail.
        let _ = match command {
            PathCommand::MoveTo { to } => write!(out, "M{} {}", to.x, to.y),
            PathCommand::QuadTo { control, to } => {
                write!(out, "Q{} {} {} {}", control.x, control.y, to.x, to.y)
            }
        };
    }
    out
}

/// Flatten the curve into a polyline, `segments_per_span` steps per segment.
#[must_use]
pub fn polyline(
    mode: TimeRange,
    anchors: &[CurveAnchor],
    segments_per_span: usize,
) -> Vec<Point2D> {
    match anchors {
        [] => Vec::new(),
        [only] => vec![Point2D::new(only.x, only.y)],
        _ => {
            let mut points = Vec::with_capacity((anchors.len() - 1) * segments_per_span.max(1) + 1);
            for (i, seg) in segments(anchors, mode).enumerate() {
                let pts = seg.to_polyline(segments_per_span);
                // Skip the shared start point of every segment after the first.
                let skip = usize::from(i > 0);
                points.extend(pts.into_iter().skip(skip));
            }
            points
        }
    }
}
