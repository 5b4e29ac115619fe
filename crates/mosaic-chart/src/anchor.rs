//! Curve anchors and validated anchor sequences.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building curve inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// Fewer than two anchors, so there is no segment to draw.
    #[error("a curve needs at least 2 anchors, got {0}")]
    TooFewAnchors(usize),

    /// An anchor coordinate or value is NaN or infinite.
    #[error("anchor {index} has a non-finite coordinate or value")]
    NonFinite {
        /// Position of the offending anchor
        index: usize,
    },

    /// Anchor x coordinates must strictly increase.
    #[error("anchor {index} x={x} does not come after the previous x={previous}")]
    NotIncreasing {
        /// Position of the offending anchor
        index: usize,
        /// Its x coordinate
        x: f64,
        /// The previous anchor's x coordinate
        previous: f64,
    },

    /// Mode name not recognized.
    #[error("unknown time range '{0}'")]
    UnknownMode(String),

    /// No anchors registered for the requested mode.
    #[error("no curve registered for time range '{0}'")]
    MissingCurve(String),
}

/// One vertex of a piecewise curve, with the metric and label it carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveAnchor {
    /// Horizontal position in chart coordinates
    pub x: f64,
    /// Vertical position in chart coordinates
    pub y: f64,
    /// Auxiliary metric (e.g. usage percentage)
    #[serde(alias = "usage")]
    pub value: f64,
    /// Descriptive label shown next to the marker
    #[serde(default)]
    pub label: String,
}

impl CurveAnchor {
    /// Create an anchor.
    #[must_use]
    pub fn new(x: f64, y: f64, value: f64, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            value,
            label: label.into(),
        }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.value.is_finite()
    }
}

/// Anchor sequence checked to define at least one segment.
///
/// Guarantees two or more anchors, finite numbers, and strictly increasing x.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnchorSet {
    anchors: Vec<CurveAnchor>,
}

impl AnchorSet {
    /// Validate and wrap an anchor sequence.
    pub fn new(anchors: Vec<CurveAnchor>) -> Result<Self, CurveError> {
        if anchors.len() < 2 {
            return Err(CurveError::TooFewAnchors(anchors.len()));
        }
        for (index, anchor) in anchors.iter().enumerate() {
            if !anchor.is_finite() {
                return Err(CurveError::NonFinite { index });
            }
        }
        for (index, pair) in anchors.windows(2).enumerate() {
            if pair[1].x <= pair[0].x {
                return Err(CurveError::NotIncreasing {
                    index: index + 1,
                    x: pair[1].x,
                    previous: pair[0].x,
                });
            }
        }
        Ok(Self { anchors })
    }

    /// The anchors, in x order.
    #[must_use]
    pub fn as_slice(&self) -> &[CurveAnchor] {
        &self.anchors
    }

    /// First anchor.
    #[must_use]
    pub fn first(&self) -> &CurveAnchor {
        &self.anchors[0]
    }

    /// Last anchor.
    #[must_use]
    pub fn last(&self) -> &CurveAnchor {
        &self.anchors[self.anchors.len() - 1]
    }

    /// Number of anchors (always at least 2).
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Horizontal extent `(first.x, last.x)`.
    #[must_use]
    pub fn x_range(&self) -> (f64, f64) {
        (self.first().x, self.last().x)
    }
}

impl<'de> Deserialize<'de> for AnchorSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let anchors = Vec::<CurveAnchor>::deserialize(deserializer)?;
        Self::new(anchors).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<Vec<CurveAnchor>> for AnchorSet {
    type Error = CurveError;

    fn try_from(anchors: Vec<CurveAnchor>) -> Result<Self, Self::Error> {
        Self::new(anchors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekly() -> Vec<CurveAnchor> {
        vec![
            CurveAnchor::new(20.0, 160.0, 12.0, "Mon"),
            CurveAnchor::new(130.0, 100.0, 45.0, "Wed"),
            CurveAnchor::new(350.0, 60.0, 75.0, "Sun"),
        ]
    }

    #[test]
    fn test_valid_set() {
        let set = AnchorSet::new(weekly()).unwrap();
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        assert_eq!(set.x_range(), (20.0, 350.0));
        assert_eq!(set.last().label, "Sun");
    }

    #[test]
    fn test_too_few_anchors() {
        assert_eq!(AnchorSet::new(vec![]), Err(CurveError::TooFewAnchors(0)));
        assert_eq!(
            AnchorSet::new(vec![CurveAnchor::new(0.0, 0.0, 0.0, "")]),
            Err(CurveError::TooFewAnchors(1))
        );
    }

    #[test]
    fn test_rejects_non_increasing_x() {
        let mut anchors = weekly();
        anchors[2].x = 130.0;
        assert_eq!(
            AnchorSet::new(anchors),
            Err(CurveError::NotIncreasing {
                index: 2,
                x: 130.0,
                previous: 130.0
            })
        );
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut anchors = weekly();
        anchors[1].value = f64::NAN;
        assert_eq!(
            AnchorSet::new(anchors),
            Err(CurveError::NonFinite { index: 1 })
        );
    }

    #[test]
    fn test_deserialize_usage_alias() {
        let json = r#"[{"x":0,"y":10,"usage":5,"label":"a"},{"x":10,"y":20,"value":7}]"#;
        let set: AnchorSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.first().value, 5.0);
        assert_eq!(set.last().label, "");
    }

    #[test]
    fn test_deserialize_validates() {
        let err = serde_json::from_str::<AnchorSet>(r#"[{"x":0,"y":0,"value":0}]"#).unwrap_err();
        assert!(err.to_string().contains("at least 2 anchors"));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            CurveError::UnknownMode("daily".into()).to_string(),
            "unknown time range 'daily'"
        );
    }
}
