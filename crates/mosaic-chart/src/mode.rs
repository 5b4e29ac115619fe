//! Time-range modes and their curve sharpness constants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::anchor::CurveError;

/// Blend weights that place a segment's control point.
///
/// The control point's y is
/// `anchor_weight * left.y + (1 - anchor_weight) * right.y + overshoot * (left.y - right.y)`.
/// A high `anchor_weight` keeps the bend close to the left anchor (a sharp
/// knee); `0.5` with no overshoot gives a straight segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveBlend {
    /// Weight of the left anchor's y in the control point
    pub anchor_weight: f64,
    /// Extra pull away from the right anchor, relative to the segment rise
    pub overshoot: f64,
}

impl CurveBlend {
    /// Create a blend.
    #[must_use]
    pub const fn new(anchor_weight: f64, overshoot: f64) -> Self {
        Self {
            anchor_weight,
            overshoot,
        }
    }

    /// Blend that draws straight segments.
    pub const LINEAR: Self = Self::new(0.5, 0.0);
}

impl Default for CurveBlend {
    fn default() -> Self {
        Self::LINEAR
    }
}

/// Time range shown by a usage chart. Each mode has its own anchor
/// sequence and sharpness constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// Seven days
    #[default]
    Weekly,
    /// One month
    Monthly,
    /// Three months
    Quarterly,
    /// Twelve months
    Yearly,
}

impl TimeRange {
    /// Every mode, in display order.
    pub const ALL: [Self; 4] = [Self::Weekly, Self::Monthly, Self::Quarterly, Self::Yearly];

    /// Sharpness constants for this mode.
    ///
    /// These are tuned to match the drawn charts; keep them as they are.
    #[must_use]
    pub const fn blend(self) -> CurveBlend {
        match self {
            Self::Weekly => CurveBlend::new(0.7, 0.1),
            Self::Monthly => CurveBlend::new(0.8, 0.05),
            Self::Quarterly => CurveBlend::new(0.5, 0.0),
            Self::Yearly => CurveBlend::new(0.6, 0.08),
        }
    }

    /// Lowercase identifier, as used in fixtures and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CurveError::UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_constants() {
        assert_eq!(TimeRange::Weekly.blend(), CurveBlend::new(0.7, 0.1));
        assert_eq!(TimeRange::Monthly.blend(), CurveBlend::new(0.8, 0.05));
        assert_eq!(TimeRange::Quarterly.blend(), CurveBlend::LINEAR);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("weekly".parse::<TimeRange>().unwrap(), TimeRange::Weekly);
        assert_eq!(" Monthly ".parse::<TimeRange>().unwrap(), TimeRange::Monthly);
        assert!(matches!(
            "daily".parse::<TimeRange>(),
            Err(CurveError::UnknownMode(m)) if m == "daily"
        ));
    }

    #[test]
    fn test_mode_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&TimeRange::Quarterly).unwrap(),
            "\"quarterly\""
        );
        let mode: TimeRange = serde_json::from_str("\"yearly\"").unwrap();
        assert_eq!(mode, TimeRange::Yearly);
    }

    #[test]
    fn test_display_roundtrip() {
        for mode in TimeRange::ALL {
            assert_eq!(mode.to_string().parse::<TimeRange>().unwrap(), mode);
        }
    }
}
