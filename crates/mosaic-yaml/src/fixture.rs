//! Fixture documents: treemap items and per-range usage curves.

use mosaic_chart::{AnchorSet, CurveAnchor, Scrubber, TimeRange};
use mosaic_core::Size;
use mosaic_layout::{TreemapEngine, WeightedItem};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::error::ParseError;

/// Fixture loaded from a `.yaml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    /// Fixture format version
    #[serde(default = "default_version")]
    pub mosaic: String,
    /// Fixture name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Container the treemap is laid out in
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Time range shown first
    #[serde(default)]
    pub default_mode: TimeRange,
    /// Fixed layout seed; omitted means a fresh arrangement every run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Treemap items
    #[serde(default)]
    pub items: Vec<WeightedItem>,
    /// Usage curve anchors per time range
    #[serde(default)]
    pub curves: BTreeMap<TimeRange, Vec<CurveAnchor>>,
}

fn default_version() -> String {
    "0.1".to_string()
}

/// Viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Width in points
    #[serde(default = "default_width")]
    pub width: f32,
    /// Height in points
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_width() -> f32 {
    300.0
}

fn default_height() -> f32 {
    200.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl From<ViewportConfig> for Size {
    fn from(v: ViewportConfig) -> Self {
        Self::new(v.width, v.height)
    }
}

impl Fixture {
    /// Parse and validate a fixture from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        let fixture: Self = serde_yaml_ng::from_str(yaml)?;
        fixture.validate()?;
        Ok(fixture)
    }

    /// Read, parse and validate a fixture file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded fixture {}", path.display());
        Self::from_yaml(&yaml)
    }

    /// Serialize fixture to YAML string.
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check everything the engines rely on.
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.name.trim().is_empty() {
            return Err(ParseError::InvalidValue {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        for (field, value) in [
            ("viewport.width", self.viewport.width),
            ("viewport.height", self.viewport.height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParseError::InvalidValue {
                    field: field.to_string(),
                    message: format!("must be a positive number, got {value}"),
                });
            }
        }

        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.name.as_str()) {
                return Err(ParseError::Validation(format!(
                    "duplicate item name '{}'",
                    item.name
                )));
            }
        }

        for mode in self.curves.keys() {
            self.anchor_set(*mode)?;
        }
        if !self.curves.is_empty() && !self.curves.contains_key(&self.default_mode) {
            return Err(ParseError::Validation(format!(
                "default_mode '{}' has no curve",
                self.default_mode
            )));
        }

        Ok(())
    }

    /// Viewport as a size.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.viewport.into()
    }

    /// Items ready for layout; entries without a positive weight are dropped.
    #[must_use]
    pub fn layout_items(&self) -> Vec<WeightedItem> {
        self.items
            .iter()
            .filter(|item| {
                let keep = item.is_layoutable();
                if !keep {
                    log::warn!(
                        "fixture '{}': skipping item '{}' with weight {}",
                        self.name,
                        item.name,
                        item.value
                    );
                }
                keep
            })
            .cloned()
            .collect()
    }

    /// Layout engine honouring the fixture seed.
    #[must_use]
    pub fn engine(&self) -> TreemapEngine {
        self.seed
            .map_or_else(TreemapEngine::new, TreemapEngine::seeded)
    }

    /// Validated anchors for one time range.
    pub fn anchor_set(&self, mode: TimeRange) -> Result<AnchorSet, ParseError> {
        let anchors = self
            .curves
            .get(&mode)
            .ok_or_else(|| ParseError::Validation(format!("no curve for time range '{mode}'")))?;
        AnchorSet::new(anchors.clone()).map_err(|source| ParseError::Curve { mode, source })
    }

    /// Every curve, validated.
    pub fn anchor_sets(&self) -> Result<BTreeMap<TimeRange, AnchorSet>, ParseError> {
        self.curves
            .keys()
            .map(|mode| Ok((*mode, self.anchor_set(*mode)?)))
            .collect()
    }

    /// Scrubber over all curves, starting on `default_mode`.
    pub fn scrubber(&self) -> Result<Scrubber, ParseError> {
        Scrubber::new(self.anchor_sets()?, self.default_mode).map_err(|source| {
            ParseError::Curve {
                mode: self.default_mode,
                source,
            }
        })
    }
}
