//! Marker state for scrubbing across a usage chart.
//!
//! The platform's gesture layer owns a [`Scrubber`] and forwards pointer
//! events to it; the scrubber calls the pure sampler and remembers where
//! the marker is. Switching time range snaps the marker to the default
//! position of the new curve instead of animating across curves.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::anchor::{AnchorSet, CurveError};
use crate::mode::TimeRange;
use crate::sampler::SampleResult;

/// Phase of the current scrub gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ScrubPhase {
    /// No gesture yet since the last mode change
    #[default]
    Idle,
    /// Pointer went down
    Started,
    /// Pointer moved while down
    Changed,
    /// Pointer released; marker stays where it was left
    Ended,
    /// Gesture aborted; marker restored to its pre-gesture position
    Cancelled,
}

/// Holds the active curve and the marker position between pointer events.
#[derive(Debug, Clone)]
pub struct Scrubber {
    curves: BTreeMap<TimeRange, AnchorSet>,
    mode: TimeRange,
    phase: ScrubPhase,
    marker: SampleResult,
    before_gesture: Option<SampleResult>,
}

impl Scrubber {
    /// Create a scrubber showing `mode`.
    ///
    /// Fails with [`CurveError::MissingCurve`] if `curves` has no entry for
    /// `mode`.
    pub fn new(
        curves: BTreeMap<TimeRange, AnchorSet>,
        mode: TimeRange,
    ) -> Result<Self, CurveError> {
        let marker = curves
            .get(&mode)
            .map(|anchors| default_marker(anchors, mode))
            .ok_or_else(|| CurveError::MissingCurve(mode.to_string()))?;
        Ok(Self {
            curves,
            mode,
            phase: ScrubPhase::Idle,
            marker,
            before_gesture: None,
        })
    }

    /// Active time range.
    #[must_use]
    pub const fn mode(&self) -> TimeRange {
        self.mode
    }

    /// Current gesture phase.
    #[must_use]
    pub const fn phase(&self) -> ScrubPhase {
        self.phase
    }

    /// Current marker.
    #[must_use]
    pub const fn marker(&self) -> &SampleResult {
        &self.marker
    }

    /// Anchors of the active curve.
    #[must_use]
    pub fn anchors(&self) -> &AnchorSet {
        // `mode` is only ever set to a key present in `curves`.
        &self.curves[&self.mode]
    }

    /// Time ranges with a registered curve.
    pub fn modes(&self) -> impl Iterator<Item = TimeRange> + '_ {
        self.curves.keys().copied()
    }

    /// Register or replace the curve for a time range.
    ///
    /// Replacing the active curve resets the marker.
    pub fn insert_curve(&mut self, mode: TimeRange, anchors: AnchorSet) {
        self.curves.insert(mode, anchors);
        if mode == self.mode {
            self.reset_marker();
        }
    }

    /// Switch the active time range and snap the marker to its default.
    pub fn set_mode(&mut self, mode: TimeRange) -> Result<(), CurveError> {
        if !self.curves.contains_key(&mode) {
            return Err(CurveError::MissingCurve(mode.to_string()));
        }
        if mode != self.mode {
            log::debug!("scrubber switching {} -> {mode}", self.mode);
        }
        self.mode = mode;
        self.reset_marker();
        Ok(())
    }

    /// Pointer down at `x` (chart-local coordinates).
    pub fn begin(&mut self, x: f64) -> &SampleResult {
        self.before_gesture = Some(self.marker.clone());
        self.phase = ScrubPhase::Started;
        self.track(x)
    }

    /// Pointer moved to `x`. Movement without a preceding
    /// [`begin`](Self::begin) starts a gesture implicitly.
    pub fn update(&mut self, x: f64) -> &SampleResult {
        match self.phase {
            ScrubPhase::Started | ScrubPhase::Changed => {
                self.phase = ScrubPhase::Changed;
                self.track(x)
            }
            _ => self.begin(x),
        }
    }

    /// Pointer released; the marker keeps its last position.
    pub fn end(&mut self) -> &SampleResult {
        if matches!(self.phase, ScrubPhase::Started | ScrubPhase::Changed) {
            self.phase = ScrubPhase::Ended;
        }
        self.before_gesture = None;
        &self.marker
    }

    /// Gesture aborted; restore the marker to where it was before.
    pub fn cancel(&mut self) -> &SampleResult {
        if let Some(previous) = self.before_gesture.take() {
            self.marker = previous;
            self.phase = ScrubPhase::Cancelled;
        }
        &self.marker
    }

    fn track(&mut self, x: f64) -> &SampleResult {
        let mode = self.mode;
        self.marker = self.anchors().sample(x, mode);
        &self.marker
    }

    fn reset_marker(&mut self) {
        self.marker = default_marker(self.anchors(), self.mode);
        self.phase = ScrubPhase::Idle;
        self.before_gesture = None;
    }
}

/// Marker shown before any interaction: the most recent (last) anchor.
#[must_use]
pub fn default_marker(anchors: &AnchorSet, mode: TimeRange) -> SampleResult {
    anchors.sample(anchors.last().x, mode)
}
