//! Solver statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Which resolution path produced a layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// No active zones or no usable space: default dimensions everywhere.
    #[default]
    Degenerate,
    /// Exactly one active zone, sized by the single-zone fitter.
    SingleZone,
    /// No primary zone and a single fill zone.
    PureFill,
    /// Level search led by one primary zone.
    SinglePrimary,
    /// Level search shared by two primary zones.
    DualPrimary,
}

/// Statistics collected during one `compute_layout` call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveStats {
    pub strategy: Strategy,

    /// Right-column options explored (0 without a right column).
    pub right_options: u32,

    /// Levels evaluated across all options.
    pub candidates: u32,

    /// Levels at which every zone fits the available height.
    pub feasible: u32,

    /// Levels that overflow the available height.
    pub overflowing: u32,

    /// Levels discarded because a fill zone could not meet its floor, or
    /// a multi-column option would have to cap a zone.
    pub rejected: u32,

    /// Zones the winner moved up a level with leftover height.
    pub slack_iterations: u32,

    /// The result is the least-overflow fallback, not a fitting level.
    pub used_fallback: bool,
}

impl SolveStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of evaluated levels that fit.
    #[must_use]
    pub fn feasible_ratio(&self) -> f64 {
        if self.candidates == 0 {
            0.0
        } else {
            self.feasible as f64 / self.candidates as f64
        }
    }
}
