//! Size quantization.
//!
//! Resize events arrive at sub-pixel granularity and in bursts. Snapping
//! sizes to a grid collapses near-identical measurements so the solver only
//! runs when the container meaningfully changed.

use crate::core::ContainerSize;

/// Maps a measured container size to the size the solver sees.
pub trait SizeQuantizer: Send + Sync {
    fn quantize(&self, size: ContainerSize) -> ContainerSize;
}

/// Floors both dimensions to a multiple of `step` pixels.
///
/// Non-finite measurements become zero, which the solver treats as
/// degenerate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridQuantizer {
    step: f64,
}

impl GridQuantizer {
    /// Grid of `step` pixels; a zero step is treated as 1.
    #[must_use]
    pub fn new(step: u32) -> Self {
        Self {
            step: step.max(1) as f64,
        }
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    fn snap(&self, value: f64) -> f64 {
        if value.is_finite() {
            (value / self.step).floor() * self.step
        } else {
            0.0
        }
    }
}

impl Default for GridQuantizer {
    fn default() -> Self {
        Self::new(4)
    }
}

impl SizeQuantizer for GridQuantizer {
    fn quantize(&self, size: ContainerSize) -> ContainerSize {
        ContainerSize::new(self.snap(size.width), self.snap(size.height))
    }
}

/// Passes sizes through unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoQuantization;

impl SizeQuantizer for NoQuantization {
    fn quantize(&self, size: ContainerSize) -> ContainerSize {
        size
    }
}
