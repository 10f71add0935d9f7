//! Spacer sizes bracketing the window

use crate::surface::Spacer;

/// Extents of the top and bottom spacers.
///
/// Both are always `>= 0`; every mutation clamps.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpacerSizes {
    /// Stand-in extent for the unmaterialized items above the window.
    pub top: f64,
    /// Stand-in extent for the unmaterialized items below the window.
    pub bottom: f64,
}

impl SpacerSizes {
    /// Extent of one spacer.
    pub fn get(&self, spacer: Spacer) -> f64 {
        match spacer {
            Spacer::Top => self.top,
            Spacer::Bottom => self.bottom,
        }
    }

    /// Overwrite one spacer, clamping at zero.
    pub fn set(&mut self, spacer: Spacer, extent: f64) -> f64 {
        let extent = if extent.is_nan() { 0.0 } else { extent.max(0.0) };
        match spacer {
            Spacer::Top => self.top = extent,
            Spacer::Bottom => self.bottom = extent,
        }
        extent
    }

    /// Shrink one spacer by a measured extent, clamping at zero.
    pub fn shrink(&mut self, spacer: Spacer, by: f64) -> f64 {
        self.set(spacer, self.get(spacer) - by)
    }

    /// Size one spacer as `estimate × count`.
    pub fn estimate(&mut self, spacer: Spacer, estimate: f64, count: usize) -> f64 {
        self.set(spacer, estimate * count as f64)
    }
}
