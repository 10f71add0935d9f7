//! Configuration module.

pub mod loader;

pub use loader::{
    ConfigError, ConfigFile, ResolvedConfig, apply_cli_overrides, apply_env_overrides,
    default_config_path, default_log_path, load_config_file, load_config_with_precedence,
    merge_config,
};

use crate::model::item_store::DEFAULT_SAMPLE_SIZE;

/// Default scroll delta above which an update is treated as a jump.
pub const DEFAULT_JUMP_THRESHOLD: f64 = 500.0;

/// Default prefetch margin, in estimated item extents.
pub const DEFAULT_PREFETCH_ITEMS: f64 = 3.0;

/// Default slack before an item above the viewport counts as scrolled out.
pub const DEFAULT_REMOVAL_TOLERANCE: f64 = 5.0;

/// Tunable heuristics of the window controller.
///
/// None of these have a derivation; they trade work per scroll event against
/// visible gaps and are exposed as configuration for that reason.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowConfig {
    /// A scroll delta with magnitude above this triggers a full rebuild.
    pub jump_threshold: f64,

    /// Extra extent kept materialized past the viewport's bottom edge,
    /// expressed as a multiple of the estimated item extent.
    pub prefetch_items: f64,

    /// An item above the viewport is only removed once its bottom edge is
    /// more than this far above the viewport's top edge.
    pub removal_tolerance: f64,

    /// How many size-cache entries the average estimate samples.
    pub estimate_sample_size: usize,
}

impl WindowConfig {
    /// Prefetch margin for a given estimate.
    pub fn prefetch_margin(&self, estimate: f64) -> f64 {
        self.prefetch_items * estimate
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            jump_threshold: DEFAULT_JUMP_THRESHOLD,
            prefetch_items: DEFAULT_PREFETCH_ITEMS,
            removal_tolerance: DEFAULT_REMOVAL_TOLERANCE,
            estimate_sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_tunables() {
        let config = WindowConfig::default();
        assert_eq!(config.jump_threshold, 500.0);
        assert_eq!(config.prefetch_items, 3.0);
        assert_eq!(config.removal_tolerance, 5.0);
        assert_eq!(config.estimate_sample_size, 100);
    }

    #[test]
    fn prefetch_margin_scales_with_estimate() {
        let config = WindowConfig::default();
        assert_eq!(config.prefetch_margin(50.0), 150.0);
        assert_eq!(config.prefetch_margin(1.0), 3.0);
    }

    #[test]
    fn config_is_copyable() {
        let config = WindowConfig {
            jump_threshold: 200.0,
            ..WindowConfig::default()
        };
        let copied = config;
        assert_eq!(config, copied);
    }
}
