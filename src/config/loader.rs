//! Configuration file loading with precedence handling.

use super::WindowConfig;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "VIRTLIST_CONFIG";

/// Environment variable overriding the jump threshold.
pub const JUMP_THRESHOLD_ENV_VAR: &str = "VIRTLIST_JUMP_THRESHOLD";

/// Environment variable overriding the prefetch multiplier.
pub const PREFETCH_ITEMS_ENV_VAR: &str = "VIRTLIST_PREFETCH_ITEMS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A tunable is out of its valid range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending setting.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/virtlist/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Scroll delta above which the window is rebuilt from scratch.
    #[serde(default)]
    pub jump_threshold: Option<f64>,

    /// Prefetch margin in estimated item extents.
    #[serde(default)]
    pub prefetch_items: Option<f64>,

    /// Slack before an item above the viewport is removed.
    #[serde(default)]
    pub removal_tolerance: Option<f64>,

    /// Size-cache entries sampled by the estimate.
    #[serde(default)]
    pub estimate_sample_size: Option<usize>,

    /// Blank rows appended to every rendered item in the terminal host.
    #[serde(default)]
    pub item_margin: Option<u16>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Controller tunables.
    pub window: WindowConfig,
    /// Blank rows appended to every rendered item in the terminal host.
    pub item_margin: u16,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            item_margin: 0,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Reject tunables that would break the window arithmetic.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let window = &self.window;
        check_positive("jump_threshold", window.jump_threshold)?;
        check_non_negative("prefetch_items", window.prefetch_items)?;
        check_non_negative("removal_tolerance", window.removal_tolerance)?;
        if window.estimate_sample_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "estimate_sample_size",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(self)
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("expected a finite value > 0, got {value}"),
        });
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("expected a finite value >= 0, got {value}"),
        });
    }
    Ok(())
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/virtlist/virtlist.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("virtlist").join("virtlist.log")
    } else {
        PathBuf::from("virtlist.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/virtlist/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("virtlist").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `VIRTLIST_CONFIG` environment variable
/// 3. Default path `~/.config/virtlist/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV_VAR} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `VIRTLIST_JUMP_THRESHOLD`: Override jump threshold
/// - `VIRTLIST_PREFETCH_ITEMS`: Override prefetch multiplier
///
/// Values that do not parse as numbers are ignored with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(threshold) = env_f64(JUMP_THRESHOLD_ENV_VAR) {
        config.window.jump_threshold = threshold;
    }

    if let Some(prefetch) = env_f64(PREFETCH_ITEMS_ENV_VAR) {
        config.window.prefetch_items = prefetch;
    }

    config
}

fn env_f64(name: &str) -> Option<f64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<f64>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(variable = name, value = %raw, error = %e, "Ignoring unparseable override");
            None
        }
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        window: WindowConfig {
            jump_threshold: config
                .jump_threshold
                .unwrap_or(defaults.window.jump_threshold),
            prefetch_items: config
                .prefetch_items
                .unwrap_or(defaults.window.prefetch_items),
            removal_tolerance: config
                .removal_tolerance
                .unwrap_or(defaults.window.removal_tolerance),
            estimate_sample_size: config
                .estimate_sample_size
                .unwrap_or(defaults.window.estimate_sample_size),
        },
        item_margin: config.item_margin.unwrap_or(defaults.item_margin),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    jump_threshold_override: Option<f64>,
    prefetch_items_override: Option<f64>,
) -> ResolvedConfig {
    if let Some(threshold) = jump_threshold_override {
        config.window.jump_threshold = threshold;
    }

    if let Some(prefetch) = prefetch_items_override {
        config.window.prefetch_items = prefetch;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
