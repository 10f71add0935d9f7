//! Error types for the virtlist binary.
//!
//! The window controller itself is infallible: degenerate input (no items,
//! zero-sized viewport) degrades to an empty or minimal window. Failures only
//! come from the ambient layers around it.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error returned from `main`
//!   - [`ConfigError`] - configuration file or value problems
//!   - [`LoggingError`] - log file setup
//!   - [`TuiError`] - terminal I/O

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::view::TuiError;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// All variants are fatal for the demo binary: they are reported on stderr
/// after the terminal has been restored.
///
/// # Examples
///
/// ```no_run
/// use virtlist::config::ConfigError;
/// use virtlist::model::error::AppError;
///
/// fn start() -> Result<(), AppError> {
///     load()?;
///     Ok(())
/// }
/// # fn load() -> Result<(), ConfigError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The log file could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal setup, rendering or teardown failed.
    #[error("Terminal error: {0}")]
    Tui(#[from] TuiError),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Tui(TuiError::Io(err))
    }
}
