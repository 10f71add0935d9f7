//! Window controller state machine.
//!
//! The controller owns the window bookkeeping and drives the display layer;
//! the scroll handler turns raw offset changes into update modes.

pub mod controller;
pub mod scroll_handler;

pub use controller::WindowController;
pub use scroll_handler::{ReactorStats, ScrollReactor, UpdateMode};
