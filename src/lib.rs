//! virtlist - virtualized list window controller
//!
//! Keeps only the items near the visible region of a scrollable list mounted
//! in a display layer, standing in for the rest with two spacers sized from
//! an average-extent estimate.
//!
//! The core is pure bookkeeping over traits ([`surface::Surface`],
//! [`surface::ItemRenderer`]); [`surface::StackSurface`] is an in-memory
//! display layer and [`view`] hosts it in a terminal.

pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod surface;
pub mod view;
pub mod view_state;

pub use state::WindowController;

#[cfg(test)]
mod tests;
