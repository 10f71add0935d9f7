//! Pure window bookkeeping: which items are materialized and how much space
//! stands in for the rest.

pub mod spacers;
pub mod window;

pub use spacers::SpacerSizes;
pub use window::{WindowRange, WindowState};
