//! Domain data: the item sequence with its measurements, and error types.

pub mod error;
pub mod item_store;

pub use error::AppError;
pub use item_store::{ItemStore, SizeCache};
