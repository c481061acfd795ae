#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access and encoding/decoding failures.
pub mod error;

/// High-level image reading and writing functions.
///
/// See [`functional::load`] and [`functional::save`] for the `i32` pixel grid boundary.
pub mod functional;

pub use crate::error::IoError;
pub use crate::functional::{load, read_image_any_rgb8, save, write_image_any_rgb8};
