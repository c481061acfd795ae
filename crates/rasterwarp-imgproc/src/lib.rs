#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the warping operations.
pub mod error;

/// module containing parallelization utilities.
pub mod parallel;

/// image geometric transformations module.
pub mod warp;

pub use crate::error::WarpError;
