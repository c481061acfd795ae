#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image representation for geometric processing.
pub mod image;

/// Error types for the image module.
pub mod error;

/// pixel type conversions between images.
pub mod ops;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize, PixelGrid};
