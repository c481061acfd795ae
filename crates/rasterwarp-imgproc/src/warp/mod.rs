//! Geometric image transformations using affine inverse mapping.
//!
//! This module provides:
//!
//! - Matrix builders for rotation, scaling and translation
//! - Canvas sizing for each transform
//! - A resampling engine mapping every destination pixel back onto the source
//!
//! # Examples
//!
//! Rotating an image by 45 degrees:
//!
//! ```no_run
//! use rasterwarp_image::{ImageSize, PixelGrid};
//! use rasterwarp_imgproc::warp::rotate;
//!
//! let image = PixelGrid::from_size_val(ImageSize { width: 128, height: 128 }, 255).unwrap();
//! let rotated = rotate(&image, 45.0).unwrap();
//! ```

mod affine;
mod matrix;
mod transform;

pub use affine::{
    resample, resample_with, AffineMap, ResampleConfig, SampleBounds, BACKGROUND_RGB,
};
pub use matrix::{
    get_rotation_matrix2d, get_scale_matrix2d, get_shift_matrix2d, rotated_canvas_size,
    scaled_canvas_size, Mat2, Mat23,
};
pub use transform::{rotate, scale, shift, Transform};
