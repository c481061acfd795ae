use rasterwarp_image::ImageError;

use crate::parallel::ParallelError;

/// An error type for the warping operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WarpError {
    /// A transform parameter, source image or canvas size is not usable.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error when creating or accessing an image.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error when running the row loop on a thread pool.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
