use rasterwarp_image::{Image, ImageSize};

use crate::error::WarpError;

use super::affine::{resample_with, AffineMap, ResampleConfig};
use super::matrix::{
    get_rotation_matrix2d, get_scale_matrix2d, get_shift_matrix2d, rotated_canvas_size,
    scaled_canvas_size,
};

/// A geometric operation on a whole image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Rotate around the image center, growing the canvas to fit the rotated image.
    Rotate {
        /// The angle in degrees.
        degrees: f64,
    },
    /// Scale from the top-left corner by a positive factor.
    Scale {
        /// The scale factor, > 1 enlarges and < 1 shrinks.
        factor: f64,
    },
    /// Translate by whole pixels, keeping the canvas size.
    Shift {
        /// Offset along x, positive moves content right.
        tx: i64,
        /// Offset along y, positive moves content down.
        ty: i64,
    },
}

impl std::fmt::Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Transform::Rotate { degrees } => write!(f, "rotate by {degrees} degrees"),
            Transform::Scale { factor } => write!(f, "scale by {factor}"),
            Transform::Shift { tx, ty } => write!(f, "shift by ({tx}, {ty})"),
        }
    }
}

impl Transform {
    /// Computes the destination to source map and the output canvas for a source size.
    ///
    /// # Errors
    ///
    /// Fails with [`WarpError::InvalidParameter`] if the source size is empty, a parameter
    /// is out of range or the canvas would be empty.
    ///
    /// # Example
    ///
    /// ```
    /// use rasterwarp_image::ImageSize;
    /// use rasterwarp_imgproc::warp::Transform;
    ///
    /// let (map, canvas) = Transform::Scale { factor: 2.0 }
    ///     .plan([4, 3].into())
    ///     .unwrap();
    ///
    /// assert_eq!(canvas, ImageSize { width: 8, height: 6 });
    /// assert_eq!(map.map_point(6.0, 4.0), (3.0, 2.0));
    /// ```
    pub fn plan(&self, src_size: ImageSize) -> Result<(AffineMap, ImageSize), WarpError> {
        if src_size.is_empty() {
            return Err(WarpError::InvalidParameter(format!(
                "source image is empty: {src_size}"
            )));
        }

        let (map, canvas) = match *self {
            Transform::Rotate { degrees } => {
                let canvas = rotated_canvas_size(src_size, degrees)?;
                let m = get_rotation_matrix2d(degrees);
                (AffineMap::centered(m, src_size, canvas), canvas)
            }
            Transform::Scale { factor } => {
                let canvas = scaled_canvas_size(src_size, factor)?;
                let m = get_scale_matrix2d(factor)?;
                (AffineMap::CornerRelative { m }, canvas)
            }
            Transform::Shift { tx, ty } => {
                let m = get_shift_matrix2d(tx, ty);
                (AffineMap::CornerRelative { m }, src_size)
            }
        };

        log::debug!("{self}: {src_size} -> {canvas}");

        Ok((map, canvas))
    }

    /// Applies the transform with the default [`ResampleConfig`].
    pub fn apply<T, const C: usize>(&self, src: &Image<T, C>) -> Result<Image<T, C>, WarpError>
    where
        T: Copy + Default + Send + Sync,
    {
        self.apply_with(src, &ResampleConfig::default())
    }

    /// Applies the transform with an explicit [`ResampleConfig`].
    pub fn apply_with<T, const C: usize>(
        &self,
        src: &Image<T, C>,
        config: &ResampleConfig<T, C>,
    ) -> Result<Image<T, C>, WarpError>
    where
        T: Copy + Send + Sync,
    {
        let (map, canvas) = self.plan(src.size())?;
        resample_with(src, &map, canvas, config)
    }
}

/// Rotates an image by `degrees` around its center.
///
/// The output canvas is the bounding box of the rotated image, so no content is clipped.
///
/// # Example
///
/// ```
/// use rasterwarp_image::{ImageSize, PixelGrid};
/// use rasterwarp_imgproc::warp::rotate;
///
/// let image = PixelGrid::from_size_val(ImageSize { width: 6, height: 2 }, 255).unwrap();
///
/// let rotated = rotate(&image, 90.0).unwrap();
///
/// assert_eq!(rotated.size(), ImageSize { width: 2, height: 6 });
/// ```
pub fn rotate<T, const C: usize>(src: &Image<T, C>, degrees: f64) -> Result<Image<T, C>, WarpError>
where
    T: Copy + Default + Send + Sync,
{
    Transform::Rotate { degrees }.apply(src)
}

/// Scales an image by `factor` from its top-left corner.
pub fn scale<T, const C: usize>(src: &Image<T, C>, factor: f64) -> Result<Image<T, C>, WarpError>
where
    T: Copy + Default + Send + Sync,
{
    Transform::Scale { factor }.apply(src)
}

/// Translates an image by `(tx, ty)` pixels. Content leaving the canvas is clipped.
pub fn shift<T, const C: usize>(
    src: &Image<T, C>,
    tx: i64,
    ty: i64,
) -> Result<Image<T, C>, WarpError>
where
    T: Copy + Default + Send + Sync,
{
    Transform::Shift { tx, ty }.apply(src)
}
