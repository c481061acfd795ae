use rasterwarp_image::{Image, ImageSize};

use crate::error::WarpError;
use crate::parallel::{self, ExecutionStrategy};

use super::matrix::{Mat2, Mat23};

/// Background of a [`rasterwarp_image::PixelGrid`] destination: black.
pub const BACKGROUND_RGB: [i32; 3] = [0, 0, 0];

/// How a destination pixel is mapped back onto the source image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AffineMap {
    /// Apply a linear map around the centers of both canvases.
    ///
    /// `src = m * (dst - dst_center) + src_center`
    CenterRelative {
        /// The 2x2 linear part.
        m: Mat2,
        /// The center `(x, y)` of the source image.
        src_center: (f64, f64),
        /// The center `(x, y)` of the destination canvas.
        dst_center: (f64, f64),
    },

    /// Apply a 2x3 matrix to the homogeneous destination coordinate `(x, y, 1)`.
    CornerRelative {
        /// The 2x3 affine matrix.
        m: Mat23,
    },
}

impl AffineMap {
    /// Builds a center relative map using the geometric centers of both sizes.
    pub fn centered(m: Mat2, src_size: ImageSize, dst_size: ImageSize) -> Self {
        AffineMap::CenterRelative {
            m,
            src_center: (src_size.width as f64 / 2.0, src_size.height as f64 / 2.0),
            dst_center: (dst_size.width as f64 / 2.0, dst_size.height as f64 / 2.0),
        }
    }

    /// Returns the source coordinate for the destination coordinate `(x, y)`.
    pub fn map_point(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            AffineMap::CenterRelative {
                m,
                src_center,
                dst_center,
            } => {
                let (dx, dy) = (x - dst_center.0, y - dst_center.1);
                (
                    m[0] * dx + m[1] * dy + src_center.0,
                    m[2] * dx + m[3] * dy + src_center.1,
                )
            }
            AffineMap::CornerRelative { m } => {
                (m[0] * x + m[1] * y + m[2], m[3] * x + m[4] * y + m[5])
            }
        }
    }
}

/// Which truncated source coordinates are considered inside the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleBounds {
    /// `0 < x < width` and `0 < y < height`.
    ///
    /// The first row and column of the source are never sampled, so destination pixels
    /// mapping onto them keep the background. Kept as the default for compatibility with
    /// existing outputs.
    #[default]
    Exclusive,

    /// `0 <= x < width` and `0 <= y < height`.
    Inclusive,
}

impl SampleBounds {
    /// Truncates `(u, v)` toward zero and returns the source index if it passes the bounds.
    #[inline]
    pub fn sample_index(&self, u: f64, v: f64, size: ImageSize) -> Option<(usize, usize)> {
        // `as` truncates toward zero and saturates, NaN becomes 0
        let (x, y) = (u as i64, v as i64);
        let lower = match self {
            SampleBounds::Exclusive => 1,
            SampleBounds::Inclusive => 0,
        };
        if x >= lower && x < size.width as i64 && y >= lower && y < size.height as i64 {
            Some((x as usize, y as usize))
        } else {
            None
        }
    }
}

/// Settings of a resampling pass.
///
/// The default background is `[T::default(); C]`, which for a [`rasterwarp_image::PixelGrid`]
/// is [`BACKGROUND_RGB`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResampleConfig<T, const C: usize> {
    /// Value written to destination pixels without a source pixel.
    pub background: [T; C],
    /// Bounds rule applied to the truncated source coordinate.
    pub bounds: SampleBounds,
    /// How destination rows are scheduled.
    pub strategy: ExecutionStrategy,
}

impl<T: Copy + Default, const C: usize> Default for ResampleConfig<T, C> {
    fn default() -> Self {
        Self {
            background: [T::default(); C],
            bounds: SampleBounds::default(),
            strategy: ExecutionStrategy::default(),
        }
    }
}

impl<T, const C: usize> ResampleConfig<T, C> {
    /// Replace the background value.
    pub fn with_background(mut self, background: [T; C]) -> Self {
        self.background = background;
        self
    }

    /// Replace the bounds rule.
    pub fn with_bounds(mut self, bounds: SampleBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Replace the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Resamples an image onto a new canvas using the default configuration.
///
/// See [`resample_with`].
///
/// # Example
///
/// ```
/// use rasterwarp_image::{Image, ImageSize};
/// use rasterwarp_imgproc::warp::{resample, AffineMap};
///
/// let src = Image::<i32, 3>::from_size_val(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     255,
/// )
/// .unwrap();
///
/// let map = AffineMap::CornerRelative {
///     m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
/// };
///
/// let dst = resample(&src, &map, src.size()).unwrap();
///
/// assert_eq!(dst.size(), src.size());
/// // the first row and column are never sampled
/// assert_eq!(dst.pixel(0, 0), Some(&[0, 0, 0][..]));
/// assert_eq!(dst.pixel(1, 1), Some(&[255, 255, 255][..]));
/// ```
pub fn resample<T, const C: usize>(
    src: &Image<T, C>,
    map: &AffineMap,
    canvas: ImageSize,
) -> Result<Image<T, C>, WarpError>
where
    T: Copy + Default + Send + Sync,
{
    resample_with(src, map, canvas, &ResampleConfig::default())
}

/// Resamples an image onto a new canvas by inverse mapping every destination pixel.
///
/// For each destination pixel the source coordinate is computed with `map`, truncated
/// toward zero and tested with `config.bounds`. Pixels passing the test copy all the
/// channels of the source pixel, the others keep `config.background`. No interpolation
/// is performed.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `map` - The destination to source mapping.
/// * `canvas` - The size of the output image.
/// * `config` - Background, bounds rule and execution strategy.
///
/// # Returns
///
/// A new image with shape (canvas.height, canvas.width, channels).
///
/// # Errors
///
/// Fails with [`WarpError::InvalidParameter`] if the source or the canvas is empty, and
/// with [`WarpError::Parallel`] if the execution strategy is invalid.
pub fn resample_with<T, const C: usize>(
    src: &Image<T, C>,
    map: &AffineMap,
    canvas: ImageSize,
    config: &ResampleConfig<T, C>,
) -> Result<Image<T, C>, WarpError>
where
    T: Copy + Send + Sync,
{
    if C == 0 || src.size().is_empty() {
        return Err(WarpError::InvalidParameter(format!(
            "source image is empty: {} with {} channels",
            src.size(),
            C
        )));
    }

    if canvas.is_empty() {
        return Err(WarpError::InvalidParameter(format!(
            "canvas must be non-empty, got {canvas}"
        )));
    }

    if canvas
        .width
        .checked_mul(canvas.height)
        .and_then(|n| n.checked_mul(C))
        .is_none()
    {
        return Err(WarpError::InvalidParameter(format!(
            "canvas is too large: {canvas}"
        )));
    }

    config.strategy.validate()?;

    log::debug!(
        "resample {} -> {} with {:?} ({:?}, {:?})",
        src.size(),
        canvas,
        map,
        config.bounds,
        config.strategy
    );
    let now = std::time::Instant::now();

    let mut dst = Image::from_size_pixel(canvas, config.background)?;

    let src_size = src.size();
    let src_data = src.as_slice();
    let bounds = config.bounds;

    parallel::par_iter_rows_indexed(&mut dst, config.strategy, |y, dst_row| {
        dst_row
            .chunks_exact_mut(C)
            .enumerate()
            .for_each(|(x, dst_pixel)| {
                let (u, v) = map.map_point(x as f64, y as f64);
                if let Some((sx, sy)) = bounds.sample_index(u, v, src_size) {
                    let base = (sy * src_size.width + sx) * C;
                    dst_pixel.copy_from_slice(&src_data[base..base + C]);
                }
            });
    })?;

    log::debug!("elapsed: {:?}", now.elapsed());

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::ParallelError;
    use crate::warp::get_rotation_matrix2d;
    use rasterwarp_image::{ImageError, PixelGrid};

    const IDENTITY: AffineMap = AffineMap::CornerRelative {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
    };

    fn ramp(size: ImageSize) -> Result<Image<i32, 1>, ImageError> {
        Image::new(size, (0..(size.width * size.height) as i32).collect())
    }

    #[test]
    fn resample_smoke_ch3() -> Result<(), WarpError> {
        let image = PixelGrid::from_size_val([4, 5].into(), 7)?;

        let dst = resample(&image, &IDENTITY, [2, 3].into())?;

        assert_eq!(dst.num_channels(), 3);
        assert_eq!(dst.size().width, 2);
        assert_eq!(dst.size().height, 3);

        Ok(())
    }

    #[test]
    fn resample_does_not_touch_source() -> Result<(), WarpError> {
        let image = ramp([4, 3].into())?;
        let before = image.clone();

        let map = AffineMap::CornerRelative {
            m: [0.5, 0.0, 1.0, 0.0, 0.5, 0.0],
        };
        let _ = resample(&image, &map, [8, 6].into())?;

        assert_eq!(image, before);

        Ok(())
    }

    #[test]
    fn resample_identity_exclusive_bounds() -> Result<(), WarpError> {
        let image = ramp([4, 3].into())?;

        let dst = resample(&image, &IDENTITY, image.size())?;

        #[rustfmt::skip]
        let expected = [
            0, 0, 0, 0,
            0, 5, 6, 7,
            0, 9, 10, 11,
        ];
        assert_eq!(dst.as_slice(), &expected);

        Ok(())
    }

    #[test]
    fn resample_identity_inclusive_bounds() -> Result<(), WarpError> {
        let image = ramp([4, 3].into())?;

        let config = ResampleConfig::default().with_bounds(SampleBounds::Inclusive);
        let dst = resample_with(&image, &IDENTITY, image.size(), &config)?;

        assert_eq!(dst.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn resample_truncates_toward_zero() -> Result<(), WarpError> {
        let image = ramp([3, 3].into())?;

        // x - 0.9 lands on [-0.9, 1.1]: -0.9 truncates to 0, not -1
        let map = AffineMap::CornerRelative {
            m: [1.0, 0.0, -0.9, 0.0, 1.0, 0.0],
        };
        let config = ResampleConfig::default().with_bounds(SampleBounds::Inclusive);
        let dst = resample_with(&image, &map, image.size(), &config)?;

        #[rustfmt::skip]
        let expected = [
            0, 0, 1,
            3, 3, 4,
            6, 6, 7,
        ];
        assert_eq!(dst.as_slice(), &expected);

        Ok(())
    }

    #[test]
    fn resample_custom_background() -> Result<(), WarpError> {
        let image = PixelGrid::from_size_val([3, 3].into(), 200)?;

        let map = AffineMap::CornerRelative {
            m: [1.0, 0.0, 10.0, 0.0, 1.0, 10.0],
        };
        let config = ResampleConfig::default().with_background([1, 2, 3]);
        let dst = resample_with(&image, &map, [2, 2].into(), &config)?;

        assert_eq!(dst.as_slice(), &[1, 2, 3].repeat(4)[..]);

        Ok(())
    }

    #[test]
    fn resample_default_background_is_black() -> Result<(), WarpError> {
        let config = ResampleConfig::<i32, 3>::default();
        assert_eq!(config.background, BACKGROUND_RGB);
        assert_eq!(config.bounds, SampleBounds::Exclusive);

        let image = PixelGrid::from_size_val([3, 3].into(), 200)?;
        let map = AffineMap::CornerRelative {
            m: [1.0, 0.0, 10.0, 0.0, 1.0, 10.0],
        };
        let dst = resample(&image, &map, [2, 2].into())?;
        assert_eq!(dst.as_slice(), &BACKGROUND_RGB.repeat(4)[..]);

        Ok(())
    }

    #[test]
    fn resample_center_relative_quarter_turn() -> Result<(), WarpError> {
        let image = Image::<i32, 1>::new([2, 2].into(), vec![1, 2, 3, 4])?;

        let map = AffineMap::centered(get_rotation_matrix2d(90.0), image.size(), image.size());

        let dst = resample(&image, &map, image.size())?;
        assert_eq!(dst.as_slice(), &[0, 0, 0, 4]);

        let config = ResampleConfig::default().with_bounds(SampleBounds::Inclusive);
        let dst = resample_with(&image, &map, image.size(), &config)?;
        assert_eq!(dst.as_slice(), &[0, 1, 0, 4]);

        Ok(())
    }

    #[test]
    fn resample_strategies_agree() -> Result<(), WarpError> {
        let image = ramp([13, 9].into())?;
        let map = AffineMap::centered(get_rotation_matrix2d(30.0), image.size(), [15, 12].into());

        let serial = resample_with(
            &image,
            &map,
            [15, 12].into(),
            &ResampleConfig::default().with_strategy(ExecutionStrategy::Serial),
        )?;
        for strategy in [ExecutionStrategy::ParallelRows, ExecutionStrategy::Fixed(3)] {
            let dst = resample_with(
                &image,
                &map,
                [15, 12].into(),
                &ResampleConfig::default().with_strategy(strategy),
            )?;
            assert_eq!(dst, serial);
        }

        Ok(())
    }

    #[test]
    fn resample_invalid_inputs() -> Result<(), WarpError> {
        let empty = Image::<i32, 3>::new([0, 4].into(), vec![])?;
        assert!(matches!(
            resample(&empty, &IDENTITY, [2, 2].into()),
            Err(WarpError::InvalidParameter(_))
        ));

        let image = PixelGrid::from_size_val([2, 2].into(), 0)?;
        assert!(matches!(
            resample(&image, &IDENTITY, [0, 2].into()),
            Err(WarpError::InvalidParameter(_))
        ));
        assert!(matches!(
            resample(&image, &IDENTITY, [usize::MAX, 2].into()),
            Err(WarpError::InvalidParameter(_))
        ));

        let config = ResampleConfig::default().with_strategy(ExecutionStrategy::Fixed(0));
        assert_eq!(
            resample_with(&image, &IDENTITY, [2, 2].into(), &config),
            Err(WarpError::Parallel(ParallelError::InvalidThreadCount(0)))
        );

        Ok(())
    }

    #[test]
    fn sample_index_bounds() {
        let size = ImageSize {
            width: 4,
            height: 3,
        };
        let exclusive = SampleBounds::Exclusive;
        let inclusive = SampleBounds::Inclusive;

        assert_eq!(exclusive.sample_index(0.5, 1.0, size), None);
        assert_eq!(inclusive.sample_index(0.5, 1.0, size), Some((0, 1)));
        assert_eq!(exclusive.sample_index(3.99, 2.5, size), Some((3, 2)));
        assert_eq!(exclusive.sample_index(4.0, 1.0, size), None);
        assert_eq!(inclusive.sample_index(-0.5, 0.0, size), Some((0, 0)));
        assert_eq!(inclusive.sample_index(-1.0, 0.0, size), None);
        assert_eq!(inclusive.sample_index(f64::NAN, 1.0, size), Some((0, 1)));
    }
}
