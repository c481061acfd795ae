use crate::{Image, ImageError};

/// Cast the pixel data of an image into a preallocated image of another type.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image with the same size as the source.
///
/// Example:
///
/// ```
/// use rasterwarp_image::{Image, ImageSize};
/// use rasterwarp_image::ops::cast;
///
/// let image = Image::<u8, 1>::new(
///  ImageSize {
///   width: 2,
///  height: 1,
/// },
/// vec![0u8, 255],
/// ).unwrap();
///
/// let mut image_i32 = Image::from_size_val(image.size(), 0i32).unwrap();
///
/// cast(&image, &mut image_i32).unwrap();
///
/// assert_eq!(image_i32.as_slice(), &[0, 255]);
/// ```
pub fn cast<T, U, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<U, C>,
) -> Result<(), ImageError>
where
    T: Copy + num_traits::NumCast,
    U: Copy + num_traits::NumCast,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .try_for_each(|(out, &inp)| {
            *out = U::from(inp).ok_or(ImageError::CastError(
                std::any::type_name::<U>().to_string(),
            ))?;
            Ok::<(), ImageError>(())
        })?;

    Ok(())
}

/// Narrow an `i32` image to 8 bits per channel, clamping values to `[0, 255]`.
///
/// # Arguments
///
/// * `src` - The source image with values of any range.
/// * `dst` - The destination image with the same size as the source.
pub fn narrow_u8<const C: usize>(
    src: &Image<i32, C>,
    dst: &mut Image<u8, C>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .for_each(|(out, &inp)| *out = inp.clamp(0, 255) as u8);

    Ok(())
}
