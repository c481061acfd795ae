use std::path::Path;

use rasterwarp_image::{ops, Image, ImageSize, PixelGrid};

use crate::error::IoError;

/// Reads an image from the given file path as 8-bit RGB.
///
/// The method tries to read from any image format supported by the image crate. Grayscale
/// images are expanded to three channels and any alpha channel is dropped.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A RGB image with three channels (rgb8).
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()
        .map_err(IoError::ImageDecodeError)?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!("decoded {} as {:?} ({})", file_path.display(), img.color(), size);

    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

/// Writes an 8-bit RGB image to the given file path.
///
/// The format is chosen from the file extension.
///
/// # Arguments
///
/// * `file_path` - The path to the output image.
/// * `image` - The image to encode.
pub fn write_image_any_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    image::save_buffer(
        file_path,
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        image::ExtendedColorType::Rgb8,
    )
    .map_err(IoError::ImageEncodeError)?;

    log::debug!("encoded {} ({})", file_path.display(), image.size());

    Ok(())
}

/// Loads an image file into a [`PixelGrid`].
///
/// The pixel values are widened from 8 bits, so they lie in `[0, 255]`.
///
/// # Example
///
/// ```no_run
/// use rasterwarp_io::functional as F;
///
/// let grid = F::load("image.png").unwrap();
/// assert_eq!(grid.num_channels(), 3);
/// ```
pub fn load(file_path: impl AsRef<Path>) -> Result<PixelGrid, IoError> {
    let image = read_image_any_rgb8(file_path)?;
    let mut grid = PixelGrid::from_size_val(image.size(), 0)?;
    ops::cast(&image, &mut grid)?;
    Ok(grid)
}

/// Saves a [`PixelGrid`] to an image file.
///
/// Values outside `[0, 255]` are clamped before being narrowed to 8 bits.
pub fn save(file_path: impl AsRef<Path>, grid: &PixelGrid) -> Result<(), IoError> {
    let mut image = Image::<u8, 3>::from_size_val(grid.size(), 0)?;
    ops::narrow_u8(grid, &mut image)?;
    write_image_any_rgb8(file_path, &image)
}
