use rasterwarp_image::ImageSize;

use crate::error::WarpError;

/// Row-major 2x2 linear matrix `[a, b, c, d]` for `| a b ; c d |`.
pub type Mat2 = [f64; 4];

/// Row-major 2x3 affine matrix `[a, b, tx, c, d, ty]` for `| a b tx ; c d ty |`.
pub type Mat23 = [f64; 6];

/// Returns the 2x2 matrix mapping destination offsets to source offsets for a rotation.
///
/// The matrix is defined as:
///
/// | cos(angle)   sin(angle) |
/// | -sin(angle)  cos(angle) |
///
/// # Arguments
///
/// * `angle` - The angle of rotation in degrees.
///
/// # Example
///
/// ```
/// use rasterwarp_imgproc::warp::get_rotation_matrix2d;
///
/// let m = get_rotation_matrix2d(0.0);
/// assert_eq!(m, [1.0, 0.0, -0.0, 1.0]);
/// ```
pub fn get_rotation_matrix2d(angle: f64) -> Mat2 {
    let (sin, cos) = angle.to_radians().sin_cos();
    [cos, sin, -sin, cos]
}

/// Returns the 2x3 matrix mapping destination pixels to source pixels for a scaling.
///
/// The matrix holds the inverse factor since it maps the enlarged (or shrunk) canvas
/// back onto the source:
///
/// | 1/factor  0         0 |
/// | 0         1/factor  0 |
///
/// # Errors
///
/// The factor must be finite and strictly positive.
pub fn get_scale_matrix2d(factor: f64) -> Result<Mat23, WarpError> {
    check_scale_factor(factor)?;
    let inv = 1.0 / factor;
    Ok([inv, 0.0, 0.0, 0.0, inv, 0.0])
}

/// Returns the 2x3 matrix mapping destination pixels to source pixels for a translation.
///
/// | 1  0  -tx |
/// | 0  1  -ty |
pub fn get_shift_matrix2d(tx: i64, ty: i64) -> Mat23 {
    [1.0, 0.0, -(tx as f64), 0.0, 1.0, -(ty as f64)]
}

/// Computes the canvas holding the whole source after a rotation.
///
/// The size is the axis aligned bounding box of the rotated source rectangle, truncated:
///
/// width = floor(h * |sin| + w * |cos|)
/// height = floor(h * |cos| + w * |sin|)
///
/// # Errors
///
/// Fails if the angle is not finite or if one side of the canvas truncates to zero.
pub fn rotated_canvas_size(size: ImageSize, angle: f64) -> Result<ImageSize, WarpError> {
    if !angle.is_finite() {
        return Err(WarpError::InvalidParameter(format!(
            "rotation angle must be finite, got {angle}"
        )));
    }

    let (sin, cos) = angle.to_radians().sin_cos();
    let (w, h) = (size.width as f64, size.height as f64);

    let canvas = ImageSize {
        width: (h * sin.abs() + w * cos.abs()) as usize,
        height: (h * cos.abs() + w * sin.abs()) as usize,
    };

    check_canvas(canvas)
}

/// Computes the canvas of a scaled source: `(floor(w * factor), floor(h * factor))`.
///
/// # Errors
///
/// Fails if the factor is not strictly positive or if one side truncates to zero.
pub fn scaled_canvas_size(size: ImageSize, factor: f64) -> Result<ImageSize, WarpError> {
    check_scale_factor(factor)?;

    let canvas = ImageSize {
        width: (size.width as f64 * factor) as usize,
        height: (size.height as f64 * factor) as usize,
    };

    check_canvas(canvas)
}

fn check_scale_factor(factor: f64) -> Result<(), WarpError> {
    if !(factor.is_finite() && factor > 0.0) {
        return Err(WarpError::InvalidParameter(format!(
            "scale factor must be finite and > 0, got {factor}"
        )));
    }
    Ok(())
}

fn check_canvas(canvas: ImageSize) -> Result<ImageSize, WarpError> {
    if canvas.is_empty() {
        return Err(WarpError::InvalidParameter(format!(
            "transform produces an empty canvas: {canvas}"
        )));
    }
    Ok(canvas)
}
