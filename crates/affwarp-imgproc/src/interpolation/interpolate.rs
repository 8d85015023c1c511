use std::fmt;
use std::str::FromStr;

use affwarp_image::ImageDtype;

use super::bilinear::bilinear_interpolation;
use super::gaussian::gaussian_interpolation;
use crate::error::TransformError;

/// Interpolation mode for the resampling operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Linear,
    /// Gaussian kernel interpolation over the whole image
    Gaussian,
}

impl FromStr for InterpolationMode {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "gaussian" => Ok(Self::Gaussian),
            other => Err(TransformError::InvalidInterpolationMode(other.to_string())),
        }
    }
}

impl fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Gaussian => write!(f, "gaussian"),
        }
    }
}

/// Clamp a sampling position to `[0, cols - 1] x [0, rows - 1]`.
#[inline]
pub(crate) fn clamp_coordinates(x: f64, y: f64, rows: usize, cols: usize) -> (f64, f64) {
    let max_x = cols.saturating_sub(1) as f64;
    let max_y = rows.saturating_sub(1) as f64;
    (x.clamp(0.0, max_x), y.clamp(0.0, max_y))
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `plane` - A single channel plane with shape (rows, cols), row-major and non-empty.
/// * `rows` - The number of rows of the plane.
/// * `cols` - The number of columns of the plane.
/// * `x` - The x coordinate of the pixel to interpolate.
/// * `y` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The interpolated pixel value. Positions outside the plane read the nearest edge.
pub(crate) fn interpolate_pixel<T: ImageDtype>(
    plane: &[T],
    rows: usize,
    cols: usize,
    x: f64,
    y: f64,
    interpolation: InterpolationMode,
) -> f64 {
    match interpolation {
        InterpolationMode::Linear => bilinear_interpolation(plane, rows, cols, x, y),
        InterpolationMode::Gaussian => gaussian_interpolation(plane, rows, cols, x, y),
    }
}
