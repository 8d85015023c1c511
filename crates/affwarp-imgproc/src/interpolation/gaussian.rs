use affwarp_image::ImageDtype;

use super::interpolate::clamp_coordinates;

/// Standard deviation of the Gaussian interpolation kernel, in pixels.
pub const GAUSSIAN_SIGMA: f64 = 0.4715;

/// Normalized Gaussian weights of every source pixel for one sampling position.
///
/// The position is clamped to the grid, then each pixel `(c, r)` is weighted by
/// `exp(-((x - c)² + (y - r)²) / (2σ²))`. The weights are divided by their sum so they
/// add up to 1 over the whole grid.
///
/// # Arguments
///
/// * `x` - The x coordinate of the sampling position.
/// * `y` - The y coordinate of the sampling position.
/// * `rows` - The number of rows of the source plane.
/// * `cols` - The number of columns of the source plane.
///
/// # Returns
///
/// The weights in row-major order, `rows * cols` values.
///
/// # Example
///
/// ```
/// use affwarp_imgproc::interpolation::gaussian_weights;
///
/// let w = gaussian_weights(1.3, 0.2, 4, 4);
/// let total: f64 = w.iter().sum();
/// assert!((total - 1.0).abs() < 1e-6);
/// ```
pub fn gaussian_weights(x: f64, y: f64, rows: usize, cols: usize) -> Vec<f64> {
    let mut weights = gaussian_kernel(x, y, rows, cols).collect::<Vec<_>>();

    let total: f64 = weights.iter().sum();
    weights.iter_mut().for_each(|w| *w /= total);

    weights
}

/// Unnormalized Gaussian weights of every source pixel in row-major order.
fn gaussian_kernel(x: f64, y: f64, rows: usize, cols: usize) -> impl Iterator<Item = f64> {
    let (xn, yn) = clamp_coordinates(x, y, rows, cols);
    let denom = 2.0 * GAUSSIAN_SIGMA * GAUSSIAN_SIGMA;

    (0..rows * cols).map(move |i| {
        let dx = xn - (i % cols) as f64;
        let dy = yn - (i / cols) as f64;
        (-(dx * dx + dy * dy) / denom).exp()
    })
}

/// Gaussian-weighted mean of a single channel plane around a sampling position.
///
/// Same weights as [`gaussian_weights`], normalized on the fly.
pub(crate) fn gaussian_interpolation<T: ImageDtype>(
    plane: &[T],
    rows: usize,
    cols: usize,
    x: f64,
    y: f64,
) -> f64 {
    let (sum, total) = gaussian_kernel(x, y, rows, cols)
        .zip(plane.iter())
        .fold((0.0, 0.0), |(sum, total), (w, p)| (sum + w * p.to_f64(), total + w));
    sum / total
}
