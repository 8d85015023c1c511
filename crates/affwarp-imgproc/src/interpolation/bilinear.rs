use affwarp_image::ImageDtype;

use super::interpolate::clamp_coordinates;

/// Source offsets and weights of the four neighbors of a sampling position.
///
/// The position is clamped to the grid first. When a coordinate is an integer its
/// floor and ceil coincide and the whole weight falls on that pixel.
///
/// # Arguments
///
/// * `x` - The x coordinate of the sampling position.
/// * `y` - The y coordinate of the sampling position.
/// * `rows` - The number of rows of the source plane, at least 1.
/// * `cols` - The number of columns of the source plane, at least 1.
pub(crate) fn bilinear_weights(x: f64, y: f64, rows: usize, cols: usize) -> [(usize, f64); 4] {
    let (xn, yn) = clamp_coordinates(x, y, rows, cols);

    let (xf, yf) = (xn.floor(), yn.floor());
    let (xc, yc) = (xn.ceil(), yn.ceil());

    let xv = xn - xf;
    let yv = yn - yf;

    let (xf, yf, xc, yc) = (xf as usize, yf as usize, xc as usize, yc as usize);

    [
        (yf * cols + xf, (1.0 - yv) * (1.0 - xv)),
        (yf * cols + xc, (1.0 - yv) * xv),
        (yc * cols + xf, yv * (1.0 - xv)),
        (yc * cols + xc, yv * xv),
    ]
}

/// Bilinear interpolation of a single channel plane at a sampling position.
pub(crate) fn bilinear_interpolation<T: ImageDtype>(
    plane: &[T],
    rows: usize,
    cols: usize,
    x: f64,
    y: f64,
) -> f64 {
    bilinear_weights(x, y, rows, cols)
        .iter()
        .map(|&(i, w)| w * plane[i].to_f64())
        .sum()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{bilinear_interpolation, bilinear_weights};

    #[test]
    fn weights_integer_position() {
        let w = bilinear_weights(2.0, 1.0, 3, 4);
        assert_eq!(w[0], (6, 1.0));
        assert!(w[1..].iter().all(|&(i, wi)| i == 6 && wi == 0.0));
    }

    #[test]
    fn weights_fractional_position() {
        let w = bilinear_weights(0.25, 0.5, 2, 2);
        let expected = [(0, 0.375), (1, 0.125), (2, 0.375), (3, 0.125)];
        for ((i, wi), (ei, ew)) in w.iter().zip(expected.iter()) {
            assert_eq!(i, ei);
            assert_abs_diff_eq!(wi, ew, epsilon = 1e-12);
        }
        let total: f64 = w.iter().map(|(_, wi)| wi).sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn weights_clamped_position() {
        let w = bilinear_weights(-5.0, 10.0, 3, 3);
        // clamped to (0, 2)
        assert_eq!(w[0], (6, 1.0));
    }

    #[test]
    fn weights_nan_stay_in_bounds() {
        let w = bilinear_weights(f64::NAN, 1.0, 2, 2);
        assert!(w.iter().all(|&(i, _)| i < 4));
        assert!(w[0].1.is_nan());
    }

    #[test]
    fn interpolation_u8_plane() {
        let plane = [0u8, 10, 20, 30];
        assert_abs_diff_eq!(bilinear_interpolation(&plane, 2, 2, 0.5, 0.5), 15.0);
        assert_abs_diff_eq!(bilinear_interpolation(&plane, 2, 2, 1.0, 0.25), 15.0);
        assert_abs_diff_eq!(bilinear_interpolation(&plane, 2, 2, 9.0, 9.0), 30.0);
    }
}
