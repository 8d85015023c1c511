use affwarp_image::{ImageBatch, ImageDtype};
use affwarp_tensor::Tensor4;

use super::interpolate::interpolate_pixel;
use super::InterpolationMode;
use crate::error::TransformError;
use crate::parallel;

/// Resample a batch of images along a displacement field.
///
/// The output pixel `(x, y)` of image `b` takes the value of the source image at
/// `(x - field[b, 0, y, x], y - field[b, 1, y, x])`, clamped to the image bounds and
/// interpolated with `interpolation`. Batch elements and the rows of every channel
/// are processed in parallel and written straight into the output, which is the only
/// buffer allocated.
///
/// # Arguments
///
/// * `src` - The input images with shape (B, C, rows, cols).
/// * `field` - The displacement field with shape (B, 2, rows, cols).
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The resampled images, with the same shape and pixel type as `src`.
///
/// # Errors
///
/// If the field does not have the shape (B, 2, rows, cols) of the images, an error is
/// returned and nothing is computed.
///
/// # Example
///
/// ```
/// use affwarp_image::{ImageBatch, ImageSize};
/// use affwarp_imgproc::field::displacement_field;
/// use affwarp_imgproc::interpolation::{remap, InterpolationMode};
///
/// let size = ImageSize { width: 3, height: 3 };
/// let images = ImageBatch::new(1, 1, size, (0..9).map(|v| v as f32).collect()).unwrap();
///
/// let field = displacement_field(3, None, None, None).unwrap();
/// let out = remap(&images, &field, InterpolationMode::Linear).unwrap();
/// assert_eq!(out.as_slice(), images.as_slice());
/// ```
pub fn remap<T: ImageDtype>(
    src: &ImageBatch<T>,
    field: &Tensor4<f32>,
    interpolation: InterpolationMode,
) -> Result<ImageBatch<T>, TransformError> {
    let [batch_size, channels, rows, cols] = src.shape;

    let expected = [batch_size, 2, rows, cols];
    if field.shape != expected {
        return Err(TransformError::ShapeMismatch(
            field.shape.to_vec(),
            expected.to_vec(),
        ));
    }

    log::trace!(
        "remap {batch_size} images of {channels}x{rows}x{cols} with {interpolation} interpolation"
    );

    let plane = rows * cols;
    if plane == 0 || channels == 0 {
        return Ok(src.clone());
    }

    let src_data = src.as_slice();
    let field_data = field.as_slice();
    let image_stride = channels * plane;

    let mut dst = vec![T::default(); src.numel()];

    parallel::par_iter_batch(&mut dst, image_stride, |b, dst_image| {
        let src_image = &src_data[b * image_stride..(b + 1) * image_stride];
        let tau = &field_data[b * 2 * plane..(b + 1) * 2 * plane];
        let (tau_x, tau_y) = tau.split_at(plane);

        parallel::par_iter_rows(dst_image, rows, cols, |c, r, dst_row| {
            let src_plane = &src_image[c * plane..(c + 1) * plane];
            let offset = r * cols;
            for (x, dst_px) in dst_row.iter_mut().enumerate() {
                let xs = x as f64 - tau_x[offset + x] as f64;
                let ys = r as f64 - tau_y[offset + x] as f64;
                let value = interpolate_pixel(src_plane, rows, cols, xs, ys, interpolation);
                *dst_px = T::from_f64(value);
            }
        });
    });

    Ok(ImageBatch(Tensor4::from_shape_vec(src.shape, dst)?))
}

#[cfg(test)]
mod tests {
    use affwarp_image::{ImageBatch, ImageSize};
    use affwarp_tensor::Tensor4;
    use approx::assert_abs_diff_eq;

    use super::remap;
    use crate::error::TransformError;
    use crate::interpolation::InterpolationMode;

    fn ramp(
        batch_size: usize,
        channels: usize,
        n: usize,
    ) -> Result<ImageBatch<f32>, TransformError> {
        let size = ImageSize {
            width: n,
            height: n,
        };
        let data = (0..batch_size * channels * n * n).map(|v| v as f32).collect();
        Ok(ImageBatch::new(batch_size, channels, size, data)?)
    }

    #[test]
    fn remap_zero_field_is_identity() -> Result<(), TransformError> {
        let images = ramp(2, 3, 4)?;
        let field = Tensor4::<f32>::zeros([2, 2, 4, 4]);
        let out = remap(&images, &field, InterpolationMode::Linear)?;
        assert_eq!(out, images);
        Ok(())
    }

    #[test]
    fn remap_half_pixel_shift() -> Result<(), TransformError> {
        let images = ramp(1, 1, 3)?;
        // τx = -0.5 everywhere: sample half a pixel to the right
        let field =
            Tensor4::from_shape_fn([1, 2, 3, 3], |[_, a, _, _]| if a == 0 { -0.5 } else { 0.0 });
        let out = remap(&images, &field, InterpolationMode::Linear)?;
        let expected = [0.5, 1.5, 2.0, 3.5, 4.5, 5.0, 6.5, 7.5, 8.0];
        for (a, b) in out.as_slice().iter().zip(expected.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-6);
        }
        Ok(())
    }

    #[test]
    fn remap_per_channel() -> Result<(), TransformError> {
        let images = ramp(1, 2, 2)?;
        // sample everything from pixel (1, 1)
        let field = Tensor4::from_shape_fn([1, 2, 2, 2], |[_, a, y, x]| {
            if a == 0 {
                x as f32 - 1.0
            } else {
                y as f32 - 1.0
            }
        });
        let out = remap(&images, &field, InterpolationMode::Linear)?;
        assert_eq!(out.as_slice(), &[3.0, 3.0, 3.0, 3.0, 7.0, 7.0, 7.0, 7.0]);
        Ok(())
    }

    #[test]
    fn remap_gaussian_constant_image() -> Result<(), TransformError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };
        let images = ImageBatch::from_size_val(1, 1, size, 3.0f64);
        let field =
            Tensor4::from_shape_fn([1, 2, 5, 5], |[_, _, y, x]| 0.3 * (x as f32 - y as f32));
        let out = remap(&images, &field, InterpolationMode::Gaussian)?;
        for v in out.as_slice() {
            assert_abs_diff_eq!(*v, 3.0, epsilon = 1e-9);
        }
        Ok(())
    }

    #[test]
    fn remap_gaussian_smooths() -> Result<(), TransformError> {
        let mut data = vec![0.0f32; 9];
        data[4] = 1.0;
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let images = ImageBatch::new(1, 1, size, data)?;
        let field = Tensor4::<f32>::zeros([1, 2, 3, 3]);
        let out = remap(&images, &field, InterpolationMode::Gaussian)?;
        let center = *out.get_unchecked([0, 0, 1, 1]);
        let edge = *out.get_unchecked([0, 0, 0, 1]);
        let corner = *out.get_unchecked([0, 0, 0, 0]);
        assert!(center < 1.0 && center > edge && edge > corner && corner > 0.0);
        Ok(())
    }

    #[test]
    fn remap_u8() -> Result<(), TransformError> {
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let images = ImageBatch::new(1, 1, size, vec![10u8, 20])?;
        let field =
            Tensor4::from_shape_fn([1, 2, 1, 2], |[_, a, _, _]| if a == 0 { -0.5 } else { 0.0 });
        let out = remap(&images, &field, InterpolationMode::Linear)?;
        assert_eq!(out.as_slice(), &[15, 20]);
        Ok(())
    }

    #[test]
    fn remap_shape_mismatch() -> Result<(), TransformError> {
        let images = ramp(2, 1, 4)?;
        let field = Tensor4::<f32>::zeros([2, 2, 3, 3]);
        assert_eq!(
            remap(&images, &field, InterpolationMode::Linear),
            Err(TransformError::ShapeMismatch(vec![2, 2, 3, 3], vec![2, 2, 4, 4]))
        );

        let field = Tensor4::<f32>::zeros([1, 2, 4, 4]);
        assert!(remap(&images, &field, InterpolationMode::Gaussian).is_err());
        Ok(())
    }

    #[test]
    fn remap_empty_images() -> Result<(), TransformError> {
        let images = ramp(2, 1, 0)?;
        let field = Tensor4::<f32>::zeros([2, 2, 0, 0]);
        let out = remap(&images, &field, InterpolationMode::Linear)?;
        assert_eq!(out.shape, [2, 1, 0, 0]);
        Ok(())
    }
}
