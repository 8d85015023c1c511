use affwarp_image::{ImageBatch, ImageDtype};
use affwarp_tensor::Tensor2;

use crate::error::TransformError;
use crate::field::{broadcast_field, displacement_field};
use crate::interpolation::{remap, InterpolationMode};
use crate::matrix::{combine_matrices, compression_matrix, rotation_matrix, shear_matrix};
use crate::params::{stack_xy, BatchParam};

/// Parameters of an affine augmentation.
///
/// Every parameter is either a single value shared by the whole batch or one value
/// per image. Absent parameters are neutral: no translation, no rotation, no
/// compression, no shear and the transform centered at the origin.
///
/// # Example
///
/// ```
/// use affwarp_imgproc::interpolation::InterpolationMode;
/// use affwarp_imgproc::transform::AffineParams;
///
/// let params = AffineParams::default()
///     .with_rotation(15.0f32)
///     .with_center(3.5f32, 3.5f32)
///     .with_interpolation(InterpolationMode::Gaussian);
/// assert!(params.translation_x.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AffineParams {
    /// Translation along the x axis, in pixels.
    pub translation_x: Option<BatchParam>,
    /// Translation along the y axis, in pixels.
    pub translation_y: Option<BatchParam>,
    /// Rotation angle in degrees.
    pub rotation: Option<BatchParam>,
    /// Compression factor, positive values shrink the content.
    pub compression: Option<BatchParam>,
    /// Pure shear along the x/y axes.
    pub shear_a: Option<BatchParam>,
    /// Pure shear along the diagonals.
    pub shear_b: Option<BatchParam>,
    /// Transform center along the x axis.
    pub center_x: Option<BatchParam>,
    /// Transform center along the y axis.
    pub center_y: Option<BatchParam>,
    /// Interpolation used to resample the images.
    pub interpolation: InterpolationMode,
}

impl AffineParams {
    /// Set the translation.
    pub fn with_translation(
        mut self,
        x: impl Into<BatchParam>,
        y: impl Into<BatchParam>,
    ) -> Self {
        self.translation_x = Some(x.into());
        self.translation_y = Some(y.into());
        self
    }

    /// Set the rotation angle in degrees.
    pub fn with_rotation(mut self, theta: impl Into<BatchParam>) -> Self {
        self.rotation = Some(theta.into());
        self
    }

    /// Set the compression factor.
    pub fn with_compression(mut self, s: impl Into<BatchParam>) -> Self {
        self.compression = Some(s.into());
        self
    }

    /// Set the pure shear factors.
    pub fn with_shear(mut self, a: impl Into<BatchParam>, b: impl Into<BatchParam>) -> Self {
        self.shear_a = Some(a.into());
        self.shear_b = Some(b.into());
        self
    }

    /// Set the transform center.
    pub fn with_center(mut self, x: impl Into<BatchParam>, y: impl Into<BatchParam>) -> Self {
        self.center_x = Some(x.into());
        self.center_y = Some(y.into());
        self
    }

    /// Set the interpolation mode.
    pub fn with_interpolation(mut self, interpolation: InterpolationMode) -> Self {
        self.interpolation = interpolation;
        self
    }
}

/// Stack an optional `(x, y)` pair, a missing half defaults to zero.
fn optional_xy(
    x: Option<&BatchParam>,
    y: Option<&BatchParam>,
) -> Result<Option<Tensor2<f32>>, TransformError> {
    if x.is_none() && y.is_none() {
        return Ok(None);
    }
    let zero = BatchParam::from(0.0f32);
    Ok(Some(stack_xy(x.unwrap_or(&zero), y.unwrap_or(&zero))?))
}

/// Apply affine transformations to a batch of square images.
///
/// The rotation, compression and shear matrices are combined additively around the
/// identity, turned into a displacement field around the transform center, broadcast
/// to the batch and used to resample the images.
///
/// # Arguments
///
/// * `images` - The input images with shape (B, C, n, n).
/// * `params` - The transform parameters, each with one or B values.
///
/// # Returns
///
/// The transformed images with the same shape and pixel type.
///
/// # Errors
///
/// * The images are not square.
/// * A parameter holds neither 1 nor B values.
///
/// # Example
///
/// ```
/// use affwarp_image::{ImageBatch, ImageSize};
/// use affwarp_imgproc::transform::{transform, AffineParams};
///
/// let size = ImageSize { width: 3, height: 3 };
/// let images = ImageBatch::new(1, 1, size, (0..9).map(|v| v as f32).collect()).unwrap();
///
/// let params = AffineParams::default().with_translation(1.0f32, 0.0f32);
/// let out = transform(&images, &params).unwrap();
/// assert_eq!(out.as_slice(), &[0.0, 0.0, 1.0, 3.0, 3.0, 4.0, 6.0, 6.0, 7.0]);
/// ```
pub fn transform<T: ImageDtype>(
    images: &ImageBatch<T>,
    params: &AffineParams,
) -> Result<ImageBatch<T>, TransformError> {
    let n = images.cols();
    let batch_size = images.batch_size();

    log::debug!(
        "transform {batch_size} images of size {} with {} interpolation",
        images.size(),
        params.interpolation
    );

    let translation = optional_xy(params.translation_x.as_ref(), params.translation_y.as_ref())?;
    let center = optional_xy(params.center_x.as_ref(), params.center_y.as_ref())?;

    let mut matrices = Vec::with_capacity(3);
    if let Some(theta) = &params.rotation {
        matrices.push(rotation_matrix(theta));
    }
    if let Some(s) = &params.compression {
        matrices.push(compression_matrix(s));
    }
    if params.shear_a.is_some() || params.shear_b.is_some() {
        let zero = BatchParam::from(0.0f32);
        let a = params.shear_a.as_ref().unwrap_or(&zero);
        let b = params.shear_b.as_ref().unwrap_or(&zero);
        matrices.push(shear_matrix(a, b)?);
    }
    let matrix = combine_matrices(&matrices.iter().collect::<Vec<_>>())?;

    let field = displacement_field(n, matrix.as_ref(), translation.as_ref(), center.as_ref())?;
    let field = broadcast_field(field, batch_size)?;

    remap(images, &field, params.interpolation)
}

#[cfg(test)]
mod tests {
    use affwarp_image::{ImageBatch, ImageSize};

    use super::{transform, AffineParams};
    use crate::error::TransformError;
    use crate::interpolation::InterpolationMode;
    use crate::params::BatchParam;

    fn square(batch_size: usize, n: usize) -> Result<ImageBatch<f32>, TransformError> {
        let size = ImageSize {
            width: n,
            height: n,
        };
        let data = (0..batch_size * n * n).map(|v| (v % (n * n)) as f32).collect();
        Ok(ImageBatch::new(batch_size, 1, size, data)?)
    }

    #[test]
    fn default_params_are_identity() -> Result<(), TransformError> {
        let images = square(2, 5)?;
        let out = transform(&images, &AffineParams::default())?;
        assert_eq!(out, images);
        Ok(())
    }

    #[test]
    fn neutral_components_are_identity() -> Result<(), TransformError> {
        let images = square(1, 4)?;
        let params = AffineParams::default()
            .with_rotation(0.0f32)
            .with_compression(0.0f32)
            .with_shear(0.0f32, 0.0f32)
            .with_center(2.0f32, 1.0f32);
        let out = transform(&images, &params)?;
        assert_eq!(out, images);
        Ok(())
    }

    #[test]
    fn per_image_translation() -> Result<(), TransformError> {
        let images = square(2, 3)?;
        let params =
            AffineParams::default().with_translation(vec![0.0f32, 0.0], vec![0.0f32, 1.0]);
        let out = transform(&images, &params)?;
        assert_eq!(out.image(0)?, images.image(0)?);
        assert_eq!(out.image(1)?, &[0.0, 1.0, 2.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        Ok(())
    }

    #[test]
    fn only_translation_y() -> Result<(), TransformError> {
        let images = square(1, 3)?;
        let params = AffineParams {
            translation_y: Some(BatchParam::from(-1.0f32)),
            ..Default::default()
        };
        let out = transform(&images, &params)?;
        assert_eq!(out.as_slice(), &[3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 6.0, 7.0, 8.0]);
        Ok(())
    }

    #[test]
    fn batch_mismatch() -> Result<(), TransformError> {
        let images = square(2, 3)?;
        let params = AffineParams::default().with_rotation(vec![1.0f32, 2.0, 3.0]);
        assert_eq!(
            transform(&images, &params),
            Err(TransformError::BatchMismatch(3, 2))
        );
        Ok(())
    }

    #[test]
    fn non_square_images() -> Result<(), TransformError> {
        let size = ImageSize {
            width: 3,
            height: 2,
        };
        let images = ImageBatch::new(1, 1, size, vec![0.0f32; 6])?;
        let res = transform(&images, &AffineParams::default());
        assert!(matches!(res, Err(TransformError::ShapeMismatch(_, _))));
        Ok(())
    }

    #[test]
    fn gaussian_mode_runs() -> Result<(), TransformError> {
        let images = square(1, 4)?;
        let params = AffineParams::default()
            .with_rotation(10.0f32)
            .with_center(1.5f32, 1.5f32)
            .with_interpolation(InterpolationMode::Gaussian);
        let out = transform(&images, &params)?;
        assert_eq!(out.shape, images.shape);
        assert!(out.as_slice().iter().all(|v| (0.0..=15.0).contains(v)));
        Ok(())
    }
}
