//! Batched 2x2 linear transform matrices.
//!
//! The builders return one `[B, 2, 2]` matrix per parameter set. They encode the
//! inverse of the transform applied to the image content since the resampler pulls
//! source pixels into the output grid.

use std::f32::consts::PI;

use affwarp_tensor::Tensor3;

use crate::error::TransformError;
use crate::params::{broadcast_batch_size, BatchParam};

/// Build a `[B, 2, 2]` tensor from one `[a, b, c, d]` row-major matrix per batch element.
fn matrices_from_fn(batch_size: usize, f: impl Fn(usize) -> [f32; 4]) -> Tensor3<f32> {
    let data = (0..batch_size).map(f).collect::<Vec<_>>();
    Tensor3::from_shape_fn([batch_size, 2, 2], |[b, i, j]| data[b][i * 2 + j])
}

/// Compute rotation matrices for a batch of angles.
///
/// The angle is negated and converted from degrees to radians, giving
/// `[[cos, -sin], [sin, cos]]` of `-theta` for every batch element.
///
/// # Arguments
///
/// * `theta` - The rotation angle(s) in degrees.
///
/// # Returns
///
/// The rotation matrices with shape `[B, 2, 2]`.
///
/// # Example
///
/// ```
/// use affwarp_imgproc::matrix::rotation_matrix;
/// use affwarp_imgproc::params::BatchParam;
///
/// let m = rotation_matrix(&BatchParam::from(vec![0.0f32, 90.0]));
/// assert_eq!(m.shape, [2, 2, 2]);
/// ```
pub fn rotation_matrix(theta: &BatchParam) -> Tensor3<f32> {
    matrices_from_fn(theta.len(), |b| {
        let angle = -theta.get(b) / 180.0 * PI;
        let (sin, cos) = angle.sin_cos();
        [cos, -sin, sin, cos]
    })
}

/// Compute compression matrices `(1 - s) * I` for a batch of scales.
///
/// A positive `s` pushes the sampling positions away from the transform center by a
/// factor `1 + s`, so the image content is compressed. A negative `s` magnifies it.
pub fn compression_matrix(s: &BatchParam) -> Tensor3<f32> {
    matrices_from_fn(s.len(), |b| {
        let diag = 1.0 - s.get(b);
        [diag, 0.0, 0.0, diag]
    })
}

/// Compute pure shear matrices `[[1 - a, -b], [-b, 1 + a]]`.
///
/// `a` shears along the x/y axes and `b` along the diagonals. The two parameters
/// broadcast against each other.
///
/// # Errors
///
/// If the batch sizes of `a` and `b` can not be broadcast, an error is returned.
pub fn shear_matrix(a: &BatchParam, b: &BatchParam) -> Result<Tensor3<f32>, TransformError> {
    let batch_size = broadcast_batch_size(&[a.len(), b.len()])?;
    Ok(matrices_from_fn(batch_size, |i| {
        let (a, b) = (a.get(i), b.get(i));
        [1.0 - a, -b, -b, 1.0 + a]
    }))
}

/// Combine transform matrices additively around the identity.
///
/// Every matrix contributes its increment to identity `M - I`; the increments are
/// summed. The result is the linear part of the displacement field: the identity is
/// recovered by the field convention, where an output pixel `p` samples `p - τ(p)`.
/// This is a first-order composition, not a matrix product.
///
/// # Arguments
///
/// * `matrices` - The matrices to combine, each with shape `[B, 2, 2]` or `[1, 2, 2]`.
///
/// # Returns
///
/// The summed increments, or `None` if `matrices` is empty.
///
/// # Errors
///
/// If a matrix is not `[_, 2, 2]` or the batch sizes can not be broadcast, an error is
/// returned.
///
/// # Example
///
/// ```
/// use affwarp_imgproc::matrix::{combine_matrices, compression_matrix, rotation_matrix};
/// use affwarp_imgproc::params::BatchParam;
///
/// let r = rotation_matrix(&BatchParam::from(0.0f32));
/// let c = compression_matrix(&BatchParam::from(0.0f32));
/// let m = combine_matrices(&[&r, &c]).unwrap().unwrap();
/// assert_eq!(m.as_slice(), &[0.0, 0.0, 0.0, 0.0]);
/// ```
pub fn combine_matrices(
    matrices: &[&Tensor3<f32>],
) -> Result<Option<Tensor3<f32>>, TransformError> {
    if matrices.is_empty() {
        return Ok(None);
    }

    for m in matrices {
        if m.shape[1..] != [2, 2] {
            return Err(TransformError::ShapeMismatch(
                m.shape.to_vec(),
                vec![m.shape[0], 2, 2],
            ));
        }
    }

    let sizes = matrices.iter().map(|m| m.shape[0]).collect::<Vec<_>>();
    let batch_size = broadcast_batch_size(&sizes)?;

    let combined = Tensor3::from_shape_fn([batch_size, 2, 2], |[b, i, j]| {
        let identity = if i == j { 1.0 } else { 0.0 };
        matrices
            .iter()
            .map(|m| {
                let bm = if m.shape[0] == 1 { 0 } else { b };
                m.get_unchecked([bm, i, j]) - identity
            })
            .sum()
    });

    Ok(Some(combined))
}
