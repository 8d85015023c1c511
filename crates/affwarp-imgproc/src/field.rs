//! Per-pixel displacement fields.
//!
//! A field has shape `[B, 2, n, n]`. Plane 0 holds the displacement along x (the
//! column index) and plane 1 along y (the row index). The output pixel `(x, y)` is
//! sampled from the source position `(x - τx, y - τy)`, see
//! [`remap`](crate::interpolation::remap).

use affwarp_tensor::{Tensor2, Tensor3, Tensor4};

use crate::error::TransformError;
use crate::params::broadcast_batch_size;

/// Create a meshgrid of x and y coordinates
///
/// # Arguments
///
/// * `rows` - The number of rows indicating the height of the grid
/// * `cols` - The number of columns indicating the width of the grid
///
/// # Returns
///
/// A tuple of 2D arrays of shape (rows, cols) containing the x and y coordinates
pub fn meshgrid(rows: usize, cols: usize) -> (Tensor2<f32>, Tensor2<f32>) {
    let map_x = Tensor2::from_shape_fn([rows, cols], |[_, c]| c as f32);
    let map_y = Tensor2::from_shape_fn([rows, cols], |[r, _]| r as f32);
    (map_x, map_y)
}

fn check_vectors(name: &str, vectors: &Tensor2<f32>) -> Result<(), TransformError> {
    if vectors.shape[1] != 2 {
        log::trace!("{name} has shape {:?}", vectors.shape);
        return Err(TransformError::ShapeMismatch(
            vectors.shape.to_vec(),
            vec![vectors.shape[0], 2],
        ));
    }
    Ok(())
}

/// Index of the batch element `b` in an operand of batch size `len`.
#[inline]
fn batch_index(len: usize, b: usize) -> usize {
    if len == 1 {
        0
    } else {
        b
    }
}

/// Compute the displacement field of a batch of linear transforms.
///
/// For every pixel `p = (x, y)` of an `n x n` grid the displacement is
/// `τ(p) = matrix · (p - center) + translation`.
///
/// # Arguments
///
/// * `n` - The image size.
/// * `matrix` - The linear transforms with shape `[B, 2, 2]`, zero when absent.
/// * `translation` - The translation vectors `(x, y)` with shape `[B, 2]`, zero when absent.
/// * `center` - The transform centers `(x, y)` with shape `[B, 2]`, zero when absent.
///
/// # Returns
///
/// The displacement field with shape `[B, 2, n, n]`, where `B` is the broadcast batch
/// size of the inputs (1 when all are absent).
///
/// # Errors
///
/// If an input has an unexpected shape or the batch sizes can not be broadcast, an
/// error is returned.
///
/// # Example
///
/// ```
/// use affwarp_imgproc::field::displacement_field;
/// use affwarp_tensor::Tensor2;
///
/// let t = Tensor2::from_shape_vec([1, 2], vec![1.0f32, 0.0]).unwrap();
/// let field = displacement_field(3, None, Some(&t), None).unwrap();
/// assert_eq!(field.shape, [1, 2, 3, 3]);
/// assert_eq!(field.get([0, 0, 2, 2]), Some(&1.0));
/// assert_eq!(field.get([0, 1, 2, 2]), Some(&0.0));
/// ```
pub fn displacement_field(
    n: usize,
    matrix: Option<&Tensor3<f32>>,
    translation: Option<&Tensor2<f32>>,
    center: Option<&Tensor2<f32>>,
) -> Result<Tensor4<f32>, TransformError> {
    let mut sizes = Vec::with_capacity(3);

    if let Some(m) = matrix {
        if m.shape[1..] != [2, 2] {
            return Err(TransformError::ShapeMismatch(
                m.shape.to_vec(),
                vec![m.shape[0], 2, 2],
            ));
        }
        sizes.push(m.shape[0]);
    }
    if let Some(t) = translation {
        check_vectors("translation", t)?;
        sizes.push(t.shape[0]);
    }
    if let Some(c) = center {
        check_vectors("center", c)?;
        sizes.push(c.shape[0]);
    }

    let batch_size = broadcast_batch_size(&sizes)?;

    // per batch element: [m00, m01, m10, m11, tx, ty, cx, cy]
    let coeffs = (0..batch_size)
        .map(|b| {
            let mut k = [0.0f32; 8];
            if let Some(m) = matrix {
                let bm = batch_index(m.shape[0], b);
                k[0] = *m.get_unchecked([bm, 0, 0]);
                k[1] = *m.get_unchecked([bm, 0, 1]);
                k[2] = *m.get_unchecked([bm, 1, 0]);
                k[3] = *m.get_unchecked([bm, 1, 1]);
            }
            if let Some(t) = translation {
                let bt = batch_index(t.shape[0], b);
                k[4] = *t.get_unchecked([bt, 0]);
                k[5] = *t.get_unchecked([bt, 1]);
            }
            if let Some(c) = center {
                let bc = batch_index(c.shape[0], b);
                k[6] = *c.get_unchecked([bc, 0]);
                k[7] = *c.get_unchecked([bc, 1]);
            }
            k
        })
        .collect::<Vec<_>>();

    let (grid_x, grid_y) = meshgrid(n, n);

    let field = Tensor4::from_shape_fn([batch_size, 2, n, n], |[b, axis, y, x]| {
        let k = &coeffs[b];
        let cx = grid_x.get_unchecked([y, x]) - k[6];
        let cy = grid_y.get_unchecked([y, x]) - k[7];
        match axis {
            0 => k[0] * cx + k[1] * cy + k[4],
            _ => k[2] * cx + k[3] * cy + k[5],
        }
    });

    Ok(field)
}

/// Broadcast a displacement field to `batch_size` elements.
///
/// A field with a single element is repeated, a field with `batch_size` elements is
/// returned as is.
///
/// # Errors
///
/// Returns [`TransformError::BatchMismatch`] if the field holds any other number of
/// elements.
pub fn broadcast_field(
    field: Tensor4<f32>,
    batch_size: usize,
) -> Result<Tensor4<f32>, TransformError> {
    let [field_batch, planes, rows, cols] = field.shape;
    if field_batch == batch_size {
        return Ok(field);
    }
    if field_batch != 1 {
        return Err(TransformError::BatchMismatch(field_batch, batch_size));
    }

    let data = field.into_vec();
    let repeated = data
        .iter()
        .copied()
        .cycle()
        .take(data.len() * batch_size)
        .collect::<Vec<_>>();

    Ok(Tensor4::from_shape_vec(
        [batch_size, planes, rows, cols],
        repeated,
    )?)
}
