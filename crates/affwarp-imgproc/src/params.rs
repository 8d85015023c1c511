use affwarp_tensor::Tensor2;

use crate::error::TransformError;

/// A transform parameter holding one value per image, or a single value shared by the batch.
///
/// # Examples
///
/// ```
/// use affwarp_imgproc::params::BatchParam;
///
/// let angle = BatchParam::from(30.0f32);
/// assert!(angle.is_scalar());
/// assert_eq!(angle.get(5), 30.0);
///
/// let angles = BatchParam::from(vec![10.0f32, 20.0]);
/// assert_eq!(angles.len(), 2);
/// assert_eq!(angles.get(1), 20.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BatchParam(Vec<f32>);

impl BatchParam {
    /// Number of values held by the parameter.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the parameter holds no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if a single value is broadcast to the whole batch.
    pub fn is_scalar(&self) -> bool {
        self.0.len() == 1
    }

    /// The raw values of the parameter.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// The value for the batch element `b`.
    ///
    /// A scalar parameter returns its single value for every `b`.
    ///
    /// # Panics
    ///
    /// Panics if the parameter is not a scalar and `b` is out of bounds. Check the batch
    /// size with [`broadcast_batch_size`] first.
    #[inline]
    pub fn get(&self, b: usize) -> f32 {
        if self.is_scalar() {
            self.0[0]
        } else {
            self.0[b]
        }
    }
}

impl From<f32> for BatchParam {
    fn from(value: f32) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<f32>> for BatchParam {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

impl From<&[f32]> for BatchParam {
    fn from(values: &[f32]) -> Self {
        Self(values.to_vec())
    }
}

impl<const N: usize> From<[f32; N]> for BatchParam {
    fn from(values: [f32; N]) -> Self {
        Self(values.to_vec())
    }
}

/// Compute the common batch size of a set of operands.
///
/// The batch size is the largest of `sizes`; every other size must be 1 or equal to it.
///
/// # Errors
///
/// Returns [`TransformError::BatchMismatch`] with the offending size if it can not be
/// broadcast.
///
/// # Example
///
/// ```
/// use affwarp_imgproc::params::broadcast_batch_size;
///
/// assert_eq!(broadcast_batch_size(&[1, 4, 4]).unwrap(), 4);
/// assert!(broadcast_batch_size(&[2, 3]).is_err());
/// ```
pub fn broadcast_batch_size(sizes: &[usize]) -> Result<usize, TransformError> {
    let batch_size = sizes.iter().copied().max().unwrap_or(1);
    for &size in sizes {
        if size != 1 && size != batch_size {
            return Err(TransformError::BatchMismatch(size, batch_size));
        }
    }
    Ok(batch_size)
}

/// Stack two parameters into a `[B, 2]` tensor of `(x, y)` pairs.
///
/// # Errors
///
/// If the batch sizes of `x` and `y` can not be broadcast, an error is returned.
///
/// # Example
///
/// ```
/// use affwarp_imgproc::params::{stack_xy, BatchParam};
///
/// let t = stack_xy(&BatchParam::from(1.0f32), &BatchParam::from(vec![2.0f32, 3.0])).unwrap();
/// assert_eq!(t.shape, [2, 2]);
/// assert_eq!(t.as_slice(), &[1.0, 2.0, 1.0, 3.0]);
/// ```
pub fn stack_xy(x: &BatchParam, y: &BatchParam) -> Result<Tensor2<f32>, TransformError> {
    let batch_size = broadcast_batch_size(&[x.len(), y.len()])?;
    let data = (0..batch_size)
        .flat_map(|b| [x.get(b), y.get(b)])
        .collect::<Vec<_>>();
    Ok(Tensor2::from_shape_vec([batch_size, 2], data)?)
}
