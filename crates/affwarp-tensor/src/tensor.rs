use thiserror::Error;

/// An error type for tensor operations.
#[derive(Error, Debug, PartialEq)]
pub enum TensorError {
    /// Tensor shape does not match the provided data.
    ///
    /// The product of the shape dimensions must equal the number of elements.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on shape
        expected: usize,
        /// Actual number of elements in the data
        actual: usize,
    },

    /// Index exceeds tensor bounds.
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index that was attempted
        index: usize,
        /// The size of the dimension being indexed
        size: usize,
    },
}

impl TensorError {
    /// Creates an InvalidShape error.
    pub fn invalid_shape(expected: usize, actual: usize) -> Self {
        Self::InvalidShape { expected, actual }
    }

    /// Creates an IndexOutOfBounds error.
    pub fn index_out_of_bounds(index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }
}

/// Computes the strides for a row-major (C-contiguous) tensor layout.
///
/// # Examples
///
/// ```rust
/// use affwarp_tensor::get_strides_from_shape;
///
/// assert_eq!(get_strides_from_shape([2, 3]), [3, 1]);
/// assert_eq!(get_strides_from_shape([2, 3, 4]), [12, 4, 1]);
/// ```
pub fn get_strides_from_shape<const N: usize>(shape: [usize; N]) -> [usize; N] {
    let mut strides: [usize; N] = [0; N];
    let mut stride = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = stride;
        stride *= shape[i];
    }
    strides
}

/// A multi-dimensional array with owned, contiguous row-major data.
///
/// # Type Parameters
///
/// * `T` - The element type stored in the tensor
/// * `N` - The number of dimensions, checked at compile time
///
/// # Examples
///
/// ```rust
/// use affwarp_tensor::Tensor2;
///
/// let t = Tensor2::<u8>::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
/// assert_eq!(t.shape, [2, 2]);
/// assert_eq!(t.get([1, 0]), Some(&3));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor<T, const N: usize> {
    storage: Vec<T>,
    /// The shape of the tensor.
    pub shape: [usize; N],
    /// The strides of the tensor data in memory.
    pub strides: [usize; N],
}

impl<T, const N: usize> Tensor<T, N> {
    /// Creates a new `Tensor` with the given shape and data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape, an error is returned.
    pub fn from_shape_vec(shape: [usize; N], data: Vec<T>) -> Result<Self, TensorError> {
        let numel = shape.iter().product::<usize>();
        if numel != data.len() {
            return Err(TensorError::invalid_shape(numel, data.len()));
        }
        Ok(Self {
            storage: data,
            shape,
            strides: get_strides_from_shape(shape),
        })
    }

    /// Creates a new `Tensor` with every element set to `value`.
    ///
    /// # Example
    ///
    /// ```
    /// use affwarp_tensor::Tensor2;
    ///
    /// let t = Tensor2::<u8>::from_shape_val([2, 2], 1);
    /// assert_eq!(t.as_slice(), &[1, 1, 1, 1]);
    /// ```
    pub fn from_shape_val(shape: [usize; N], value: T) -> Self
    where
        T: Clone,
    {
        let numel = shape.iter().product::<usize>();
        Self {
            storage: vec![value; numel],
            shape,
            strides: get_strides_from_shape(shape),
        }
    }

    /// Creates a new `Tensor` by calling `f` with the index of every element.
    ///
    /// # Example
    ///
    /// ```
    /// use affwarp_tensor::Tensor2;
    ///
    /// let t = Tensor2::<u8>::from_shape_fn([2, 2], |[i, j]| (i * 2 + j) as u8);
    /// assert_eq!(t.as_slice(), &[0, 1, 2, 3]);
    /// ```
    pub fn from_shape_fn<F>(shape: [usize; N], f: F) -> Self
    where
        F: Fn([usize; N]) -> T,
    {
        let numel = shape.iter().product::<usize>();
        let storage = (0..numel)
            .map(|i| {
                let mut index = [0; N];
                let mut j = i;
                for k in (0..N).rev() {
                    index[k] = j % shape[k];
                    j /= shape[k];
                }
                f(index)
            })
            .collect();
        Self {
            storage,
            shape,
            strides: get_strides_from_shape(shape),
        }
    }

    /// Create a new tensor with all elements set to zero.
    pub fn zeros(shape: [usize; N]) -> Self
    where
        T: Clone + num_traits::Zero,
    {
        Self::from_shape_val(shape, T::zero())
    }

    /// Returns the tensor data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.storage
    }

    /// Consumes the tensor and returns the underlying vector.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.storage
    }

    /// Returns the number of elements in the tensor.
    #[inline]
    pub fn numel(&self) -> usize {
        self.storage.len()
    }

    /// Get the offset of the element at the given index.
    ///
    /// Returns `None` if any index is out of bounds for its dimension.
    pub fn get_iter_offset(&self, index: [usize; N]) -> Option<usize> {
        let mut offset = 0;
        for ((&idx, dim_size), stride) in index.iter().zip(self.shape).zip(self.strides) {
            if idx >= dim_size {
                return None;
            }
            offset += idx * stride;
        }
        Some(offset)
    }

    /// Get the element at the given index without checking the dimension sizes.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset is past the end of the data.
    pub fn get_unchecked(&self, index: [usize; N]) -> &T {
        let offset = index
            .iter()
            .zip(self.strides)
            .fold(0, |acc, (&idx, stride)| acc + idx * stride);
        &self.storage[offset]
    }

    /// Get the element at the given index, checking if the index is out of bounds.
    pub fn get(&self, index: [usize; N]) -> Option<&T> {
        self.get_iter_offset(index).and_then(|i| self.storage.get(i))
    }

    /// Returns the contiguous slice holding the sub-tensor at `index` along the first axis.
    ///
    /// # Errors
    ///
    /// If `index` is not smaller than the size of the first axis, an error is returned.
    pub fn outer_slice(&self, index: usize) -> Result<&[T], TensorError> {
        if N == 0 || index >= self.shape[0] {
            return Err(TensorError::index_out_of_bounds(
                index,
                self.shape.first().copied().unwrap_or(0),
            ));
        }
        let len = self.strides[0];
        Ok(&self.storage[index * len..(index + 1) * len])
    }
}

#[cfg(test)]
mod tests {
    use crate::tensor::TensorError;
    use crate::{Tensor2, Tensor3};

    #[test]
    fn constructor_2d() -> Result<(), TensorError> {
        let t = Tensor2::<u8>::from_shape_vec([1, 2], vec![1, 2])?;
        assert_eq!(t.shape, [1, 2]);
        assert_eq!(t.as_slice(), &[1, 2]);
        assert_eq!(t.strides, [2, 1]);
        assert_eq!(t.numel(), 2);
        Ok(())
    }

    #[test]
    fn constructor_wrong_len() {
        let res = Tensor2::<u8>::from_shape_vec([2, 2], vec![1, 2, 3]);
        assert_eq!(res, Err(TensorError::invalid_shape(4, 3)));
    }

    #[test]
    fn get_3d() -> Result<(), TensorError> {
        let t = Tensor3::<u8>::from_shape_vec([2, 1, 3], vec![1, 2, 3, 4, 5, 6])?;
        assert_eq!(t.get([0, 0, 0]), Some(&1));
        assert_eq!(t.get([0, 0, 2]), Some(&3));
        assert_eq!(t.get([1, 0, 1]), Some(&5));
        assert_eq!(*t.get_unchecked([1, 0, 2]), 6);
        assert!(t.get([2, 0, 0]).is_none());
        assert!(t.get([0, 1, 0]).is_none());
        assert!(t.get([0, 0, 3]).is_none());
        Ok(())
    }

    #[test]
    fn from_shape_fn_3d() {
        let t = Tensor3::<usize>::from_shape_fn([2, 2, 2], |[i, j, k]| i * 100 + j * 10 + k);
        assert_eq!(t.as_slice(), &[0, 1, 10, 11, 100, 101, 110, 111]);
    }

    #[test]
    fn outer_slice() -> Result<(), TensorError> {
        let t = Tensor3::<u8>::from_shape_vec([2, 1, 2], vec![1, 2, 3, 4])?;
        assert_eq!(t.outer_slice(1)?, &[3, 4]);
        assert_eq!(
            t.outer_slice(2),
            Err(TensorError::index_out_of_bounds(2, 2))
        );
        Ok(())
    }
}
