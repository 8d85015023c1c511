use affwarp_image::ImageError;
use affwarp_tensor::TensorError;
use thiserror::Error;

/// An error type for the transform operations.
#[derive(Error, Debug, PartialEq)]
pub enum TransformError {
    /// The shapes of two operands are not compatible.
    ///
    /// Raised when a displacement field does not cover the image it is applied to,
    /// or when a parameter tensor has an unexpected layout.
    #[error("Shape mismatch: {0:?} != {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// A batch size is neither 1 nor the batch size of the other operands.
    #[error("Batch size mismatch: {0} cannot be broadcast to {1}")]
    BatchMismatch(usize, usize),

    /// The interpolation mode is not one of the supported modes.
    #[error("Invalid interpolation mode '{0}', expected 'linear' or 'gaussian'")]
    InvalidInterpolationMode(String),

    /// Tensor error
    #[error("Error with the tensor: {0}")]
    TensorError(#[from] TensorError),

    /// Image error
    #[error(transparent)]
    ImageError(#[from] ImageError),
}
