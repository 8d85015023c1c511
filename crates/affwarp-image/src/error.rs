use affwarp_tensor::TensorError;

/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the batch layout.
    #[error("Data length ({0}) does not match the image batch size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the batch index is out of bounds.
    #[error("Batch index ({0}) is out of bounds ({1})")]
    BatchIndexOutOfBounds(usize, usize),

    /// Error from the underlying tensor.
    #[error("Failed to create the image tensor")]
    TensorError(#[from] TensorError),
}
