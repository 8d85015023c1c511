#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `affwarp-tensor` provides [`Tensor`], an owned multi-dimensional array with a
//! row-major layout and compile-time dimensionality. It carries transform matrices
//! (`[B, 2, 2]`), translation and center vectors (`[B, 2]`), displacement fields
//! (`[B, 2, n, n]`) and image batches (`[B, C, H, W]`).
//!
//! ```rust
//! use affwarp_tensor::Tensor3;
//!
//! let identity = Tensor3::<f32>::from_shape_fn([1, 2, 2], |[_, i, j]| {
//!     if i == j { 1.0 } else { 0.0 }
//! });
//! assert_eq!(identity.as_slice(), &[1.0, 0.0, 0.0, 1.0]);
//! ```

/// Tensor module containing the main tensor implementation and error types.
pub mod tensor;

pub use crate::tensor::{get_strides_from_shape, Tensor, TensorError};

/// Type alias for a 2-dimensional tensor.
pub type Tensor2<T> = Tensor<T, 2>;

/// Type alias for a 3-dimensional tensor.
pub type Tensor3<T> = Tensor<T, 3>;

/// Type alias for a 4-dimensional tensor.
pub type Tensor4<T> = Tensor<T, 4>;
