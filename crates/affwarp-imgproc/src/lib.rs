#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// error types for the transform operations.
pub mod error;

/// displacement fields and sampling grids.
pub mod field;

/// utilities for interpolation.
pub mod interpolation;

/// batched linear transform matrices.
pub mod matrix;

/// per-batch transform parameters and broadcasting.
pub mod params;

/// module containing parallization utilities.
pub mod parallel;

/// the affine augmentation pipeline.
pub mod transform;

pub use crate::error::TransformError;
