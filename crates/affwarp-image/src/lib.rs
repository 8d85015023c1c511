#![deny(missing_docs)]
//! Batched image types for affine augmentation

/// image batch representation (B, C, H, W).
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{ImageBatch, ImageDtype, ImageSize};
