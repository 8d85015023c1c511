//! Pixel interpolation methods for resampling image batches.
//!
//! # Interpolation Modes
//!
//! - **Linear**: bilinear blend of the four neighbors of the sampling position
//! - **Gaussian**: normalized Gaussian-weighted sum over every source pixel, smoother
//!   and O(n⁴) per image
//!
//! Sampling positions outside the image are clamped to the nearest edge pixel.

mod bilinear;
mod gaussian;
mod interpolate;
mod remap;

pub use gaussian::{gaussian_weights, GAUSSIAN_SIGMA};
pub use interpolate::InterpolationMode;
pub use remap::remap;
