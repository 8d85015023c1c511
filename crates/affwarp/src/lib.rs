#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use affwarp_tensor as tensor;

#[doc(inline)]
pub use affwarp_image as image;

#[doc(inline)]
pub use affwarp_imgproc as imgproc;
