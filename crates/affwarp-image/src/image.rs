use std::ops;

use affwarp_tensor::Tensor4;

use crate::error::ImageError;

/// Image size in pixels
///
/// # Examples
///
/// ```
/// use affwarp_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Trait for pixel data types.
///
/// Interpolation runs in `f64`; the result is converted back with [`ImageDtype::from_f64`].
pub trait ImageDtype: Copy + Default + Send + Sync + 'static {
    /// Convert the pixel value to f64.
    fn to_f64(self) -> f64;

    /// Convert a f64 value to the pixel data type.
    fn from_f64(x: f64) -> Self;
}

impl ImageDtype for f32 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(x: f64) -> Self {
        x as f32
    }
}

impl ImageDtype for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(x: f64) -> Self {
        x
    }
}

/// Round to the nearest integer and saturate to the range of `T`. NaN maps to zero.
fn round_saturate<T>(x: f64) -> T
where
    T: num_traits::Bounded + num_traits::NumCast + Default,
{
    let lo = T::min_value().to_f64().unwrap_or(0.0);
    let hi = T::max_value().to_f64().unwrap_or(0.0);
    <T as num_traits::NumCast>::from(x.round().clamp(lo, hi)).unwrap_or_default()
}

macro_rules! impl_integer_dtype {
    ($($t:ty),*) => {
        $(
            impl ImageDtype for $t {
                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(x: f64) -> Self {
                    round_saturate(x)
                }
            }
        )*
    };
}

impl_integer_dtype!(u8, u16, u32, i8, i16, i32);

/// A batch of images with pixel data.
///
/// The batch is represented as a 4D tensor with shape (B, C, H, W), where B is the
/// number of images, C the number of channels, H the height and W the width.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBatch<T>(pub Tensor4<T>);

/// helper to deference the inner tensor
impl<T> ops::Deref for ImageBatch<T> {
    type Target = Tensor4<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> ImageBatch<T> {
    /// Create a new image batch from pixel data laid out as (B, C, H, W).
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the batch layout, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use affwarp_image::{ImageBatch, ImageSize};
    ///
    /// let batch = ImageBatch::<u8>::new(
    ///     2,
    ///     3,
    ///     ImageSize { width: 10, height: 20 },
    ///     vec![0u8; 2 * 3 * 10 * 20],
    /// ).unwrap();
    ///
    /// assert_eq!(batch.batch_size(), 2);
    /// assert_eq!(batch.num_channels(), 3);
    /// assert_eq!(batch.size().width, 10);
    /// ```
    pub fn new(
        batch_size: usize,
        channels: usize,
        size: ImageSize,
        data: Vec<T>,
    ) -> Result<Self, ImageError> {
        let numel = batch_size * channels * size.height * size.width;
        if data.len() != numel {
            return Err(ImageError::InvalidChannelShape(data.len(), numel));
        }

        Ok(Self(Tensor4::from_shape_vec(
            [batch_size, channels, size.height, size.width],
            data,
        )?))
    }

    /// Create a new image batch with every pixel set to `val`.
    pub fn from_size_val(batch_size: usize, channels: usize, size: ImageSize, val: T) -> Self
    where
        T: Clone,
    {
        Self(Tensor4::from_shape_val(
            [batch_size, channels, size.height, size.width],
            val,
        ))
    }

    /// Stack single images of identical layout (C, H, W) into a batch.
    ///
    /// # Errors
    ///
    /// If an image does not hold `channels * height * width` values, an error is returned.
    pub fn from_images(
        channels: usize,
        size: ImageSize,
        images: &[Vec<T>],
    ) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let plane = channels * size.height * size.width;
        let mut data = Vec::with_capacity(images.len() * plane);
        for image in images {
            if image.len() != plane {
                return Err(ImageError::InvalidChannelShape(image.len(), plane));
            }
            data.extend_from_slice(image);
        }

        Self::new(images.len(), channels, size, data)
    }

    /// Get the pixel data of one image of the batch, laid out as (C, H, W).
    ///
    /// # Errors
    ///
    /// If the batch index is out of bounds, an error is returned.
    pub fn image(&self, index: usize) -> Result<&[T], ImageError> {
        self.0
            .outer_slice(index)
            .map_err(|_| ImageError::BatchIndexOutOfBounds(index, self.batch_size()))
    }

    /// Get the size of the images in pixels.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.shape[3],
            height: self.shape[2],
        }
    }

    /// Get the number of images in the batch.
    pub fn batch_size(&self) -> usize {
        self.shape[0]
    }

    /// Get the number of channels of each image.
    pub fn num_channels(&self) -> usize {
        self.shape[1]
    }

    /// Get the number of rows of each image.
    pub fn rows(&self) -> usize {
        self.shape[2]
    }

    /// Get the number of columns of each image.
    pub fn cols(&self) -> usize {
        self.shape[3]
    }
}
