/// An error type for the image and image processing crates.
///
/// Variants fall in two families: shape errors, raised when the layout of the
/// data is wrong, and config errors, raised when a parameter is out of range.
/// Use [`ImageError::is_shape_error`] and [`ImageError::is_config_error`] to
/// tell them apart.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the image size and channels.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images that must share a size do not.
    #[error("Image size ({0}x{1}) does not match the expected size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the kernel weights do not form a square matrix.
    #[error("Kernel data length ({0}) does not match a {1}x{1} kernel")]
    InvalidKernelShape(usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the number of planes does not match the channel count.
    #[error("Got {0} channel planes, expected {1}")]
    ChannelCountMismatch(usize, usize),

    /// Error when the image has a zero dimension.
    #[error("Image size ({0}x{1}) must be non-zero")]
    ZeroSizedImage(usize, usize),

    /// Error when the kernel size is even or zero.
    #[error("Kernel size ({0}) must be odd and positive")]
    InvalidKernelSize(usize),

    /// Error when the gaussian sigma is not strictly positive.
    #[error("Sigma ({0}) must be positive and finite")]
    InvalidSigma(f32),

    /// Error when the resize target has a zero dimension.
    #[error("Target size ({0}x{1}) must be non-zero")]
    InvalidTargetSize(usize, usize),

    /// Error when a sample cannot be cast to the target type.
    #[error("Failed to cast image data to {0}")]
    CastError(String),
}

impl ImageError {
    /// Whether the error comes from a malformed data layout.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            ImageError::InvalidChannelShape(..)
                | ImageError::InvalidImageSize(..)
                | ImageError::InvalidKernelShape(..)
                | ImageError::ChannelIndexOutOfBounds(..)
                | ImageError::ChannelCountMismatch(..)
        )
    }

    /// Whether the error comes from an out of range parameter.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ImageError::ZeroSizedImage(..)
                | ImageError::InvalidKernelSize(..)
                | ImageError::InvalidSigma(..)
                | ImageError::InvalidTargetSize(..)
        )
    }
}
