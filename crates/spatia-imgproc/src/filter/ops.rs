use spatia_image::{Image, ImageError};

use super::{convolve2d, kernels};
use crate::{channels, parallel};

/// Parameters of a gaussian blur.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaussianBlurConfig {
    /// Side length of the kernel footprint. Must be odd.
    pub kernel_size: usize,
    /// Spread of the gaussian. Larger values weigh distant samples more.
    pub sigma: f32,
}

impl Default for GaussianBlurConfig {
    fn default() -> Self {
        Self {
            kernel_size: 5,
            sigma: 1.0,
        }
    }
}

impl GaussianBlurConfig {
    /// Check that the kernel size is odd and the sigma positive and finite.
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.kernel_size % 2 == 0 {
            return Err(ImageError::InvalidKernelSize(self.kernel_size));
        }
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(ImageError::InvalidSigma(self.sigma));
        }
        Ok(())
    }

    /// Check the parameters and build the kernel they describe.
    pub fn kernel(&self) -> Result<kernels::Kernel, ImageError> {
        self.validate()?;
        kernels::gaussian_kernel_2d(self.kernel_size, self.sigma)
    }
}

/// Blur an image using a gaussian filter
///
/// Every channel is convolved with the 2D gaussian kernel, then clamped to
/// `[0, 255]` and truncated to 8 bits. A flat image stays flat, possibly one
/// level lower when the weighted sum falls just short of the original value.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `config` - The kernel size and sigma of the gaussian.
///
/// # Errors
///
/// Returns an error, before touching the image, if the kernel size is even
/// or the sigma is not positive.
///
/// # Example
///
/// ```
/// use spatia_image::{Image, ImageSize};
/// use spatia_imgproc::filter::{gaussian_blur, GaussianBlurConfig};
///
/// let image = Image::<u8, 3>::from_size_val(
///     ImageSize {
///         width: 4,
///         height: 4,
///     },
///     128,
/// )
/// .unwrap();
///
/// let blurred = gaussian_blur(&image, &GaussianBlurConfig::default()).unwrap();
/// assert_eq!(blurred.size(), image.size());
/// assert!(blurred.as_slice().iter().all(|&v| v == 127 || v == 128));
/// ```
pub fn gaussian_blur<const C: usize>(
    src: &Image<u8, C>,
    config: &GaussianBlurConfig,
) -> Result<Image<u8, C>, ImageError> {
    let kernel = config.kernel()?;
    channels::map_planes(src, |plane| convolve2d(plane, &kernel))
}

/// Sharpen a single-channel plane by adding its laplacian response to it.
///
/// The result is not clamped.
pub fn sharpen_plane(src: &Image<f32, 1>) -> Result<Image<f32, 1>, ImageError> {
    let laplacian = convolve2d(src, &kernels::laplacian_kernel3())?;

    let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
    parallel::par_iter_rows_val_two(src, &laplacian, &mut dst, |&orig, &resp, out| {
        *out = orig + resp;
    });

    Ok(dst)
}

/// Sharpen an image with the laplacian kernel.
///
/// Computes `clamp(src + laplacian(src), 0, 255)` for every channel. A flat
/// image has no laplacian response and is returned unchanged.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
///
/// # Returns
///
/// The sharpened image with shape (H, W, C).
pub fn sharpen<const C: usize>(src: &Image<u8, C>) -> Result<Image<u8, C>, ImageError> {
    channels::map_planes(src, sharpen_plane)
}

/// Sharpen every image of a batch.
///
/// Stops at the first image that fails.
pub fn sharpen_batch<const C: usize>(
    images: &[Image<u8, C>],
) -> Result<Vec<Image<u8, C>>, ImageError> {
    images.iter().map(sharpen).collect()
}
