use spatia_image::{Image, ImageError};

use super::kernels::Kernel;
use crate::padding::{spatial_padding, Padding2D};
use crate::parallel;

/// Convolve a single-channel image with a square kernel.
///
/// This is a true convolution: the kernel is flipped along both axes before it
/// is slid over the image.
/// The image is extended by `kernel.size() / 2` mirrored samples on every side
/// (see [`spatial_padding`]), so the output has the same size as the input.
///
/// The response is kept as floating point and is not clamped.
///
/// # Arguments
///
/// * `src` - The source plane with shape (H, W, 1).
/// * `kernel` - The kernel to convolve with.
///
/// # Returns
///
/// The filter response with shape (H, W, 1).
///
/// # Example
///
/// ```
/// use spatia_image::{Image, ImageSize};
/// use spatia_imgproc::filter::{convolve2d, kernels};
///
/// let image = Image::<f32, 1>::from_size_val(
///     ImageSize {
///         width: 3,
///         height: 3,
///     },
///     100.0,
/// )
/// .unwrap();
///
/// let response = convolve2d(&image, &kernels::laplacian_kernel3()).unwrap();
///
/// assert_eq!(response.size(), image.size());
/// assert!(response.as_slice().iter().all(|&v| v == 0.0));
/// ```
pub fn convolve2d(src: &Image<f32, 1>, kernel: &Kernel) -> Result<Image<f32, 1>, ImageError> {
    let flipped = kernel.flipped();
    let ksize = flipped.size();

    let padded = spatial_padding(src, Padding2D::uniform(flipped.half_size()))?;
    let padded_cols = padded.cols();
    let padded_data = padded.as_slice();
    let weights = flipped.as_slice();

    let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;

    // the window of output (r, c) starts at (r, c) in the padded buffer
    parallel::par_fill_rows(&mut dst, |r, dst_row| {
        for (c, out) in dst_row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (ky, kernel_row) in weights.chunks_exact(ksize).enumerate() {
                let start = (r + ky) * padded_cols + c;
                let window = &padded_data[start..start + ksize];
                sum += window
                    .iter()
                    .zip(kernel_row.iter())
                    .map(|(&p, &w)| p * w)
                    .sum::<f32>();
            }
            *out = sum;
        }
    });

    Ok(dst)
}
