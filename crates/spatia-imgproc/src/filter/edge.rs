use spatia_image::{Image, ImageError};

use super::{convolve2d, kernels};
use crate::{channels, parallel};

/// Compute the per-sample magnitude of a gradient field, `sqrt(gx² + gy²)`.
///
/// # Arguments
///
/// * `gx` - The horizontal derivative response with shape (H, W, 1).
/// * `gy` - The vertical derivative response with shape (H, W, 1).
///
/// # Errors
///
/// Returns an error if `gx` and `gy` do not have the same size.
pub fn gradient_magnitude(
    gx: &Image<f32, 1>,
    gy: &Image<f32, 1>,
) -> Result<Image<f32, 1>, ImageError> {
    if gx.size() != gy.size() {
        return Err(ImageError::InvalidImageSize(
            gy.width(),
            gy.height(),
            gx.width(),
            gx.height(),
        ));
    }

    let mut dst = Image::<f32, 1>::from_size_val(gx.size(), 0.0)?;
    parallel::par_iter_rows_val_two(gx, gy, &mut dst, |&x, &y, out| {
        *out = (x * x + y * y).sqrt();
    });

    Ok(dst)
}

/// Rescale a non-negative field so that its maximum maps to 255.
///
/// The scale is taken from this field alone, so the same edge strength can map
/// to different output values in different images.
///
/// A field whose maximum is zero (a perfectly flat input) is returned as all
/// zeros instead of being divided by zero.
pub fn normalize_by_max(src: &Image<f32, 1>) -> Result<Image<f32, 1>, ImageError> {
    let max = src.as_slice().iter().copied().fold(0.0f32, f32::max);

    let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
    if max > 0.0 {
        parallel::par_iter_rows_val(src, &mut dst, |&v, out| {
            *out = (v / max * 255.0).clamp(0.0, 255.0);
        });
    }

    Ok(dst)
}

/// Compute the sobel responses of a single-channel plane.
///
/// # Returns
///
/// The pair `(gx, gy)` of convolutions with [`kernels::sobel_kernels3`].
pub fn sobel_gradients(
    src: &Image<f32, 1>,
) -> Result<(Image<f32, 1>, Image<f32, 1>), ImageError> {
    let (kernel_x, kernel_y) = kernels::sobel_kernels3();
    let gx = convolve2d(src, &kernel_x)?;
    let gy = convolve2d(src, &kernel_y)?;
    Ok((gx, gy))
}

/// Compute the sobel edge strength of a plane, normalized to `[0, 255]`.
pub fn sobel_magnitude(src: &Image<f32, 1>) -> Result<Image<f32, 1>, ImageError> {
    let (gx, gy) = sobel_gradients(src)?;
    let magnitude = gradient_magnitude(&gx, &gy)?;
    normalize_by_max(&magnitude)
}

/// Detect edges with the sobel operator.
///
/// Each channel is processed on its own and normalized by its own maximum. For
/// a grayscale result from a color image, convert the image to grayscale first.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
///
/// # Returns
///
/// The edge strength image with shape (H, W, C).
///
/// # Example
///
/// ```
/// use spatia_image::{Image, ImageSize};
/// use spatia_imgproc::filter::sobel_edges;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize {
///         width: 4,
///         height: 1,
///     },
///     vec![0, 0, 255, 255],
/// )
/// .unwrap();
///
/// let edges = sobel_edges(&image).unwrap();
/// assert_eq!(edges.as_slice(), &[0, 255, 255, 0]);
/// ```
pub fn sobel_edges<const C: usize>(src: &Image<u8, C>) -> Result<Image<u8, C>, ImageError> {
    channels::map_planes(src, sobel_magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spatia_image::ImageSize;

    fn step_edge() -> Result<Image<f32, 1>, ImageError> {
        // left half 0, right half 255
        let size = ImageSize {
            width: 6,
            height: 5,
        };
        let data = (0..size.area())
            .map(|i| if i % size.width < 3 { 0.0 } else { 255.0 })
            .collect();
        Image::new(size, data)
    }

    #[test]
    fn test_gradient_magnitude() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let gx = Image::<f32, 1>::new(size, vec![3.0, -6.0])?;
        let gy = Image::<f32, 1>::new(size, vec![4.0, 8.0])?;

        let magnitude = gradient_magnitude(&gx, &gy)?;
        assert_eq!(magnitude.as_slice(), &[5.0, 10.0]);
        Ok(())
    }

    #[test]
    fn test_gradient_magnitude_size_mismatch() -> Result<(), ImageError> {
        let gx = Image::<f32, 1>::from_size_val([2, 2].into(), 0.0)?;
        let gy = Image::<f32, 1>::from_size_val([3, 2].into(), 0.0)?;

        let res = gradient_magnitude(&gx, &gy);
        assert_eq!(res, Err(ImageError::InvalidImageSize(3, 2, 2, 2)));
        Ok(())
    }

    #[test]
    fn test_normalize_by_max() -> Result<(), ImageError> {
        let src = Image::<f32, 1>::new([4, 1].into(), vec![0.0, 1.0, 2.0, 4.0])?;
        let dst = normalize_by_max(&src)?;
        assert_eq!(dst.as_slice(), &[0.0, 63.75, 127.5, 255.0]);
        Ok(())
    }

    #[test]
    fn test_normalize_maps_max_to_255() -> Result<(), ImageError> {
        let src = Image::<f32, 1>::new([3, 1].into(), vec![1.0, 3.0, 7.0])?;
        let dst = normalize_by_max(&src)?;
        assert_eq!(dst.get([0, 2, 0]), Some(&255.0));
        assert_eq!(channels::quantize(&dst)?.as_slice(), &[36, 109, 255]);
        Ok(())
    }

    #[test]
    fn test_normalize_flat_is_zero() -> Result<(), ImageError> {
        let src = Image::<f32, 1>::from_size_val([4, 3].into(), 0.0)?;
        let dst = normalize_by_max(&src)?;
        assert!(dst.as_slice().iter().all(|&v| v == 0.0));
        Ok(())
    }

    #[test]
    fn test_sobel_magnitude_flat() -> Result<(), ImageError> {
        let src = Image::<f32, 1>::from_size_val([5, 5].into(), 77.0)?;
        let dst = sobel_magnitude(&src)?;
        assert!(dst.as_slice().iter().all(|&v| v == 0.0 && v.is_finite()));
        Ok(())
    }

    #[test]
    fn test_sobel_gradients_step_edge() -> Result<(), ImageError> {
        let src = step_edge()?;
        let (gx, gy) = sobel_gradients(&src)?;

        for r in 0..src.rows() {
            for c in 0..src.cols() {
                let x = gx.get([r, c, 0]).copied().unwrap_or_default();
                if c == 2 || c == 3 {
                    // the boundary lies between columns 2 and 3
                    assert_eq!(x.abs(), 4.0 * 255.0);
                } else {
                    assert_eq!(x, 0.0);
                }
            }
        }
        assert!(gy.as_slice().iter().all(|&v| v == 0.0));
        Ok(())
    }

    #[test]
    fn test_sobel_edges_multichannel() -> Result<(), ImageError> {
        // channel 0 holds the step edge, channel 1 is flat
        let step = step_edge()?;
        let data = step
            .as_slice()
            .iter()
            .flat_map(|&v| [v as u8, 9])
            .collect();
        let src = Image::<u8, 2>::new(step.size(), data)?;

        let edges = sobel_edges(&src)?;
        let planes = edges.split_channels()?;
        assert_eq!(planes[0].get([0, 2, 0]), Some(&255));
        assert_eq!(planes[0].get([0, 0, 0]), Some(&0));
        assert!(planes[1].as_slice().iter().all(|&v| v == 0));
        Ok(())
    }
}
