//! Per-channel dispatch.
//!
//! Filters in this crate are written for a single `f32` plane. The helpers here
//! split an 8-bit image into such planes, run the filter on each one and put the
//! quantized results back together in the original channel order.

use rayon::prelude::*;
use spatia_image::{Image, ImageDtype, ImageError};

use crate::parallel;

/// Split an image into single-channel `f32` planes, in channel order.
pub fn to_f32_planes<const C: usize>(
    src: &Image<u8, C>,
) -> Result<Vec<Image<f32, 1>>, ImageError> {
    (0..C)
        .map(|ch| {
            let plane = src.channel(ch)?;
            let mut dst = Image::<f32, 1>::from_size_val(plane.size(), 0.0)?;
            parallel::par_iter_rows_val(&plane, &mut dst, |&v, out| *out = v as f32);
            Ok(dst)
        })
        .collect()
}

/// Clamp a float plane to `[0, 255]` and truncate it to 8 bits.
///
/// # Example
///
/// ```
/// use spatia_image::Image;
/// use spatia_imgproc::channels::quantize;
///
/// let plane = Image::<f32, 1>::new([4, 1].into(), vec![-12.0, 0.4, 99.6, 300.0]).unwrap();
/// assert_eq!(quantize(&plane).unwrap().as_slice(), &[0, 0, 99, 255]);
/// ```
pub fn quantize(src: &Image<f32, 1>) -> Result<Image<u8, 1>, ImageError> {
    let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;
    parallel::par_iter_rows_val(src, &mut dst, |&v, out| {
        *out = u8::from_f32(v.clamp(0.0, 255.0));
    });
    Ok(dst)
}

/// Apply a single-channel operation to every channel of an image.
///
/// The image is split into `f32` planes, `f` runs on each plane independently
/// (the planes are processed in parallel), every response is clamped and
/// quantized, and the planes are recombined in their original order.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `f` - The operation to run on each plane. It must keep the plane size.
///
/// # Errors
///
/// Returns the first error produced by `f`, or a size error if `f` returns a
/// plane of a different size.
///
/// # Example
///
/// ```
/// use spatia_image::{Image, ImageSize};
/// use spatia_imgproc::channels::map_planes;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 1,
///         height: 1,
///     },
///     vec![10, 20, 200],
/// )
/// .unwrap();
///
/// let doubled = map_planes(&image, |plane| {
///     let data = plane.as_slice().iter().map(|v| v * 2.0).collect();
///     Image::new(plane.size(), data)
/// })
/// .unwrap();
///
/// assert_eq!(doubled.as_slice(), &[20, 40, 255]);
/// ```
pub fn map_planes<const C: usize, F>(
    src: &Image<u8, C>,
    f: F,
) -> Result<Image<u8, C>, ImageError>
where
    F: Fn(&Image<f32, 1>) -> Result<Image<f32, 1>, ImageError> + Send + Sync,
{
    let planes = to_f32_planes(src)?;

    let processed = planes
        .par_iter()
        .map(|plane| {
            let response = f(plane)?;
            if response.size() != plane.size() {
                return Err(ImageError::InvalidImageSize(
                    response.width(),
                    response.height(),
                    plane.width(),
                    plane.height(),
                ));
            }
            quantize(&response)
        })
        .collect::<Result<Vec<_>, ImageError>>()?;

    Image::from_channels(&processed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spatia_image::ImageSize;

    fn make_rgb() -> Result<Image<u8, 3>, ImageError> {
        Image::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![1, 2, 3, 4, 5, 6],
        )
    }

    #[test]
    fn test_to_f32_planes() -> Result<(), ImageError> {
        let planes = to_f32_planes(&make_rgb()?)?;
        assert_eq!(planes.len(), 3);
        assert_eq!(planes[0].as_slice(), &[1.0, 4.0]);
        assert_eq!(planes[1].as_slice(), &[2.0, 5.0]);
        assert_eq!(planes[2].as_slice(), &[3.0, 6.0]);
        Ok(())
    }

    #[test]
    fn test_map_planes_identity() -> Result<(), ImageError> {
        let src = make_rgb()?;
        let dst = map_planes(&src, |plane| Ok(plane.clone()))?;
        assert_eq!(dst, src);
        Ok(())
    }

    #[test]
    fn test_map_planes_keeps_channel_order() -> Result<(), ImageError> {
        let src = make_rgb()?;
        // each plane becomes its own first sample times ten
        let dst = map_planes(&src, |plane| {
            let first = plane.as_slice()[0];
            Image::from_size_val(plane.size(), first * 10.0)
        })?;
        assert_eq!(dst.as_slice(), &[10, 20, 30, 10, 20, 30]);
        Ok(())
    }

    #[test]
    fn test_map_planes_propagates_error() -> Result<(), ImageError> {
        let src = make_rgb()?;
        let res = map_planes(&src, |_| Err(ImageError::InvalidKernelSize(2)));
        assert_eq!(res, Err(ImageError::InvalidKernelSize(2)));
        Ok(())
    }

    #[test]
    fn test_map_planes_rejects_resized_plane() -> Result<(), ImageError> {
        let src = make_rgb()?;
        let res = map_planes(&src, |_| Image::from_size_val([1, 1].into(), 0.0));
        assert_eq!(res, Err(ImageError::InvalidImageSize(1, 1, 2, 1)));
        Ok(())
    }

    #[test]
    fn test_quantize_truncates_and_clamps() -> Result<(), ImageError> {
        let plane = Image::<f32, 1>::new(
            [6, 1].into(),
            vec![-0.1, 0.5, 127.49, 212.5, 254.6, 1e9],
        )?;
        assert_eq!(quantize(&plane)?.as_slice(), &[0, 0, 127, 212, 254, 255]);
        Ok(())
    }
}
