use spatia_image::{Image, ImageDtype, ImageError, ImageSize};

use crate::interpolation::{bilinear_interpolation, nearest_source_index, InterpolationMode};
use crate::parallel;

/// Target of a resize operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResizeConfig {
    /// Height of the output image in pixels.
    pub height: usize,
    /// Width of the output image in pixels.
    pub width: usize,
    /// How output samples are computed from the source.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: InterpolationMode,
}

impl ResizeConfig {
    /// The output size described by the config.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Check that both target dimensions are non-zero.
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.width == 0 || self.height == 0 {
            return Err(ImageError::InvalidTargetSize(self.width, self.height));
        }
        Ok(())
    }
}

/// Resize an image to a new size.
///
/// The row and column scale factors, `src.height() / new_size.height` and
/// `src.width() / new_size.width`, are independent: the aspect ratio is not
/// preserved unless the caller picks a proportional size.
///
/// - [`InterpolationMode::Nearest`] copies the sample at
///   `(floor(i * scale_row), floor(j * scale_col))`. No new sample values are
///   introduced.
/// - [`InterpolationMode::Bilinear`] blends the four samples around the
///   fractional coordinate `(i * scale_row, j * scale_col)`, clamping the lower
///   and right neighbors to the last row and column. For `u8` images the result
///   is clamped to `[0, 255]` and truncated.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
/// * `new_size` - The size of the output image.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The resized image with shape (H', W', C).
///
/// # Errors
///
/// Returns an error if `new_size` has a zero dimension.
///
/// # Example
///
/// ```
/// use spatia_image::{Image, ImageSize};
/// use spatia_imgproc::interpolation::InterpolationMode;
/// use spatia_imgproc::resize::resize;
///
/// let image = Image::<_, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0u8; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let image_resized = resize(&image, new_size, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(image_resized.num_channels(), 3);
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
pub fn resize<T, const C: usize>(
    src: &Image<T, C>,
    new_size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<Image<T, C>, ImageError>
where
    T: ImageDtype,
{
    if new_size.width == 0 || new_size.height == 0 {
        return Err(ImageError::InvalidTargetSize(
            new_size.width,
            new_size.height,
        ));
    }

    let (src_rows, src_cols) = (src.rows(), src.cols());
    let mut dst = Image::<T, C>::from_size_val(new_size, T::default())?;

    match interpolation {
        InterpolationMode::Nearest => {
            let src_data = src.as_slice();
            parallel::par_fill_rows(&mut dst, |i, dst_row| {
                let r = nearest_source_index(i, src_rows, new_size.height);
                for (j, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
                    let c = nearest_source_index(j, src_cols, new_size.width);
                    let base = (r * src_cols + c) * C;
                    dst_pixel.copy_from_slice(&src_data[base..base + C]);
                }
            });
        }
        InterpolationMode::Bilinear => {
            let scale_row = src_rows as f32 / new_size.height as f32;
            let scale_col = src_cols as f32 / new_size.width as f32;
            parallel::par_fill_rows(&mut dst, |i, dst_row| {
                let row = i as f32 * scale_row;
                for (j, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
                    let col = j as f32 * scale_col;
                    let pixel = bilinear_interpolation(src, row, col);
                    for (out, &v) in dst_pixel.iter_mut().zip(pixel.iter()) {
                        *out = T::from_f32(v);
                    }
                }
            });
        }
    }

    Ok(dst)
}

/// Resize an image as described by a [`ResizeConfig`].
pub fn resize_with_config<T, const C: usize>(
    src: &Image<T, C>,
    config: &ResizeConfig,
) -> Result<Image<T, C>, ImageError>
where
    T: ImageDtype,
{
    config.validate()?;
    resize(src, config.size(), config.mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_smoke_ch3() -> Result<(), ImageError> {
        let image = Image::<_, 3>::new(
            ImageSize {
                width: 4,
                height: 5,
            },
            vec![0f32; 4 * 5 * 3],
        )?;

        let new_size = ImageSize {
            width: 2,
            height: 3,
        };

        let image_resized = resize(&image, new_size, InterpolationMode::Bilinear)?;

        assert_eq!(image_resized.num_channels(), 3);
        assert_eq!(image_resized.size().width, 2);
        assert_eq!(image_resized.size().height, 3);
        Ok(())
    }

    #[test]
    fn resize_smoke_ch1() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 4,
                height: 5,
            },
            vec![0u8; 4 * 5],
        )?;

        let new_size = ImageSize {
            width: 2,
            height: 3,
        };

        let image_resized = resize(&image, new_size, InterpolationMode::Nearest)?;

        assert_eq!(image_resized.num_channels(), 1);
        assert_eq!(image_resized.size().width, 2);
        assert_eq!(image_resized.size().height, 3);
        Ok(())
    }

    #[test]
    fn resize_zero_target() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val([4, 4].into(), 0)?;

        for mode in [InterpolationMode::Nearest, InterpolationMode::Bilinear] {
            let res = resize(&image, [0, 3].into(), mode);
            assert_eq!(res, Err(ImageError::InvalidTargetSize(0, 3)));
        }
        Ok(())
    }

    #[test]
    fn resize_nearest_downscale_floors() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![10, 20, 30],
        )?;

        // column coordinates 0.0 and 1.5 are floored to 0 and 1
        let resized = resize(&image, [2, 1].into(), InterpolationMode::Nearest)?;
        assert_eq!(resized.as_slice(), &[10, 20]);
        Ok(())
    }

    #[test]
    fn resize_nearest_non_uniform() -> Result<(), ImageError> {
        let image = Image::<u8, 2>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![1, 2, 3, 4, 5, 6, 7, 8],
        )?;

        // stretch the width only
        let resized = resize(&image, [4, 2].into(), InterpolationMode::Nearest)?;
        assert_eq!(
            resized.as_slice(),
            &[1, 2, 1, 2, 3, 4, 3, 4, 5, 6, 5, 6, 7, 8, 7, 8]
        );
        Ok(())
    }

    #[test]
    fn resize_bilinear_upscale_row() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![0.0, 100.0],
        )?;

        let resized = resize(&image, [4, 1].into(), InterpolationMode::Bilinear)?;
        // coordinates 0.0, 0.5, 1.0, 1.5; the last one clamps to the last column
        assert_eq!(resized.as_slice(), &[0.0, 50.0, 100.0, 100.0]);
        Ok(())
    }

    #[test]
    fn resize_bilinear_u8_truncates() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![0, 85],
        )?;

        // 42.5 at column 0.5 is truncated, not rounded up
        let resized = resize(&image, [4, 1].into(), InterpolationMode::Bilinear)?;
        assert_eq!(resized.as_slice(), &[0, 42, 85, 85]);
        Ok(())
    }

    #[test]
    fn resize_with_config_validates() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val([4, 4].into(), 9)?;

        let config = ResizeConfig {
            height: 2,
            width: 0,
            mode: InterpolationMode::Nearest,
        };
        assert!(resize_with_config(&image, &config).is_err_and(|e| e.is_config_error()));

        let config = ResizeConfig {
            height: 2,
            width: 3,
            mode: InterpolationMode::Nearest,
        };
        let resized = resize_with_config(&image, &config)?;
        assert_eq!(resized.size(), config.size());
        assert!(resized.as_slice().iter().all(|&v| v == 9));
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn resize_config_serde() -> Result<(), serde_json::Error> {
        let config: ResizeConfig = serde_json::from_str(r#"{"height": 8, "width": 6}"#)?;
        assert_eq!(
            config,
            ResizeConfig {
                height: 8,
                width: 6,
                mode: InterpolationMode::Bilinear,
            }
        );
        Ok(())
    }
}
