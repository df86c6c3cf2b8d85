use rayon::prelude::*;
use spatia_image::{Image, ImageError, ImageSize};

/// Map a possibly out of range coordinate into `[0, len)` by mirroring it
/// across the border, excluding the border sample itself.
///
/// This is the `"reflect"` mode of `numpy.pad`: `... c b | a b c ... x y z | y x ...`.
/// Coordinates further out than one image length are mirrored repeatedly, and
/// a dimension of length one maps everything to 0.
///
/// # Arguments
///
/// * `i` - The coordinate to map.
/// * `len` - The length of the dimension. Must be non-zero.
///
/// # Example
///
/// ```
/// use spatia_imgproc::padding::mirror_index;
///
/// assert_eq!(mirror_index(-1, 4), 1);
/// assert_eq!(mirror_index(-2, 4), 2);
/// assert_eq!(mirror_index(4, 4), 2);
/// assert_eq!(mirror_index(2, 4), 2);
/// ```
#[inline]
pub fn mirror_index(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }

    // one full mirror cycle is 2 * (len - 1) samples long
    let period = 2 * (len as isize - 1);
    let i = i.rem_euclid(period);
    if i < len as isize {
        i as usize
    } else {
        (period - i) as usize
    }
}

/// Amount of padding, in pixels, on each side of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding2D {
    /// Rows added above the image.
    pub top: usize,
    /// Rows added below the image.
    pub bottom: usize,
    /// Columns added left of the image.
    pub left: usize,
    /// Columns added right of the image.
    pub right: usize,
}

impl Padding2D {
    /// The same amount of padding on all four sides.
    pub fn uniform(pad: usize) -> Self {
        Self {
            top: pad,
            bottom: pad,
            left: pad,
            right: pad,
        }
    }

    /// The size of an image of `size` once this padding is applied.
    pub fn padded_size(&self, size: ImageSize) -> ImageSize {
        ImageSize {
            width: size.width + self.left + self.right,
            height: size.height + self.top + self.bottom,
        }
    }
}

/// Extend an image on every side by mirroring its samples across the border.
///
/// The border is filled with [`mirror_index`] along both axes, so the padded
/// region never contains zeros or samples wrapped around from the far side.
/// The source image is left untouched.
///
/// # Arguments
///
/// * `src` - The image to pad.
/// * `padding` - The amount of padding for all four sides.
///
/// # Returns
///
/// A new image of size `padding.padded_size(src.size())` with `src` at its
/// center.
///
/// # Example
///
/// ```
/// use spatia_image::{Image, ImageSize};
/// use spatia_imgproc::padding::{spatial_padding, Padding2D};
///
/// let src = Image::<u8, 1>::new(ImageSize { width: 3, height: 1 }, vec![1, 2, 3]).unwrap();
///
/// let dst = spatial_padding(&src, Padding2D::uniform(1)).unwrap();
///
/// assert_eq!(dst.size(), ImageSize { width: 5, height: 3 });
/// assert_eq!(&dst.as_slice()[5..10], &[2, 1, 2, 3, 2]);
/// ```
pub fn spatial_padding<T, const C: usize>(
    src: &Image<T, C>,
    padding: Padding2D,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    let (src_rows, src_cols) = (src.rows(), src.cols());
    let mut dst = Image::<T, C>::from_size_val(padding.padded_size(src.size()), T::default())?;

    // source column of every destination column
    let col_map = (0..dst.cols())
        .map(|c| mirror_index(c as isize - padding.left as isize, src_cols))
        .collect::<Vec<_>>();

    let src_data = src.as_slice();
    let row_stride = dst.cols() * C;
    dst.as_slice_mut()
        .par_chunks_exact_mut(row_stride)
        .enumerate()
        .for_each(|(r, dst_row)| {
            let sr = mirror_index(r as isize - padding.top as isize, src_rows);
            let src_row = &src_data[sr * src_cols * C..(sr + 1) * src_cols * C];
            for (dst_pixel, &sc) in dst_row.chunks_exact_mut(C).zip(col_map.iter()) {
                dst_pixel.copy_from_slice(&src_row[sc * C..(sc + 1) * C]);
            }
        });

    Ok(dst)
}
