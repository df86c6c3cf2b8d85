use spatia_image::{Image, ImageDtype};

/// Kernel for bilinear interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `row` - The fractional row coordinate, in `[0, rows)`.
/// * `col` - The fractional column coordinate, in `[0, cols)`.
///
/// # Returns
///
/// The interpolated pixel values. The lower/right neighbors are clamped to the
/// last row/column, so coordinates on the last row or column never read out of
/// bounds.
pub(crate) fn bilinear_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    row: f32,
    col: f32,
) -> [f32; C] {
    let (rows, cols) = (image.rows(), image.cols());

    let r0 = (row.floor() as usize).min(rows - 1);
    let c0 = (col.floor() as usize).min(cols - 1);
    let r1 = (r0 + 1).min(rows - 1);
    let c1 = (c0 + 1).min(cols - 1);

    let dr = row - r0 as f32;
    let dc = col - c0 as f32;

    let w00 = (1.0 - dr) * (1.0 - dc);
    let w01 = (1.0 - dr) * dc;
    let w10 = dr * (1.0 - dc);
    let w11 = dr * dc;

    let data = image.as_slice();
    let base00 = (r0 * cols + c0) * C;
    let base01 = (r0 * cols + c1) * C;
    let base10 = (r1 * cols + c0) * C;
    let base11 = (r1 * cols + c1) * C;

    let mut pixel = [0.0; C];
    for (k, out) in pixel.iter_mut().enumerate() {
        let p00: f32 = data[base00 + k].into();
        let p01: f32 = data[base01 + k].into();
        let p10: f32 = data[base10 + k].into();
        let p11: f32 = data[base11 + k].into();
        *out = p00 * w00 + p01 * w01 + p10 * w10 + p11 * w11;
    }

    pixel
}
