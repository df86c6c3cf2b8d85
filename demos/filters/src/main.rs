use argh::FromArgs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use spatia::{
    image::{Image, ImageError, ImageSize},
    imgproc::{
        filter::{self, GaussianBlurConfig},
        interpolation::InterpolationMode,
        resize::{self, ResizeConfig},
    },
};

/// The operation to run on the input image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Filter {
    Sharpen,
    Blur,
    Edges,
    Resize,
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sharpen" => Ok(Self::Sharpen),
            "blur" => Ok(Self::Blur),
            "edges" => Ok(Self::Edges),
            "resize" => Ok(Self::Resize),
            _ => Err(format!("Invalid filter: {s}")),
        }
    }
}

#[derive(FromArgs)]
/// Apply a spatial filter to an image file
struct Args {
    /// path to the input image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output image
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// the filter to apply: sharpen, blur, edges or resize
    #[argh(option)]
    filter: Filter,

    /// the kernel size for the gaussian blur
    #[argh(option, default = "5")]
    kernel_size: usize,

    /// the sigma for the gaussian blur
    #[argh(option, default = "1.0")]
    sigma: f32,

    /// the target height for resize
    #[argh(option)]
    height: Option<usize>,

    /// the target width for resize
    #[argh(option)]
    width: Option<usize>,

    /// the interpolation for resize: bilinear or nearest
    #[argh(option, default = "InterpolationMode::Bilinear")]
    mode: InterpolationMode,
}

fn apply<const C: usize>(image: &Image<u8, C>, args: &Args) -> Result<Image<u8, C>, ImageError> {
    match args.filter {
        Filter::Sharpen => filter::sharpen(image),
        Filter::Blur => {
            let config = GaussianBlurConfig {
                kernel_size: args.kernel_size,
                sigma: args.sigma,
            };
            log::debug!("gaussian blur: {config:?}");
            filter::gaussian_blur(image, &config)
        }
        Filter::Edges => filter::sobel_edges(image),
        Filter::Resize => {
            let config = ResizeConfig {
                height: args.height.unwrap_or(image.height()),
                width: args.width.unwrap_or(image.width()),
                mode: args.mode,
            };
            log::debug!("resize: {config:?}");
            resize::resize_with_config(image, &config)
        }
    }
}

fn save<const C: usize>(
    image: &Image<u8, C>,
    path: &Path,
    color: image::ColorType,
) -> Result<(), Box<dyn std::error::Error>> {
    image::save_buffer(
        path,
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        color,
    )?;
    Ok(())
}

/// Pick the 8-bit layout an image is processed in and return its samples.
///
/// Edges are detected on the luminance, giving a single edge map. Otherwise
/// luma and rgba images keep their layout and everything else becomes rgb.
fn into_samples(decoded: image::DynamicImage, filter: Filter) -> (Vec<u8>, image::ColorType) {
    if filter == Filter::Edges {
        return (decoded.to_luma8().into_raw(), image::ColorType::L8);
    }

    match decoded {
        image::DynamicImage::ImageLuma8(buf) => (buf.into_raw(), image::ColorType::L8),
        image::DynamicImage::ImageRgba8(buf) => (buf.into_raw(), image::ColorType::Rgba8),
        other => (other.into_rgb8().into_raw(), image::ColorType::Rgb8),
    }
}

fn run<const C: usize>(
    data: Vec<u8>,
    size: ImageSize,
    args: &Args,
    color: image::ColorType,
) -> Result<(), Box<dyn std::error::Error>> {
    let image = Image::<u8, C>::new(size, data)?;
    let filtered = apply(&image, args)?;

    log::info!(
        "writing image of {} with {} channels to {}",
        filtered.size(),
        C,
        args.output.display()
    );
    save(&filtered, &args.output, color)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let decoded = image::open(&args.input)?;
    let size = ImageSize {
        width: decoded.width() as usize,
        height: decoded.height() as usize,
    };

    log::info!(
        "loaded {} image from {} ({:?})",
        size,
        args.input.display(),
        decoded.color()
    );
    log::info!("applying filter: {:?}", args.filter);

    let (data, color) = into_samples(decoded, args.filter);
    match color {
        image::ColorType::L8 => run::<1>(data, size, &args, color),
        image::ColorType::Rgba8 => run::<4>(data, size, &args, color),
        _ => run::<3>(data, size, &args, color),
    }
}
