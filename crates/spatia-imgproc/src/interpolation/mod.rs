//! Pixel interpolation methods for image resampling.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses the sample at the floored source coordinate (no interpolation)
//! - **Bilinear**: Smooth linear interpolation between the four surrounding samples

mod bilinear;
mod nearest;

pub(crate) use bilinear::bilinear_interpolation;
pub(crate) use nearest::nearest_source_index;

/// Interpolation mode for the resize operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

impl std::str::FromStr for InterpolationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bilinear" => Ok(InterpolationMode::Bilinear),
            "nearest" => Ok(InterpolationMode::Nearest),
            _ => Err(format!("Invalid interpolation mode: {s}")),
        }
    }
}
