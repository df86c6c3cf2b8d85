#![deny(missing_docs)]
//! Image types and traits for the spatia filtering engine

/// image representation for pixel-level processing.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize};
