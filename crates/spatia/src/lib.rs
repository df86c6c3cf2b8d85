#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use spatia_image as image;

#[doc(inline)]
pub use spatia_imgproc as imgproc;
