//! Filter operations
//!
//! This module provides the convolution engine, the kernels it is used with
//! and the filters built on top of it.

/// Filter kernels
pub mod kernels;
pub use kernels::Kernel;

/// Convolution engine
mod convolution;
pub use convolution::*;

/// Gradient magnitude and edge detection
mod edge;
pub use edge::*;

/// Filter operations
mod ops;
pub use ops::*;
