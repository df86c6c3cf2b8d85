#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// per-channel dispatch and quantization utilities.
pub mod channels;

/// image filtering module.
pub mod filter;

/// utilities for interpolation.
pub mod interpolation;

/// spatial padding of images.
pub mod padding;

/// module containing parallelization utilities.
pub mod parallel;

/// utility functions for resizing images.
pub mod resize;
