//! Filter operations
//!
//! This module provides neighborhood filter operations over raster buffers.

/// Filter kernels
pub mod kernels;

/// Convolution operations
mod convolution;
pub use convolution::*;
