#![deny(missing_docs)]
//! Dense interleaved float image buffers and per-channel statistics.

/// Owned raster buffer type.
pub mod buffer;

/// Error types for the buffer module.
pub mod error;

/// Per-channel statistics over a buffer.
pub mod stats;

pub use crate::buffer::PixelBuffer;
pub use crate::error::PixelBufferError;
pub use crate::stats::ChannelHistogram;
