/// An error type for buffer access and statistics.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PixelBufferError {
    /// Error when pixel coordinates fall outside the buffer extent.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds for a {2}x{3} buffer")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a supplied pixel value has fewer channels than the buffer.
    #[error("Pixel value has {0} channels but the buffer expects {1}")]
    ChannelSizeMismatch(usize, usize),

    /// Error when the data length does not match the buffer dimensions.
    #[error("Data length ({0}) does not match the buffer size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when the requested number of histogram bins is invalid.
    #[error("Invalid number of histogram bins: {0}")]
    InvalidHistogramBins(usize),

    /// Error when statistics are requested on an empty buffer.
    #[error("Buffer data is not initialized")]
    BufferNotInitialized,
}
