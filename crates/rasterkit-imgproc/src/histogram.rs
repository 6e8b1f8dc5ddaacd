use rasterkit_image::{stats, PixelBuffer, PixelBufferError};

use crate::parallel;

/// Reference bin count for interactive callers of [`equalize_histogram`].
pub const DEFAULT_NUM_BINS: usize = 500;

/// Equalize the per-channel intensity distribution of a buffer via CDF
/// matching.
///
/// `dst` is sized to `src` and overwritten. For each channel a histogram
/// with `num_bins` bins is computed, normalized, and accumulated into a
/// CDF; every sample is then remapped to
/// `cdf[bin(sample)] * (max - min) + min` using the per-channel extrema
/// captured during binning. This redistributes intensities toward a
/// uniform CDF over the channel's original range.
///
/// A channel with no dynamic range (`max == min`) is remapped to itself:
/// all samples land in bin 0 and the scale factor collapses to the
/// channel's constant value.
///
/// # Errors
///
/// Returns [`PixelBufferError::InvalidHistogramBins`] when `num_bins` is
/// zero, or [`PixelBufferError::BufferNotInitialized`] when `src` is
/// empty.
///
/// # Example
///
/// ```
/// use rasterkit_image::PixelBuffer;
/// use rasterkit_imgproc::histogram::equalize_histogram;
///
/// let src = PixelBuffer::from_vec(4, 1, 1, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
/// let mut dst = PixelBuffer::default();
///
/// // already uniform: equalization keeps the extremes at the extremes
/// equalize_histogram(&src, &mut dst, 4).unwrap();
///
/// assert_eq!(dst.pixel(3, 0).unwrap(), &[3.0]);
/// ```
pub fn equalize_histogram(
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    num_bins: usize,
) -> Result<(), PixelBufferError> {
    let hist = src.histogram(num_bins)?;
    let cdfs = hist.cumulative_distribution();

    log::debug!(
        "equalizing a {}x{}x{} buffer over {} bins",
        src.width(),
        src.height(),
        src.num_channels(),
        num_bins
    );

    dst.resize(src.width(), src.height(), src.num_channels());

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        for (ch, (d, &v)) in dst_pixel.iter_mut().zip(src_pixel).enumerate() {
            let (min, max) = (hist.min[ch], hist.max[ch]);
            let bin = stats::bin_index(v, min, max, num_bins);
            *d = cdfs[ch][bin] * (max - min) + min;
        }
    });

    Ok(())
}
