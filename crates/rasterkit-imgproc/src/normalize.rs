use rasterkit_image::{PixelBuffer, PixelBufferError};

use crate::parallel;

/// Normalize each channel of a buffer to zero mean and unit RMS (z-score).
///
/// `dst` is sized to `src` and overwritten with
/// `(sample - mean) / rms`, computed per channel from the buffer
/// statistics. A channel whose RMS is zero has no contrast to normalize
/// and is copied through unchanged.
///
/// # Example
///
/// ```
/// use rasterkit_image::PixelBuffer;
/// use rasterkit_imgproc::normalize::contrast_transform;
///
/// let src = PixelBuffer::from_vec(2, 1, 1, vec![1.0, 3.0]).unwrap();
/// let mut dst = PixelBuffer::default();
///
/// contrast_transform(&src, &mut dst).unwrap();
///
/// // mean 2, rms 1
/// assert_eq!(dst.as_slice(), &[-1.0, 1.0]);
/// ```
pub fn contrast_transform(
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
) -> Result<(), PixelBufferError> {
    dst.resize(src.width(), src.height(), src.num_channels());

    let means = src.channel_means();
    let rms = src.channel_rms();

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        for ((d, &v), (&mean, &rms)) in dst_pixel
            .iter_mut()
            .zip(src_pixel)
            .zip(means.iter().zip(rms.iter()))
        {
            *d = if rms == 0.0 { v } else { (v - mean) / rms };
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_channel_has_zero_mean_unit_rms() -> Result<(), PixelBufferError> {
        let src = PixelBuffer::from_vec(4, 2, 1, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0])?;
        let mut dst = PixelBuffer::default();

        contrast_transform(&src, &mut dst)?;

        let means = dst.channel_means();
        let rms = dst.channel_rms();
        assert!(means[0].abs() < 1e-6);
        assert!((rms[0] - 1.0).abs() < 1e-5);
        Ok(())
    }

    #[test]
    fn zero_rms_channel_passes_through() -> Result<(), PixelBufferError> {
        // channel 0 is constant, channel 1 varies
        let src = PixelBuffer::from_vec(2, 1, 2, vec![5.0, 1.0, 5.0, 3.0])?;
        let mut dst = PixelBuffer::default();

        contrast_transform(&src, &mut dst)?;

        assert_eq!(dst.pixel(0, 0)?[0], 5.0);
        assert_eq!(dst.pixel(1, 0)?[0], 5.0);
        assert_eq!(dst.pixel(0, 0)?[1], -1.0);
        assert_eq!(dst.pixel(1, 0)?[1], 1.0);
        Ok(())
    }
}
