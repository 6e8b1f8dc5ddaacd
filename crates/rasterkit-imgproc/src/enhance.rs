use rasterkit_image::PixelBuffer;

use crate::parallel;

/// Apply a power-law gamma correction to a buffer in place.
///
/// Every sample is replaced by `sample.powf(gamma)`. No clamping is
/// performed; negative bases or non-finite results are the caller's
/// responsibility.
///
/// # Arguments
///
/// * `gamma` - The exponent of the power law.
/// * `buf` - The buffer to alter in place.
///
/// # Example
///
/// ```
/// use rasterkit_image::PixelBuffer;
/// use rasterkit_imgproc::enhance::apply_gamma;
///
/// let mut buf = PixelBuffer::from_vec(2, 1, 1, vec![4.0, 9.0]).unwrap();
///
/// apply_gamma(0.5, &mut buf);
///
/// assert!((buf.as_slice()[0] - 2.0).abs() < 1e-6);
/// assert!((buf.as_slice()[1] - 3.0).abs() < 1e-6);
/// ```
pub fn apply_gamma(gamma: f32, buf: &mut PixelBuffer) {
    parallel::par_apply(buf, |v| *v = v.powf(gamma));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterkit_image::PixelBufferError;

    #[test]
    fn gamma_round_trip() -> Result<(), PixelBufferError> {
        let data = vec![0.1f32, 0.25, 0.5, 0.75, 0.9, 1.0, 1.5, 2.0];
        let original = PixelBuffer::from_vec(4, 2, 1, data)?;

        let mut buf = original.clone();
        apply_gamma(2.2, &mut buf);
        apply_gamma(1.0 / 2.2, &mut buf);

        for (a, b) in buf.as_slice().iter().zip(original.as_slice().iter()) {
            assert!((a - b).abs() <= 1e-5 * b.abs());
        }
        Ok(())
    }

    #[test]
    fn gamma_one_is_identity() -> Result<(), PixelBufferError> {
        let original = PixelBuffer::from_vec(2, 1, 2, vec![0.2, 0.4, 0.6, 0.8])?;
        let mut buf = original.clone();

        apply_gamma(1.0, &mut buf);

        for (a, b) in buf.as_slice().iter().zip(original.as_slice().iter()) {
            assert!((a - b).abs() < 1e-7);
        }
        Ok(())
    }
}
