use rasterkit_image::{PixelBuffer, PixelBufferError};
use rasterkit_imgproc::histogram::equalize_histogram;

#[test]
fn test_equalize_ramp_is_strictly_monotonic() -> Result<(), PixelBufferError> {
    // 4x4 single-channel ramp 0..16, equalized with one bin per value
    let src = PixelBuffer::from_vec(4, 4, 1, (0..16).map(|v| v as f32).collect())?;
    let mut dst = PixelBuffer::default();

    equalize_histogram(&src, &mut dst, 16)?;

    // every sample falls in its own bin, so the remap is cdf[v] * 15:
    // strictly increasing in row-major order
    for pair in dst.as_slice().windows(2) {
        assert!(pair[1] > pair[0]);
    }

    // the darkest and brightest input pixels take the output extremes
    let (min, max) = dst.channel_min_max()?;
    assert_eq!(dst.pixel(0, 0)?[0], min[0]);
    assert_eq!(dst.pixel(3, 3)?[0], max[0]);

    // the brightest pixel keeps the original maximum: cdf[last] * 15
    assert!((max[0] - 15.0).abs() < 1e-5);

    // expected remap of sample v is 15 * (v + 1) / 16
    for (v, &out) in dst.as_slice().iter().enumerate() {
        let expected = 15.0 * (v + 1) as f32 / 16.0;
        assert!((out - expected).abs() < 1e-5);
    }

    Ok(())
}

#[test]
fn test_equalize_twice_is_idempotent_up_to_binning() -> Result<(), PixelBufferError> {
    let num_bins = 16;
    let src = PixelBuffer::from_vec(4, 4, 1, (0..16).map(|v| v as f32).collect())?;

    let mut once = PixelBuffer::default();
    equalize_histogram(&src, &mut once, num_bins)?;

    let mut twice = PixelBuffer::default();
    equalize_histogram(&once, &mut twice, num_bins)?;

    // the second pass must not reshape any channel's CDF beyond bin
    // resolution
    let cdf_once = once.histogram(num_bins)?.cumulative_distribution();
    let cdf_twice = twice.histogram(num_bins)?.cumulative_distribution();

    for (a, b) in cdf_once[0].iter().zip(cdf_twice[0].iter()) {
        assert!(
            (a - b).abs() <= 2.0 / num_bins as f32 + 1e-6,
            "CDF moved from {a} to {b}"
        );
    }

    Ok(())
}

#[test]
fn test_equalize_multi_channel_uses_per_channel_extrema() -> Result<(), PixelBufferError> {
    // channel 0 spans [0, 3], channel 1 spans [10, 40]
    let src = PixelBuffer::from_vec(
        2,
        2,
        2,
        vec![0.0, 10.0, 1.0, 20.0, 2.0, 30.0, 3.0, 40.0],
    )?;
    let mut dst = PixelBuffer::default();

    equalize_histogram(&src, &mut dst, 4)?;

    let (min, max) = dst.channel_min_max()?;
    assert!(max[0] <= 3.0 + 1e-6);
    assert!(min[0] >= 0.0);
    assert!(max[1] <= 40.0 + 1e-4);
    assert!(min[1] >= 10.0);

    // the brightest sample of each channel keeps the channel maximum
    assert!((dst.pixel(1, 1)?[0] - 3.0).abs() < 1e-5);
    assert!((dst.pixel(1, 1)?[1] - 40.0).abs() < 1e-4);

    Ok(())
}
