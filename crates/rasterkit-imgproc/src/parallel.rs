use rayon::prelude::*;

use rasterkit_image::PixelBuffer;

/// Apply a function to every sample of a buffer in place.
///
/// The buffer is partitioned by row; each parallel unit mutates a disjoint
/// row band, so no synchronization is needed.
pub fn par_apply(buf: &mut PixelBuffer, f: impl Fn(&mut f32) + Send + Sync) {
    let stride = buf.width() * buf.num_channels();
    if stride == 0 {
        return;
    }

    buf.as_slice_mut()
        .par_chunks_exact_mut(stride)
        .for_each(|row| row.iter_mut().for_each(&f));
}

/// Apply a function to each pixel of `src`, writing the matching pixel of
/// `dst`.
///
/// `src` and `dst` must have the same dimensions; callers size `dst`
/// before iterating. Rows are processed in parallel and every parallel
/// unit writes a disjoint row band of `dst` while `src` stays read-only.
pub fn par_iter_rows(
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    f: impl Fn(&[f32], &mut [f32]) + Send + Sync,
) {
    debug_assert_eq!(src.width(), dst.width());
    debug_assert_eq!(src.height(), dst.height());
    debug_assert_eq!(src.num_channels(), dst.num_channels());

    let num_channels = src.num_channels();
    let stride = src.width() * num_channels;
    if stride == 0 {
        return;
    }

    src.as_slice()
        .par_chunks_exact(stride)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(stride))
        .for_each(|(src_row, dst_row)| {
            src_row
                .chunks_exact(num_channels)
                .zip(dst_row.chunks_exact_mut(num_channels))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterkit_image::PixelBufferError;

    #[test]
    fn par_apply_in_place() -> Result<(), PixelBufferError> {
        let mut buf = PixelBuffer::from_vec(2, 2, 1, vec![1.0, 2.0, 3.0, 4.0])?;
        par_apply(&mut buf, |v| *v *= 2.0);
        assert_eq!(buf.as_slice(), &[2.0, 4.0, 6.0, 8.0]);
        Ok(())
    }

    #[test]
    fn par_apply_empty_buffer_is_noop() {
        let mut buf = PixelBuffer::new(0, 0, 0);
        par_apply(&mut buf, |v| *v += 1.0);
        assert!(buf.is_empty());
    }

    #[test]
    fn par_iter_rows_pixelwise() -> Result<(), PixelBufferError> {
        let src = PixelBuffer::from_vec(2, 2, 2, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0])?;
        let mut dst = PixelBuffer::new(2, 2, 2);

        par_iter_rows(&src, &mut dst, |src_pixel, dst_pixel| {
            dst_pixel[0] = src_pixel[1];
            dst_pixel[1] = src_pixel[0];
        });

        assert_eq!(dst.as_slice(), &[1.0, 0.0, 3.0, 2.0, 5.0, 4.0, 7.0, 6.0]);
        Ok(())
    }
}
