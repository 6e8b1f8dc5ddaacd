use rasterkit_image::{PixelBuffer, PixelBufferError};
use rayon::prelude::*;

use super::kernels::Kernel;

/// Convolve a buffer with a kernel, treating out-of-image samples as zero.
///
/// `dst` is sized to `src` and overwritten. Each output channel value is
/// the kernel-weighted sum over the footprint of the corresponding input
/// samples; footprint coordinates outside the image contribute nothing, so
/// energy loss at the edges is expected.
///
/// Rows are processed in parallel; every output pixel depends only on the
/// read-only input, so parallel units never write the same location.
///
/// # Example
///
/// ```
/// use rasterkit_image::PixelBuffer;
/// use rasterkit_imgproc::filter::{bounded_convolution, kernels::Kernel};
///
/// let src = PixelBuffer::from_vec(3, 1, 1, vec![3.0, 3.0, 3.0]).unwrap();
/// let mut dst = PixelBuffer::default();
///
/// bounded_convolution(&Kernel::box_kernel(1), &src, &mut dst).unwrap();
///
/// // the center pixel sees a full 3x1 row of 3.0 but an empty row above
/// // and below it: 3 of 9 footprint samples contribute
/// assert!((dst.pixel(1, 0).unwrap()[0] - 1.0).abs() < 1e-6);
/// ```
pub fn bounded_convolution(
    kernel: &Kernel,
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
) -> Result<(), PixelBufferError> {
    let width = src.width() as isize;
    let height = src.height() as isize;

    convolve(kernel, src, dst, move |col, row| {
        if col < 0 || col >= width || row < 0 || row >= height {
            None
        } else {
            Some((col as usize, row as usize))
        }
    })
}

/// Convolve a buffer with a kernel, wrapping out-of-image samples around
/// the opposite edge (toroidal boundary).
///
/// `dst` is sized to `src` and overwritten. For a kernel whose weights sum
/// to 1 this transform preserves the per-channel mean of the input.
pub fn circular_convolution(
    kernel: &Kernel,
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
) -> Result<(), PixelBufferError> {
    let width = src.width() as isize;
    let height = src.height() as isize;

    convolve(kernel, src, dst, move |col, row| {
        Some((col.rem_euclid(width) as usize, row.rem_euclid(height) as usize))
    })
}

/// Shared convolution loop; the boundary policy maps a footprint
/// coordinate to an image coordinate, or to no sample at all.
fn convolve(
    kernel: &Kernel,
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    sample_coord: impl Fn(isize, isize) -> Option<(usize, usize)> + Send + Sync,
) -> Result<(), PixelBufferError> {
    dst.resize(src.width(), src.height(), src.num_channels());

    let width = src.width();
    let num_channels = src.num_channels();
    let stride = width * num_channels;
    if stride == 0 {
        return Ok(());
    }

    let halfwidth = kernel.halfwidth() as isize;
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(row, dst_row)| {
            for col in 0..width {
                let out = &mut dst_row[col * num_channels..(col + 1) * num_channels];

                for row_offset in -halfwidth..=halfwidth {
                    for col_offset in -halfwidth..=halfwidth {
                        let Some((sample_col, sample_row)) =
                            sample_coord(col as isize + col_offset, row as isize + row_offset)
                        else {
                            continue;
                        };

                        let weight = kernel.weight(col_offset, row_offset);
                        let sample_offset = (sample_row * width + sample_col) * num_channels;
                        let sample = &src_data[sample_offset..sample_offset + num_channels];

                        for (acc, &v) in out.iter_mut().zip(sample) {
                            *acc += v * weight;
                        }
                    }
                }
            }
        });

    Ok(())
}
