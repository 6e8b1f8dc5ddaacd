use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::error::PixelBufferError;

/// Per-channel histogram of a buffer, with the extrema observed while
/// binning.
///
/// Produced by [`PixelBuffer::histogram`]. The bin index of a sample `v` of
/// channel `ch` is `floor((v - min[ch]) / (max[ch] - min[ch]) * (bins - 1))`;
/// a channel whose maximum equals its minimum has every sample in bin 0.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelHistogram {
    /// Sample counts, one vector of `num_bins` counts per channel.
    pub counts: Vec<Vec<usize>>,
    /// Minimum sample value per channel.
    pub min: Vec<f32>,
    /// Maximum sample value per channel.
    pub max: Vec<f32>,
}

impl ChannelHistogram {
    /// Get the number of bins per channel.
    pub fn num_bins(&self) -> usize {
        self.counts.first().map_or(0, Vec::len)
    }

    /// Normalize the counts so each channel sums to 1.
    pub fn normalized(&self) -> Vec<Vec<f32>> {
        self.counts
            .iter()
            .map(|counts| {
                let total = counts.iter().sum::<usize>() as f32;
                counts.iter().map(|&c| c as f32 / total).collect()
            })
            .collect()
    }

    /// Compute the per-channel cumulative distribution function.
    ///
    /// Each CDF is a running sum of the normalized histogram: monotonically
    /// non-decreasing, with the last entry at 1.0 within float tolerance.
    pub fn cumulative_distribution(&self) -> Vec<Vec<f32>> {
        self.normalized()
            .iter()
            .map(|norm| {
                let mut acc = 0.0;
                norm.iter()
                    .map(|&p| {
                        acc += p;
                        acc
                    })
                    .collect()
            })
            .collect()
    }
}

impl PixelBuffer {
    /// Compute the average sample value of each channel.
    ///
    /// One data-parallel reduction pass over row chunks, accumulated in
    /// f64. An empty buffer yields zero for every channel.
    ///
    /// # Examples
    ///
    /// ```
    /// use rasterkit_image::PixelBuffer;
    ///
    /// let buf = PixelBuffer::from_vec(2, 1, 2, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
    ///
    /// assert_eq!(buf.channel_means(), vec![1.0, 2.0]);
    /// ```
    pub fn channel_means(&self) -> Vec<f32> {
        let num_channels = self.num_channels();
        if self.is_empty() {
            return vec![0.0; num_channels];
        }

        let stride = self.width() * num_channels;
        let sums = self
            .as_slice()
            .par_chunks(stride)
            .fold(
                || vec![0f64; num_channels],
                |mut local, row| {
                    for pixel in row.chunks_exact(num_channels) {
                        for (s, &v) in local.iter_mut().zip(pixel) {
                            *s += v as f64;
                        }
                    }
                    local
                },
            )
            .reduce(
                || vec![0f64; num_channels],
                |mut a, b| {
                    for (x, y) in a.iter_mut().zip(b.iter()) {
                        *x += y;
                    }
                    a
                },
            );

        let num_pixels = (self.width() * self.height()) as f64;
        sums.iter().map(|&s| (s / num_pixels) as f32).collect()
    }

    /// Compute the root-mean-square deviation from the channel mean, per
    /// channel.
    ///
    /// Requires two full passes: one for the means, one for the summed
    /// squared deviations.
    pub fn channel_rms(&self) -> Vec<f32> {
        let num_channels = self.num_channels();
        if self.is_empty() {
            return vec![0.0; num_channels];
        }

        let means = self.channel_means();

        let stride = self.width() * num_channels;
        let sq_sums = self
            .as_slice()
            .par_chunks(stride)
            .fold(
                || vec![0f64; num_channels],
                |mut local, row| {
                    for pixel in row.chunks_exact(num_channels) {
                        for ((s, &v), &mean) in local.iter_mut().zip(pixel).zip(means.iter()) {
                            let dev = v as f64 - mean as f64;
                            *s += dev * dev;
                        }
                    }
                    local
                },
            )
            .reduce(
                || vec![0f64; num_channels],
                |mut a, b| {
                    for (x, y) in a.iter_mut().zip(b.iter()) {
                        *x += y;
                    }
                    a
                },
            );

        let num_pixels = (self.width() * self.height()) as f64;
        sq_sums
            .iter()
            .map(|&s| (s / num_pixels).sqrt() as f32)
            .collect()
    }

    /// Find the minimum and maximum sample value of each channel.
    ///
    /// # Errors
    ///
    /// Returns [`PixelBufferError::BufferNotInitialized`] when the buffer
    /// is empty.
    pub fn channel_min_max(&self) -> Result<(Vec<f32>, Vec<f32>), PixelBufferError> {
        if self.is_empty() {
            return Err(PixelBufferError::BufferNotInitialized);
        }

        let num_channels = self.num_channels();
        let stride = self.width() * num_channels;

        let (min, max) = self
            .as_slice()
            .par_chunks(stride)
            .fold(
                || {
                    (
                        vec![f32::INFINITY; num_channels],
                        vec![f32::NEG_INFINITY; num_channels],
                    )
                },
                |(mut min, mut max), row| {
                    for pixel in row.chunks_exact(num_channels) {
                        for ((lo, hi), &v) in min.iter_mut().zip(max.iter_mut()).zip(pixel) {
                            if v < *lo {
                                *lo = v;
                            }
                            if v > *hi {
                                *hi = v;
                            }
                        }
                    }
                    (min, max)
                },
            )
            .reduce(
                || {
                    (
                        vec![f32::INFINITY; num_channels],
                        vec![f32::NEG_INFINITY; num_channels],
                    )
                },
                |(mut min_a, mut max_a), (min_b, max_b)| {
                    for (a, b) in min_a.iter_mut().zip(min_b.iter()) {
                        if *b < *a {
                            *a = *b;
                        }
                    }
                    for (a, b) in max_a.iter_mut().zip(max_b.iter()) {
                        if *b > *a {
                            *a = *b;
                        }
                    }
                    (min_a, max_a)
                },
            );

        Ok((min, max))
    }

    /// Compute a per-channel histogram with `num_bins` bins.
    ///
    /// The extrema of each channel are found first; each sample then lands
    /// in bin `floor((v - min) / (max - min) * (num_bins - 1))`. A channel
    /// with `max == min` has no dynamic range and every sample is assigned
    /// to bin 0.
    ///
    /// # Errors
    ///
    /// Returns [`PixelBufferError::InvalidHistogramBins`] when `num_bins`
    /// is zero, or [`PixelBufferError::BufferNotInitialized`] when the
    /// buffer is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rasterkit_image::PixelBuffer;
    ///
    /// let buf = PixelBuffer::from_vec(4, 1, 1, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
    /// let hist = buf.histogram(4).unwrap();
    ///
    /// assert_eq!(hist.counts, vec![vec![1, 1, 1, 1]]);
    /// assert_eq!(hist.min, vec![0.0]);
    /// assert_eq!(hist.max, vec![3.0]);
    /// ```
    pub fn histogram(&self, num_bins: usize) -> Result<ChannelHistogram, PixelBufferError> {
        if num_bins == 0 {
            return Err(PixelBufferError::InvalidHistogramBins(num_bins));
        }

        let (min, max) = self.channel_min_max()?;

        let num_channels = self.num_channels();
        let stride = self.width() * num_channels;

        let counts = self
            .as_slice()
            .par_chunks(stride)
            .fold(
                || vec![vec![0usize; num_bins]; num_channels],
                |mut local, row| {
                    for pixel in row.chunks_exact(num_channels) {
                        for (ch, &v) in pixel.iter().enumerate() {
                            local[ch][bin_index(v, min[ch], max[ch], num_bins)] += 1;
                        }
                    }
                    local
                },
            )
            .reduce(
                || vec![vec![0usize; num_bins]; num_channels],
                |mut a, b| {
                    for (dst, src) in a.iter_mut().zip(b.iter()) {
                        for (d, s) in dst.iter_mut().zip(src.iter()) {
                            *d += s;
                        }
                    }
                    a
                },
            );

        Ok(ChannelHistogram { counts, min, max })
    }
}

/// Bin index of a sample given the channel extrema.
///
/// A degenerate channel (`max == min`) maps every sample to bin 0 instead
/// of dividing by the zero range.
pub fn bin_index(v: f32, min: f32, max: f32, num_bins: usize) -> usize {
    if max <= min {
        return 0;
    }
    let bin = ((v - min) / (max - min) * (num_bins - 1) as f32) as usize;
    bin.min(num_bins - 1)
}
