use rasterkit_image::PixelBufferError;

/// A square convolution kernel addressed by signed offsets from its center.
///
/// The kernel has side `2 * halfwidth + 1`; weights are read-only for the
/// lifetime of a convolution call.
///
/// # Examples
///
/// ```
/// use rasterkit_imgproc::filter::kernels::Kernel;
///
/// let kernel = Kernel::box_kernel(1);
///
/// assert_eq!(kernel.size(), 3);
/// assert_eq!(kernel.weight(-1, 1), 1.0 / 9.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    halfwidth: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from explicit weights, row-major over the square
    /// footprint.
    ///
    /// # Errors
    ///
    /// Returns [`PixelBufferError::InvalidDataLength`] when the weight
    /// count does not equal `(2 * halfwidth + 1)^2`.
    pub fn from_weights(halfwidth: usize, weights: Vec<f32>) -> Result<Self, PixelBufferError> {
        let size = 2 * halfwidth + 1;
        if weights.len() != size * size {
            return Err(PixelBufferError::InvalidDataLength(
                weights.len(),
                size * size,
            ));
        }

        Ok(Self { halfwidth, weights })
    }

    /// Create a uniform box kernel whose weights sum to 1.
    pub fn box_kernel(halfwidth: usize) -> Self {
        let size = 2 * halfwidth + 1;
        Self {
            halfwidth,
            weights: vec![1.0 / (size * size) as f32; size * size],
        }
    }

    /// Create a gaussian kernel normalized to sum 1.
    ///
    /// # Arguments
    ///
    /// * `halfwidth` - The maximum offset magnitude in either axis.
    /// * `sigma` - The standard deviation of the gaussian.
    pub fn gaussian(halfwidth: usize, sigma: f32) -> Self {
        let size = 2 * halfwidth + 1;
        let sigma_sq = sigma * sigma;

        let mut weights = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let dy = row as f32 - halfwidth as f32;
                let dx = col as f32 - halfwidth as f32;
                weights.push((-(dx * dx + dy * dy) / (2.0 * sigma_sq)).exp());
            }
        }

        let norm = weights.iter().sum::<f32>();
        weights.iter_mut().for_each(|w| *w /= norm);

        Self { halfwidth, weights }
    }

    /// Get the maximum offset magnitude in either axis.
    pub fn halfwidth(&self) -> usize {
        self.halfwidth
    }

    /// Get the side length of the kernel, `2 * halfwidth + 1`.
    pub fn size(&self) -> usize {
        2 * self.halfwidth + 1
    }

    /// Look up the weight at a signed offset from the kernel center.
    ///
    /// Offsets outside `[-halfwidth, halfwidth]` are a programming error
    /// and panic; all convolution call sites iterate within the footprint
    /// by construction.
    pub fn weight(&self, col_offset: isize, row_offset: isize) -> f32 {
        assert!(
            col_offset.unsigned_abs() <= self.halfwidth
                && row_offset.unsigned_abs() <= self.halfwidth,
            "kernel offset ({col_offset}, {row_offset}) outside halfwidth {}",
            self.halfwidth
        );

        let size = self.size() as isize;
        let halfwidth = self.halfwidth as isize;
        self.weights[((row_offset + halfwidth) * size + (col_offset + halfwidth)) as usize]
    }
}
