use argh::FromArgs;

use rasterkit::image::PixelBuffer;
use rasterkit::imgproc::filter::kernels::Kernel;
use rasterkit::imgproc::{enhance, filter, histogram, normalize};

#[derive(FromArgs)]
/// Run every transform over a synthetic gradient buffer and report
/// per-channel statistics after each step.
struct Args {
    /// width of the synthetic buffer
    #[argh(option, default = "256")]
    width: usize,

    /// height of the synthetic buffer
    #[argh(option, default = "256")]
    height: usize,

    /// gamma exponent applied in place
    #[argh(option, default = "0.9")]
    gamma: f32,

    /// halfwidth of the box kernel used for both convolutions
    #[argh(option, default = "2")]
    halfwidth: usize,

    /// number of histogram bins for equalization
    #[argh(option, default = "histogram::DEFAULT_NUM_BINS")]
    num_bins: usize,
}

fn log_stats(label: &str, buf: &PixelBuffer) {
    log::info!(
        "{label}: means={:?} rms={:?}",
        buf.channel_means(),
        buf.channel_rms()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    // synthetic three-channel gradient
    let mut current = PixelBuffer::new(args.width, args.height, 3);
    for row in 0..args.height {
        for col in 0..args.width {
            let u = col as f32 / args.width as f32;
            let v = row as f32 / args.height as f32;
            current.set_pixel(col, row, &[u, v, 0.5 * (u + v)])?;
        }
    }
    log_stats("input", &current);

    enhance::apply_gamma(args.gamma, &mut current);
    log_stats("gamma", &current);

    let kernel = Kernel::box_kernel(args.halfwidth);

    let mut filtered = PixelBuffer::default();
    filter::bounded_convolution(&kernel, &current, &mut filtered)?;
    log_stats("bounded convolution", &filtered);

    filter::circular_convolution(&kernel, &current, &mut filtered)?;
    log_stats("circular convolution", &filtered);
    current = filtered;

    let mut normalized = PixelBuffer::default();
    normalize::contrast_transform(&current, &mut normalized)?;
    log_stats("contrast transform", &normalized);

    let mut equalized = PixelBuffer::default();
    histogram::equalize_histogram(&current, &mut equalized, args.num_bins)?;
    log_stats("histogram equalization", &equalized);

    Ok(())
}
