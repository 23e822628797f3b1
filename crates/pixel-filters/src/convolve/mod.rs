//! Kernel convolution with mirror boundaries.
//!
//! For every output pixel and each of R, G, B:
//!
//! ```text
//! sum = Σ k[ky][kx] · src(x + kx - ax, y + ky - ay)
//! out = clamp(round(sum / divisor + offset), 0, 255)
//! ```
//!
//! Samples outside the image come from [`reflect`](crate::image::reflect).
//! Alpha is copied from the source pixel.

mod kernel;
mod preset;

pub use kernel::{normalize_divisor, Anchor, Kernel, DEGENERATE_SUM};
pub use preset::Preset;

use crate::color::{round_channel, Rgba};
use crate::image::Image;

/// A kernel plus the divisor and offset applied to its weighted sum.
#[derive(Debug, Clone, PartialEq)]
pub struct Convolution {
    pub kernel: Kernel,
    pub divisor: f64,
    pub offset: f64,
}

impl Convolution {
    /// Use `kernel` with its automatic divisor and no offset.
    pub fn new(kernel: Kernel) -> Self {
        let divisor = kernel.auto_divisor();
        Self {
            kernel,
            divisor,
            offset: 0.0,
        }
    }

    /// Set the divisor. Near-zero values become 1.0.
    pub fn divisor(mut self, divisor: f64) -> Self {
        self.divisor = normalize_divisor(divisor);
        self
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }
}

/// Convolve `image` with `conv`.
///
/// ```
/// use pixel_filters::convolve::{convolve, Convolution, Kernel};
/// use pixel_filters::{Image, Rgba};
///
/// let image = Image::filled(4, 4, Rgba::opaque(10, 20, 30));
/// let identity = Convolution::new(Kernel::identity(3).unwrap());
/// assert_eq!(convolve(&image, &identity), image);
/// ```
pub fn convolve(image: &Image, conv: &Convolution) -> Image {
    if image.is_empty() {
        return image.clone();
    }
    let kernel = &conv.kernel;
    let (ax, ay) = kernel.anchor();
    let divisor = normalize_divisor(conv.divisor);

    Image::from_fn(image.width(), image.height(), |x, y| {
        let mut sum = [0.0f64; 3];
        for ky in 0..kernel.rows() {
            let sy = y as i64 + ky as i64 - ay as i64;
            for kx in 0..kernel.cols() {
                let w = kernel.weight(kx, ky);
                if w == 0.0 {
                    continue;
                }
                let sx = x as i64 + kx as i64 - ax as i64;
                let px = image.pixel_reflected(sx, sy);
                sum[0] += w * px.r as f64;
                sum[1] += w * px.g as f64;
                sum[2] += w * px.b as f64;
            }
        }
        let [r, g, b] = sum.map(|s| round_channel(s / divisor + conv.offset));
        Rgba::new(r, g, b, image.pixel(x, y).a)
    })
}

/// Convolve with a built-in preset.
pub fn apply_preset(image: &Image, preset: Preset) -> Image {
    convolve(image, &preset.convolution())
}
