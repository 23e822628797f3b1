//! Error diffusion dithering onto a uniform level grid.
//!
//! Each call first classifies the image. A grayscale image (R = G = B
//! everywhere) is dithered as one channel using `levels.r()` and written back
//! to all three channels, so it stays gray. Anything else is dithered per
//! channel with three independent error buffers and level counts.
//!
//! Pixels are visited row-major, top-to-bottom and left-to-right. For every
//! pixel and channel:
//!
//! 1. `new = clamp(v + round(err), 0, 255)`
//! 2. `q = quantize_value(new, levels)`
//! 3. `err' = new - q`, spread over the kernel taps that land inside the image.
//!
//! Alpha is copied from the source pixel.

mod kernel;
mod options;

pub use kernel::*;
pub use options::DitherOptions;

use crate::color::Rgba;
use crate::image::Image;

/// Rolling window of per-channel error rows.
///
/// Holds only the rows a kernel can reach: row 0 is the row being scanned,
/// row `k` is `k` rows below it. Writes outside the window or the image width
/// are dropped.
#[derive(Debug)]
pub struct ErrorBuffer<const N: usize> {
    rows: Vec<Vec<[f64; N]>>,
    width: usize,
}

impl<const N: usize> ErrorBuffer<N> {
    /// `row_depth` is the kernel's `max_dy + 1`.
    pub fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth).map(|_| vec![[0.0; N]; width]).collect(),
            width,
        }
    }

    #[inline]
    pub fn get_accumulated(&self, x: usize) -> [f64; N] {
        self.rows[0][x]
    }

    #[inline]
    pub fn add_error(&mut self, x: usize, row_offset: usize, error: [f64; N]) {
        if x < self.width && row_offset < self.rows.len() {
            let cell = &mut self.rows[row_offset][x];
            for c in 0..N {
                cell[c] += error[c];
            }
        }
    }

    /// Drop the current row and open an empty one at the bottom.
    pub fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0.0; N]);
        }
    }
}

/// Nearest value on a grid of `levels` points spanning `0..=255`.
///
/// `levels <= 1` is degenerate and always yields 0.
///
/// ```
/// use pixel_filters::dither::quantize_value;
///
/// assert_eq!(quantize_value(100, 2), 0);
/// assert_eq!(quantize_value(128, 2), 255);
/// assert_eq!(quantize_value(100, 3), 127);
/// ```
#[inline]
pub fn quantize_value(value: u8, levels: u32) -> u8 {
    if levels <= 1 {
        return 0;
    }
    let step = 255.0 / (levels - 1) as f64;
    let snapped = ((value as f64 / step).round() * step) as i32;
    snapped.clamp(0, 255) as u8
}

/// Dither `image` onto the level grid in `options`.
pub fn dither(image: &Image, options: &DitherOptions) -> Image {
    let kernel = options.kernel.kernel();
    let levels = options.levels;
    if image.is_grayscale() {
        diffuse::<1>(
            image,
            kernel,
            [levels.r()],
            |px| [px.r],
            |[v], px| Rgba::new(v, v, v, px.a),
        )
    } else {
        diffuse::<3>(
            image,
            kernel,
            levels.as_array(),
            |px| px.channels(),
            |channels, px| Rgba::from_channels(channels, px.a),
        )
    }
}

fn diffuse<const N: usize>(
    image: &Image,
    kernel: &DiffusionKernel,
    levels: [u32; N],
    read: impl Fn(Rgba) -> [u8; N],
    write: impl Fn([u8; N], Rgba) -> Rgba,
) -> Image {
    let (width, height) = (image.width(), image.height());
    let mut pixels = Vec::with_capacity(width * height);
    let mut errors = ErrorBuffer::<N>::new(width, kernel.max_dy + 1);

    for y in 0..height {
        for x in 0..width {
            let source = image.pixel(x, y);
            let original = read(source);
            let accumulated = errors.get_accumulated(x);

            let mut out = [0u8; N];
            let mut residual = [0.0f64; N];
            for c in 0..N {
                let adjusted = (original[c] as f64 + accumulated[c].round()).clamp(0.0, 255.0) as u8;
                out[c] = quantize_value(adjusted, levels[c]);
                residual[c] = adjusted as f64 - out[c] as f64;
            }
            pixels.push(write(out, source));
            spread_error(&mut errors, kernel, (x, y), (width, height), residual);
        }
        errors.advance_row();
    }

    Image::from_parts(width, height, pixels)
}

/// Distribute `residual` from `(x, y)` over the kernel taps inside the image.
fn spread_error<const N: usize>(
    errors: &mut ErrorBuffer<N>,
    kernel: &DiffusionKernel,
    (x, y): (usize, usize),
    (width, height): (usize, usize),
    residual: [f64; N],
) {
    for (dx, dy, weight) in kernel.weights() {
        let tx = x as i64 + dx as i64;
        let ty = y + dy as usize;
        if tx < 0 || tx >= width as i64 || ty >= height {
            continue;
        }
        errors.add_error(tx as usize, dy as usize, residual.map(|e| e * weight));
    }
}
