//! Median filter over a square window.
//!
//! Each row keeps one 256-bin histogram per channel and slides it across the
//! row, removing the column that leaves the window and adding the one that
//! enters. The window always holds an odd number of samples, so the median is
//! a single histogram bin.

use crate::api::FilterError;
use crate::color::Rgba;
use crate::image::Image;

/// Smallest accepted window size.
pub const MIN_WINDOW: usize = 3;

#[derive(Clone)]
struct Histogram {
    bins: [u32; 256],
}

impl Histogram {
    fn new() -> Self {
        Self { bins: [0; 256] }
    }

    #[inline]
    fn add(&mut self, value: u8) {
        self.bins[value as usize] += 1;
    }

    #[inline]
    fn remove(&mut self, value: u8) {
        self.bins[value as usize] -= 1;
    }

    /// The value with `rank` samples below it.
    fn nth(&self, rank: u32) -> u8 {
        let mut seen = 0;
        for (value, &count) in self.bins.iter().enumerate() {
            seen += count;
            if seen > rank {
                return value as u8;
            }
        }
        255
    }
}

/// Replace each channel by the median of its `size` × `size` neighbourhood.
///
/// `size` must be odd and at least 3. Samples past the edges are mirrored
/// the same way convolution mirrors them. Alpha is preserved.
///
/// ```
/// use pixel_filters::median::median;
/// use pixel_filters::{Image, Rgba};
///
/// let mut pixels = vec![Rgba::gray(10); 9];
/// pixels[4] = Rgba::gray(250); // salt
/// let image = Image::new(3, 3, pixels).unwrap();
/// assert_eq!(median(&image, 3).unwrap().pixel(1, 1), Rgba::gray(10));
/// ```
pub fn median(image: &Image, size: usize) -> Result<Image, FilterError> {
    if size < MIN_WINDOW || size % 2 == 0 {
        return Err(FilterError::invalid(
            "size",
            format!("window must be odd and >= {}, got {}", MIN_WINDOW, size),
        ));
    }
    if image.is_empty() {
        return Ok(image.clone());
    }

    let (width, height) = (image.width(), image.height());
    let radius = (size / 2) as i64;
    let rank = (size * size / 2) as u32;
    let mut pixels = Vec::with_capacity(width * height);

    for y in 0..height {
        let mut hist = [Histogram::new(), Histogram::new(), Histogram::new()];
        let column = |sx: i64, f: &mut dyn FnMut(Rgba)| {
            for dy in -radius..=radius {
                f(image.pixel_reflected(sx, y as i64 + dy));
            }
        };

        for dx in -radius..=radius {
            column(dx, &mut |px| {
                for (h, v) in hist.iter_mut().zip(px.channels()) {
                    h.add(v);
                }
            });
        }

        for x in 0..width {
            if x > 0 {
                let leaving = x as i64 - 1 - radius;
                let entering = x as i64 + radius;
                column(leaving, &mut |px| {
                    for (h, v) in hist.iter_mut().zip(px.channels()) {
                        h.remove(v);
                    }
                });
                column(entering, &mut |px| {
                    for (h, v) in hist.iter_mut().zip(px.channels()) {
                        h.add(v);
                    }
                });
            }
            let channels = [hist[0].nth(rank), hist[1].nth(rank), hist[2].nth(rank)];
            pixels.push(Rgba::from_channels(channels, image.pixel(x, y).a));
        }
    }

    Ok(Image::from_parts(width, height, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Straightforward sort-based median for comparison.
    fn naive(image: &Image, size: usize) -> Image {
        let r = (size / 2) as i64;
        Image::from_fn(image.width(), image.height(), |x, y| {
            let mut windows: [Vec<u8>; 3] = Default::default();
            for dy in -r..=r {
                for dx in -r..=r {
                    let px = image.pixel_reflected(x as i64 + dx, y as i64 + dy);
                    for (w, v) in windows.iter_mut().zip(px.channels()) {
                        w.push(v);
                    }
                }
            }
            let channels = windows.map(|mut w| {
                w.sort_unstable();
                w[w.len() / 2]
            });
            Rgba::from_channels(channels, image.pixel(x, y).a)
        })
    }

    fn noisy(width: usize, height: usize) -> Image {
        let pixels = (0..width * height)
            .map(|i| {
                let v = (i as u32).wrapping_mul(2_654_435_761);
                Rgba::new(v as u8, (v >> 8) as u8, (v >> 16) as u8, (i % 256) as u8)
            })
            .collect();
        Image::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_rejects_bad_sizes() {
        let image = Image::filled(3, 3, Rgba::gray(0));
        for size in [0, 1, 2, 4, 10] {
            assert!(median(&image, size).is_err(), "size {}", size);
        }
        assert!(median(&image, 5).is_ok());
    }

    #[test]
    fn test_matches_sort_based_median() {
        let image = noisy(9, 7);
        for size in [3, 5, 7] {
            assert_eq!(median(&image, size).unwrap(), naive(&image, size), "size {}", size);
        }
    }

    #[test]
    fn test_flat_image_unchanged() {
        let image = Image::filled(4, 4, Rgba::new(1, 2, 3, 4));
        assert_eq!(median(&image, 3).unwrap(), image);
    }

    #[test]
    fn test_window_larger_than_image() {
        let image = noisy(2, 2);
        assert_eq!(median(&image, 7).unwrap(), naive(&image, 7));
        let single = Image::filled(1, 1, Rgba::new(9, 8, 7, 6));
        assert_eq!(median(&single, 3).unwrap(), single);
    }

    #[test]
    fn test_histogram_nth() {
        let mut h = Histogram::new();
        for v in [5, 1, 9, 1, 3] {
            h.add(v);
        }
        assert_eq!(h.nth(0), 1);
        assert_eq!(h.nth(1), 1);
        assert_eq!(h.nth(2), 3);
        assert_eq!(h.nth(4), 9);
        h.remove(1);
        assert_eq!(h.nth(1), 3);
    }
}
