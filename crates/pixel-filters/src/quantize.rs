//! Uniform per-channel quantization.

use std::fmt;

use crate::color::Rgba;
use crate::image::Image;

/// Fewest levels a channel may be reduced to.
pub const MIN_LEVELS: u32 = 2;

/// Per-channel level counts.
///
/// Every count is floored at [`MIN_LEVELS`] on construction, so a `Levels`
/// value is always usable by [`quantize`] and the dithering engine.
///
/// ```
/// use pixel_filters::quantize::Levels;
///
/// let levels = Levels::new(0, 4, 8);
/// assert_eq!((levels.r(), levels.g(), levels.b()), (2, 4, 8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Levels {
    r: u32,
    g: u32,
    b: u32,
}

impl Levels {
    pub fn new(r: u32, g: u32, b: u32) -> Self {
        Self {
            r: r.max(MIN_LEVELS),
            g: g.max(MIN_LEVELS),
            b: b.max(MIN_LEVELS),
        }
    }

    /// The same count for all three channels.
    pub fn uniform(levels: u32) -> Self {
        Self::new(levels, levels, levels)
    }

    #[inline]
    pub fn r(&self) -> u32 {
        self.r
    }

    #[inline]
    pub fn g(&self) -> u32 {
        self.g
    }

    #[inline]
    pub fn b(&self) -> u32 {
        self.b
    }

    /// Counts in R, G, B order.
    #[inline]
    pub fn as_array(&self) -> [u32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Levels {
    fn default() -> Self {
        Self::uniform(MIN_LEVELS)
    }
}

impl fmt::Display for Levels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// Snap one channel value into the centre of its bucket.
///
/// The range `0..=255` is split into `levels` buckets of width `256 / levels`.
/// A value maps to the midpoint of its bucket, rounded down.
#[inline]
pub fn quantize_channel(value: u8, levels: u32) -> u8 {
    let levels = levels.max(MIN_LEVELS);
    let step = 256.0 / levels as f64;
    let level = ((value as f64 / step).floor() as u32).min(levels - 1);
    let out = ((level as f64 + 0.5) * step).floor();
    out.clamp(0.0, 255.0) as u8
}

/// Reduce each channel to its level count. Alpha is preserved.
pub fn quantize(image: &Image, levels: Levels) -> Image {
    let tables = levels.as_array().map(|n| {
        let mut table = [0u8; 256];
        for (v, slot) in table.iter_mut().enumerate() {
            *slot = quantize_channel(v as u8, n);
        }
        table
    });
    image.map_pixels(|px| {
        Rgba::new(
            tables[0][px.r as usize],
            tables[1][px.g as usize],
            tables[2][px.b as usize],
            px.a,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_levels_floor_at_two() {
        assert_eq!(Levels::uniform(1), Levels::uniform(2));
        assert_eq!(Levels::new(0, 1, 9).as_array(), [2, 2, 9]);
    }

    #[test]
    fn test_levels_display() {
        assert_eq!(Levels::new(2, 4, 8).to_string(), "2,4,8");
    }

    #[test]
    fn test_two_levels_bucket_midpoints() {
        assert_eq!(quantize_channel(0, 2), 64);
        assert_eq!(quantize_channel(127, 2), 64);
        assert_eq!(quantize_channel(128, 2), 192);
        assert_eq!(quantize_channel(255, 2), 192);
    }

    #[test]
    fn test_three_levels() {
        // step = 85.33..
        assert_eq!(quantize_channel(0, 3), 42);
        assert_eq!(quantize_channel(85, 3), 42);
        assert_eq!(quantize_channel(86, 3), 128);
        assert_eq!(quantize_channel(255, 3), 213);
    }

    #[test]
    fn test_256_levels_is_identity() {
        for v in 0..=255u8 {
            assert_eq!(quantize_channel(v, 256), v);
        }
    }

    #[test]
    fn test_distinct_values_bounded() {
        let pixels: Vec<Rgba> = (0..=255u8).map(|v| Rgba::new(v, 255 - v, v / 2, v)).collect();
        let image = Image::new(16, 16, pixels).unwrap();
        let levels = Levels::new(3, 5, 7);
        let out = quantize(&image, levels);

        let reds: BTreeSet<u8> = out.pixels().iter().map(|p| p.r).collect();
        let greens: BTreeSet<u8> = out.pixels().iter().map(|p| p.g).collect();
        let blues: BTreeSet<u8> = out.pixels().iter().map(|p| p.b).collect();
        assert!(reds.len() <= 3);
        assert!(greens.len() <= 5);
        assert!(blues.len() <= 7);
    }

    #[test]
    fn test_alpha_preserved() {
        let image = Image::filled(2, 2, Rgba::new(10, 200, 90, 17));
        let out = quantize(&image, Levels::uniform(2));
        assert!(out.pixels().iter().all(|p| p.a == 17));
    }
}
