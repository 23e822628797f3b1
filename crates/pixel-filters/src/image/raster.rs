//! The [`Image`] type.

use crate::api::FilterError;
use crate::color::Rgba;

use super::boundary::reflect;

/// A width × height grid of [`Rgba`] pixels in row-major order.
///
/// # Example
///
/// ```
/// use pixel_filters::{Image, Rgba};
///
/// let image = Image::filled(3, 2, Rgba::gray(128));
/// assert_eq!(image.width(), 3);
/// assert_eq!(image.height(), 2);
/// assert_eq!(image.pixel(2, 1), Rgba::gray(128));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Image {
    /// Create an image from row-major pixels.
    ///
    /// Fails with [`FilterError::DimensionMismatch`] when `pixels.len()` is
    /// not `width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgba>) -> Result<Self, FilterError> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(FilterError::DimensionMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create an image where every pixel is `pixel`.
    pub fn filled(width: usize, height: usize, pixel: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width * height],
        }
    }

    /// Create an image from packed RGBA8 bytes (4 bytes per pixel).
    pub fn from_rgba_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, FilterError> {
        let expected = width * height * 4;
        if bytes.len() != expected {
            return Err(FilterError::DimensionMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Flatten to packed RGBA8 bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for px in &self.pixels {
            bytes.extend_from_slice(&[px.r, px.g, px.b, px.a]);
        }
        bytes
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `true` when the image has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// The pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the image.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[y * self.width + x]
    }

    /// Sample with mirror boundary handling (see [`reflect`]).
    ///
    /// The image must not be empty.
    #[inline]
    pub fn pixel_reflected(&self, x: i64, y: i64) -> Rgba {
        let rx = reflect(x, self.width);
        let ry = reflect(y, self.height);
        self.pixels[ry * self.width + rx]
    }

    /// A new image with `f` applied to every pixel.
    pub fn map_pixels(&self, f: impl Fn(Rgba) -> Rgba) -> Image {
        Image {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&px| f(px)).collect(),
        }
    }

    /// A new image built from a per-coordinate function.
    pub(crate) fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> Rgba) -> Image {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Image {
            width,
            height,
            pixels,
        }
    }

    /// Wrap a pixel buffer the caller built for exactly `width * height`.
    pub(crate) fn from_parts(width: usize, height: usize, pixels: Vec<Rgba>) -> Image {
        debug_assert_eq!(pixels.len(), width * height);
        Image {
            width,
            height,
            pixels,
        }
    }

    /// Returns `true` when every pixel has R = G = B.
    ///
    /// Stops at the first colored pixel. An empty image counts as grayscale.
    pub fn is_grayscale(&self) -> bool {
        self.pixels.iter().all(Rgba::is_gray)
    }
}
