//! Per-channel scalar transfer functions.

use crate::color::{clamp_channel, Rgba};
use crate::image::Image;

/// Apply `f` independently to R, G and B, clamping each result to `0..=255`.
///
/// Alpha is copied through. `f` may return any `i32`; the clamp absorbs
/// out-of-range values.
///
/// ```
/// use pixel_filters::adjust::map_channels;
/// use pixel_filters::Rgba;
///
/// let px = map_channels(Rgba::new(250, 10, 100, 7), |v| v + 10);
/// assert_eq!(px, Rgba::new(255, 20, 110, 7));
/// ```
#[inline]
pub fn map_channels(pixel: Rgba, f: impl Fn(i32) -> i32) -> Rgba {
    Rgba::new(
        clamp_channel(f(pixel.r as i32)),
        clamp_channel(f(pixel.g as i32)),
        clamp_channel(f(pixel.b as i32)),
        pixel.a,
    )
}

impl Image {
    /// A copy of the image with [`map_channels`] applied to every pixel.
    pub fn map_channels(&self, f: impl Fn(i32) -> i32) -> Image {
        self.map_pixels(|px| map_channels(px, &f))
    }
}
