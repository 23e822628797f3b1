//! 8-bit RGBA pixel type
//!
//! Every engine in this crate reads and writes [`Rgba`] pixels. Channel
//! arithmetic is done in `i32` or `f64` and clamped back into `0..=255`
//! immediately after each computation.

/// A pixel with four 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
    /// Alpha channel (0..=255). Filters copy it through unchanged.
    pub a: u8,
}

impl Rgba {
    /// Create a pixel from all four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque pixel.
    ///
    /// # Example
    /// ```
    /// use pixel_filters::Rgba;
    /// let red = Rgba::opaque(255, 0, 0);
    /// assert_eq!(red.a, 255);
    /// ```
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create an opaque gray pixel with R = G = B = `v`.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::opaque(v, v, v)
    }

    /// Returns `true` when R, G and B are equal.
    #[inline]
    pub fn is_gray(&self) -> bool {
        self.r == self.g && self.r == self.b
    }

    /// The color channels as an array, in R, G, B order.
    #[inline]
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Build a pixel from R, G, B channels and an explicit alpha.
    #[inline]
    pub fn from_channels(channels: [u8; 3], a: u8) -> Self {
        Self::new(channels[0], channels[1], channels[2], a)
    }
}

/// Clamp an integer channel value into `0..=255`.
#[inline]
pub fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// Round a real channel value half away from zero and clamp it into `0..=255`.
#[inline]
pub fn round_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_channel_bounds() {
        assert_eq!(clamp_channel(-40), 0);
        assert_eq!(clamp_channel(0), 0);
        assert_eq!(clamp_channel(128), 128);
        assert_eq!(clamp_channel(300), 255);
    }

    #[test]
    fn test_round_channel_half_away_from_zero() {
        assert_eq!(round_channel(127.5), 128);
        assert_eq!(round_channel(127.49), 127);
        assert_eq!(round_channel(-3.0), 0);
        assert_eq!(round_channel(1e9), 255);
        assert_eq!(round_channel(f64::NAN), 0);
    }

    #[test]
    fn test_is_gray() {
        assert!(Rgba::gray(42).is_gray());
        assert!(!Rgba::opaque(1, 1, 2).is_gray());
    }

    #[test]
    fn test_channels_roundtrip() {
        let px = Rgba::new(10, 20, 30, 40);
        assert_eq!(Rgba::from_channels(px.channels(), px.a), px);
    }
}
