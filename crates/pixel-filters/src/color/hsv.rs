//! RGB ↔ HSV conversion
//!
//! HSV images reuse the RGBA container: hue, saturation and value are packed
//! into the R, G and B channels respectively, each scaled to `0..=255`.
//!
//! | Channel | Stores | Unpacked range |
//! |---------|--------|----------------|
//! | R | hue × 255/360 | `[0, 360)` degrees |
//! | G | saturation × 255 | `[0, 1]` |
//! | B | value × 255 | `[0, 1]` |
//!
//! The packing is lossy. Hue has 256 steps of ~1.41°, so a round trip is exact
//! for achromatic pixels but may move a fully saturated channel by up to 3.

use crate::api::FilterError;
use crate::color::{round_channel, Rgba};
use crate::image::Image;

/// Convert one pixel to `(hue°, saturation, value)`.
///
/// Hue lies in `[0, 360)`; saturation and value in `[0, 1]`. Achromatic
/// pixels (max == min) report hue 0 and saturation 0.
pub fn rgb_to_hsv(pixel: Rgba) -> (f64, f64, f64) {
    let r = pixel.r as f64 / 255.0;
    let g = pixel.g as f64 / 255.0;
    let b = pixel.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if delta == 0.0 { 0.0 } else { delta / max };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let h = if h >= 360.0 { h - 360.0 } else { h };
    (h, s, v)
}

/// Convert `(hue°, saturation, value)` back to 8-bit RGB channels.
///
/// The sector is chosen by which 60° band the hue falls in; hue 360 wraps
/// to sector 0.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [u8; 3] {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = v - c;

    let sector = ((h / 60.0).floor() as i64).rem_euclid(6);
    let (r, g, b) = match sector {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [
        round_channel((r + m) * 255.0),
        round_channel((g + m) * 255.0),
        round_channel((b + m) * 255.0),
    ]
}

/// Pack one RGB pixel into the HSV container layout.
#[inline]
pub fn pack_hsv(pixel: Rgba) -> Rgba {
    let (h, s, v) = rgb_to_hsv(pixel);
    Rgba::new(
        round_channel(h * 255.0 / 360.0),
        round_channel(s * 255.0),
        round_channel(v * 255.0),
        pixel.a,
    )
}

/// Unpack one HSV-container pixel back to RGB.
#[inline]
pub fn unpack_hsv(pixel: Rgba) -> Rgba {
    let h = pixel.r as f64 * 360.0 / 255.0;
    let s = pixel.g as f64 / 255.0;
    let v = pixel.b as f64 / 255.0;
    Rgba::from_channels(hsv_to_rgb(h, s, v), pixel.a)
}

/// Convert an RGB image into an HSV-packed image of the same dimensions.
pub fn to_hsv(image: &Image) -> Image {
    image.map_pixels(pack_hsv)
}

/// Convert an HSV-packed image back to RGB.
pub fn to_rgb(hsv_image: &Image) -> Image {
    hsv_image.map_pixels(unpack_hsv)
}

/// One of the three channels of an HSV-packed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HsvChannel {
    /// Hue, stored in R
    Hue,
    /// Saturation, stored in G
    Saturation,
    /// Value, stored in B
    Value,
}

impl HsvChannel {
    /// All channels, in storage order.
    pub const ALL: [HsvChannel; 3] = [HsvChannel::Hue, HsvChannel::Saturation, HsvChannel::Value];

    /// Human-readable channel name.
    pub fn name(&self) -> &'static str {
        match self {
            HsvChannel::Hue => "Hue",
            HsvChannel::Saturation => "Saturation",
            HsvChannel::Value => "Value",
        }
    }

    #[inline]
    fn read(&self, pixel: Rgba) -> u8 {
        match self {
            HsvChannel::Hue => pixel.r,
            HsvChannel::Saturation => pixel.g,
            HsvChannel::Value => pixel.b,
        }
    }
}

impl std::str::FromStr for HsvChannel {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "hue" => Ok(HsvChannel::Hue),
            "s" | "sat" | "saturation" => Ok(HsvChannel::Saturation),
            "v" | "value" => Ok(HsvChannel::Value),
            _ => Err(FilterError::invalid(
                "channel",
                format!("expected hue, saturation or value, got '{}'", s),
            )),
        }
    }
}

/// Visualize a single channel of an HSV-packed image as grayscale.
///
/// The stored channel value is replicated into R, G and B; alpha is kept.
pub fn extract_channel(hsv_image: &Image, channel: HsvChannel) -> Image {
    hsv_image.map_pixels(|px| {
        let v = channel.read(px);
        Rgba::new(v, v, v, px.a)
    })
}

/// Result of an RGB → HSV → RGB round trip over a whole image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundTripReport {
    /// Largest absolute per-channel difference observed.
    pub max_difference: u8,
    /// Number of pixels whose largest channel difference exceeds the threshold.
    pub pixels_over_threshold: usize,
    /// Total number of pixels checked.
    pub pixel_count: usize,
    /// Threshold the report was computed against.
    pub threshold: u8,
}

impl RoundTripReport {
    /// Returns `true` when no pixel exceeded the threshold.
    pub fn is_identity(&self) -> bool {
        self.pixels_over_threshold == 0
    }
}

/// Round-trip every pixel through the HSV container and measure the drift.
///
/// A pixel is flagged when any of its channels differs by more than
/// `threshold`.
pub fn roundtrip_report(image: &Image, threshold: u8) -> RoundTripReport {
    let restored = to_rgb(&to_hsv(image));
    let mut report = RoundTripReport {
        pixel_count: image.pixels().len(),
        threshold,
        ..Default::default()
    };

    for (a, b) in image.pixels().iter().zip(restored.pixels()) {
        let diff = a
            .channels()
            .iter()
            .zip(b.channels())
            .map(|(&x, y)| x.abs_diff(y))
            .max()
            .unwrap_or(0);
        report.max_difference = report.max_difference.max(diff);
        if diff > threshold {
            report.pixels_over_threshold += 1;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::{FromColor, Hsv, Srgb};

    #[test]
    fn test_primary_hues() {
        let cases = [
            (Rgba::opaque(255, 0, 0), 0.0),
            (Rgba::opaque(255, 255, 0), 60.0),
            (Rgba::opaque(0, 255, 0), 120.0),
            (Rgba::opaque(0, 255, 255), 180.0),
            (Rgba::opaque(0, 0, 255), 240.0),
            (Rgba::opaque(255, 0, 255), 300.0),
        ];
        for (px, expected) in cases {
            let (h, s, v) = rgb_to_hsv(px);
            assert!((h - expected).abs() < 1e-9, "{px:?}: hue {h} != {expected}");
            assert!((s - 1.0).abs() < 1e-9);
            assert!((v - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_gray_has_zero_hue_and_saturation() {
        let (h, s, v) = rgb_to_hsv(Rgba::gray(128));
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((v - 128.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn test_matches_reference_implementation() {
        // Sample the cube on a coarse grid and compare against the palette crate.
        for r in (0..=255u16).step_by(17) {
            for g in (0..=255u16).step_by(17) {
                for b in (0..=255u16).step_by(17) {
                    let px = Rgba::opaque(r as u8, g as u8, b as u8);
                    let (h, s, v) = rgb_to_hsv(px);
                    let reference: Hsv = Hsv::from_color(Srgb::new(
                        r as f32 / 255.0,
                        g as f32 / 255.0,
                        b as f32 / 255.0,
                    ));

                    assert!((s as f32 - reference.saturation).abs() < 1e-4, "{px:?}");
                    assert!((v as f32 - reference.value).abs() < 1e-4, "{px:?}");
                    if s > 0.0 {
                        let ref_h = reference.hue.into_positive_degrees();
                        let dh = (h as f32 - ref_h).abs();
                        assert!(dh < 1e-2 || (360.0 - dh) < 1e-2, "{px:?}: {h} vs {ref_h}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_hsv_to_rgb_sectors() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), [0, 255, 0]);
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), [0, 0, 255]);
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(90.0, 0.0, 0.5), [128, 128, 128]);
    }

    #[test]
    fn test_pack_layout() {
        let packed = pack_hsv(Rgba::new(0, 0, 255, 77));
        // 240° -> 170, full saturation, full value
        assert_eq!(packed, Rgba::new(170, 255, 255, 77));
    }

    #[test]
    fn test_channel_from_str() {
        assert_eq!("Hue".parse::<HsvChannel>().unwrap(), HsvChannel::Hue);
        assert_eq!("s".parse::<HsvChannel>().unwrap(), HsvChannel::Saturation);
        assert_eq!("value".parse::<HsvChannel>().unwrap(), HsvChannel::Value);
        assert!("lightness".parse::<HsvChannel>().is_err());
    }

    #[test]
    fn test_extract_channel_replicates_value() {
        let hsv = Image::filled(2, 1, Rgba::new(10, 20, 30, 99));
        assert_eq!(
            extract_channel(&hsv, HsvChannel::Hue).pixel(0, 0),
            Rgba::new(10, 10, 10, 99)
        );
        assert_eq!(
            extract_channel(&hsv, HsvChannel::Saturation).pixel(1, 0),
            Rgba::new(20, 20, 20, 99)
        );
        assert_eq!(
            extract_channel(&hsv, HsvChannel::Value).pixel(0, 0),
            Rgba::new(30, 30, 30, 99)
        );
    }

    #[test]
    fn test_roundtrip_exact_for_grays() {
        let pixels: Vec<Rgba> = (0..=255u8).map(Rgba::gray).collect();
        let image = Image::new(256, 1, pixels).unwrap();
        let report = roundtrip_report(&image, 0);
        assert_eq!(report.max_difference, 0);
        assert!(report.is_identity());
    }

    #[test]
    fn test_roundtrip_bounded_for_all_colors() {
        let mut pixels = Vec::new();
        for r in (0..=255u16).step_by(5) {
            for g in (0..=255u16).step_by(5) {
                for b in (0..=255u16).step_by(5) {
                    pixels.push(Rgba::opaque(r as u8, g as u8, b as u8));
                }
            }
        }
        let image = Image::new(pixels.len(), 1, pixels).unwrap();
        let report = roundtrip_report(&image, 1);
        assert!(report.max_difference <= 3, "drift {}", report.max_difference);
    }

    #[test]
    fn test_roundtrip_flags_saturated_drift() {
        // Yellow lands between two packed hue steps.
        let image = Image::filled(1, 1, Rgba::opaque(255, 255, 0));
        let report = roundtrip_report(&image, 1);
        assert_eq!(report.pixels_over_threshold, 1);
        assert!(!report.is_identity());
    }
}
