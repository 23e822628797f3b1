//! Pixel type and color space conversion.
//!
//! - [`Rgba`]: the 8-bit pixel every engine works on
//! - [`hsv`]: RGB ↔ HSV conversion using an RGBA-shaped container

pub mod hsv;
mod rgba;

pub use hsv::{extract_channel, roundtrip_report, to_hsv, to_rgb, HsvChannel, RoundTripReport};
pub use rgba::{clamp_channel, round_channel, Rgba};
