//! Point adjustments: invert, brightness, contrast, gamma, grayscale.
//!
//! Every adjustment except grayscale is a scalar transfer function applied
//! to R, G and B independently through [`map_channels`]. The transfer
//! functions take their parameter explicitly, so an [`Adjustment`] value is
//! all the state a filter needs.
//!
//! | Adjustment | Transfer `f(v)` | Parameter range |
//! |------------|-----------------|-----------------|
//! | Invert | `255 - v` | none |
//! | Brightness | `v + round(factor)` | `[-255, 255]` (clamped) |
//! | Contrast | `round((v - 128) * factor + 128)` | `[0, 3]` typical, `>= 0` |
//! | Gamma | `round(255 * (v / 255)^(1 / gamma))` | `> 0`, `[0.1, 10]` typical |
//! | Grayscale | BT.601 luma into R, G, B | none |

mod channel_map;

pub use channel_map::map_channels;

use crate::api::FilterError;
use crate::color::{round_channel, Rgba};
use crate::image::Image;

/// Largest brightness shift in either direction.
pub const MAX_BRIGHTNESS: f64 = 255.0;

/// A point adjustment together with its parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// `255 - v`
    Invert,
    /// Add a constant to every channel.
    Brightness(f64),
    /// Scale distance from mid-gray (128).
    Contrast(f64),
    /// Power-law correction with exponent `1 / gamma`.
    Gamma(f64),
    /// Replace R, G, B with BT.601 luma.
    Grayscale,
}

impl Adjustment {
    /// Check the parameter and normalize it where a safe default exists.
    ///
    /// Brightness is clamped into `[-255, 255]`. Non-finite values, negative
    /// contrast and non-positive gamma are rejected.
    pub fn validated(self) -> Result<Self, FilterError> {
        match self {
            Adjustment::Brightness(factor) => {
                if !factor.is_finite() {
                    return Err(FilterError::invalid("brightness", "must be finite"));
                }
                Ok(Adjustment::Brightness(
                    factor.clamp(-MAX_BRIGHTNESS, MAX_BRIGHTNESS),
                ))
            }
            Adjustment::Contrast(factor) => {
                if !factor.is_finite() || factor < 0.0 {
                    return Err(FilterError::invalid(
                        "contrast",
                        format!("must be a finite value >= 0, got {}", factor),
                    ));
                }
                Ok(self)
            }
            Adjustment::Gamma(gamma) => {
                if !gamma.is_finite() || gamma <= 0.0 {
                    return Err(FilterError::invalid(
                        "gamma",
                        format!("must be a finite value > 0, got {}", gamma),
                    ));
                }
                Ok(self)
            }
            Adjustment::Invert | Adjustment::Grayscale => Ok(self),
        }
    }

    /// The scalar transfer function for channel-map adjustments.
    ///
    /// Returns `None` for [`Adjustment::Grayscale`], which mixes channels.
    /// The result is not clamped; [`map_channels`] does that.
    pub fn transfer(&self, v: i32) -> Option<i32> {
        match *self {
            Adjustment::Invert => Some(255 - v),
            Adjustment::Brightness(factor) => Some(v + factor.round() as i32),
            Adjustment::Contrast(factor) => {
                Some(((v - 128) as f64 * factor + 128.0).round() as i32)
            }
            Adjustment::Gamma(gamma) => {
                Some((255.0 * (v as f64 / 255.0).powf(1.0 / gamma)).round() as i32)
            }
            Adjustment::Grayscale => None,
        }
    }

    /// Apply the adjustment to a copy of `image`.
    pub fn apply(&self, image: &Image) -> Result<Image, FilterError> {
        let adjustment = self.validated()?;
        match adjustment {
            Adjustment::Grayscale => Ok(image.map_pixels(luma_pixel)),
            _ => Ok(image.map_channels(|v| adjustment.transfer(v).unwrap_or(v))),
        }
    }
}

/// BT.601 luma of a pixel, rounded.
#[inline]
pub fn luma(pixel: Rgba) -> u8 {
    round_channel(0.299 * pixel.r as f64 + 0.587 * pixel.g as f64 + 0.114 * pixel.b as f64)
}

#[inline]
fn luma_pixel(pixel: Rgba) -> Rgba {
    let y = luma(pixel);
    Rgba::new(y, y, y, pixel.a)
}

/// Invert R, G and B.
pub fn invert(image: &Image) -> Image {
    image.map_channels(|v| 255 - v)
}

/// Shift every channel by `round(factor)`.
pub fn brightness(image: &Image, factor: f64) -> Result<Image, FilterError> {
    Adjustment::Brightness(factor).apply(image)
}

/// Scale every channel's distance from 128 by `factor`.
pub fn contrast(image: &Image, factor: f64) -> Result<Image, FilterError> {
    Adjustment::Contrast(factor).apply(image)
}

/// Gamma-correct every channel.
pub fn gamma(image: &Image, gamma: f64) -> Result<Image, FilterError> {
    Adjustment::Gamma(gamma).apply(image)
}

/// Convert to grayscale using BT.601 weights.
pub fn grayscale(image: &Image) -> Image {
    image.map_pixels(luma_pixel)
}
