//! The closed set of filters and a single dispatcher.

use std::fmt;

use crate::adjust::Adjustment;
use crate::color::{self, HsvChannel};
use crate::convolve::{self, Convolution, Preset};
use crate::dither::{self, DitherOptions};
use crate::image::Image;
use crate::median;
use crate::quantize::{self, Levels};

use super::FilterError;

/// Every filter the engine provides, with its parameters.
///
/// ```
/// use pixel_filters::{Filter, Image, Rgba};
///
/// let image = Image::filled(1, 1, Rgba::new(10, 20, 30, 255));
/// let out = Filter::Brightness(50.0).apply(&image).unwrap();
/// assert_eq!(out.pixel(0, 0), Rgba::new(60, 70, 80, 255));
/// assert_eq!(Filter::Brightness(50.0).to_string(), "Brightness (+50)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Invert,
    Brightness(f64),
    Contrast(f64),
    Gamma(f64),
    Grayscale,
    Quantize(Levels),
    Dither(DitherOptions),
    Convolve(Convolution),
    Preset(Preset),
    /// Window size (odd, >= 3)
    Median(usize),
    ToHsv,
    ToRgb,
    /// Grayscale view of one channel of an HSV-packed image
    ExtractChannel(HsvChannel),
}

impl Filter {
    /// Run the filter on `image`, returning a new image of the same size.
    pub fn apply(&self, image: &Image) -> Result<Image, FilterError> {
        match self {
            Filter::Invert => Adjustment::Invert.apply(image),
            Filter::Brightness(factor) => Adjustment::Brightness(*factor).apply(image),
            Filter::Contrast(factor) => Adjustment::Contrast(*factor).apply(image),
            Filter::Gamma(gamma) => Adjustment::Gamma(*gamma).apply(image),
            Filter::Grayscale => Adjustment::Grayscale.apply(image),
            Filter::Quantize(levels) => Ok(quantize::quantize(image, *levels)),
            Filter::Dither(options) => Ok(dither::dither(image, options)),
            Filter::Convolve(conv) => Ok(convolve::convolve(image, conv)),
            Filter::Preset(preset) => Ok(convolve::apply_preset(image, *preset)),
            Filter::Median(size) => median::median(image, *size),
            Filter::ToHsv => Ok(color::to_hsv(image)),
            Filter::ToRgb => Ok(color::to_rgb(image)),
            Filter::ExtractChannel(channel) => Ok(color::extract_channel(image, *channel)),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Invert => write!(f, "Invert"),
            Filter::Brightness(factor) => write!(f, "Brightness ({:+})", factor),
            Filter::Contrast(factor) => write!(f, "Contrast ({})", factor),
            Filter::Gamma(gamma) => write!(f, "Gamma ({})", gamma),
            Filter::Grayscale => write!(f, "Grayscale"),
            Filter::Quantize(levels) => write!(f, "Quantize ({})", levels),
            Filter::Dither(options) => {
                write!(f, "Dither ({}, {})", options.kernel, options.levels)
            }
            Filter::Convolve(conv) => write!(
                f,
                "Convolve ({}x{}, divisor {}, offset {})",
                conv.kernel.cols(),
                conv.kernel.rows(),
                conv.divisor,
                conv.offset
            ),
            Filter::Preset(preset) => write!(f, "{}", preset),
            Filter::Median(size) => write!(f, "Median ({}x{})", size, size),
            Filter::ToHsv => write!(f, "RGB to HSV"),
            Filter::ToRgb => write!(f, "HSV to RGB"),
            Filter::ExtractChannel(channel) => write!(f, "{} channel", channel.name()),
        }
    }
}
