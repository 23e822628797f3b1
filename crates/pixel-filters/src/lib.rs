#![allow(clippy::needless_range_loop)]

//! pixel-filters: point, neighbourhood and colour-space filters for 8-bit
//! RGBA rasters.
//!
//! Every engine is a pure function from an [`Image`] plus parameters to a
//! new [`Image`] of the same dimensions. Nothing is mutated in place and no
//! state survives between calls.
//!
//! # Quick Start
//!
//! ```
//! use pixel_filters::{Filter, Image, Rgba};
//! use pixel_filters::convolve::Preset;
//!
//! let image = Image::filled(8, 8, Rgba::opaque(128, 128, 128));
//! let embossed = Filter::Preset(Preset::Emboss).apply(&image).unwrap();
//! assert_eq!(embossed.pixel(3, 3), Rgba::opaque(255, 255, 255));
//! ```
//!
//! # Modules
//!
//! - [`adjust`]: invert, brightness, contrast, gamma, grayscale
//! - [`quantize`]: uniform bucket quantization
//! - [`dither`]: error diffusion onto a level grid (five kernels)
//! - [`convolve`]: kernel convolution with mirrored edges, plus presets
//! - [`median`]: histogram median filter
//! - [`color`]: the [`Rgba`] pixel and RGB ↔ HSV conversion
//!
//! [`Filter`] ties them together as one enum with a single `apply`.
//!
//! # Clamping
//!
//! Every channel value is clamped to `0..=255` as soon as it is computed.
//! Filters therefore never fail on numeric overflow; they only fail on
//! parameters outside their accepted range ([`FilterError::InvalidParameter`]).

pub mod adjust;
pub mod api;
pub mod color;
pub mod convolve;
pub mod dither;
pub mod image;
pub mod median;
pub mod quantize;


pub use api::{Filter, FilterError};
pub use color::{HsvChannel, Rgba};
pub use convolve::{Anchor, Convolution, Kernel, Preset};
pub use dither::{DiffusionKernelType, DitherOptions};
pub use image::Image;
pub use quantize::Levels;
