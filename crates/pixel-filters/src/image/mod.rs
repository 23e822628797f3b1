//! In-memory raster image and boundary sampling.
//!
//! [`Image`] owns its pixels in row-major order. Engines borrow an input
//! image and always return a new one; nothing in this crate mutates an
//! image it was handed.

mod boundary;
mod raster;

pub use boundary::reflect;
pub use raster::Image;
