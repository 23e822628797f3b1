//! imgproc - raster filter toolkit
//!
//! Application layer around the `pixel-filters` engine: PNG codec, named
//! kernel store, undo history, pipeline files and configuration.
//! This library exposes modules for the binary and integration tests.

pub mod codec;
pub mod error;
pub mod models;
pub mod parse;
pub mod services;
