//! Unified error type for the pixel-filters public API.
//!
//! Filters only fail on bad parameters or mismatched buffers. Numeric
//! overflow never surfaces as an error because every channel is clamped.

use std::fmt;

/// Error returned by filter constructors and [`Filter::apply`](crate::Filter::apply).
///
/// # Example
///
/// ```
/// use pixel_filters::{adjust, FilterError, Image, Rgba};
///
/// let image = Image::filled(1, 1, Rgba::gray(10));
/// let err = adjust::gamma(&image, 0.0).unwrap_err();
/// assert!(matches!(err, FilterError::InvalidParameter { name: "gamma", .. }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// A filter parameter is outside the range the filter accepts.
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },
    /// A pixel buffer does not match the declared dimensions.
    DimensionMismatch {
        /// Expected element count
        expected: usize,
        /// Actual element count
        actual: usize,
    },
}

impl FilterError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        FilterError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter '{}': {}", name, reason)
            }
            FilterError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "buffer size mismatch: expected {} elements, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for FilterError {}
