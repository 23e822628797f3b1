//! Dithering configuration.

use crate::quantize::Levels;

use super::kernel::DiffusionKernelType;

/// Options for [`dither`](super::dither).
///
/// Defaults to Floyd-Steinberg with two levels per channel.
///
/// ```
/// use pixel_filters::dither::{DiffusionKernelType, DitherOptions};
/// use pixel_filters::quantize::Levels;
///
/// let options = DitherOptions::new()
///     .kernel(DiffusionKernelType::Stucki)
///     .levels(Levels::uniform(4));
/// assert_eq!(options.levels.r(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DitherOptions {
    /// Output levels per channel. A grayscale input uses only `levels.r()`.
    pub levels: Levels,
    pub kernel: DiffusionKernelType,
}

impl DitherOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn levels(mut self, levels: Levels) -> Self {
        self.levels = levels;
        self
    }

    #[inline]
    pub fn kernel(mut self, kernel: DiffusionKernelType) -> Self {
        self.kernel = kernel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = DitherOptions::default();
        assert_eq!(opts.kernel, DiffusionKernelType::FloydSteinberg);
        assert_eq!(opts.levels, Levels::uniform(2));
    }

    #[test]
    fn test_builder_chain() {
        let opts = DitherOptions::new()
            .kernel(DiffusionKernelType::Atkinson)
            .levels(Levels::new(2, 3, 4));
        assert_eq!(opts.kernel, DiffusionKernelType::Atkinson);
        assert_eq!(opts.levels.as_array(), [2, 3, 4]);
    }
}
