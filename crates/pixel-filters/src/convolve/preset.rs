//! Built-in convolution presets.

use std::fmt;
use std::str::FromStr;

use crate::api::FilterError;

use super::kernel::Kernel;
use super::Convolution;

/// A named built-in kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Blur,
    GaussianBlur,
    Sharpen,
    EdgeDetection,
    Emboss,
}

struct PresetEntry {
    weights: [[f64; 3]; 3],
    divisor: f64,
    offset: f64,
}

// Indexed by `Preset as usize`.
const TABLE: [PresetEntry; 5] = [
    PresetEntry {
        weights: [[1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 1.0]],
        divisor: 9.0,
        offset: 0.0,
    },
    PresetEntry {
        weights: [[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]],
        divisor: 16.0,
        offset: 0.0,
    },
    PresetEntry {
        weights: [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]],
        divisor: 1.0,
        offset: 0.0,
    },
    PresetEntry {
        weights: [[-1.0, -1.0, -1.0], [-1.0, 8.0, -1.0], [-1.0, -1.0, -1.0]],
        divisor: 1.0,
        offset: 0.0,
    },
    PresetEntry {
        weights: [[-2.0, -1.0, 0.0], [-1.0, 1.0, 1.0], [0.0, 1.0, 2.0]],
        divisor: 1.0,
        offset: 128.0,
    },
];

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Blur,
        Preset::GaussianBlur,
        Preset::Sharpen,
        Preset::EdgeDetection,
        Preset::Emboss,
    ];

    fn entry(&self) -> &'static PresetEntry {
        &TABLE[*self as usize]
    }

    /// Human-readable name, e.g. `"Gaussian Blur"`.
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Blur => "Blur",
            Preset::GaussianBlur => "Gaussian Blur",
            Preset::Sharpen => "Sharpen",
            Preset::EdgeDetection => "Edge Detection",
            Preset::Emboss => "Emboss",
        }
    }

    /// Kebab-case identifier, e.g. `"gaussian-blur"`.
    pub fn id(&self) -> &'static str {
        match self {
            Preset::Blur => "blur",
            Preset::GaussianBlur => "gaussian-blur",
            Preset::Sharpen => "sharpen",
            Preset::EdgeDetection => "edge-detection",
            Preset::Emboss => "emboss",
        }
    }

    pub fn weights(&self) -> [[f64; 3]; 3] {
        self.entry().weights
    }

    pub fn divisor(&self) -> f64 {
        self.entry().divisor
    }

    pub fn offset(&self) -> f64 {
        self.entry().offset
    }

    /// The preset as a ready-to-run [`Convolution`].
    pub fn convolution(&self) -> Convolution {
        Convolution::new(Kernel::from_square(self.weights()))
            .divisor(self.divisor())
            .offset(self.offset())
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = FilterError;

    /// Accepts the id or the display name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        Self::ALL
            .into_iter()
            .find(|p| p.id() == normalized)
            .ok_or_else(|| FilterError::invalid("preset", format!("unknown preset '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_enum() {
        assert_eq!(Preset::Blur.divisor(), 9.0);
        assert_eq!(Preset::GaussianBlur.divisor(), 16.0);
        assert_eq!(Preset::GaussianBlur.weights()[1][1], 4.0);
        assert_eq!(Preset::Sharpen.weights()[1][1], 5.0);
        assert_eq!(Preset::EdgeDetection.weights()[1][1], 8.0);
        assert_eq!(Preset::Emboss.offset(), 128.0);
    }

    #[test]
    fn test_emboss_sums_to_one() {
        let sum: f64 = Preset::Emboss.weights().iter().flatten().sum();
        assert_eq!(sum, 1.0);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("Gaussian Blur".parse::<Preset>().unwrap(), Preset::GaussianBlur);
        assert_eq!("gaussian-blur".parse::<Preset>().unwrap(), Preset::GaussianBlur);
        assert_eq!("EDGE_DETECTION".parse::<Preset>().unwrap(), Preset::EdgeDetection);
        assert!("motion-blur".parse::<Preset>().is_err());
        for preset in Preset::ALL {
            assert_eq!(preset.to_string().parse::<Preset>().unwrap(), preset);
        }
    }

    #[test]
    fn test_convolution_carries_table_values() {
        let conv = Preset::Emboss.convolution();
        assert_eq!(conv.divisor, 1.0);
        assert_eq!(conv.offset, 128.0);
        assert_eq!(conv.kernel.anchor(), (1, 1));
    }
}
