//! Error diffusion kernel tables.

use std::fmt;
use std::str::FromStr;

use crate::api::FilterError;

/// A fixed set of `(dx, dy, weight)` taps.
///
/// Each tap receives `error * weight / divisor`. Taps only point at pixels
/// not yet visited in a row-major scan: `dy > 0`, or `dy == 0` with `dx > 0`.
/// `max_dy` is the deepest row a tap reaches, so the error buffer needs
/// `max_dy + 1` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffusionKernel {
    pub entries: &'static [(i32, i32, u8)],
    pub divisor: u8,
    pub max_dy: usize,
}

impl DiffusionKernel {
    /// Fraction of a pixel's error that is passed on.
    pub fn propagation(&self) -> f64 {
        self.entries.iter().map(|&(_, _, w)| w as f64).sum::<f64>() / self.divisor as f64
    }

    /// Taps with their weight already divided out.
    pub fn weights(&self) -> impl Iterator<Item = (i32, i32, f64)> + '_ {
        let divisor = self.divisor as f64;
        self.entries
            .iter()
            .map(move |&(dx, dy, w)| (dx, dy, w as f64 / divisor))
    }
}

/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: DiffusionKernel = DiffusionKernel {
    entries: &[(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)],
    divisor: 16,
    max_dy: 1,
};

/// ```text
///            X   8   4
///    2   4   8   4   2
/// ```
pub const BURKES: DiffusionKernel = DiffusionKernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
    ],
    divisor: 32,
    max_dy: 1,
};

/// ```text
///            X   8   4
///    2   4   8   4   2
///    1   2   4   2   1
/// ```
pub const STUCKI: DiffusionKernel = DiffusionKernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
        (-2, 2, 1),
        (-1, 2, 2),
        (0, 2, 4),
        (1, 2, 2),
        (2, 2, 1),
    ],
    divisor: 42,
    max_dy: 2,
};

/// ```text
///            X   5   3
///    2   4   5   4   2
///        2   3   2
/// ```
pub const SIERRA: DiffusionKernel = DiffusionKernel {
    entries: &[
        (1, 0, 5),
        (2, 0, 3),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 5),
        (1, 1, 4),
        (2, 1, 2),
        (-1, 2, 2),
        (0, 2, 3),
        (1, 2, 2),
    ],
    divisor: 32,
    max_dy: 2,
};

/// Six taps of 1/8 each; a quarter of the error is dropped.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: DiffusionKernel = DiffusionKernel {
    entries: &[
        (1, 0, 1),
        (2, 0, 1),
        (-1, 1, 1),
        (0, 1, 1),
        (1, 1, 1),
        (0, 2, 1),
    ],
    divisor: 8,
    max_dy: 2,
};

/// Selectable diffusion kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiffusionKernelType {
    #[default]
    FloydSteinberg,
    Burkes,
    Stucki,
    Sierra,
    Atkinson,
}

impl DiffusionKernelType {
    pub const ALL: [DiffusionKernelType; 5] = [
        DiffusionKernelType::FloydSteinberg,
        DiffusionKernelType::Burkes,
        DiffusionKernelType::Stucki,
        DiffusionKernelType::Sierra,
        DiffusionKernelType::Atkinson,
    ];

    pub fn kernel(&self) -> &'static DiffusionKernel {
        match self {
            DiffusionKernelType::FloydSteinberg => &FLOYD_STEINBERG,
            DiffusionKernelType::Burkes => &BURKES,
            DiffusionKernelType::Stucki => &STUCKI,
            DiffusionKernelType::Sierra => &SIERRA,
            DiffusionKernelType::Atkinson => &ATKINSON,
        }
    }

    /// Kebab-case identifier used in config files and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            DiffusionKernelType::FloydSteinberg => "floyd-steinberg",
            DiffusionKernelType::Burkes => "burkes",
            DiffusionKernelType::Stucki => "stucki",
            DiffusionKernelType::Sierra => "sierra",
            DiffusionKernelType::Atkinson => "atkinson",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DiffusionKernelType::FloydSteinberg => "Floyd-Steinberg",
            DiffusionKernelType::Burkes => "Burkes",
            DiffusionKernelType::Stucki => "Stucki",
            DiffusionKernelType::Sierra => "Sierra",
            DiffusionKernelType::Atkinson => "Atkinson",
        }
    }
}

impl fmt::Display for DiffusionKernelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DiffusionKernelType {
    type Err = FilterError;

    /// Accepts the id or the display name, ignoring case, `_` and spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        Self::ALL
            .into_iter()
            .find(|k| k.id() == normalized || k.id().replace('-', "") == normalized)
            .ok_or_else(|| FilterError::invalid("kernel", format!("unknown diffusion kernel '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_propagation_kernels() {
        for kind in [
            DiffusionKernelType::FloydSteinberg,
            DiffusionKernelType::Burkes,
            DiffusionKernelType::Stucki,
            DiffusionKernelType::Sierra,
        ] {
            let total: f64 = kind.kernel().weights().map(|(_, _, w)| w).sum();
            assert!((total - 1.0).abs() < 1e-9, "{} sums to {}", kind, total);
        }
    }

    #[test]
    fn test_atkinson_drops_a_quarter() {
        assert!((ATKINSON.propagation() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_max_dy_matches_entries() {
        for kind in DiffusionKernelType::ALL {
            let kernel = kind.kernel();
            let deepest = kernel.entries.iter().map(|&(_, dy, _)| dy as usize).max();
            assert_eq!(deepest, Some(kernel.max_dy), "{}", kind);
        }
    }

    #[test]
    fn test_taps_point_forward() {
        for kind in DiffusionKernelType::ALL {
            for &(dx, dy, _) in kind.kernel().entries {
                assert!(dy > 0 || (dy == 0 && dx > 0), "{} has tap ({}, {})", kind, dx, dy);
            }
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "floyd-steinberg".parse::<DiffusionKernelType>().unwrap(),
            DiffusionKernelType::FloydSteinberg
        );
        assert_eq!(
            "Floyd-Steinberg".parse::<DiffusionKernelType>().unwrap(),
            DiffusionKernelType::FloydSteinberg
        );
        assert_eq!(
            "floyd_steinberg".parse::<DiffusionKernelType>().unwrap(),
            DiffusionKernelType::FloydSteinberg
        );
        assert_eq!(
            "floydsteinberg".parse::<DiffusionKernelType>().unwrap(),
            DiffusionKernelType::FloydSteinberg
        );
        assert_eq!("STUCKI".parse::<DiffusionKernelType>().unwrap(), DiffusionKernelType::Stucki);
        assert!("jarvis".parse::<DiffusionKernelType>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for kind in DiffusionKernelType::ALL {
            assert_eq!(kind.to_string().parse::<DiffusionKernelType>().unwrap(), kind);
        }
    }
}
