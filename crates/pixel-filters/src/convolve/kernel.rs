//! Convolution kernels.

use crate::api::FilterError;

/// Weight sums smaller than this count as zero.
pub const DEGENERATE_SUM: f64 = 1e-5;

/// The kernel cell aligned with the output pixel.
///
/// `None` on an axis means the centre of that axis, `floor(len / 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Anchor {
    pub x: Option<usize>,
    pub y: Option<usize>,
}

impl Anchor {
    pub const CENTER: Anchor = Anchor { x: None, y: None };

    pub fn at(x: usize, y: usize) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Negative coordinates select the centre of their axis.
    pub fn from_signed(x: i64, y: i64) -> Self {
        Self {
            x: usize::try_from(x).ok(),
            y: usize::try_from(y).ok(),
        }
    }
}

/// A rectangular matrix of weights with a resolved anchor.
///
/// ```
/// use pixel_filters::convolve::Kernel;
///
/// let kernel = Kernel::new(vec![vec![1.0, 2.0, 1.0], vec![2.0, 4.0]]).unwrap();
/// assert_eq!((kernel.cols(), kernel.rows()), (3, 2));
/// assert_eq!(kernel.weight(2, 1), 0.0); // short rows are zero padded
/// assert_eq!(kernel.anchor(), (1, 1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: Vec<f64>,
    rows: usize,
    cols: usize,
    anchor: (usize, usize),
}

impl Kernel {
    /// Build a kernel from rows of weights, anchored at its centre.
    ///
    /// Rows shorter than the longest one are padded with zeros. Fails when
    /// there are no rows, no columns, or a non-finite weight.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, FilterError> {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        if rows.is_empty() || cols == 0 {
            return Err(FilterError::invalid("kernel", "kernel has no weights"));
        }
        let mut weights = Vec::with_capacity(rows.len() * cols);
        for row in &rows {
            if row.iter().any(|w| !w.is_finite()) {
                return Err(FilterError::invalid("kernel", "weights must be finite"));
            }
            weights.extend_from_slice(row);
            weights.resize(weights.len() + cols - row.len(), 0.0);
        }
        Ok(Self {
            weights,
            rows: rows.len(),
            cols,
            anchor: (cols / 2, rows.len() / 2),
        })
    }

    /// Centre-anchored kernel from a fixed square table.
    pub(crate) fn from_square<const N: usize>(table: [[f64; N]; N]) -> Self {
        Self {
            weights: table.iter().flatten().copied().collect(),
            rows: N,
            cols: N,
            anchor: (N / 2, N / 2),
        }
    }

    /// `size` × `size` kernel passing the centre pixel through unchanged.
    pub fn identity(size: usize) -> Result<Self, FilterError> {
        let mut rows = vec![vec![0.0; size]; size];
        if size > 0 {
            rows[size / 2][size / 2] = 1.0;
        }
        Self::new(rows)
    }

    /// Move the anchor. Fails if it falls outside the kernel.
    pub fn with_anchor(mut self, anchor: Anchor) -> Result<Self, FilterError> {
        let x = anchor.x.unwrap_or(self.cols / 2);
        let y = anchor.y.unwrap_or(self.rows / 2);
        if x >= self.cols || y >= self.rows {
            return Err(FilterError::invalid(
                "anchor",
                format!(
                    "({}, {}) is outside a {}x{} kernel",
                    x, y, self.cols, self.rows
                ),
            ));
        }
        self.anchor = (x, y);
        Ok(self)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Anchor as `(x, y)`.
    #[inline]
    pub fn anchor(&self) -> (usize, usize) {
        self.anchor
    }

    #[inline]
    pub fn weight(&self, kx: usize, ky: usize) -> f64 {
        self.weights[ky * self.cols + kx]
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// The weight sum, or 1.0 when it is effectively zero.
    pub fn auto_divisor(&self) -> f64 {
        normalize_divisor(self.sum())
    }

    /// Weights as nested rows (always rectangular).
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.weights.chunks(self.cols).map(<[f64]>::to_vec).collect()
    }
}

/// Replace a near-zero divisor with 1.0.
#[inline]
pub fn normalize_divisor(divisor: f64) -> f64 {
    if divisor.abs() < DEGENERATE_SUM || !divisor.is_finite() {
        1.0
    } else {
        divisor
    }
}
