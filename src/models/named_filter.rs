use pixel_filters::{Convolution, FilterError, Kernel};
use serde::{Deserialize, Serialize};

/// A user-defined convolution kernel saved under a name.
///
/// Serialized as `{ "name", "divisor", "offset", "kernel": [[..]] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedFilter {
    pub name: String,
    pub divisor: f64,
    pub offset: f64,
    pub kernel: Vec<Vec<f64>>,
}

impl NamedFilter {
    pub fn new(name: impl Into<String>, kernel: Vec<Vec<f64>>, divisor: f64, offset: f64) -> Self {
        Self {
            name: name.into(),
            divisor,
            offset,
            kernel,
        }
    }

    /// Store a convolution as-is (the kernel is already rectangular).
    pub fn from_convolution(name: impl Into<String>, conv: &Convolution) -> Self {
        Self::new(name, conv.kernel.to_rows(), conv.divisor, conv.offset)
    }

    /// Build the convolution this filter describes, anchored at the centre.
    pub fn to_convolution(&self) -> Result<Convolution, FilterError> {
        let kernel = Kernel::new(self.kernel.clone())?;
        Ok(Convolution::new(kernel)
            .divisor(self.divisor)
            .offset(self.offset))
    }
}
