use pixel_filters::{Anchor, Convolution, DitherOptions, Filter, Kernel, Levels};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::services::FilterStore;

/// A level count for all channels, or one per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelsSpec {
    Uniform(u32),
    PerChannel([u32; 3]),
}

impl From<LevelsSpec> for Levels {
    fn from(levels: LevelsSpec) -> Self {
        match levels {
            LevelsSpec::Uniform(n) => Levels::uniform(n),
            LevelsSpec::PerChannel([r, g, b]) => Levels::new(r, g, b),
        }
    }
}

/// One step of a pipeline file, tagged by `filter:`.
///
/// ```yaml
/// - filter: brightness
///   factor: 40
/// - filter: preset
///   name: emboss
/// - filter: dither
///   kernel: stucki
///   levels: [2, 2, 2]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "filter", rename_all = "kebab-case")]
pub enum PipelineStep {
    Invert,
    Brightness {
        factor: f64,
    },
    Contrast {
        factor: f64,
    },
    Gamma {
        gamma: f64,
    },
    Grayscale,
    Quantize {
        levels: LevelsSpec,
    },
    Dither {
        #[serde(default)]
        kernel: Option<String>,
        #[serde(default)]
        levels: Option<LevelsSpec>,
    },
    Preset {
        name: String,
    },
    Convolve {
        kernel: Vec<Vec<f64>>,
        #[serde(default)]
        divisor: Option<f64>,
        #[serde(default)]
        offset: f64,
        /// `[x, y]`; negative means centre
        #[serde(default)]
        anchor: Option<[i64; 2]>,
    },
    /// A kernel saved in the filter store
    Custom {
        name: String,
    },
    Median {
        size: usize,
    },
    ToHsv,
    ToRgb,
    Channel {
        channel: String,
    },
}

impl PipelineStep {
    pub fn name(&self) -> &'static str {
        match self {
            PipelineStep::Invert => "invert",
            PipelineStep::Brightness { .. } => "brightness",
            PipelineStep::Contrast { .. } => "contrast",
            PipelineStep::Gamma { .. } => "gamma",
            PipelineStep::Grayscale => "grayscale",
            PipelineStep::Quantize { .. } => "quantize",
            PipelineStep::Dither { .. } => "dither",
            PipelineStep::Preset { .. } => "preset",
            PipelineStep::Convolve { .. } => "convolve",
            PipelineStep::Custom { .. } => "custom",
            PipelineStep::Median { .. } => "median",
            PipelineStep::ToHsv => "to-hsv",
            PipelineStep::ToRgb => "to-rgb",
            PipelineStep::Channel { .. } => "channel",
        }
    }

    /// Turn the step into an engine [`Filter`].
    ///
    /// `custom` steps are looked up in `store`; dither steps fill missing
    /// fields from `dither_defaults`.
    pub fn resolve(
        &self,
        store: &dyn FilterStore,
        dither_defaults: &DitherOptions,
    ) -> Result<Filter, PipelineError> {
        let filter = match self {
            PipelineStep::Invert => Filter::Invert,
            PipelineStep::Brightness { factor } => Filter::Brightness(*factor),
            PipelineStep::Contrast { factor } => Filter::Contrast(*factor),
            PipelineStep::Gamma { gamma } => Filter::Gamma(*gamma),
            PipelineStep::Grayscale => Filter::Grayscale,
            PipelineStep::Quantize { levels } => Filter::Quantize((*levels).into()),
            PipelineStep::Dither { kernel, levels } => {
                let mut options = *dither_defaults;
                if let Some(kernel) = kernel {
                    options = options.kernel(kernel.parse()?);
                }
                if let Some(levels) = levels {
                    options = options.levels((*levels).into());
                }
                Filter::Dither(options)
            }
            PipelineStep::Preset { name } => Filter::Preset(name.parse()?),
            PipelineStep::Convolve {
                kernel,
                divisor,
                offset,
                anchor,
            } => {
                let mut kernel = Kernel::new(kernel.clone())?;
                if let Some([x, y]) = anchor {
                    kernel = kernel.with_anchor(Anchor::from_signed(*x, *y))?;
                }
                let mut conv = Convolution::new(kernel).offset(*offset);
                if let Some(divisor) = divisor {
                    conv = conv.divisor(*divisor);
                }
                Filter::Convolve(conv)
            }
            PipelineStep::Custom { name } => {
                let named = store.load(name)?;
                Filter::Convolve(named.to_convolution()?)
            }
            PipelineStep::Median { size } => Filter::Median(*size),
            PipelineStep::ToHsv => Filter::ToHsv,
            PipelineStep::ToRgb => Filter::ToRgb,
            PipelineStep::Channel { channel } => Filter::ExtractChannel(channel.parse()?),
        };
        Ok(filter)
    }
}

/// An ordered list of steps read from YAML.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pipeline {
    pub steps: Vec<PipelineStep>,
}

impl Pipeline {
    pub fn from_yaml_str(content: &str) -> Result<Self, PipelineError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load(path: &std::path::Path) -> Result<Self, PipelineError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Resolve every step, reporting the first failure with its position.
    pub fn resolve(
        &self,
        store: &dyn FilterStore,
        dither_defaults: &DitherOptions,
    ) -> Result<Vec<Filter>, PipelineError> {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                step.resolve(store, dither_defaults)
                    .map_err(|e| match e {
                        PipelineError::Filter(source) => PipelineError::Step {
                            index,
                            step: step.name().to_string(),
                            source,
                        },
                        other => other,
                    })
            })
            .collect()
    }
}
