pub mod config;
pub mod named_filter;
pub mod pipeline;

pub use config::{AppConfig, DitherDefaults};
pub use named_filter::NamedFilter;
pub use pipeline::{LevelsSpec, Pipeline, PipelineStep};
