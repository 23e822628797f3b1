use pixel_filters::{DiffusionKernelType, DitherOptions, FilterError, Levels};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding one `<name>.json` per saved kernel
    #[serde(default = "default_filters_dir")]
    pub filters_dir: PathBuf,

    /// Maximum undo depth (unlimited when absent)
    #[serde(default)]
    pub history_limit: Option<usize>,

    /// Per-channel drift above which `hsv-check` flags a pixel
    #[serde(default = "default_roundtrip_threshold")]
    pub roundtrip_threshold: u8,

    /// Defaults for dither steps that omit kernel or levels
    #[serde(default)]
    pub dither: DitherDefaults,
}

fn default_filters_dir() -> PathBuf {
    PathBuf::from("filters")
}

fn default_roundtrip_threshold() -> u8 {
    1
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DitherDefaults {
    #[serde(default = "default_dither_kernel")]
    pub kernel: String,

    #[serde(default = "default_dither_levels")]
    pub levels: u32,
}

fn default_dither_kernel() -> String {
    DiffusionKernelType::default().id().to_string()
}

fn default_dither_levels() -> u32 {
    2
}

impl Default for DitherDefaults {
    fn default() -> Self {
        Self {
            kernel: default_dither_kernel(),
            levels: default_dither_levels(),
        }
    }
}

impl DitherDefaults {
    pub fn options(&self) -> Result<DitherOptions, FilterError> {
        Ok(DitherOptions::new()
            .kernel(self.kernel.parse()?)
            .levels(Levels::uniform(self.levels)))
    }
}

impl AppConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Load configuration from a YAML file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml_str(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        filters_dir = %config.filters_dir.display(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Load from `CONFIG_FILE` (if set) and apply `FILTERS_DIR`.
    pub fn from_env() -> Self {
        let mut config = match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load(Path::new(&path)),
            Err(_) => Self::default(),
        };
        if let Ok(dir) = std::env::var("FILTERS_DIR") {
            config.filters_dir = PathBuf::from(dir);
        }
        config
    }

    /// Dither defaults, or the built-in ones if the configured kernel is unknown
    pub fn dither_options(&self) -> DitherOptions {
        self.dither.options().unwrap_or_else(|e| {
            tracing::warn!(%e, "Invalid dither defaults in config, using built-in");
            DitherOptions::new()
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            filters_dir: default_filters_dir(),
            history_limit: None,
            roundtrip_threshold: default_roundtrip_threshold(),
            dither: DitherDefaults::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.filters_dir, PathBuf::from("filters"));
        assert_eq!(config.history_limit, None);
        assert_eq!(config.roundtrip_threshold, 1);
        assert_eq!(config.dither.kernel, "floyd-steinberg");
        assert_eq!(config.dither.levels, 2);
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = AppConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
filters_dir: /var/lib/imgproc/filters
history_limit: 20
roundtrip_threshold: 3
dither:
  kernel: stucki
  levels: 4
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.filters_dir, PathBuf::from("/var/lib/imgproc/filters"));
        assert_eq!(config.history_limit, Some(20));
        assert_eq!(config.roundtrip_threshold, 3);

        let options = config.dither_options();
        assert_eq!(options.kernel, DiffusionKernelType::Stucki);
        assert_eq!(options.levels, Levels::uniform(4));
    }

    #[test]
    fn test_partial_dither_section() {
        let config = AppConfig::from_yaml_str("dither:\n  levels: 3\n").unwrap();
        assert_eq!(config.dither.kernel, "floyd-steinberg");
        assert_eq!(config.dither.levels, 3);
    }

    #[test]
    fn test_unknown_dither_kernel_falls_back() {
        let config = AppConfig::from_yaml_str("dither:\n  kernel: jarvis\n").unwrap();
        assert!(config.dither.options().is_err());
        assert_eq!(config.dither_options(), DitherOptions::new());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load(Path::new("/nonexistent/imgproc/config.yaml"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "history_limit: [not, a, number]").unwrap();
        assert_eq!(AppConfig::load(&path), AppConfig::default());
    }
}
