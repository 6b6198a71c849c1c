//! Layered configuration loading
//!
//! Defaults first, then config files, the `SEMCHUNK_*` environment and
//! caller overrides, each applied as a [`ConfigLayer`]. The merged result is
//! validated once at the end, so a file may set `overlap_tokens` and leave
//! `max_tokens` to the environment.

pub mod env;
pub mod file;
pub mod formats;
pub mod layer;
pub mod merge;

pub use layer::ConfigLayer;

use crate::{Config, Result, Validate};
use std::path::{Path, PathBuf};

/// Format for configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

/// File names searched by [`Config::load`], in order
pub const DEFAULT_PATHS: &[&str] = &[
    ".semchunk.toml",
    ".semchunk.yml",
    ".semchunk.yaml",
    ".semchunk.json",
];

#[derive(Debug, Clone)]
enum Source {
    File(PathBuf),
    Environment,
    Layer(ConfigLayer),
}

/// Collects config sources, later ones taking precedence
///
/// ```no_run
/// use semchunk_config::{ConfigBuilder, ConfigLayer};
///
/// let config = ConfigBuilder::new()
///     .with_file(".semchunk.toml")
///     .with_env()
///     .with_overrides(ConfigLayer::budget(512, 32))
///     .build()?;
/// # Ok::<(), semchunk_config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    sources: Vec<Source>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sources.push(Source::File(path.as_ref().to_path_buf()));
        self
    }

    /// Overlay `SEMCHUNK_<SECTION>_<FIELD>` variables from the process
    /// environment
    pub fn with_env(mut self) -> Self {
        self.sources.push(Source::Environment);
        self
    }

    /// Overlay only the settings named in `layer`
    pub fn with_overrides(mut self, layer: ConfigLayer) -> Self {
        self.sources.push(Source::Layer(layer));
        self
    }

    /// Overlay a complete config; every one of its fields wins over earlier
    /// sources
    pub fn with_config(self, config: Config) -> Self {
        self.with_overrides(ConfigLayer::from(config))
    }

    /// Apply every source in order and validate the result
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        for source in self.sources {
            let layer = match source {
                Source::File(path) => file::read_layer(&path)?,
                Source::Environment => env::from_env()?.unwrap_or_default(),
                Source::Layer(layer) => layer,
            };
            config = merge::merge(config, layer);
        }

        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Config from the first default file in the working directory, then
    /// the environment
    pub fn load() -> Result<Self> {
        Self::load_from_dir(".")
    }

    /// Same as [`Config::load`], searching inside `dir`
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let found = DEFAULT_PATHS
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file());

        let builder = match found {
            Some(path) => ConfigBuilder::new().with_file(path),
            None => ConfigBuilder::new(),
        };
        builder.with_env().build()
    }

    /// Config from one file plus the environment
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        ConfigBuilder::new().with_file(path).with_env().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigError, SplitStrategy};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_sources_gives_defaults() {
        assert_eq!(ConfigBuilder::new().build().unwrap(), Config::default());
    }

    #[test]
    fn test_later_layer_wins() {
        let mut strategy = ConfigLayer::default();
        strategy.chunking.strategy = Some(SplitStrategy::Split);

        let config = ConfigBuilder::new()
            .with_overrides(ConfigLayer::budget(512, 32))
            .with_overrides(strategy)
            .with_overrides(ConfigLayer::budget(256, 16))
            .build()
            .unwrap();

        assert_eq!(config.chunking.max_tokens, 256);
        assert_eq!(config.chunking.overlap_tokens, 16);
        assert_eq!(config.chunking.strategy, SplitStrategy::Split);
    }

    #[test]
    fn test_full_config_replaces_earlier_layers() {
        let mut strategy = ConfigLayer::default();
        strategy.chunking.strategy = Some(SplitStrategy::Split);

        let config = ConfigBuilder::new()
            .with_overrides(strategy)
            .with_config(Config::with_budget(64, 4))
            .build()
            .unwrap();
        assert_eq!(config, Config::with_budget(64, 4));
    }

    #[test]
    fn test_merged_result_is_validated() {
        let err = ConfigBuilder::new()
            .with_overrides(ConfigLayer::budget(8, 8))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }
}
