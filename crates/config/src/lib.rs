//! Configuration management for semchunk
//!
//! This crate provides a validated configuration system with support for:
//! - Multiple formats (YAML, TOML, JSON)
//! - Config validation with helpful error messages
//! - Config merging (file + environment + explicit overrides)
//! - Type-safe configuration structs
//!
//! # Example
//!
//! ```no_run
//! use semchunk_config::Config;
//!
//! // Load from default location (.semchunk.{toml,yml,yaml,json})
//! let config = Config::load()?;
//!
//! // Or load from specific file
//! let config = Config::from_file("path/to/config.toml")?;
//!
//! let budget = config.chunking.max_tokens;
//! # Ok::<(), semchunk_config::ConfigError>(())
//! ```

pub mod error;
pub mod loader;
pub mod types;
pub mod validation;

pub use error::{ConfigError, Result};
pub use loader::{ConfigBuilder, ConfigLayer};
pub use types::*;

/// Trait for config validation
pub use validation::Validate;
