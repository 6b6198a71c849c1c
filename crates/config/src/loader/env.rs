//! Environment variable configuration overlay
//!
//! Supports environment variables in the format:
//! `SEMCHUNK_<section>_<field>=value`
//!
//! Examples:
//! - `SEMCHUNK_CHUNKING_MAX_TOKENS=512`
//! - `SEMCHUNK_CHUNKING_STRATEGY=split`
//! - `SEMCHUNK_TOKENIZER_ENCODING=cl100k_base`

use super::layer::{BoundaryLayer, ChunkingLayer, ConfigLayer, NormalizeLayer, TokenizerLayer};
use crate::{error::ConfigError, types::*, Result};
use std::env;

pub const ENV_PREFIX: &str = "SEMCHUNK_";

/// Parse configuration from the process environment
pub fn from_env() -> Result<Option<ConfigLayer>> {
    from_vars(env::vars())
}

/// Parse configuration from `(key, value)` pairs; keys without the
/// `SEMCHUNK_` prefix are ignored
pub fn from_vars<I>(vars: I) -> Result<Option<ConfigLayer>>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut layer = ConfigLayer::default();
    let mut found_any = false;

    for (key, value) in vars {
        let Some(stripped) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        found_any = true;
        apply_env_var(&mut layer, stripped, &value)?;
    }

    Ok(found_any.then_some(layer))
}

/// Record a single environment variable (prefix already stripped) in the layer
fn apply_env_var(layer: &mut ConfigLayer, key: &str, value: &str) -> Result<()> {
    let Some((section, field)) = key.split_once('_') else {
        return Err(ConfigError::EnvVarError {
            var: format!("{}{}", ENV_PREFIX, key),
            message: "Expected format: SEMCHUNK_<section>_<field>".to_string(),
        });
    };

    let section = section.to_lowercase();
    let field = field.to_lowercase();

    match section.as_str() {
        "chunking" => apply_chunking_var(&mut layer.chunking, &field, value),
        "normalize" => apply_normalize_var(&mut layer.normalize, &field, value),
        "boundaries" => apply_boundary_var(&mut layer.boundaries, &field, value),
        "tokenizer" => apply_tokenizer_var(&mut layer.tokenizer, &field, value),
        _ => Err(ConfigError::EnvVarError {
            var: format!("{}{}", ENV_PREFIX, key),
            message: format!("Unknown section: {}", section),
        }),
    }
}

fn var_name(section: &str, field: &str) -> String {
    format!("{}{}_{}", ENV_PREFIX, section, field.to_uppercase())
}

fn unknown_field(section: &str, field: &str) -> ConfigError {
    ConfigError::EnvVarError {
        var: var_name(section, field),
        message: format!("Unknown field: {}", field),
    }
}

fn parse_usize(section: &str, field: &str, value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| ConfigError::EnvVarError {
        var: var_name(section, field),
        message: format!("Invalid integer: {}", value),
    })
}

fn apply_chunking_var(layer: &mut ChunkingLayer, field: &str, value: &str) -> Result<()> {
    match field {
        "max_tokens" => layer.max_tokens = Some(parse_usize("CHUNKING", field, value)?),
        "overlap_tokens" => layer.overlap_tokens = Some(parse_usize("CHUNKING", field, value)?),
        "strategy" => layer.strategy = Some(SplitStrategy::parse(value)?),
        _ => return Err(unknown_field("CHUNKING", field)),
    }
    Ok(())
}

fn apply_normalize_var(layer: &mut NormalizeLayer, field: &str, value: &str) -> Result<()> {
    match field {
        "strip_control_chars" => {
            layer.strip_control_chars = Some(parse_bool("NORMALIZE", field, value)?)
        }
        _ => return Err(unknown_field("NORMALIZE", field)),
    }
    Ok(())
}

fn apply_boundary_var(layer: &mut BoundaryLayer, field: &str, value: &str) -> Result<()> {
    match field {
        "heading_marker" => {
            let mut chars = value.chars();
            layer.heading_marker = match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => {
                    return Err(ConfigError::EnvVarError {
                        var: var_name("BOUNDARIES", field),
                        message: format!("Expected a single character, got {:?}", value),
                    })
                }
            };
        }
        _ => return Err(unknown_field("BOUNDARIES", field)),
    }
    Ok(())
}

fn apply_tokenizer_var(layer: &mut TokenizerLayer, field: &str, value: &str) -> Result<()> {
    match field {
        "encoding" => layer.encoding = Some(TokenizerEncoding::parse(value)?),
        _ => return Err(unknown_field("TOKENIZER", field)),
    }
    Ok(())
}

fn parse_bool(section: &str, field: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::EnvVarError {
            var: var_name(section, field),
            message: format!(
                "Invalid boolean: {} (use true/false, 1/0, yes/no, on/off)",
                value
            ),
        }),
    }
}
