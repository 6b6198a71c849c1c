//! Layer application
//!
//! Sources are applied in precedence order; every setting a layer names
//! replaces the current value, whatever that value is.

use super::layer::{BoundaryLayer, ChunkingLayer, ConfigLayer, NormalizeLayer, TokenizerLayer};
use crate::{types::*, Config};

/// Apply `layer` on top of `base`
pub fn merge(mut base: Config, layer: ConfigLayer) -> Config {
    apply_chunking(&mut base.chunking, layer.chunking);
    apply_normalize(&mut base.normalize, layer.normalize);
    apply_boundaries(&mut base.boundaries, layer.boundaries);
    apply_tokenizer(&mut base.tokenizer, layer.tokenizer);

    base
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn apply_chunking(config: &mut ChunkingConfig, layer: ChunkingLayer) {
    set(&mut config.max_tokens, layer.max_tokens);
    set(&mut config.overlap_tokens, layer.overlap_tokens);
    set(&mut config.strategy, layer.strategy);
}

fn apply_normalize(config: &mut NormalizeConfig, layer: NormalizeLayer) {
    set(&mut config.strip_control_chars, layer.strip_control_chars);
}

fn apply_boundaries(config: &mut BoundaryConfig, layer: BoundaryLayer) {
    set(&mut config.heading_marker, layer.heading_marker);
}

fn apply_tokenizer(config: &mut TokenizerConfig, layer: TokenizerLayer) {
    set(&mut config.encoding, layer.encoding);
}
