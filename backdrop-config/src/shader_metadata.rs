//! Shader metadata parsing and settings resolution.
//!
//! Parses embedded YAML metadata from shader files in the format:
//!
//! ```glsl
//! /*! backdrop shader metadata
//! name: "Plasma"
//! author: "Jane Doe"
//! description: "Slow plasma waves"
//! version: "1.0.0"
//!
//! defaults:
//!   animation_speed: 0.5
//!   touches: true
//! */
//! ```
//!
//! Metadata defaults sit between explicit user config and built-in defaults:
//! a value set in `config.yaml` wins, then the shader's own default, then the
//! global default.

use std::path::Path;

use crate::config::Config;
use crate::defaults;
use crate::types::{ResolvedShaderSettings, ShaderMetadata};

/// Marker string that identifies the start of shader metadata block
const METADATA_MARKER: &str = "/*! backdrop shader metadata";

/// Extract the YAML block content from a shader source string.
fn extract_yaml_block(source: &str) -> Option<&str> {
    let start_marker = source.find(METADATA_MARKER)?;

    let yaml_start = source[start_marker + METADATA_MARKER.len()..]
        .find('\n')
        .map(|i| start_marker + METADATA_MARKER.len() + i + 1)?;

    let yaml_end = source[yaml_start..].find("*/")?;
    let yaml_content = &source[yaml_start..yaml_start + yaml_end];

    Some(yaml_content.trim())
}

/// Parse shader metadata from shader source code.
///
/// # Returns
/// * `Some(ShaderMetadata)` if metadata was found and parsed successfully
/// * `None` if no metadata block was found or parsing failed
pub fn parse_shader_metadata(source: &str) -> Option<ShaderMetadata> {
    let yaml_trimmed = extract_yaml_block(source)?;

    match serde_yaml_ng::from_str(yaml_trimmed) {
        Ok(metadata) => {
            log::debug!("Parsed shader metadata: {:?}", metadata);
            Some(metadata)
        }
        Err(e) => {
            log::warn!("Failed to parse shader metadata YAML: {}", e);
            log::debug!("YAML content was:\n{}", yaml_trimmed);
            None
        }
    }
}

/// Parse shader metadata from a file path.
pub fn parse_shader_metadata_from_file(path: &Path) -> Option<ShaderMetadata> {
    match std::fs::read_to_string(path) {
        Ok(source) => parse_shader_metadata(&source),
        Err(e) => {
            log::warn!("Failed to read shader file '{}': {}", path.display(), e);
            None
        }
    }
}

/// Merge shader metadata defaults with the configuration.
pub fn resolve_shader_settings(
    metadata: Option<&ShaderMetadata>,
    config: &Config,
) -> ResolvedShaderSettings {
    let meta_defaults = metadata.map(|m| &m.defaults);

    ResolvedShaderSettings {
        animation_enabled: config.animation_enabled,
        animation_speed: config
            .animation_speed
            .or_else(|| meta_defaults.and_then(|m| m.animation_speed))
            .unwrap_or_else(defaults::animation_speed),
        touches: config
            .touches_enabled
            .or_else(|| meta_defaults.and_then(|m| m.touches))
            .unwrap_or(false),
    }
}
