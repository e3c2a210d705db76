//! Configuration for the backdrop shader viewer.
//!
//! Provides the YAML-backed [`Config`], the shader metadata block that shaders
//! can embed to carry their own defaults, and the enums shared with the
//! renderer.

pub mod config;
pub mod defaults;
pub mod error;
pub mod shader_metadata;
pub mod types;

pub use config::Config;
pub use error::ConfigError;
pub use shader_metadata::{
    parse_shader_metadata, parse_shader_metadata_from_file, resolve_shader_settings,
};
pub use types::{
    PowerPreference, ResolvedShaderSettings, ShaderDefaults, ShaderMetadata, VsyncMode,
};
