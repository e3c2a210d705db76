//! Enumerations and metadata types used by the configuration.

use serde::{Deserialize, Serialize};

/// VSync mode (presentation mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VsyncMode {
    /// No VSync - render as fast as possible (lowest latency, highest GPU usage)
    Immediate,
    /// Mailbox VSync - cap at monitor refresh rate with triple buffering (balanced)
    Mailbox,
    /// FIFO VSync - strict vsync with double buffering (lowest GPU usage, most compatible)
    #[default]
    Fifo,
}

/// GPU power preference for adapter selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PowerPreference {
    /// No preference - let the system decide (default)
    #[default]
    None,
    /// Prefer integrated GPU - saves battery
    LowPower,
    /// Prefer discrete GPU - maximum performance
    HighPerformance,
}

/// Defaults a shader can embed for itself.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ShaderDefaults {
    /// Animation speed multiplier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_speed: Option<f32>,
    /// Whether the shader expects touch input (`iTouches`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touches: Option<bool>,
}

/// Metadata embedded in a shader file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ShaderMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub defaults: ShaderDefaults,
}

/// Settings for one shader after merging metadata and config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedShaderSettings {
    pub animation_enabled: bool,
    pub animation_speed: f32,
    /// Use the touch-enabled uniform block
    pub touches: bool,
}
