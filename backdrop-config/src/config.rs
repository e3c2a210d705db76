//! The `Config` struct, persistence, and path resolution.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::ConfigError;
use crate::types::{PowerPreference, VsyncMode};

/// Application configuration, stored as YAML.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Shader file to draw; absolute, `~/`-prefixed, or relative to the shaders directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shader: Option<String>,

    #[serde(default = "defaults::shader_enabled")]
    pub shader_enabled: bool,

    /// When false, `iGlobalTime` stays at 0.0
    #[serde(default = "defaults::animation_enabled")]
    pub animation_enabled: bool,

    /// Animation speed multiplier; unset falls back to shader metadata, then 1.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_speed: Option<f32>,

    /// Force the touch uniform block on or off; unset falls back to shader metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touches_enabled: Option<bool>,

    #[serde(default = "defaults::window_title")]
    pub window_title: String,

    #[serde(default = "defaults::window_width")]
    pub window_width: u32,

    #[serde(default = "defaults::window_height")]
    pub window_height: u32,

    #[serde(default)]
    pub vsync_mode: VsyncMode,

    #[serde(default)]
    pub power_preference: PowerPreference,

    /// Reload the shader when its file changes
    #[serde(default = "defaults::hot_reload")]
    pub hot_reload: bool,

    #[serde(default = "defaults::hot_reload_delay_ms")]
    pub hot_reload_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shader: None,
            shader_enabled: defaults::shader_enabled(),
            animation_enabled: defaults::animation_enabled(),
            animation_speed: None,
            touches_enabled: None,
            window_title: defaults::window_title(),
            window_width: defaults::window_width(),
            window_height: defaults::window_height(),
            vsync_mode: VsyncMode::default(),
            power_preference: PowerPreference::default(),
            hot_reload: defaults::hot_reload(),
            hot_reload_delay_ms: defaults::hot_reload_delay_ms(),
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save() {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            log::info!("Default config created successfully");
            Ok(config)
        }
    }

    /// Load and validate configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Config = serde_yaml_ng::from_str(&contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::Parse)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::Io)?;
        fs::rename(&temp_path, path).map_err(ConfigError::Io)?;

        Ok(())
    }

    /// Reject values the renderer cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(speed) = self.animation_speed
            && (!speed.is_finite() || speed < 0.0)
        {
            return Err(ConfigError::Validation(format!(
                "animation_speed must be a non-negative number, got {speed}"
            )));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::Validation(format!(
                "window size must be non-zero, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        if self.shader.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "shader must not be an empty string".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("backdrop")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("backdrop")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the shaders directory path
    pub fn shaders_dir() -> PathBuf {
        Self::config_dir().join("shaders")
    }

    /// Resolve a shader name to a file path.
    ///
    /// Absolute paths are returned unchanged, `~/` expands to the home
    /// directory, and anything else is looked up under [`Self::shaders_dir`].
    pub fn resolve_shader_path(name: &str) -> PathBuf {
        if let Some(rest) = name.strip_prefix("~/")
            && let Some(home_dir) = dirs::home_dir()
        {
            return home_dir.join(rest);
        }

        let path = PathBuf::from(name);
        if path.is_absolute() {
            path
        } else {
            Self::shaders_dir().join(path)
        }
    }

    /// Path of the configured shader, if one is set and enabled.
    pub fn shader_path(&self) -> Option<PathBuf> {
        if !self.shader_enabled {
            return None;
        }
        self.shader.as_deref().map(Self::resolve_shader_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.shader.is_none());
        assert!(config.shader_enabled);
        assert!(config.animation_enabled);
        assert_eq!(config.vsync_mode, VsyncMode::Fifo);
        assert_eq!(config.hot_reload_delay_ms, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: Config = serde_yaml_ng::from_str("{}").expect("empty mapping parses");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "shader: plasma.glsl\nvsync_mode: mailbox\nanimation_speed: 0.25\n";
        let config: Config = serde_yaml_ng::from_str(yaml).expect("parses");
        assert_eq!(config.shader.as_deref(), Some("plasma.glsl"));
        assert_eq!(config.vsync_mode, VsyncMode::Mailbox);
        assert_eq!(config.animation_speed, Some(0.25));
        assert_eq!(config.window_width, 1280);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("config.yaml");

        let config = Config {
            shader: Some("waves.wgsl".to_string()),
            touches_enabled: Some(true),
            window_width: 640,
            power_preference: PowerPreference::HighPerformance,
            ..Config::default()
        };
        config.save_to(&path).expect("save");

        assert!(path.exists());
        assert!(!path.with_extension("yaml.tmp").exists());

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "window_width: [oops").expect("write");

        let err = Config::load_from(&path).expect_err("invalid yaml");
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = Config::load_from(&temp_dir.path().join("missing.yaml")).expect_err("missing");
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let negative = Config {
            animation_speed: Some(-1.0),
            ..Config::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(ConfigError::Validation(_))
        ));

        let zero = Config {
            window_height: 0,
            ..Config::default()
        };
        assert!(matches!(zero.validate(), Err(ConfigError::Validation(_))));

        let blank = Config {
            shader: Some("  ".to_string()),
            ..Config::default()
        };
        assert!(matches!(blank.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_resolve_shader_path() {
        let absolute = std::env::temp_dir().join("abs.glsl");
        assert_eq!(
            Config::resolve_shader_path(absolute.to_str().expect("utf-8 temp dir")),
            absolute
        );
        assert_eq!(
            Config::resolve_shader_path("crt.glsl"),
            Config::shaders_dir().join("crt.glsl")
        );
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                Config::resolve_shader_path("~/shaders/a.wgsl"),
                home.join("shaders/a.wgsl")
            );
        }
    }

    #[test]
    fn test_shader_path_respects_enabled_flag() {
        let mut config = Config {
            shader: Some("crt.glsl".to_string()),
            ..Config::default()
        };
        assert!(config.shader_path().is_some());
        config.shader_enabled = false;
        assert!(config.shader_path().is_none());
    }
}
