//! Config loading and shader settings resolution as the binary sees them.

use backdrop::cli::commands::{load_config, wants_touches};
use backdrop::config::{Config, VsyncMode};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_config_from_explicit_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.yaml");
    fs::write(
        &path,
        "shader: crt.glsl\nvsync_mode: immediate\nhot_reload: false\n",
    )
    .expect("write config");

    let config = load_config(Some(&path)).expect("config loads");
    assert_eq!(config.shader.as_deref(), Some("crt.glsl"));
    assert_eq!(config.vsync_mode, VsyncMode::Immediate);
    assert!(!config.hot_reload);
    assert_eq!(
        config.shader_path(),
        Some(Config::shaders_dir().join("crt.glsl"))
    );
}

#[test]
fn test_load_config_rejects_invalid_values() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.yaml");
    fs::write(&path, "animation_speed: -3.0\n").expect("write config");

    let err = load_config(Some(&path)).expect_err("negative speed");
    assert!(err.to_string().contains("animation_speed"));
}

#[test]
fn test_touch_block_follows_config_then_metadata() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let plain = temp_dir.path().join("plain.glsl");
    fs::write(
        &plain,
        "void mainImage(out vec4 c, in vec2 f) { c = vec4(f / iResolution, 0.0, 1.0); }",
    )
    .expect("write shader");

    assert!(!wants_touches(&plain, false, &Config::default()));

    let forced_on = Config {
        touches_enabled: Some(true),
        ..Config::default()
    };
    assert!(wants_touches(&plain, false, &forced_on));
}
