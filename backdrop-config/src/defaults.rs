//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on `Config`
//! fields.

pub fn shader_enabled() -> bool {
    true
}

pub fn animation_enabled() -> bool {
    true
}

pub fn animation_speed() -> f32 {
    1.0
}

pub fn window_title() -> String {
    "backdrop".to_string()
}

pub fn window_width() -> u32 {
    1280
}

pub fn window_height() -> u32 {
    720
}

pub fn hot_reload() -> bool {
    true
}

/// Debounce delay for hot reload (milliseconds)
pub fn hot_reload_delay_ms() -> u64 {
    100
}
