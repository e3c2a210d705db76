//! Shader loading and GPU rendering for backdrop shader backgrounds.
//!
//! This crate provides:
//!
//! - Shader-toy style GLSL and WGSL loading with alias resolution
//! - naga transpilation and validation, plus a load-time uniform layout check
//! - A wgpu renderer that draws the background quad each frame
//! - Frame clock and touch tracking feeding the uniform block

pub mod error;
pub mod renderer;
pub mod shader;

// Re-export main public types
pub use error::RenderError;
pub use renderer::{BackdropRenderer, FrameClock, FrameTiming, TouchTracker, UniformState};
pub use shader::{
    CompiledShader, ShaderLanguage, UniformLayout, compile_shader, compile_shader_file,
};

// Re-export the layout crate for convenience
pub use backdrop_layout as layout;
