//! GPU interchange layout for backdrop shader backgrounds.
//!
//! This crate pins the byte layout shared by host code and shader code:
//!
//! - [`Vertex2D`]: per-vertex input (attribute 0 = position, attribute 1 = texCoords)
//! - [`ProjectedVertex`]: vertex stage output (clip-space position + texCoords)
//! - [`Uniforms`]: per-frame uniform block (resolution, time, deltaTime, frameIndex)
//! - [`TouchUniforms`]: the same block extended with touch input
//! - Shader-toy aliases (`iGlobalTime`, `iResolution`, `iTimeDelta`, `iTouches`, ...)
//!   resolved against a block's field table
//!
//! All layouts follow GLSL std140 rules so the same field table can generate
//! both GLSL and WGSL declarations.

pub mod alias;
pub mod block;
pub mod error;
pub mod field;
pub mod uniforms;
pub mod vertex;

pub use alias::{
    SHADERTOY_ALIASES, ShaderAlias, check_aliases, expand_aliases, find_alias,
    referenced_aliases, resolve_aliases,
};
pub use block::{
    FrameInputs, UNIFORM_BINDING, UNIFORM_GROUP, UNIFORMS_INSTANCE, UniformBlock, check_block,
};
pub use error::LayoutError;
pub use field::{FieldKind, UniformField, align_to};
pub use uniforms::{MAX_TOUCHES, Touch, TouchUniforms, Uniforms, pack_frame_index};
pub use vertex::{
    FULLSCREEN_QUAD, POSITION_LOCATION, ProjectedVertex, TEX_COORDS_LOCATION, Vertex2D,
};
