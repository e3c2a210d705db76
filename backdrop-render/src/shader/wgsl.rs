//! Shader-toy style WGSL.
//!
//! WGSL has no preprocessor, so aliases are rewritten token by token before
//! the user code is joined to the generated declarations. The user shader
//! supplies `fn mainImage(fragCoord: vec2<f32>) -> vec4<f32>`.

use backdrop_layout::{UNIFORMS_INSTANCE, UniformBlock, expand_aliases};

use super::preamble::{FRAGMENT_ENTRY, wgsl_uniform_block, wgsl_vertex_stage};
use crate::error::RenderError;

/// Build a complete WGSL module source from a `mainImage` WGSL shader.
pub fn assemble_wgsl<B: UniformBlock>(wgsl_source: &str, name: &str) -> Result<String, RenderError> {
    let user_code =
        expand_aliases::<B>(wgsl_source).map_err(|source| RenderError::UnresolvedAlias {
            name: name.to_string(),
            source,
        })?;

    Ok(format!(
        r#"// Auto-generated WGSL from WGSL shader: {name}

// Uniforms - must match host struct layout
{block}
{vertex}
// ============ User shader code begins ============

{user_code}

// ============ User shader code ends ============

@fragment
fn {FRAGMENT_ENTRY}(projected: ProjectedVertex) -> @location(0) vec4<f32> {{
    return mainImage(projected.texCoords * {UNIFORMS_INSTANCE}.resolution);
}}
"#,
        block = wgsl_uniform_block::<B>(),
        vertex = wgsl_vertex_stage(),
    ))
}
