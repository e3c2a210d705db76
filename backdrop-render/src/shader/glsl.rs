//! Shader-toy style GLSL to WGSL.
//!
//! The user shader supplies `void mainImage(out vec4 fragColor, in vec2 fragCoord)`.
//! It is wrapped with the generated uniform block, the alias `#define`s and a
//! `main()` that feeds `fragCoord = texCoords * resolution`, then transpiled
//! with naga and joined to the shared vertex stage.

use backdrop_layout::{UNIFORMS_INSTANCE, UniformBlock};

use super::preamble::{
    FRAGMENT_ENTRY, glsl_alias_defines, glsl_uniform_block, wgsl_vertex_stage,
};
use crate::error::RenderError;

/// Wrap a `mainImage` shader into a complete GLSL 450 fragment shader.
pub fn wrap_glsl<B: UniformBlock>(glsl_source: &str) -> String {
    format!(
        r#"#version 450

// Uniforms - must match host struct layout (std140)
{block}
// Shader-toy aliases
{defines}
// Input from vertex shader (ProjectedVertex.texCoords)
layout(location = 0) in vec2 v_texCoords;

// Output color
layout(location = 0) out vec4 outColor;

// ============ User shader code begins ============

{glsl_source}

// ============ User shader code ends ============

void main() {{
    vec2 fragCoord = v_texCoords * {UNIFORMS_INSTANCE}.resolution;
    vec4 shaderColor = vec4(0.0);
    mainImage(shaderColor, fragCoord);
    outColor = shaderColor;
}}
"#,
        block = glsl_uniform_block::<B>(),
        defines = glsl_alias_defines::<B>(),
    )
}

/// Transpile a `mainImage` GLSL shader into a complete WGSL module source.
pub fn transpile_glsl<B: UniformBlock>(glsl_source: &str, name: &str) -> Result<String, RenderError> {
    let wrapped_glsl = wrap_glsl::<B>(glsl_source);

    // Parse GLSL using naga
    let mut parser = naga::front::glsl::Frontend::default();
    let options = naga::front::glsl::Options::from(naga::ShaderStage::Fragment);

    let module = parser
        .parse(&options, &wrapped_glsl)
        .map_err(|errors| RenderError::GlslParse {
            name: name.to_string(),
            details: errors
                .errors
                .iter()
                .map(|e| format!("  {:?}", e.kind))
                .collect::<Vec<_>>()
                .join("\n"),
        })?;

    // Validate the module
    let info = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| RenderError::ShaderValidation {
        name: name.to_string(),
        details: format!("{:?}", e),
    })?;

    // Generate WGSL output for fragment shader
    let mut fragment_wgsl = String::new();
    let mut writer =
        naga::back::wgsl::Writer::new(&mut fragment_wgsl, naga::back::wgsl::WriterFlags::empty());
    writer
        .write(&module, &info)
        .map_err(|e| RenderError::WgslGeneration {
            name: name.to_string(),
            details: format!("{:?}", e),
        })?;

    // naga names the GLSL entry point `main`
    let fragment_wgsl = fragment_wgsl.replace("fn main(", &format!("fn {FRAGMENT_ENTRY}("));

    Ok(format!(
        r#"// Auto-generated WGSL from GLSL shader: {name}

{vertex}
// ============ Fragment shader (transpiled from GLSL) ============

{fragment_wgsl}
"#,
        vertex = wgsl_vertex_stage(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_layout::Uniforms;

    #[test]
    fn test_wrapper_places_user_code_between_markers() {
        let wrapped = wrap_glsl::<Uniforms>("void mainImage(out vec4 c, in vec2 p) { c = vec4(1.0); }");
        let begin = wrapped.find("User shader code begins").expect("begin marker");
        let user = wrapped.find("void mainImage").expect("user code");
        let end = wrapped.find("User shader code ends").expect("end marker");
        assert!(begin < user && user < end);
        assert!(wrapped.starts_with("#version 450"));
        assert!(wrapped.contains("} uniforms;"));
    }
}
