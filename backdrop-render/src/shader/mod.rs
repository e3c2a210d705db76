//! Shader loading: alias resolution, transpilation, validation and the
//! load-time layout check.
//!
//! Background shaders are written shader-toy style against the uniform
//! block `B`:
//! - `iResolution`: viewport resolution in pixels (vec2)
//! - `iGlobalTime` / `iTime`: animation time in seconds
//! - `iTimeDelta`: seconds since the previous frame
//! - `iFrame`: frame counter (int)
//! - `iTouches` / `iTouchCount`: touch slots, only with a touch-enabled block

use std::path::Path;

use backdrop_layout::{UniformBlock, check_aliases, check_block};

pub mod glsl;
pub mod layout_check;
pub mod preamble;
pub mod wgsl;

pub use layout_check::{UniformLayout, check_uniform_layout, uniform_layout};
pub use preamble::{FRAGMENT_ENTRY, VERTEX_ENTRY};

use crate::error::RenderError;

/// Source language of a user shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderLanguage {
    /// Shader-toy style GLSL with `mainImage(out vec4, in vec2)`
    Glsl,
    /// WGSL with `fn mainImage(vec2<f32>) -> vec4<f32>`
    Wgsl,
}

impl ShaderLanguage {
    /// Detect the language from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "glsl" | "frag" | "fs" => Some(ShaderLanguage::Glsl),
            "wgsl" => Some(ShaderLanguage::Wgsl),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderLanguage::Glsl => "GLSL",
            ShaderLanguage::Wgsl => "WGSL",
        }
    }
}

/// A shader ready to hand to wgpu.
#[derive(Debug, Clone)]
pub struct CompiledShader {
    /// Shader name or path, used in diagnostics and labels
    pub name: String,
    /// Language the shader was written in
    pub language: ShaderLanguage,
    /// Complete WGSL with `vs_main` and `fs_main`
    pub wgsl: String,
    /// Uniform layout as naga computed it
    pub uniform_layout: UniformLayout,
}

/// Compile a shader-toy style shader against uniform block `B`.
///
/// Fails before any GPU work if the shader references an alias `B` cannot
/// resolve, if naga rejects it, or if the compiled uniform block disagrees
/// with `B`'s host layout.
pub fn compile_shader<B: UniformBlock>(
    source: &str,
    name: &str,
    language: ShaderLanguage,
) -> Result<CompiledShader, RenderError> {
    check_block::<B>()?;
    check_aliases::<B>(source).map_err(|source| RenderError::UnresolvedAlias {
        name: name.to_string(),
        source,
    })?;

    let wgsl_source = match language {
        ShaderLanguage::Glsl => glsl::transpile_glsl::<B>(source, name)?,
        ShaderLanguage::Wgsl => wgsl::assemble_wgsl::<B>(source, name)?,
    };

    // Pre-validate the final WGSL so wgpu never sees an invalid module
    let module =
        naga::front::wgsl::parse_str(&wgsl_source).map_err(|e| RenderError::WgslParse {
            name: name.to_string(),
            details: e.emit_to_string(&wgsl_source),
        })?;
    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| RenderError::ShaderValidation {
        name: name.to_string(),
        details: format!("{:?}", e),
    })?;

    let uniform_layout = check_uniform_layout::<B>(&module, name)?;

    log::info!(
        "Compiled {} shader '{}' ({} bytes source -> {} bytes WGSL, block {})",
        language.name(),
        name,
        source.len(),
        wgsl_source.len(),
        B::BLOCK_NAME
    );
    log::debug!("Generated WGSL:\n{}", wgsl_source);

    Ok(CompiledShader {
        name: name.to_string(),
        language,
        wgsl: wgsl_source,
        uniform_layout,
    })
}

/// Read and compile a shader file; the language comes from its extension.
pub fn compile_shader_file<B: UniformBlock>(path: &Path) -> Result<CompiledShader, RenderError> {
    let language = ShaderLanguage::from_path(path)
        .ok_or_else(|| RenderError::UnsupportedLanguage(path.display().to_string()))?;
    let source = std::fs::read_to_string(path).map_err(|source| RenderError::ShaderFileRead {
        path: path.display().to_string(),
        source,
    })?;
    compile_shader::<B>(&source, &path.display().to_string(), language)
}
