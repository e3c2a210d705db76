//! Typed error types for backdrop-render.
//!
//! Callers at the crate boundary can match on specific variants instead of
//! relying on opaque `anyhow` strings.

use backdrop_layout::LayoutError;
use thiserror::Error;

/// Top-level error type for shader loading and rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    // -----------------------------------------------------------------------
    // GPU initialisation
    // -----------------------------------------------------------------------
    /// A suitable wgpu GPU adapter could not be found for the given surface.
    #[error("GPU adapter not found: no compatible GPU adapter available for this surface")]
    AdapterNotFound,

    /// The wgpu device could not be created or the device was lost.
    #[error("GPU device error: {0}")]
    DeviceError(String),

    /// The wgpu surface could not be created for the window.
    #[error("GPU surface creation failed: {0}")]
    SurfaceCreation(String),

    // -----------------------------------------------------------------------
    // Shader errors
    // -----------------------------------------------------------------------
    /// The shader source file could not be read from disk.
    #[error("Shader file read failed for '{path}': {source}")]
    ShaderFileRead {
        /// Path to the shader file that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file extension does not name a supported shader language.
    #[error("Unsupported shader language for '{0}' (expected .glsl, .frag, .fs or .wgsl)")]
    UnsupportedLanguage(String),

    /// The shader references an alias its uniform block cannot resolve.
    #[error("Shader '{name}': {source}")]
    UnresolvedAlias {
        /// Shader name or path.
        name: String,
        /// The alias failure.
        #[source]
        source: LayoutError,
    },

    /// The GLSL source could not be parsed.
    #[error("GLSL parse error in '{name}':\n{details}")]
    GlslParse {
        /// Shader name or path.
        name: String,
        /// Human-readable parse error messages.
        details: String,
    },

    /// The WGSL source could not be parsed.
    #[error("WGSL parse error for '{name}': {details}")]
    WgslParse {
        /// Shader name or path.
        name: String,
        /// Human-readable parse error details.
        details: String,
    },

    /// The shader module failed naga validation.
    #[error("Shader validation failed for '{name}': {details}")]
    ShaderValidation {
        /// Shader name or path.
        name: String,
        /// Human-readable validation error details.
        details: String,
    },

    /// WGSL generation (from the naga IR) failed.
    #[error("WGSL code generation failed for '{name}': {details}")]
    WgslGeneration {
        /// Shader name or path.
        name: String,
        /// Human-readable generation error details.
        details: String,
    },

    /// The uniform block the shader was compiled with disagrees with the host.
    #[error("Uniform layout mismatch in '{name}': {details}")]
    LayoutMismatch {
        /// Shader name or path.
        name: String,
        /// Which member or size disagreed.
        details: String,
    },

    /// The host-side block itself violates std140.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    // -----------------------------------------------------------------------
    // Surface / presentation
    // -----------------------------------------------------------------------
    /// `Surface::get_current_texture()` failed (timeout, outdated, lost, ...).
    #[error("GPU surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

// ---------------------------------------------------------------------------
// Convenience conversions from common upstream error types
// ---------------------------------------------------------------------------

impl From<wgpu::CreateSurfaceError> for RenderError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        RenderError::SurfaceCreation(e.to_string())
    }
}

impl From<wgpu::RequestDeviceError> for RenderError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        RenderError::DeviceError(e.to_string())
    }
}

impl From<wgpu::RequestAdapterError> for RenderError {
    fn from(_: wgpu::RequestAdapterError) -> Self {
        RenderError::AdapterNotFound
    }
}
