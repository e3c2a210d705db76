//! Hot-reload support for the background renderer.
//!
//! Replaces the pipeline from new shader source at runtime without
//! recreating buffers. Called by the file watcher when the shader file on
//! disk changes.

use std::path::Path;
use std::time::Instant;

use backdrop_layout::UniformBlock;
use wgpu::*;

use super::BackdropRenderer;
use super::pipeline::create_render_pipeline;
use crate::error::RenderError;
use crate::shader::{CompiledShader, ShaderLanguage, compile_shader, compile_shader_file};

impl<B: UniformBlock> BackdropRenderer<B> {
    /// Reload the shader from a source string.
    ///
    /// Compiles and validates the source against block `B` first; on failure
    /// the current pipeline stays in place and the error is returned.
    ///
    /// # Arguments
    /// * `device` - The wgpu device
    /// * `source` - Shader source code
    /// * `name`   - Shader name used for diagnostics
    /// * `language` - Source language
    pub fn reload_from_source(
        &mut self,
        device: &Device,
        source: &str,
        name: &str,
        language: ShaderLanguage,
    ) -> Result<(), RenderError> {
        let shader = compile_shader::<B>(source, name, language)?;
        self.install(device, &shader);
        Ok(())
    }

    /// Reload the shader from a file.
    pub fn reload_from_file(&mut self, device: &Device, path: &Path) -> Result<(), RenderError> {
        let shader = compile_shader_file::<B>(path)?;
        self.install(device, &shader);
        Ok(())
    }

    fn install(&mut self, device: &Device, shader: &CompiledShader) {
        let shader_module = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Backdrop Shader Module (reloaded)"),
            source: ShaderSource::Wgsl(shader.wgsl.as_str().into()),
        });

        self.pipeline = create_render_pipeline(
            device,
            &shader_module,
            &self.bind_group_layout,
            self.surface_format,
            Some("Backdrop Pipeline (reloaded)"),
        );
        self.shader_name = shader.name.clone();
        self.state.clock_mut().reset(Instant::now());

        log::info!("Backdrop shader reloaded: {}", shader.name);
    }
}
