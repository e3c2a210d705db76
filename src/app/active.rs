//! The renderer in use, typed by the uniform block it was compiled against.

use std::path::Path;

use backdrop_config::ResolvedShaderSettings;
use backdrop_layout::{TouchUniforms, Uniforms};
use backdrop_render::{BackdropRenderer, RenderError, TouchTracker};

/// Run `$body` with `$r` bound to whichever renderer is active.
macro_rules! with_renderer {
    ($active:expr, $r:ident => $body:expr) => {
        match $active {
            ActiveRenderer::Base($r) => $body,
            ActiveRenderer::Touch($r) => $body,
        }
    };
}

pub enum ActiveRenderer {
    Base(BackdropRenderer<Uniforms>),
    Touch(BackdropRenderer<TouchUniforms>),
}

impl ActiveRenderer {
    /// Compile `path` against the block `settings` selects and build a renderer.
    pub fn build(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        (width, height): (u32, u32),
        path: &Path,
        settings: &ResolvedShaderSettings,
    ) -> Result<Self, RenderError> {
        let mut active = if settings.touches {
            ActiveRenderer::Touch(BackdropRenderer::from_file(
                device, format, width, height, path,
            )?)
        } else {
            ActiveRenderer::Base(BackdropRenderer::from_file(
                device, format, width, height, path,
            )?)
        };
        active.set_animation(settings);
        Ok(active)
    }

    pub fn uses_touches(&self) -> bool {
        matches!(self, ActiveRenderer::Touch(_))
    }

    pub fn shader_name(&self) -> &str {
        with_renderer!(self, r => r.shader_name())
    }

    pub fn set_animation(&mut self, settings: &ResolvedShaderSettings) {
        with_renderer!(self, r => r.set_animation(settings.animation_enabled, settings.animation_speed))
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        with_renderer!(self, r => r.resize(width, height))
    }

    /// Touches are tracked for both blocks; only the touch block uploads them.
    pub fn touches_mut(&mut self) -> &mut TouchTracker {
        with_renderer!(self, r => r.touches_mut())
    }

    /// Recompile from `path` in place, keeping the current pipeline on failure.
    pub fn reload_from_file(&mut self, device: &wgpu::Device, path: &Path) -> Result<(), RenderError> {
        with_renderer!(self, r => r.reload_from_file(device, path))
    }

    /// Upload this frame's uniforms and record the draw.
    pub fn draw(
        &mut self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
    ) {
        with_renderer!(self, r => {
            r.update(queue);
            r.render(encoder, target, Some(wgpu::Color::BLACK));
        })
    }
}
