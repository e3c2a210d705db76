//! Background renderer: draws a full-viewport quad with a compiled shader.
//!
//! Per frame the host calls [`BackdropRenderer::update`] (ticks the clock,
//! builds the uniform block, queues the upload) and then
//! [`BackdropRenderer::render`]. Uploads go through `Queue::write_buffer`,
//! which wgpu orders before any later submission, so the host never writes a
//! buffer the GPU is still reading.

use std::path::Path;
use std::time::Instant;

use backdrop_layout::{FULLSCREEN_QUAD, UNIFORM_GROUP, UniformBlock, Uniforms};
use wgpu::util::DeviceExt;
use wgpu::*;

pub mod clock;
mod hot_reload;
pub mod pipeline;
pub mod touches;
pub mod uniforms;

pub use clock::{FrameClock, FrameTiming};
pub use touches::TouchTracker;
pub use uniforms::UniformState;

use crate::error::RenderError;
use crate::shader::{CompiledShader, compile_shader_file};
use pipeline::{create_bind_group, create_bind_group_layout, create_render_pipeline};
use uniforms::create_uniform_buffer;

/// Renders a decorative shader background into a color target.
pub struct BackdropRenderer<B: UniformBlock = Uniforms> {
    /// The render pipeline for the current shader
    pub(crate) pipeline: RenderPipeline,
    /// Bind group for the uniform buffer
    pub(crate) bind_group: BindGroup,
    /// Bind group layout for recreating pipelines on reload
    pub(crate) bind_group_layout: BindGroupLayout,
    /// Uniform buffer for shader parameters
    pub(crate) uniform_buffer: Buffer,
    /// Full-viewport quad of `Vertex2D`
    pub(crate) vertex_buffer: Buffer,
    /// Surface format for compatibility
    pub(crate) surface_format: TextureFormat,
    /// Viewport, clock and touch state feeding the uniform block
    pub(crate) state: UniformState<B>,
    /// Name of the active shader, for logs and labels
    pub(crate) shader_name: String,
}

impl<B: UniformBlock> BackdropRenderer<B> {
    /// Create a renderer for an already compiled shader.
    ///
    /// # Arguments
    /// * `device` - The wgpu device
    /// * `surface_format` - Format of the color target
    /// * `width` / `height` - Initial viewport size in pixels
    /// * `shader` - Output of [`crate::shader::compile_shader`] for block `B`
    pub fn new(
        device: &Device,
        surface_format: TextureFormat,
        width: u32,
        height: u32,
        shader: &CompiledShader,
    ) -> Self {
        let bind_group_layout = create_bind_group_layout::<B>(device);
        let uniform_buffer = create_uniform_buffer::<B>(device);
        let bind_group = create_bind_group(device, &bind_group_layout, &uniform_buffer);

        let vertex_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
            label: Some("Backdrop Quad Vertices"),
            contents: bytemuck::cast_slice(&FULLSCREEN_QUAD),
            usage: BufferUsages::VERTEX,
        });

        let shader_module = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Backdrop Shader Module"),
            source: ShaderSource::Wgsl(shader.wgsl.as_str().into()),
        });
        let pipeline = create_render_pipeline(
            device,
            &shader_module,
            &bind_group_layout,
            surface_format,
            Some("Backdrop Pipeline"),
        );

        log::info!(
            "Backdrop renderer created for '{}' ({}x{}, {:?}, {} byte uniform block)",
            shader.name,
            width,
            height,
            surface_format,
            std::mem::size_of::<B>()
        );

        Self {
            pipeline,
            bind_group,
            bind_group_layout,
            uniform_buffer,
            vertex_buffer,
            surface_format,
            state: UniformState::new(width.max(1), height.max(1), Instant::now()),
            shader_name: shader.name.clone(),
        }
    }

    /// Compile a shader file and create a renderer for it.
    pub fn from_file(
        device: &Device,
        surface_format: TextureFormat,
        width: u32,
        height: u32,
        path: &Path,
    ) -> Result<Self, RenderError> {
        let shader = compile_shader_file::<B>(path)?;
        Ok(Self::new(device, surface_format, width, height, &shader))
    }

    /// Update the viewport size used for `resolution`.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.state.set_resolution(width, height);
    }

    /// Configure animation; disabled animation holds time at 0.0.
    pub fn set_animation(&mut self, enabled: bool, speed: f32) {
        let clock = self.state.clock_mut();
        clock.set_animation_enabled(enabled);
        clock.set_animation_speed(speed);
    }

    /// Touch input feeding `iTouches` (ignored by blocks without touches).
    pub fn touches_mut(&mut self) -> &mut TouchTracker {
        self.state.touches_mut()
    }

    /// Build this frame's uniform block and queue its upload.
    pub fn update(&mut self, queue: &Queue) -> B {
        let block = self.state.build(Instant::now());
        queue.write_buffer(&self.uniform_buffer, 0, block.as_bytes());
        block
    }

    /// The block most recently uploaded by [`Self::update`].
    pub fn last_uniforms(&self) -> &B {
        self.state.last()
    }

    pub fn shader_name(&self) -> &str {
        &self.shader_name
    }

    pub fn surface_format(&self) -> TextureFormat {
        self.surface_format
    }

    /// Record a draw of the background into `target`.
    ///
    /// With `clear` set the target is cleared first; otherwise the shader
    /// output is blended over its current contents.
    pub fn render(&self, encoder: &mut CommandEncoder, target: &TextureView, clear: Option<Color>) {
        let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Backdrop Render Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: Operations {
                    load: clear.map_or(LoadOp::Load, LoadOp::Clear),
                    store: StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(UNIFORM_GROUP, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..FULLSCREEN_QUAD.len() as u32, 0..1);
    }
}
