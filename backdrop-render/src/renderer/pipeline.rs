//! Pipeline and bind group creation for the background renderer.

use std::num::NonZeroU64;

use backdrop_layout::{UNIFORM_BINDING, UniformBlock, Vertex2D};
use wgpu::*;

use crate::shader::{FRAGMENT_ENTRY, VERTEX_ENTRY};

/// Create the bind group layout holding the uniform block.
///
/// The minimum binding size is the host struct size, so wgpu rejects a
/// buffer smaller than block `B`.
pub fn create_bind_group_layout<B: UniformBlock>(device: &Device) -> BindGroupLayout {
    device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("Backdrop Bind Group Layout"),
        entries: &[BindGroupLayoutEntry {
            binding: UNIFORM_BINDING,
            visibility: ShaderStages::VERTEX | ShaderStages::FRAGMENT,
            ty: BindingType::Buffer {
                ty: BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(std::mem::size_of::<B>() as u64),
            },
            count: None,
        }],
    })
}

/// Create the bind group for the uniform buffer.
pub fn create_bind_group(
    device: &Device,
    layout: &BindGroupLayout,
    uniform_buffer: &Buffer,
) -> BindGroup {
    device.create_bind_group(&BindGroupDescriptor {
        label: Some("Backdrop Bind Group"),
        layout,
        entries: &[BindGroupEntry {
            binding: UNIFORM_BINDING,
            resource: uniform_buffer.as_entire_binding(),
        }],
    })
}

/// Create the render pipeline for a compiled background shader.
///
/// # Arguments
/// * `device` - The wgpu device
/// * `shader_module` - Compiled shader module with `vs_main` and `fs_main`
/// * `bind_group_layout` - Bind group layout for the pipeline
/// * `surface_format` - Target surface texture format
/// * `label` - Optional label for the pipeline
pub fn create_render_pipeline(
    device: &Device,
    shader_module: &ShaderModule,
    bind_group_layout: &BindGroupLayout,
    surface_format: TextureFormat,
    label: Option<&str>,
) -> RenderPipeline {
    let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some(label.unwrap_or("Backdrop Pipeline Layout")),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some(label.unwrap_or("Backdrop Pipeline")),
        layout: Some(&pipeline_layout),
        vertex: VertexState {
            module: shader_module,
            entry_point: Some(VERTEX_ENTRY),
            buffers: &[Vertex2D::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(FragmentState {
            module: shader_module,
            entry_point: Some(FRAGMENT_ENTRY),
            targets: &[Some(ColorTargetState {
                format: surface_format,
                blend: Some(BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: PrimitiveState {
            topology: PrimitiveTopology::TriangleStrip,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
