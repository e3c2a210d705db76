//! Vertex layouts for the background quad.

/// Vertex attribute location of [`Vertex2D::position`].
pub const POSITION_LOCATION: u32 = 0;
/// Vertex attribute location of [`Vertex2D::tex_coords`].
pub const TEX_COORDS_LOCATION: u32 = 1;

/// Input vertex: 2D position plus texture coordinate.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex2D {
    /// Position in normalized device coordinates (attribute 0) - offset 0
    pub position: [f32; 2],
    /// Texture coordinate (attribute 1, `texCoords`) - offset 8
    pub tex_coords: [f32; 2],
}

const _: () = assert!(std::mem::size_of::<Vertex2D>() == 16);

impl Vertex2D {
    pub const fn new(position: [f32; 2], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            tex_coords,
        }
    }
}

#[cfg(feature = "wgpu-types")]
impl Vertex2D {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        POSITION_LOCATION => Float32x2,
        TEX_COORDS_LOCATION => Float32x2,
    ];

    /// Vertex buffer layout binding attributes 0 and 1.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex2D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Vertex stage output: clip-space position plus texture coordinate.
///
/// Produced on the GPU; the host only relies on the layout when generating
/// the matching shader struct.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ProjectedVertex {
    /// Clip-space position (`@builtin(position)`) - offset 0
    pub position: [f32; 4],
    /// Texture coordinate passed to the fragment stage - offset 16
    pub tex_coords: [f32; 2],
}

/// Full-viewport quad as a triangle strip.
///
/// Texture coordinates have their origin at the bottom-left so that
/// `texCoords * resolution` matches shader-toy `fragCoord`.
pub const FULLSCREEN_QUAD: [Vertex2D; 4] = [
    Vertex2D::new([-1.0, -1.0], [0.0, 0.0]),
    Vertex2D::new([1.0, -1.0], [1.0, 0.0]),
    Vertex2D::new([-1.0, 1.0], [0.0, 1.0]),
    Vertex2D::new([1.0, 1.0], [1.0, 1.0]),
];
