//! Field tables describing uniform block members.

/// Type of a uniform block member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 32-bit float
    Float,
    /// 32-bit signed integer
    Int,
    /// Two 32-bit floats
    Vec2,
    /// Fixed-length array of `vec4` (std140 stride 16)
    Vec4Array(u32),
}

impl FieldKind {
    /// Base alignment under std140.
    pub const fn std140_align(self) -> u32 {
        match self {
            FieldKind::Float | FieldKind::Int => 4,
            FieldKind::Vec2 => 8,
            FieldKind::Vec4Array(_) => 16,
        }
    }

    /// Size in bytes.
    pub const fn size(self) -> u32 {
        match self {
            FieldKind::Float | FieldKind::Int => 4,
            FieldKind::Vec2 => 8,
            FieldKind::Vec4Array(len) => 16 * len,
        }
    }

    /// GLSL member declaration, without the trailing semicolon.
    pub fn glsl_decl(self, name: &str) -> String {
        match self {
            FieldKind::Float => format!("float {name}"),
            FieldKind::Int => format!("int {name}"),
            FieldKind::Vec2 => format!("vec2 {name}"),
            FieldKind::Vec4Array(len) => format!("vec4 {name}[{len}]"),
        }
    }

    /// WGSL type name.
    pub fn wgsl_type(self) -> String {
        match self {
            FieldKind::Float => "f32".to_string(),
            FieldKind::Int => "i32".to_string(),
            FieldKind::Vec2 => "vec2<f32>".to_string(),
            FieldKind::Vec4Array(len) => format!("array<vec4<f32>, {len}>"),
        }
    }
}

/// One member of a uniform block as the shader sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformField {
    /// Shader-side member name (e.g. `deltaTime`)
    pub name: &'static str,
    /// Member type
    pub kind: FieldKind,
    /// Byte offset inside the block
    pub offset: u32,
}

impl UniformField {
    pub const fn new(name: &'static str, kind: FieldKind, offset: u32) -> Self {
        Self { name, kind, offset }
    }

    /// First byte past the member.
    pub const fn end(&self) -> u32 {
        self.offset + self.kind.size()
    }
}

/// Round `value` up to a multiple of `align`.
pub const fn align_to(value: u32, align: u32) -> u32 {
    value.div_ceil(align) * align
}
