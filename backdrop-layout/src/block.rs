//! The uniform block contract shared by every block type.

use std::fmt::Debug;

use crate::error::LayoutError;
use crate::field::{UniformField, align_to};
use crate::uniforms::Touch;

/// Name of the shader variable holding the uniform block.
pub const UNIFORMS_INSTANCE: &str = "uniforms";
/// Bind group index of the uniform block.
pub const UNIFORM_GROUP: u32 = 0;
/// Binding index of the uniform block inside its group.
pub const UNIFORM_BINDING: u32 = 0;

/// Per-frame values the host hands to a block constructor.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInputs<'a> {
    /// Viewport size in pixels
    pub resolution: [f32; 2],
    /// Animation time in seconds
    pub time: f32,
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// Frames drawn since the shader was loaded
    pub frame_index: u32,
    /// Active touches, in slot order
    pub touches: &'a [Touch],
}

/// A fixed-layout uniform block.
///
/// `FIELDS` lists the shader-visible members in declaration order. Padding
/// members of the host struct are not listed; std140 places the next member
/// after them anyway.
pub trait UniformBlock: bytemuck::Pod + Debug + Send + Sync + 'static {
    /// Shader-side type name of the block.
    const BLOCK_NAME: &'static str;

    /// Shader-visible members in declaration order.
    const FIELDS: &'static [UniformField];

    /// Build this frame's block.
    fn from_frame(frame: &FrameInputs<'_>) -> Self;

    /// Look up a member by shader-side name.
    fn field(name: &str) -> Option<&'static UniformField> {
        Self::FIELDS.iter().find(|field| field.name == name)
    }

    /// Raw bytes as uploaded to the GPU.
    fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Verify a block's field table against std140 and the host struct size.
pub fn check_block<B: UniformBlock>() -> Result<(), LayoutError> {
    let mut cursor = 0u32;
    for field in B::FIELDS {
        let expected = align_to(cursor, field.kind.std140_align());
        if field.offset != expected {
            return Err(LayoutError::OffsetMismatch {
                block: B::BLOCK_NAME,
                field: field.name,
                expected,
                actual: field.offset,
            });
        }
        cursor = field.end();
    }

    // std140 rounds the block up to vec4 alignment
    let expected = align_to(cursor, 16) as usize;
    let actual = std::mem::size_of::<B>();
    if expected != actual {
        return Err(LayoutError::SizeMismatch {
            block: B::BLOCK_NAME,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;
    use crate::uniforms::{TouchUniforms, Uniforms};

    #[repr(C)]
    #[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
    struct Misdeclared {
        time: f32,
        resolution: [f32; 2],
        _padding: f32,
    }

    impl UniformBlock for Misdeclared {
        const BLOCK_NAME: &'static str = "Misdeclared";
        const FIELDS: &'static [UniformField] = &[
            UniformField::new("time", FieldKind::Float, 0),
            UniformField::new("resolution", FieldKind::Vec2, 4),
        ];

        fn from_frame(frame: &FrameInputs<'_>) -> Self {
            Self {
                time: frame.time,
                resolution: frame.resolution,
                _padding: 0.0,
            }
        }
    }

    #[repr(C)]
    #[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
    struct Unpadded {
        resolution: [f32; 2],
        time: f32,
    }

    impl UniformBlock for Unpadded {
        const BLOCK_NAME: &'static str = "Unpadded";
        const FIELDS: &'static [UniformField] = &[
            UniformField::new("resolution", FieldKind::Vec2, 0),
            UniformField::new("time", FieldKind::Float, 8),
        ];

        fn from_frame(frame: &FrameInputs<'_>) -> Self {
            Self {
                resolution: frame.resolution,
                time: frame.time,
            }
        }
    }

    #[test]
    fn test_shipped_blocks_pass() {
        assert_eq!(check_block::<Uniforms>(), Ok(()));
        assert_eq!(check_block::<TouchUniforms>(), Ok(()));
    }

    #[test]
    fn test_misaligned_vec2_is_rejected() {
        assert_eq!(
            check_block::<Misdeclared>(),
            Err(LayoutError::OffsetMismatch {
                block: "Misdeclared",
                field: "resolution",
                expected: 8,
                actual: 4,
            })
        );
    }

    #[test]
    fn test_missing_tail_padding_is_rejected() {
        assert_eq!(
            check_block::<Unpadded>(),
            Err(LayoutError::SizeMismatch {
                block: "Unpadded",
                expected: 16,
                actual: 12,
            })
        );
    }

    #[test]
    fn test_field_lookup() {
        let field = Uniforms::field("deltaTime").expect("deltaTime declared");
        assert_eq!(field.offset, 12);
        assert!(Uniforms::field("touches").is_none());
        assert!(TouchUniforms::field("touches").is_some());
    }
}
