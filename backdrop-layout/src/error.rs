//! Typed errors for layout and alias checks.

use thiserror::Error;

/// A host/shader layout disagreement.
///
/// These surface when a shader is loaded, never while a frame is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A field table entry does not sit at its std140 offset.
    #[error("{block}.{field}: expected std140 offset {expected}, declared {actual}")]
    OffsetMismatch {
        /// Uniform block name.
        block: &'static str,
        /// Shader-side field name.
        field: &'static str,
        /// Offset computed from std140 rules.
        expected: u32,
        /// Offset declared in the field table.
        actual: u32,
    },

    /// The host struct size differs from the std140 block size.
    #[error("{block}: std140 size is {expected} bytes but the host struct is {actual} bytes")]
    SizeMismatch {
        /// Uniform block name.
        block: &'static str,
        /// Size computed from std140 rules.
        expected: usize,
        /// `size_of` of the host struct.
        actual: usize,
    },

    /// Shader source references an alias whose target field the block lacks.
    #[error("'{alias}' refers to uniforms.{field}, which {block} does not declare")]
    UnresolvedAlias {
        /// Alias used in the shader source.
        alias: &'static str,
        /// Field the alias expands to.
        field: &'static str,
        /// Uniform block the shader was checked against.
        block: &'static str,
    },
}
