//! Load-time comparison of the compiled uniform block against the host layout.

use backdrop_layout::{UNIFORM_BINDING, UNIFORM_GROUP, UniformBlock};

use crate::error::RenderError;

/// Uniform block layout as the shader compiler laid it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformLayout {
    /// Member name and byte offset, in declaration order
    pub members: Vec<(String, u32)>,
    /// Total struct size as computed by naga
    pub span: u32,
}

impl UniformLayout {
    /// Offset of a member by name.
    pub fn offset_of(&self, name: &str) -> Option<u32> {
        self.members
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, offset)| *offset)
    }
}

/// Find the uniform struct bound at the block's group/binding.
pub fn uniform_layout(module: &naga::Module) -> Option<UniformLayout> {
    let (_, global) = module.global_variables.iter().find(|(_, global)| {
        global.space == naga::AddressSpace::Uniform
            && global.binding
                == Some(naga::ResourceBinding {
                    group: UNIFORM_GROUP,
                    binding: UNIFORM_BINDING,
                })
    })?;

    match &module.types[global.ty].inner {
        naga::TypeInner::Struct { members, span } => Some(UniformLayout {
            members: members
                .iter()
                .map(|m| (m.name.clone().unwrap_or_default(), m.offset))
                .collect(),
            span: *span,
        }),
        _ => None,
    }
}

/// Check that `module`'s uniform block matches block `B` member for member.
///
/// Members whose names start with `_` are compiler padding and are skipped.
pub fn check_uniform_layout<B: UniformBlock>(
    module: &naga::Module,
    name: &str,
) -> Result<UniformLayout, RenderError> {
    let mismatch = |details: String| RenderError::LayoutMismatch {
        name: name.to_string(),
        details,
    };

    let layout = uniform_layout(module).ok_or_else(|| {
        mismatch(format!(
            "no uniform struct at group {UNIFORM_GROUP} binding {UNIFORM_BINDING}"
        ))
    })?;

    for field in B::FIELDS {
        match layout.offset_of(field.name) {
            Some(offset) if offset == field.offset => {}
            Some(offset) => {
                return Err(mismatch(format!(
                    "{} at offset {offset}, host expects {}",
                    field.name, field.offset
                )));
            }
            None => return Err(mismatch(format!("{} is missing", field.name))),
        }
    }

    if let Some((extra, _)) = layout
        .members
        .iter()
        .find(|(member, _)| !member.starts_with('_') && B::field(member).is_none())
    {
        return Err(mismatch(format!("{extra} is not declared by {}", B::BLOCK_NAME)));
    }

    let host_size = std::mem::size_of::<B>();
    if layout.span as usize > host_size {
        return Err(mismatch(format!(
            "shader block is {} bytes, host struct is {host_size} bytes",
            layout.span
        )));
    }

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_layout::{TouchUniforms, Uniforms};

    fn parse(source: &str) -> naga::Module {
        naga::front::wgsl::parse_str(source).expect("valid WGSL")
    }

    #[test]
    fn test_reordered_block_is_rejected() {
        let module = parse(
            "struct Uniforms { time: f32, deltaTime: f32, resolution: vec2<f32>, frameIndex: i32 }\n\
             @group(0) @binding(0) var<uniform> uniforms: Uniforms;",
        );
        let err = check_uniform_layout::<Uniforms>(&module, "swapped").expect_err("reordered");
        assert!(err.to_string().contains("resolution at offset 8, host expects 0"));
    }

    #[test]
    fn test_missing_binding_is_rejected() {
        let module = parse(
            "struct Uniforms { resolution: vec2<f32> }\n\
             @group(0) @binding(3) var<uniform> uniforms: Uniforms;",
        );
        assert!(uniform_layout(&module).is_none());
        assert!(check_uniform_layout::<Uniforms>(&module, "unbound").is_err());
    }

    #[test]
    fn test_touch_block_offsets() {
        let module = parse(
            "struct TouchUniforms { resolution: vec2<f32>, time: f32, deltaTime: f32, \
             frameIndex: i32, touchCount: i32, touches: array<vec4<f32>, 4> }\n\
             @group(0) @binding(0) var<uniform> uniforms: TouchUniforms;",
        );
        let layout = check_uniform_layout::<TouchUniforms>(&module, "touch").expect("matches");
        assert_eq!(layout.offset_of("touches"), Some(32));
        assert_eq!(layout.span, 96);

        // The same struct is too large for the base block
        assert!(check_uniform_layout::<Uniforms>(&module, "touch").is_err());
    }
}
