//! Per-frame uniform blocks.
//!
//! Layouts follow GLSL std140 rules:
//! - vec2 aligned to 8 bytes
//! - vec4 and array elements aligned to 16 bytes
//! - float/int aligned to 4 bytes
//! - block size rounded to 16 bytes

use crate::block::{FrameInputs, UniformBlock};
use crate::field::{FieldKind, UniformField};

/// Touch slots available in [`TouchUniforms`].
pub const MAX_TOUCHES: usize = 4;

/// Pack a frame counter into the shader's `int`, wrapping into the
/// non-negative range.
pub const fn pack_frame_index(frame_index: u32) -> i32 {
    (frame_index & i32::MAX as u32) as i32
}

/// Uniform block read by every background shader.
///
/// Shader-visible order is `resolution, time, deltaTime, frameIndex`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    /// Viewport resolution in pixels (iResolution) - offset 0, size 8
    pub resolution: [f32; 2],
    /// Animation time in seconds (iGlobalTime, iTime) - offset 8, size 4
    pub time: f32,
    /// Seconds since the previous frame (iTimeDelta) - offset 12, size 4
    pub delta_time: f32,
    /// Frame counter (iFrame) - offset 16, size 4
    pub frame_index: i32,
    /// Padding to reach 32 bytes (multiple of 16) - offset 20, size 12
    pub _padding: [u32; 3],
}
// Total size: 32 bytes

const _: () = assert!(std::mem::size_of::<Uniforms>() == 32);

impl UniformBlock for Uniforms {
    const BLOCK_NAME: &'static str = "Uniforms";
    const FIELDS: &'static [UniformField] = &[
        UniformField::new("resolution", FieldKind::Vec2, 0),
        UniformField::new("time", FieldKind::Float, 8),
        UniformField::new("deltaTime", FieldKind::Float, 12),
        UniformField::new("frameIndex", FieldKind::Int, 16),
    ];

    fn from_frame(frame: &FrameInputs<'_>) -> Self {
        Self {
            resolution: frame.resolution,
            time: frame.time,
            delta_time: frame.delta_time,
            frame_index: pack_frame_index(frame.frame_index),
            _padding: [0; 3],
        }
    }
}

/// A touch point in pixels, origin at the bottom-left of the viewport.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Touch {
    /// Current position
    pub position: [f32; 2],
    /// Position where the touch began
    pub start: [f32; 2],
}

impl Touch {
    /// `xy` = current position, `zw` = start position.
    pub const fn packed(&self) -> [f32; 4] {
        [self.position[0], self.position[1], self.start[0], self.start[1]]
    }
}

/// [`Uniforms`] extended with touch input, backing the `iTouches` alias.
///
/// The first 20 bytes are identical to [`Uniforms`].
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TouchUniforms {
    /// Viewport resolution in pixels (iResolution) - offset 0, size 8
    pub resolution: [f32; 2],
    /// Animation time in seconds (iGlobalTime, iTime) - offset 8, size 4
    pub time: f32,
    /// Seconds since the previous frame (iTimeDelta) - offset 12, size 4
    pub delta_time: f32,
    /// Frame counter (iFrame) - offset 16, size 4
    pub frame_index: i32,
    /// Number of populated touch slots (iTouchCount) - offset 20, size 4
    pub touch_count: i32,
    /// Padding so `touches` starts on a 16-byte boundary - offset 24, size 8
    pub _padding: [u32; 2],
    /// Touch slots, xy = current, zw = start (iTouches) - offset 32, size 64
    pub touches: [[f32; 4]; MAX_TOUCHES],
}
// Total size: 96 bytes

const _: () = assert!(std::mem::size_of::<TouchUniforms>() == 96);

impl UniformBlock for TouchUniforms {
    const BLOCK_NAME: &'static str = "TouchUniforms";
    const FIELDS: &'static [UniformField] = &[
        UniformField::new("resolution", FieldKind::Vec2, 0),
        UniformField::new("time", FieldKind::Float, 8),
        UniformField::new("deltaTime", FieldKind::Float, 12),
        UniformField::new("frameIndex", FieldKind::Int, 16),
        UniformField::new("touchCount", FieldKind::Int, 20),
        UniformField::new("touches", FieldKind::Vec4Array(MAX_TOUCHES as u32), 32),
    ];

    fn from_frame(frame: &FrameInputs<'_>) -> Self {
        let mut touches = [[0.0; 4]; MAX_TOUCHES];
        for (slot, touch) in touches.iter_mut().zip(frame.touches) {
            *slot = touch.packed();
        }

        Self {
            resolution: frame.resolution,
            time: frame.time,
            delta_time: frame.delta_time,
            frame_index: pack_frame_index(frame.frame_index),
            touch_count: frame.touches.len().min(MAX_TOUCHES) as i32,
            _padding: [0; 2],
            touches,
        }
    }
}
