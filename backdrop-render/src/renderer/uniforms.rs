//! Uniform buffer management for the background renderer.
//!
//! Provides creation of the GPU uniform buffer and the per-frame state that
//! builds a uniform block value, ready to be written to the GPU each frame.

use std::time::Instant;

use backdrop_layout::{FrameInputs, UniformBlock};
use wgpu::*;

use super::clock::FrameClock;
use super::touches::TouchTracker;

/// Create the GPU uniform buffer for block `B`.
pub(crate) fn create_uniform_buffer<B: UniformBlock>(device: &Device) -> Buffer {
    device.create_buffer(&BufferDescriptor {
        label: Some("Backdrop Uniforms"),
        size: std::mem::size_of::<B>() as u64,
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Host-side inputs of the uniform block: viewport, clock and touches.
#[derive(Debug, Clone)]
pub struct UniformState<B: UniformBlock> {
    /// Viewport size in pixels
    pub(crate) resolution: [f32; 2],
    pub(crate) clock: FrameClock,
    pub(crate) touches: TouchTracker,
    /// Value written by the most recent `build`
    pub(crate) last: B,
}

impl<B: UniformBlock> UniformState<B> {
    pub fn new(width: u32, height: u32, now: Instant) -> Self {
        Self {
            resolution: [width as f32, height as f32],
            clock: FrameClock::new(now),
            touches: TouchTracker::new(),
            last: <B as bytemuck::Zeroable>::zeroed(),
        }
    }

    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.resolution = [width as f32, height as f32];
    }

    pub fn resolution(&self) -> [f32; 2] {
        self.resolution
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    pub fn touches_mut(&mut self) -> &mut TouchTracker {
        &mut self.touches
    }

    /// Tick the clock and build this frame's block.
    pub fn build(&mut self, now: Instant) -> B {
        let timing = self.clock.tick(now);
        let touches = self.touches.active();
        let block = B::from_frame(&FrameInputs {
            resolution: self.resolution,
            time: timing.time,
            delta_time: timing.delta_time,
            frame_index: timing.frame_index,
            touches: &touches,
        });
        self.last = block;
        block
    }

    /// The most recently built block (zeroed before the first frame).
    pub fn last(&self) -> &B {
        &self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_layout::{TouchUniforms, Uniforms};
    use std::time::Duration;

    #[test]
    fn test_build_fills_base_block() {
        let start = Instant::now();
        let mut state = UniformState::<Uniforms>::new(800, 600, start);
        assert_eq!(*state.last(), Uniforms::default());

        state.build(start);
        let block = state.build(start + Duration::from_millis(500));
        assert_eq!(block.resolution, [800.0, 600.0]);
        assert!((block.time - 0.5).abs() < 1e-6);
        assert!((block.delta_time - 0.5).abs() < 1e-6);
        assert_eq!(block.frame_index, 1);
        assert_eq!(*state.last(), block);
    }

    #[test]
    fn test_build_includes_touches() {
        let start = Instant::now();
        let mut state = UniformState::<TouchUniforms>::new(100, 100, start);
        state.touches_mut().begin(1, [10.0, 90.0]);
        state.touches_mut().moved(1, [20.0, 80.0]);
        let block = state.build(start);
        assert_eq!(block.touch_count, 1);
        assert_eq!(block.touches[0], [20.0, 80.0, 10.0, 90.0]);
        assert_eq!(block.touches[1], [0.0; 4]);
    }

    #[test]
    fn test_resize_updates_resolution() {
        let start = Instant::now();
        let mut state = UniformState::<Uniforms>::new(800, 600, start);
        state.set_resolution(1920, 1080);
        assert_eq!(state.build(start).resolution, [1920.0, 1080.0]);
    }
}
