//! Frame timing for the time, deltaTime and frameIndex uniforms.

use std::time::Instant;

/// Timing values for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTiming {
    /// Animation time in seconds (scaled by animation speed)
    pub time: f32,
    /// Real seconds since the previous tick
    pub delta_time: f32,
    /// Ticks since the clock started or was reset
    pub frame_index: u32,
}

/// Clock ticked once per rendered frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Start time for animation
    start_time: Instant,
    /// Last tick, `None` before the first frame
    last_frame_time: Option<Instant>,
    /// Frames ticked so far
    frame_count: u32,
    /// Whether animation is enabled
    animation_enabled: bool,
    /// Animation speed multiplier
    animation_speed: f32,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self {
            start_time: now,
            last_frame_time: None,
            frame_count: 0,
            animation_enabled: true,
            animation_speed: 1.0,
        }
    }

    /// Enable or disable animation; disabled animation holds time at 0.0.
    pub fn set_animation_enabled(&mut self, enabled: bool) {
        self.animation_enabled = enabled;
    }

    /// Set the animation speed multiplier (negative values clamp to 0.0).
    pub fn set_animation_speed(&mut self, speed: f32) {
        self.animation_speed = speed.max(0.0);
    }

    pub fn animation_enabled(&self) -> bool {
        self.animation_enabled
    }

    pub fn animation_speed(&self) -> f32 {
        self.animation_speed
    }

    /// Restart time and frame count, e.g. after a shader reload.
    pub fn reset(&mut self, now: Instant) {
        self.start_time = now;
        self.last_frame_time = None;
        self.frame_count = 0;
    }

    /// Advance one frame.
    pub fn tick(&mut self, now: Instant) -> FrameTiming {
        let time = if self.animation_enabled {
            now.saturating_duration_since(self.start_time).as_secs_f32() * self.animation_speed
        } else {
            0.0
        };
        let delta_time = self
            .last_frame_time
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(0.0);

        let timing = FrameTiming {
            time,
            delta_time,
            frame_index: self.frame_count,
        };

        self.last_frame_time = Some(now);
        self.frame_count = self.frame_count.wrapping_add(1);
        timing
    }
}
