//! wgpu surface, device and queue for the preview window.

use std::sync::Arc;

use backdrop_config::{PowerPreference, VsyncMode};
use backdrop_render::RenderError;
use winit::window::Window;

/// Maximum frames queued ahead of the display
const SURFACE_FRAME_LATENCY: u32 = 2;

/// Convert the configured vsync mode to a wgpu present mode
pub fn present_mode(vsync_mode: VsyncMode) -> wgpu::PresentMode {
    match vsync_mode {
        VsyncMode::Immediate => wgpu::PresentMode::Immediate,
        VsyncMode::Mailbox => wgpu::PresentMode::Mailbox,
        VsyncMode::Fifo => wgpu::PresentMode::Fifo,
    }
}

/// Convert the configured power preference to wgpu's
pub fn power_preference(preference: PowerPreference) -> wgpu::PowerPreference {
    match preference {
        PowerPreference::None => wgpu::PowerPreference::None,
        PowerPreference::LowPower => wgpu::PowerPreference::LowPower,
        PowerPreference::HighPerformance => wgpu::PowerPreference::HighPerformance,
    }
}

/// Pick `requested` if the surface supports it, else Fifo, else the first mode.
fn select_present_mode(
    requested: wgpu::PresentMode,
    supported: &[wgpu::PresentMode],
) -> wgpu::PresentMode {
    if supported.contains(&requested) {
        return requested;
    }
    log::warn!(
        "Requested present mode {:?} not supported (available: {:?}), falling back",
        requested,
        supported
    );
    if supported.contains(&wgpu::PresentMode::Fifo) || supported.is_empty() {
        wgpu::PresentMode::Fifo
    } else {
        supported[0]
    }
}

/// What the frame loop does after a failed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRecovery {
    /// Reconfigure the surface and try again next frame
    Reconfigure,
    /// Drop this frame only
    Skip,
    /// Unrecoverable; leave the event loop
    Exit,
}

impl FrameRecovery {
    pub fn for_error(err: &RenderError) -> Self {
        match err {
            RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                FrameRecovery::Reconfigure
            }
            RenderError::Surface(wgpu::SurfaceError::OutOfMemory)
            | RenderError::DeviceError(_) => FrameRecovery::Exit,
            _ => FrameRecovery::Skip,
        }
    }
}

/// GPU objects tied to one window.
pub struct GpuContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    pub async fn new(
        window: Arc<Window>,
        vsync_mode: VsyncMode,
        preference: PowerPreference,
    ) -> Result<Self, RenderError> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: power_preference(preference),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let info = adapter.get_info();
        log::info!("Using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("backdrop device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                ..Default::default()
            })
            .await?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| {
                RenderError::SurfaceCreation("surface reports no supported formats".to_string())
            })?;
        let present_mode = select_present_mode(present_mode(vsync_mode), &surface_caps.present_modes);
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: SURFACE_FRAME_LATENCY,
        };
        surface.configure(&device, &config);
        log::info!(
            "Surface configured: {}x{} {:?} {:?}",
            config.width,
            config.height,
            surface_format,
            present_mode
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    /// Reconfigure the surface for a new window size; zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Reconfigure at the current size after the surface was lost.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}
