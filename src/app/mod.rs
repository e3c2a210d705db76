//! Preview window: draws the configured shader full-screen and reloads it on
//! change.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use backdrop_config::{
    Config, ResolvedShaderSettings, parse_shader_metadata_from_file, resolve_shader_settings,
};
use tokio::runtime::Runtime;
use winit::event_loop::{ControlFlow, EventLoop};

use crate::cli::RuntimeOptions;
use crate::cli::commands::load_config;

pub mod active;
pub mod gpu;
pub mod handler;

pub use active::ActiveRenderer;
pub use gpu::GpuContext;

/// Pseudo touch id used for the left mouse button
pub const MOUSE_TOUCH_ID: u64 = u64::MAX;

/// Application state shared across winit callbacks.
pub struct App {
    pub(crate) runtime: Arc<Runtime>,
    pub(crate) config: Config,
    pub(crate) shader_path: Option<PathBuf>,
    pub(crate) window: Option<handler::WindowState>,
    /// First fatal error raised inside the event loop
    pub(crate) error: Option<anyhow::Error>,
}

impl App {
    pub fn new(runtime: Arc<Runtime>, options: RuntimeOptions) -> Result<Self> {
        let mut config = load_config(options.config.as_deref())?;
        if let Some(shader) = options.shader {
            config.shader = Some(shader);
            config.shader_enabled = true;
        }
        config.validate()?;

        let shader_path = config.shader_path();
        match &shader_path {
            Some(path) => log::info!("Background shader: {}", path.display()),
            None => log::info!("No background shader configured; drawing a solid background"),
        }

        Ok(Self {
            runtime,
            config,
            shader_path,
            window: None,
            error: None,
        })
    }

    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;

        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Settings for the current shader, re-reading its metadata.
    pub(crate) fn shader_settings(&self) -> ResolvedShaderSettings {
        let metadata = self
            .shader_path
            .as_deref()
            .and_then(parse_shader_metadata_from_file);
        resolve_shader_settings(metadata.as_ref(), &self.config)
    }
}
