use std::path::Path;
use std::sync::Arc;

use backdrop_render::{RenderError, TouchTracker};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use super::gpu::FrameRecovery;
use super::{App, ActiveRenderer, GpuContext, MOUSE_TOUCH_ID};
use crate::shader_watcher::ShaderWatcher;

/// Everything that lives as long as the window.
pub struct WindowState {
    pub window: Arc<Window>,
    pub gpu: GpuContext,
    /// None when no shader is configured or the first compile failed
    pub renderer: Option<ActiveRenderer>,
    pub watcher: Option<ShaderWatcher>,
    pub cursor: PhysicalPosition<f64>,
}

impl WindowState {
    fn touch_position(&self, position: PhysicalPosition<f64>) -> [f32; 2] {
        let height = self.gpu.size().1 as f32;
        TouchTracker::flip_y([position.x as f32, position.y as f32], height)
    }

    fn update_title(&self, base: &str) {
        match &self.renderer {
            Some(renderer) => self
                .window
                .set_title(&format!("{} - {}", base, renderer.shader_name())),
            None => self.window.set_title(base),
        }
    }

    fn render(&mut self) -> Result<(), RenderError> {
        let frame = self.gpu.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("backdrop frame encoder"),
            });

        match &mut self.renderer {
            Some(renderer) => renderer.draw(&self.gpu.queue, &mut encoder, &view),
            None => clear(&mut encoder, &view),
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        frame.present();
        Ok(())
    }
}

/// Clear pass used when there is no shader to draw.
fn clear(encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
    let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("backdrop clear pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            depth_slice: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
}

impl App {
    async fn initialize(&mut self, window: Window) -> anyhow::Result<()> {
        let window = Arc::new(window);
        let gpu = GpuContext::new(
            Arc::clone(&window),
            self.config.vsync_mode,
            self.config.power_preference,
        )
        .await?;

        let renderer = self.shader_path.as_deref().and_then(|path| {
            let settings = self.shader_settings();
            match ActiveRenderer::build(&gpu.device, gpu.format(), gpu.size(), path, &settings) {
                Ok(renderer) => Some(renderer),
                Err(e) => {
                    log::error!("Failed to load shader {}: {}", path.display(), e);
                    None
                }
            }
        });

        let watcher = match (&self.shader_path, self.config.hot_reload) {
            (Some(path), true) => match ShaderWatcher::new(path, self.config.hot_reload_delay_ms) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    log::warn!("Shader hot reload disabled: {:#}", e);
                    None
                }
            },
            _ => None,
        };

        let state = WindowState {
            window,
            gpu,
            renderer,
            watcher,
            cursor: PhysicalPosition::new(0.0, 0.0),
        };
        state.update_title(&self.config.window_title);
        self.window = Some(state);
        Ok(())
    }

    /// Recompile the shader after a file change.
    ///
    /// Switches uniform blocks if the shader's touch setting changed; on any
    /// failure the previous pipeline keeps drawing.
    fn reload_shader(&mut self, path: &Path) {
        let settings = self.shader_settings();
        let Some(state) = self.window.as_mut() else {
            return;
        };

        let keep_block = state
            .renderer
            .as_ref()
            .is_some_and(|r| r.uses_touches() == settings.touches);

        if keep_block && let Some(renderer) = state.renderer.as_mut() {
            match renderer.reload_from_file(&state.gpu.device, path) {
                Ok(()) => renderer.set_animation(&settings),
                Err(e) => log::error!("Shader reload failed, keeping previous shader: {}", e),
            }
        } else {
            match ActiveRenderer::build(
                &state.gpu.device,
                state.gpu.format(),
                state.gpu.size(),
                path,
                &settings,
            ) {
                Ok(renderer) => {
                    log::info!(
                        "Shader rebuilt with {} uniform block",
                        if settings.touches { "touch" } else { "base" }
                    );
                    state.renderer = Some(renderer);
                }
                Err(e) => log::error!("Shader reload failed, keeping previous shader: {}", e),
            }
        }

        state.update_title(&self.config.window_title);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.window_title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        match event_loop.create_window(window_attrs) {
            Ok(window) => {
                let runtime = Arc::clone(&self.runtime);
                if let Err(e) = runtime.block_on(self.initialize(window)) {
                    log::error!("Failed to initialize: {:#}", e);
                    self.error = Some(e);
                    event_loop.exit();
                }
            }
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                self.error = Some(e.into());
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.window.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape) =>
            {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                state.gpu.resize(size.width, size.height);
                if let Some(renderer) = state.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::Touch(touch) => {
                let position = state.touch_position(touch.location);
                if let Some(renderer) = state.renderer.as_mut() {
                    let touches = renderer.touches_mut();
                    match touch.phase {
                        TouchPhase::Started => {
                            touches.begin(touch.id, position);
                        }
                        TouchPhase::Moved => touches.moved(touch.id, position),
                        TouchPhase::Ended | TouchPhase::Cancelled => touches.end(touch.id),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                state.cursor = position;
                let position = state.touch_position(position);
                if let Some(renderer) = state.renderer.as_mut() {
                    renderer.touches_mut().moved(MOUSE_TOUCH_ID, position);
                }
            }
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => {
                let position = state.touch_position(state.cursor);
                if let Some(renderer) = state.renderer.as_mut() {
                    let touches = renderer.touches_mut();
                    match button_state {
                        ElementState::Pressed => {
                            touches.begin(MOUSE_TOUCH_ID, position);
                        }
                        ElementState::Released => touches.end(MOUSE_TOUCH_ID),
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = state.render() {
                    match FrameRecovery::for_error(&e) {
                        FrameRecovery::Reconfigure => {
                            log::debug!("Surface lost or outdated, reconfiguring");
                            state.gpu.reconfigure();
                        }
                        FrameRecovery::Skip => log::warn!("Skipping frame: {}", e),
                        FrameRecovery::Exit => {
                            log::error!("Unrecoverable render error, exiting: {}", e);
                            self.error = Some(e.into());
                            event_loop.exit();
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let reload = self
            .window
            .as_ref()
            .and_then(|state| state.watcher.as_ref())
            .and_then(ShaderWatcher::try_recv);
        if let Some(event) = reload {
            self.reload_shader(&event.path);
        }

        if let Some(state) = &self.window {
            state.window.request_redraw();
        }
    }
}
