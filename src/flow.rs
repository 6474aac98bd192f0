//! Application event loop.
//!
//! [`run`] opens the window, builds the [`Context`] and the [`DemoScene`] and
//! then drives them from winit's event loop.
//!
//! # Lifecycle
//!
//! Each frame:
//! 1. Window and device events update the [`InputState`] (held keys, mouse motion)
//! 2. On `RedrawRequested` the camera moves by the held keys and turns by the
//!    mouse motion collected since the previous frame
//! 3. The scene updates (the flashlight follows the camera)
//! 4. Camera, lights and object uniforms are uploaded
//! 5. The scene's [`Render`](crate::render::Render) is drawn with the Phong pipeline
//! 6. The frame is presented and the next redraw is requested

use std::{iter, sync::Arc};

use anyhow::Context as _;
use instant::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::KeyCode,
    window::{CursorGrabMode, Window},
};

use crate::{
    config::Config, context::Context, input::InputState, logging::init_logging,
    scene::DemoScene,
};

/// Everything that exists once the window is open.
pub struct AppState {
    pub(crate) ctx: Context,
    scene: DemoScene,
    input: InputState,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &Config) -> anyhow::Result<Self> {
        let ctx = Context::new(window, config)
            .await
            .context("cannot create the main context")?;
        let scene = DemoScene::new(&ctx, config)
            .await
            .context("cannot build the scene")?;
        Ok(Self {
            ctx,
            scene,
            input: InputState::new(),
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.is_surface_configured = true;
        }
    }

    /// React to a freshly pressed key. Returns `false` if the app should quit.
    fn on_key_pressed(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Escape => return false,
            KeyCode::KeyF => {
                self.scene.toggle_flashlight();
            }
            _ => (),
        }
        true
    }

    fn update(&mut self, dt: f32) {
        log::trace!("frame time {:.4}s", dt);
        self.ctx.camera.key_control(self.input.keys(), dt);
        let x_change = self.input.take_x_change();
        let y_change = self.input.take_y_change();
        self.ctx.camera.mouse_control(x_change, y_change);
        self.scene.on_update(&self.ctx.camera);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.ctx.write_frame(&self.scene.lights_uniform());
        self.scene.write_to_buffer(&self.ctx.queue);

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.ctx.pipeline.pipeline);
            render_pass.set_bind_group(1, &self.ctx.frame.bind_group, &[]);
            self.scene
                .on_render()
                .draw(&mut render_pass, self.scene.fallback_texture());
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: Config,
    state: Option<AppState>,
    last_time: Instant,
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let async_runtime =
            tokio::runtime::Runtime::new().context("failed to start the async runtime")?;
        Ok(Self {
            async_runtime,
            config,
            state: None,
            last_time: Instant::now(),
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }
}

/// Hide the cursor and keep it in the window so mouse motion can turn the camera freely.
fn grab_cursor(window: &Window) {
    if let Err(e) = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
    {
        log::warn!("Could not grab the cursor: {}", e);
    }
    window.set_cursor_visible(false);
}

fn release_cursor(window: &Window) {
    if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
        log::warn!("Could not release the cursor: {}", e);
    }
    window.set_cursor_visible(true);
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, anyhow::anyhow!("failed to create the window: {e}"));
                return;
            }
        };
        grab_cursor(&window);

        match self
            .async_runtime
            .block_on(AppState::new(window.clone(), &self.config))
        {
            Ok(mut app_state) => {
                let size = window.inner_size();
                app_state.resize(size.width, size.height);
                self.last_time = Instant::now();
                window.request_redraw();
                self.state = Some(app_state);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            state.input.handle_mouse_motion(dx, dy);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::Focused(focused) => {
                // Key releases are missed while unfocused.
                state.input.clear();
                if focused {
                    grab_cursor(state.ctx.window());
                } else {
                    release_cursor(state.ctx.window());
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(code) = state.input.handle_key_event(&event) {
                    if !state.on_key_pressed(code) {
                        event_loop.exit();
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();
                state.update(dt.as_secs_f32());

                match state.render() {
                    Ok(()) => (),
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        self.fail(event_loop, anyhow::anyhow!("the GPU ran out of memory"));
                    }
                    Err(e) => {
                        log::warn!("Skipping frame: {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Open the window and run the demo until it is closed.
///
/// Errors during start up (no window, no adapter, missing shaders) are returned
/// after the event loop has exited.
pub fn run(config: Config) -> anyhow::Result<()> {
    init_logging();

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
