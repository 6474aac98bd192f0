//! The GPU and window context.
//!
//! [`Context`] owns the surface, device and queue together with everything that
//! lives for the whole run of the demo: the camera, the projection, the Phong
//! pipeline and the per-frame uniform buffers.

use std::sync::Arc;

use anyhow::Context as _;
use winit::window::Window;

use crate::{
    camera::{Camera, CameraUniform, Projection},
    config::Config,
    data_structures::{light::LightsUniform, texture},
    pipelines::phong::{FrameResources, PhongPipeline},
    resources::texture::load_string,
};

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub camera: Camera,
    pub projection: Projection,
    pub pipeline: PhongPipeline,
    pub frame: FrameResources,
    pub clear_colour: wgpu::Color,
}

impl Context {
    pub async fn new(window: Arc<Window>, app_config: &Config) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create the window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;
        log::info!("Using adapter {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("phong-ngin device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create the device and queue")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // The shaders write linear colour and rely on an sRGB target for the conversion.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("the surface supports no formats")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let cam = &app_config.camera;
        let camera = Camera::new(
            cam.position,
            cam.world_up,
            cam.yaw,
            cam.pitch,
            cam.move_speed,
            cam.turn_speed,
        );
        let projection = Projection::new(
            config.width,
            config.height,
            cgmath::Deg(cam.fovy),
            cam.znear,
            cam.zfar,
        );

        let vertex_source = load_string(&app_config.asset_path(&app_config.assets.vertex_shader))
            .await
            .context("failed to load the vertex shader")?;
        let fragment_source =
            load_string(&app_config.asset_path(&app_config.assets.fragment_shader))
                .await
                .context("failed to load the fragment shader")?;
        let pipeline = PhongPipeline::new(&device, &config, &vertex_source, &fragment_source);

        let frame = FrameResources::new(
            &device,
            &pipeline.frame_layout,
            CameraUniform::new(&camera, &projection),
            bytemuck::Zeroable::zeroed(),
        );

        let depth_texture =
            texture::Texture::create_depth_texture(&device, [config.width, config.height], "depth_texture");

        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            camera,
            projection,
            pipeline,
            frame,
            clear_colour: app_config.clear_colour,
        })
    }

    /// Reconfigure the surface and depth buffer. Zero sized windows are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.config.width = width;
        self.config.height = height;
        self.projection.resize(width, height);
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            texture::Texture::create_depth_texture(&self.device, [width, height], "depth_texture");
        true
    }

    /// Upload the camera and the lights for the coming frame.
    pub fn write_frame(&self, lights: &LightsUniform) {
        let camera = CameraUniform::new(&self.camera, &self.projection);
        self.frame.write(&self.queue, &camera, lights);
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}
