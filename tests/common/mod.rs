//! Off-screen rendering helpers for the GPU tests.
#![allow(dead_code)]

use std::{path::PathBuf, time::Duration};

use phong_ngin::{
    camera::{Camera, CameraUniform, Projection},
    data_structures::{
        light::LightSet,
        texture::{BoundTexture, Texture},
    },
    pipelines::phong::{FrameResources, PhongPipeline},
    render::Render,
    resources::texture::load_string,
};

pub const SIZE: u32 = 256;
pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

pub struct Gpu {
    pub runtime: tokio::runtime::Runtime,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub pipeline: PhongPipeline,
    pub plain: BoundTexture,
}

pub fn assets() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

/// An empty directory under the system temp dir, unique to `name`.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("phong-ngin-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// A device without a surface. The GPU tests need an adapter to run on.
pub fn gpu() -> Gpu {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let adapter = runtime
        .block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .expect("integration tests need a GPU adapter");
    let (device, queue) = runtime
        .block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("test device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
        }))
        .unwrap();

    let vertex = runtime
        .block_on(load_string(&assets().join("shaders/shader.vert.wgsl")))
        .unwrap();
    let fragment = runtime
        .block_on(load_string(&assets().join("shaders/shader.frag.wgsl")))
        .unwrap();
    let config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: FORMAT,
        width: SIZE,
        height: SIZE,
        present_mode: wgpu::PresentMode::Fifo,
        alpha_mode: wgpu::CompositeAlphaMode::Auto,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    let pipeline = PhongPipeline::new(&device, &config, &vertex, &fragment);
    let plain = BoundTexture::new(
        &device,
        "plain",
        Texture::create_solid([255, 255, 255, 255], 1, 1, &device, &queue),
        &pipeline.texture_layout,
    );

    Gpu {
        runtime,
        device,
        queue,
        pipeline,
        plain,
    }
}

pub fn camera() -> (Camera, Projection) {
    (
        Camera::new([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], -90.0, 0.0, 5.0, 0.25),
        Projection::new(SIZE, SIZE, cgmath::Deg(45.0), 0.1, 100.0),
    )
}

impl Gpu {
    /// Draw `render` into a `SIZE`x`SIZE` texture and read it back.
    pub fn render(
        &self,
        clear: wgpu::Color,
        lights: &LightSet,
        render: Render<'_>,
    ) -> image::RgbaImage {
        let (camera, projection) = camera();
        let frame = FrameResources::new(
            &self.device,
            &self.pipeline.frame_layout,
            CameraUniform::new(&camera, &projection),
            lights.to_uniform(),
        );

        let extent = wgpu::Extent3d {
            width: SIZE,
            height: SIZE,
            depth_or_array_layers: 1,
        };
        let target = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Test Output Texture"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FORMAT,
            usage: wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());
        let depth = Texture::create_depth_texture(&self.device, [SIZE, SIZE], "test depth");

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Test Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Test Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &depth.view,
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
            render_pass.set_pipeline(&self.pipeline.pipeline);
            render_pass.set_bind_group(1, &frame.bind_group, &[]);
            render.draw(&mut render_pass, &self.plain);
        }

        let bytes_per_row = 4 * SIZE;
        let output = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: None,
            size: (bytes_per_row * SIZE) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(SIZE),
                },
            },
            extent,
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = output.slice(..);
        let (tx, rx) = futures::channel::oneshot::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: Some(Duration::from_secs(3)),
            })
            .unwrap();
        self.runtime.block_on(rx).unwrap().unwrap();

        let data = slice.get_mapped_range().to_vec();
        output.unmap();
        image::RgbaImage::from_raw(SIZE, SIZE, data).unwrap()
    }
}
