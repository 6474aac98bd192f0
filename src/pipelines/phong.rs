//! The Phong pipeline and the uniform buffers it reads.
//!
//! Bind groups:
//! - 0: diffuse texture and sampler, see [`crate::resources::texture::texture_layout`]
//! - 1: per-frame data, the [`CameraUniform`] (binding 0) and the [`LightsUniform`] (binding 1)
//! - 2: per-object data, the [`ObjectUniform`]

use wgpu::util::DeviceExt;

use crate::{
    camera::CameraUniform,
    data_structures::{
        light::LightsUniform,
        model::{ModelVertex, Vertex},
        texture::Texture,
        transform::ObjectUniform,
    },
    pipelines::basic::{ShaderPair, mk_render_pipeline},
    resources::texture::texture_layout,
};

#[derive(Debug)]
pub struct PhongPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub texture_layout: wgpu::BindGroupLayout,
    pub frame_layout: wgpu::BindGroupLayout,
    pub object_layout: wgpu::BindGroupLayout,
}

impl PhongPipeline {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Self {
        let texture_layout = texture_layout(device);
        let frame_layout = mk_frame_bind_group_layout(device);
        let object_layout = mk_object_bind_group_layout(device);

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Phong Pipeline Layout"),
                bind_group_layouts: &[&texture_layout, &frame_layout, &object_layout],
                immediate_size: 0,
            });

        let pipeline = mk_render_pipeline(
            device,
            &render_pipeline_layout,
            config.format,
            Some(wgpu::BlendState {
                alpha: wgpu::BlendComponent::REPLACE,
                color: wgpu::BlendComponent::REPLACE,
            }),
            Some(Texture::DEPTH_FORMAT),
            &[ModelVertex::desc()],
            ShaderPair::from_wgsl(vertex_source, fragment_source),
        );

        Self {
            pipeline,
            texture_layout,
            frame_layout,
            object_layout,
        }
    }
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

pub fn mk_frame_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            uniform_entry(0, wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT),
            uniform_entry(1, wgpu::ShaderStages::FRAGMENT),
        ],
        label: Some("frame_bind_group_layout"),
    })
}

pub fn mk_object_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[uniform_entry(
            0,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
        label: Some("object_bind_group_layout"),
    })
}

/// Camera and light buffers, rewritten once per frame.
#[derive(Debug)]
pub struct FrameResources {
    pub camera_buffer: wgpu::Buffer,
    pub lights_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl FrameResources {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        camera: CameraUniform,
        lights: LightsUniform,
    ) -> Self {
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let lights_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lights Buffer"),
            contents: bytemuck::cast_slice(&[lights]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
            label: Some("frame_bind_group"),
        });

        Self {
            camera_buffer,
            lights_buffer,
            bind_group,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, camera: &CameraUniform, lights: &LightsUniform) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[*camera]));
        queue.write_buffer(&self.lights_buffer, 0, bytemuck::cast_slice(&[*lights]));
    }
}

/// Uniform buffer of a single drawn object.
#[derive(Debug)]
pub struct ObjectResources {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl ObjectResources {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, uniform: ObjectUniform) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Object Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("object_bind_group"),
        });
        Self { buffer, bind_group }
    }

    pub fn write(&self, queue: &wgpu::Queue, uniform: &ObjectUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[*uniform]));
    }
}
