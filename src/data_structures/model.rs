//! Meshes, models and the draw calls for them.
//!
//! A [`Mesh`] is a pair of GPU vertex and index buffers. A [`Model`] is a set of
//! meshes loaded from one file together with one texture per material of that
//! file.

use crate::data_structures::texture::BoundTexture;

/// Vertex buffer layout description for the pipeline.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// Interleaved position, texture coordinates and normal.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl ModelVertex {
    pub fn new(position: [f32; 3], tex_coords: [f32; 2], normal: [f32; 3]) -> Self {
        Self {
            position,
            tex_coords,
            normal,
        }
    }
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
    /// Index into the owning [`Model::textures`], `None` for meshes without a material.
    pub material: Option<usize>,
}

#[derive(Debug)]
pub struct Model {
    pub meshes: Vec<Mesh>,
    pub textures: Vec<BoundTexture>,
}

impl Model {
    /// The texture a mesh is drawn with: its material's texture if it has a material,
    /// `fallback` otherwise.
    pub fn texture_for<'a>(&'a self, mesh: &Mesh, fallback: &'a BoundTexture) -> &'a BoundTexture {
        mesh.material
            .and_then(|m| self.textures.get(m))
            .unwrap_or(fallback)
    }
}

/// Draw calls for meshes and models on a render pass.
///
/// The caller binds the pipeline, the frame bind group (1) and the object bind
/// group (2); the draw calls take care of the texture bind group (0).
pub trait DrawModel<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh, texture: &'a BoundTexture);

    fn draw_model(&mut self, model: &'a Model, fallback: &'a BoundTexture);
}

impl<'b> DrawModel<'b> for wgpu::RenderPass<'_> {
    fn draw_mesh(&mut self, mesh: &'b Mesh, texture: &'b BoundTexture) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.set_bind_group(0, &texture.bind_group, &[]);
        self.draw_indexed(0..mesh.num_elements, 0, 0..1);
    }

    fn draw_model(&mut self, model: &'b Model, fallback: &'b BoundTexture) {
        for mesh in &model.meshes {
            self.draw_mesh(mesh, model.texture_for(mesh, fallback));
        }
    }
}
