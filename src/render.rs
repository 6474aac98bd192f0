//! Render composition.
//!
//! A scene describes what it wants drawn each frame as a [`Render`] tree. The
//! frame loop binds the Phong pipeline and the frame bind group once, then
//! hands the render pass to [`Render::draw`], which binds each object's uniform
//! and texture before issuing its draw calls.

use crate::data_structures::{
    model::{DrawModel, Mesh, Model},
    texture::BoundTexture,
};

pub enum Render<'a> {
    None,
    /// A single mesh drawn with one texture.
    Mesh {
        mesh: &'a Mesh,
        texture: &'a BoundTexture,
        object: &'a wgpu::BindGroup,
    },
    /// Every mesh of a model, each with its material's texture.
    Model {
        model: &'a Model,
        object: &'a wgpu::BindGroup,
    },
    Composed(Vec<Render<'a>>),
}

impl<'a> Render<'a> {
    /// Record the draw calls. Bind groups 0 (texture) and 2 (object) are set
    /// here; the pipeline and bind group 1 must already be bound.
    ///
    /// Model meshes whose material has no texture use `fallback`.
    pub fn draw(self, render_pass: &mut wgpu::RenderPass<'_>, fallback: &'a BoundTexture) {
        match self {
            Render::None => (),
            Render::Mesh {
                mesh,
                texture,
                object,
            } => {
                render_pass.set_bind_group(2, object, &[]);
                render_pass.draw_mesh(mesh, texture);
            }
            Render::Model { model, object } => {
                render_pass.set_bind_group(2, object, &[]);
                render_pass.draw_model(model, fallback);
            }
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.draw(render_pass, fallback)),
        }
    }

    /// Number of draw calls [`Render::draw`] would issue.
    pub fn draw_calls(&self) -> usize {
        match self {
            Render::None => 0,
            Render::Mesh { .. } => 1,
            Render::Model { model, .. } => model.meshes.len(),
            Render::Composed(renders) => renders.iter().map(Render::draw_calls).sum(),
        }
    }
}

impl Default for Render<'_> {
    fn default() -> Self {
        Render::None
    }
}
