//! Object placement and the per-object uniform.
//!
//! Every drawn object owns a small uniform buffer with its model matrix, the
//! matching normal matrix and its [`Material`].

use cgmath::{Matrix, One, SquareMatrix};

use crate::data_structures::material::Material;

/// Position, rotation (as quaternion) and scale of an object.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    pub position: cgmath::Vector3<f32>,
    pub rotation: cgmath::Quaternion<f32>,
    pub scale: cgmath::Vector3<f32>,
}

impl Transform {
    /// Identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            position: cgmath::Vector3::new(0.0, 0.0, 0.0),
            // `Quaternion::one()` is the identity quaternion (no rotation)
            rotation: cgmath::Quaternion::one(),
            scale: cgmath::Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn translated(mut self, position: impl Into<cgmath::Vector3<f32>>) -> Self {
        self.position = position.into();
        self
    }

    pub fn rotated(mut self, rotation: cgmath::Quaternion<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn scaled(mut self, scale: impl Into<cgmath::Vector3<f32>>) -> Self {
        self.scale = scale.into();
        self
    }

    /// Translate, then rotate, then scale: `T * R * S`.
    pub fn to_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(self.position)
            * cgmath::Matrix4::from(self.rotation)
            * cgmath::Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Inverse transpose of the model matrix so that normals survive non-uniform scaling.
    ///
    /// A degenerate (zero scale) matrix has no inverse, the model matrix is used as is then.
    pub fn normal_matrix(&self) -> cgmath::Matrix4<f32> {
        let model = self.to_matrix();
        model.invert().map_or(model, |inverse| inverse.transpose())
    }

    pub fn to_raw(&self, material: &Material) -> ObjectUniform {
        ObjectUniform {
            model: self.to_matrix().into(),
            normal: self.normal_matrix().into(),
            specular_intensity: material.specular_intensity,
            shininess: material.shininess,
            _padding: [0.0; 2],
        }
    }
}

impl From<cgmath::Vector3<f32>> for Transform {
    fn from(position: cgmath::Vector3<f32>) -> Self {
        Transform {
            position,
            ..Default::default()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/**
 * The raw object data as it is stored on the GPU.
 *
 * The normal matrix is kept as a full 4x4 matrix, a mat3x3 would need a padded
 * column layout in a uniform buffer anyway.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub specular_intensity: f32,
    pub shininess: f32,
    _padding: [f32; 2],
}
