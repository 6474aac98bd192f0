//! First-person camera and perspective projection.
//!
//! The [`Camera`] is driven by the key state (WASD) and mouse deltas collected
//! in [`crate::input::InputState`]. Yaw and pitch are kept in degrees; pitch is
//! clamped so that the view never flips over the poles.

use std::collections::HashSet;

use cgmath::{Deg, InnerSpace, Matrix4, Point3, Vector3, perspective};
use winit::keyboard::KeyCode;

/// cgmath produces OpenGL clip space (z in -1..1), wgpu expects z in 0..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Pitch is kept inside +-`MAX_PITCH` degrees.
pub const MAX_PITCH: f32 = 89.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    position: Point3<f32>,
    front: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,
    world_up: Vector3<f32>,
    yaw: f32,
    pitch: f32,
    move_speed: f32,
    turn_speed: f32,
}

impl Camera {
    /// `yaw` and `pitch` are in degrees. A yaw of -90 looks down the negative z axis.
    pub fn new(
        position: impl Into<Point3<f32>>,
        world_up: impl Into<Vector3<f32>>,
        yaw: f32,
        pitch: f32,
        move_speed: f32,
        turn_speed: f32,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            front: -Vector3::unit_z(),
            up: Vector3::unit_y(),
            right: Vector3::unit_x(),
            world_up: world_up.into(),
            yaw,
            pitch: pitch.clamp(-MAX_PITCH, MAX_PITCH),
            move_speed,
            turn_speed,
        };
        camera.update();
        camera
    }

    /// Move along the view direction (W/S) or sideways (A/D).
    ///
    /// `dt` is the frame time in seconds, so the speed is in units per second.
    pub fn key_control(&mut self, keys: &HashSet<KeyCode>, dt: f32) {
        let velocity = self.move_speed * dt;

        if keys.contains(&KeyCode::KeyW) {
            self.position += self.front * velocity;
        }
        if keys.contains(&KeyCode::KeyS) {
            self.position -= self.front * velocity;
        }
        if keys.contains(&KeyCode::KeyA) {
            self.position -= self.right * velocity;
        }
        if keys.contains(&KeyCode::KeyD) {
            self.position += self.right * velocity;
        }
    }

    pub fn mouse_control(&mut self, x_change: f32, y_change: f32) {
        if x_change == 0.0 && y_change == 0.0 {
            return;
        }
        self.yaw += x_change * self.turn_speed;
        self.pitch = (self.pitch + y_change * self.turn_speed).clamp(-MAX_PITCH, MAX_PITCH);
        self.update();
    }

    pub fn calc_view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: impl Into<Point3<f32>>) {
        self.position = position.into();
    }

    /// Unit vector the camera looks along.
    pub fn direction(&self) -> Vector3<f32> {
        self.front
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    fn update(&mut self) {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        self.front = Vector3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

/// Perspective projection that follows the surface size.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    aspect: f32,
    fovy: Deg<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, fovy: impl Into<Deg<f32>>, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: aspect_ratio(width, height),
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

// A minimised window reports a zero height.
fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

/// Camera data as seen by the shaders (group 1, binding 0).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub eye_position: [f32; 3],
    _padding: f32,
}

impl CameraUniform {
    pub fn new(camera: &Camera, projection: &Projection) -> Self {
        Self {
            projection: projection.calc_matrix().into(),
            view: camera.calc_view_matrix().into(),
            eye_position: camera.position().into(),
            _padding: 0.0,
        }
    }
}
