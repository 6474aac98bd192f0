//! Phong light sources and their GPU representation.
//!
//! Every light shares a [`Light`] base (colour plus ambient and diffuse
//! intensity). [`DirectionalLight`] adds a direction, [`PointLight`] a position
//! and an attenuation polynomial and [`SpotLight`] extends a point light with a
//! direction and a cut-off edge.
//!
//! Directions are the direction the light travels in, i.e. from the light
//! towards the lit surface.
//!
//! [`LightSet`] gathers the lights of a scene and packs them into the fixed-size
//! [`LightsUniform`] the fragment shader reads. The shader only has room for
//! [`MAX_POINT_LIGHTS`] point lights and [`MAX_SPOT_LIGHTS`] spot lights.

use cgmath::{InnerSpace, Point3, Vector3};

/// Number of point light slots in the fragment shader.
pub const MAX_POINT_LIGHTS: usize = 3;
/// Number of spot light slots in the fragment shader.
pub const MAX_SPOT_LIGHTS: usize = 3;

/// Colour and intensities shared by all light types.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub colour: Vector3<f32>,
    pub ambient_intensity: f32,
    pub diffuse_intensity: f32,
}

impl Light {
    pub fn new(colour: impl Into<Vector3<f32>>, ambient_intensity: f32, diffuse_intensity: f32) -> Self {
        Self {
            colour: colour.into(),
            ambient_intensity,
            diffuse_intensity,
        }
    }
}

impl Default for Light {
    /// Full white ambient light without a diffuse contribution.
    fn default() -> Self {
        Self::new([1.0, 1.0, 1.0], 1.0, 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub base: Light,
    pub direction: Vector3<f32>,
}

impl DirectionalLight {
    pub fn new(base: Light, direction: impl Into<Vector3<f32>>) -> Self {
        Self {
            base,
            direction: direction.into(),
        }
    }

    pub fn to_raw(&self) -> DirectionalLightRaw {
        DirectionalLightRaw {
            colour: self.base.colour.into(),
            ambient_intensity: self.base.ambient_intensity,
            direction: self.direction.into(),
            diffuse_intensity: self.base.diffuse_intensity,
        }
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Light::default(), [0.0, -1.0, 0.0])
    }
}

/// Attenuation is `exponent * d^2 + linear * d + constant` for a fragment at distance `d`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub base: Light,
    pub position: Point3<f32>,
    pub constant: f32,
    pub linear: f32,
    pub exponent: f32,
}

impl PointLight {
    pub fn new(
        base: Light,
        position: impl Into<Point3<f32>>,
        constant: f32,
        linear: f32,
        exponent: f32,
    ) -> Self {
        Self {
            base,
            position: position.into(),
            constant,
            linear,
            exponent,
        }
    }

    /// Divisor the shader applies to this light's contribution at `distance`.
    pub fn attenuation(&self, distance: f32) -> f32 {
        self.exponent * distance * distance + self.linear * distance + self.constant
    }

    pub fn to_raw(&self) -> PointLightRaw {
        PointLightRaw {
            colour: self.base.colour.into(),
            ambient_intensity: self.base.ambient_intensity,
            position: self.position.into(),
            diffuse_intensity: self.base.diffuse_intensity,
            constant: self.constant,
            linear: self.linear,
            exponent: self.exponent,
            _padding: 0.0,
        }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Light::default(), [0.0, 0.0, 0.0], 1.0, 0.0, 0.0)
    }
}

/// A cone-shaped point light.
///
/// `edge` is the cut-off half angle in degrees. The shader compares against its
/// cosine, see [`SpotLight::processed_edge`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLight {
    pub point: PointLight,
    direction: Vector3<f32>,
    edge: f32,
}

impl SpotLight {
    pub fn new(point: PointLight, direction: impl Into<Vector3<f32>>, edge: f32) -> Self {
        Self {
            point,
            direction: normalize_or_down(direction.into()),
            edge,
        }
    }

    /// Re-aim the light, used to turn it into a flashlight held by the camera.
    pub fn set_flash(&mut self, position: impl Into<Point3<f32>>, direction: impl Into<Vector3<f32>>) {
        self.point.position = position.into();
        self.direction = normalize_or_down(direction.into());
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    pub fn edge(&self) -> f32 {
        self.edge
    }

    pub fn processed_edge(&self) -> f32 {
        self.edge.to_radians().cos()
    }

    pub fn to_raw(&self) -> SpotLightRaw {
        let point = self.point.to_raw();
        SpotLightRaw {
            colour: point.colour,
            ambient_intensity: point.ambient_intensity,
            position: point.position,
            diffuse_intensity: point.diffuse_intensity,
            constant: point.constant,
            linear: point.linear,
            exponent: point.exponent,
            edge: self.processed_edge(),
            direction: self.direction.into(),
            _padding: 0.0,
        }
    }
}

impl Default for SpotLight {
    fn default() -> Self {
        Self::new(PointLight::default(), [0.0, -1.0, 0.0], 0.0)
    }
}

// A zero vector can't be normalized; such a light points straight down.
fn normalize_or_down(direction: Vector3<f32>) -> Vector3<f32> {
    if direction.magnitude2() > f32::EPSILON {
        direction.normalize()
    } else {
        log::warn!("Spot light direction must not be zero, pointing it down instead");
        -Vector3::unit_y()
    }
}

/// All lights of a scene. Point and spot lights beyond the shader limits are kept
/// here but never uploaded.
#[derive(Clone, Debug, Default)]
pub struct LightSet {
    pub directional: DirectionalLight,
    pub point_lights: Vec<PointLight>,
    pub spot_lights: Vec<SpotLight>,
}

impl LightSet {
    pub fn new(directional: DirectionalLight) -> Self {
        Self {
            directional,
            point_lights: Vec::new(),
            spot_lights: Vec::new(),
        }
    }

    pub fn with_point_light(mut self, light: PointLight) -> Self {
        if self.point_lights.len() >= MAX_POINT_LIGHTS {
            log::warn!(
                "Only {} point lights fit into the shader, point light {} will be ignored",
                MAX_POINT_LIGHTS,
                self.point_lights.len()
            );
        }
        self.point_lights.push(light);
        self
    }

    pub fn with_spot_light(mut self, light: SpotLight) -> Self {
        if self.spot_lights.len() >= MAX_SPOT_LIGHTS {
            log::warn!(
                "Only {} spot lights fit into the shader, spot light {} will be ignored",
                MAX_SPOT_LIGHTS,
                self.spot_lights.len()
            );
        }
        self.spot_lights.push(light);
        self
    }

    /// Number of point lights the shader will actually see.
    pub fn point_light_count(&self) -> usize {
        self.point_lights.len().min(MAX_POINT_LIGHTS)
    }

    /// Number of spot lights the shader will actually see.
    pub fn spot_light_count(&self) -> usize {
        self.spot_lights.len().min(MAX_SPOT_LIGHTS)
    }

    /// Pack the lights for the fragment shader, dropping those beyond the slot limits.
    pub fn to_uniform(&self) -> LightsUniform {
        let mut uniform: LightsUniform = bytemuck::Zeroable::zeroed();
        uniform.directional = self.directional.to_raw();
        for (slot, light) in uniform.point_lights.iter_mut().zip(&self.point_lights) {
            *slot = light.to_raw();
        }
        for (slot, light) in uniform.spot_lights.iter_mut().zip(&self.spot_lights) {
            *slot = light.to_raw();
        }
        uniform.point_light_count = self.point_light_count() as u32;
        uniform.spot_light_count = self.spot_light_count() as u32;
        uniform
    }
}

// The raw types below mirror the WGSL structs in `shader.frag.wgsl`. Every
// vec3 is followed by a scalar so that the 16 byte alignment of uniforms holds.

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirectionalLightRaw {
    pub colour: [f32; 3],
    pub ambient_intensity: f32,
    pub direction: [f32; 3],
    pub diffuse_intensity: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightRaw {
    pub colour: [f32; 3],
    pub ambient_intensity: f32,
    pub position: [f32; 3],
    pub diffuse_intensity: f32,
    pub constant: f32,
    pub linear: f32,
    pub exponent: f32,
    _padding: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpotLightRaw {
    pub colour: [f32; 3],
    pub ambient_intensity: f32,
    pub position: [f32; 3],
    pub diffuse_intensity: f32,
    pub constant: f32,
    pub linear: f32,
    pub exponent: f32,
    /// Cosine of the cut-off angle.
    pub edge: f32,
    pub direction: [f32; 3],
    _padding: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub directional: DirectionalLightRaw,
    pub point_lights: [PointLightRaw; MAX_POINT_LIGHTS],
    pub spot_lights: [SpotLightRaw; MAX_SPOT_LIGHTS],
    pub point_light_count: u32,
    pub spot_light_count: u32,
    _padding: [u32; 2],
}
