/// Specular response of a surface.
///
/// The diffuse colour comes from the texture, the material only controls how
/// strong and how tight the specular highlight is.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Material {
    pub specular_intensity: f32,
    pub shininess: f32,
}

impl Material {
    pub fn new(specular_intensity: f32, shininess: f32) -> Self {
        Self {
            specular_intensity,
            shininess,
        }
    }
}
