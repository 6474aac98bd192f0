use cgmath::{InnerSpace, Point3, Vector3};
use phong_ngin::data_structures::light::{
    DirectionalLight, Light, LightSet, MAX_POINT_LIGHTS, MAX_SPOT_LIGHTS, PointLight, SpotLight,
};

fn point_at(x: f32) -> PointLight {
    PointLight::new(Light::new([1.0, 0.0, 0.0], 0.1, 0.5), [x, 0.0, 0.0], 0.3, 0.2, 0.1)
}

#[test]
fn should_pack_lights_in_order() {
    let lights = LightSet::new(DirectionalLight::new(
        Light::new([1.0, 1.0, 1.0], 0.5, 0.5),
        [0.0, 0.0, -1.0],
    ))
    .with_point_light(point_at(1.0))
    .with_point_light(point_at(2.0));

    let uniform = lights.to_uniform();
    assert_eq!(uniform.directional.direction, [0.0, 0.0, -1.0]);
    assert_eq!(uniform.directional.ambient_intensity, 0.5);
    assert_eq!(uniform.point_light_count, 2);
    assert_eq!(uniform.spot_light_count, 0);
    assert_eq!(uniform.point_lights[0].position, [1.0, 0.0, 0.0]);
    assert_eq!(uniform.point_lights[1].position, [2.0, 0.0, 0.0]);
    assert_eq!(uniform.point_lights[1].constant, 0.3);
    assert_eq!(uniform.point_lights[1].linear, 0.2);
    assert_eq!(uniform.point_lights[1].exponent, 0.1);
    // Unused slots stay zeroed.
    assert_eq!(uniform.point_lights[2].diffuse_intensity, 0.0);
}

#[test]
fn should_drop_lights_beyond_the_shader_limit() {
    let mut lights = LightSet::default();
    for i in 0..MAX_POINT_LIGHTS + 2 {
        lights = lights.with_point_light(point_at(i as f32));
    }
    assert_eq!(lights.point_lights.len(), MAX_POINT_LIGHTS + 2);
    assert_eq!(lights.point_light_count(), MAX_POINT_LIGHTS);

    let uniform = lights.to_uniform();
    assert_eq!(uniform.point_light_count as usize, MAX_POINT_LIGHTS);
    assert_eq!(
        uniform.point_lights[MAX_POINT_LIGHTS - 1].position,
        [(MAX_POINT_LIGHTS - 1) as f32, 0.0, 0.0]
    );
}

#[test]
fn should_limit_spot_lights() {
    let mut lights = LightSet::default();
    for _ in 0..MAX_SPOT_LIGHTS + 1 {
        lights = lights.with_spot_light(SpotLight::default());
    }
    assert_eq!(lights.to_uniform().spot_light_count as usize, MAX_SPOT_LIGHTS);
}

#[test]
fn should_upload_the_cosine_of_the_spot_edge() {
    let spot = SpotLight::new(PointLight::default(), [0.0, -1.0, 0.0], 20.0);
    assert_eq!(spot.edge(), 20.0);
    let raw = spot.to_raw();
    assert!((raw.edge - 20.0_f32.to_radians().cos()).abs() < 1e-6);
    assert_eq!(raw.direction, [0.0, -1.0, 0.0]);
}

#[test]
fn should_move_a_flash_light() {
    let mut spot = SpotLight::new(PointLight::default(), [-100.0, -1.0, 0.0], 20.0);
    assert!((spot.direction().magnitude() - 1.0).abs() < 1e-6);

    spot.set_flash([1.0, 2.0, 3.0], [0.0, 0.0, -4.0]);
    assert_eq!(spot.point.position, Point3::new(1.0, 2.0, 3.0));
    assert!((spot.direction() - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-6);
    assert_eq!(spot.to_raw().position, [1.0, 2.0, 3.0]);
}

#[test]
fn should_attenuate_with_distance() {
    let light = point_at(0.0);
    assert!((light.attenuation(0.0) - 0.3).abs() < 1e-6);
    assert!((light.attenuation(2.0) - (0.1 * 4.0 + 0.2 * 2.0 + 0.3)).abs() < 1e-6);
}
