#[cfg(feature = "integration-tests")]
mod common;

#[cfg(feature = "integration-tests")]
mod floor {
    use cgmath::Vector3;
    use phong_ngin::{
        data_structures::{material::Material, model::Mesh, transform::Transform},
        pipelines::phong::ObjectResources,
        resources::mesh::create_mesh,
        scene::floor,
    };

    use crate::common::Gpu;

    /// Pixel row of the floor directly below (0, 1, -5), straight ahead of the test camera.
    pub const NEAR_ROW: u32 = 190;
    /// Pixel row of the floor at (0, -1, -10).
    pub const FAR_ROW: u32 = 159;

    /// The demo floor one unit below the camera, without specular highlights.
    pub fn floor_below_camera(gpu: &Gpu) -> (Mesh, ObjectResources) {
        let (vertices, indices) = floor();
        let mesh = create_mesh(&gpu.device, "floor", &vertices, &indices, None).unwrap();
        let object = ObjectResources::new(
            &gpu.device,
            &gpu.pipeline.object_layout,
            Transform::from(Vector3::new(0.0, -1.0, -5.0)).to_raw(&Material::new(0.0, 1.0)),
        );
        (mesh, object)
    }
}

#[cfg(feature = "integration-tests")]
fn dark_lights() -> phong_ngin::data_structures::light::LightSet {
    use phong_ngin::data_structures::light::{DirectionalLight, Light, LightSet};

    LightSet::new(DirectionalLight::new(
        Light::new([0.0, 0.0, 0.0], 0.0, 0.0),
        [0.0, -1.0, 0.0],
    ))
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_render_clear_colour() {
    use phong_ngin::{data_structures::light::LightSet, render::Render};

    let gpu = common::gpu();
    let img = gpu.render(wgpu::Color::WHITE, &LightSet::default(), Render::None);
    for pixel in img.pixels() {
        assert_eq!(*pixel, image::Rgba([255, 255, 255, 255]));
    }
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_light_a_pyramid_in_front_of_the_camera() {
    use cgmath::Vector3;
    use phong_ngin::{
        data_structures::transform::Transform,
        pipelines::phong::ObjectResources,
        render::Render,
        resources::mesh::create_mesh,
        scene::{demo_lights, pyramid, shiny_material},
    };

    let gpu = common::gpu();
    let (vertices, indices) = pyramid().unwrap();
    let mesh = create_mesh(&gpu.device, "pyramid", &vertices, &indices, None).unwrap();
    let object = ObjectResources::new(
        &gpu.device,
        &gpu.pipeline.object_layout,
        Transform::from(Vector3::new(0.0, 0.0, -2.5)).to_raw(&shiny_material()),
    );

    let img = gpu.render(
        wgpu::Color::BLACK,
        &demo_lights(),
        Render::Mesh {
            mesh: &mesh,
            texture: &gpu.plain,
            object: &object.bind_group,
        },
    );

    let centre = img.get_pixel(common::SIZE / 2, common::SIZE / 2);
    assert!(centre[0] > 0 && centre[1] > 0 && centre[2] > 0, "{:?}", centre);
    // Nothing covers the corners.
    assert_eq!(*img.get_pixel(0, 0), image::Rgba([0, 0, 0, 255]));
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_only_light_inside_the_spot_cone() {
    use phong_ngin::{
        data_structures::light::{Light, PointLight, SpotLight},
        render::Render,
    };

    let gpu = common::gpu();
    let (mesh, object) = floor::floor_below_camera(&gpu);
    let lights = dark_lights().with_spot_light(SpotLight::new(
        PointLight::new(Light::new([1.0, 1.0, 1.0], 0.0, 1.0), [0.0, 1.0, -5.0], 1.0, 0.0, 0.0),
        [0.0, -1.0, 0.0],
        20.0,
    ));

    let img = gpu.render(
        wgpu::Color::BLACK,
        &lights,
        Render::Mesh {
            mesh: &mesh,
            texture: &gpu.plain,
            object: &object.bind_group,
        },
    );

    let inside = img.get_pixel(common::SIZE / 2, floor::NEAR_ROW);
    assert!(inside[0] > 200, "{:?}", inside);
    let outside = img.get_pixel(common::SIZE / 2, floor::FAR_ROW);
    assert_eq!(*outside, image::Rgba([0, 0, 0, 255]));
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_attenuate_point_lights_with_distance() {
    use phong_ngin::{
        data_structures::light::{Light, PointLight},
        render::Render,
    };

    let gpu = common::gpu();
    let (mesh, object) = floor::floor_below_camera(&gpu);
    let render_with = |constant: f32, exponent: f32| {
        let lights = dark_lights().with_point_light(PointLight::new(
            Light::new([1.0, 1.0, 1.0], 0.0, 1.0),
            [0.0, 1.0, -5.0],
            constant,
            0.0,
            exponent,
        ));
        gpu.render(
            wgpu::Color::BLACK,
            &lights,
            Render::Mesh {
                mesh: &mesh,
                texture: &gpu.plain,
                object: &object.bind_group,
            },
        )
    };

    let unattenuated = render_with(1.0, 0.0);
    let attenuated = render_with(1.0, 1.0);

    let near = unattenuated.get_pixel(common::SIZE / 2, floor::NEAR_ROW);
    assert!(near[0] > 240, "{:?}", near);
    // 2 units away the light is divided by 1 + 2^2, 0.2 in linear space.
    let near = attenuated.get_pixel(common::SIZE / 2, floor::NEAR_ROW);
    assert!((100..150).contains(&near[0]), "{:?}", near);
    let far = attenuated.get_pixel(common::SIZE / 2, floor::FAR_ROW);
    assert!(far[0] > 0 && far[0] < near[0], "{:?} vs {:?}", far, near);
}
