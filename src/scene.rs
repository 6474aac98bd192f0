//! The demo scene.
//!
//! Two textured pyramids, a floor, an OBJ model, one directional light, two
//! point lights and two spot lights. The first spot light can be switched to
//! follow the camera like a flashlight.

use anyhow::Context as _;
use cgmath::{Point3, Vector3};

use crate::{
    camera::Camera,
    config::Config,
    context::Context,
    data_structures::{
        light::{DirectionalLight, Light, LightSet, LightsUniform, PointLight, SpotLight},
        material::Material,
        model::{Mesh, Model, ModelVertex},
        texture::BoundTexture,
        transform::Transform,
    },
    pipelines::phong::ObjectResources,
    render::Render,
    resources::{
        load_model_obj,
        mesh::{calc_average_normals, create_mesh},
        texture::{load_plain_texture, load_texture_or},
    },
};

/// How far below the eye the flashlight sits.
pub const FLASH_DROP: f32 = 0.3;

/// Pyramid vertices and indices, with averaged normals.
pub fn pyramid() -> anyhow::Result<(Vec<ModelVertex>, Vec<u32>)> {
    #[rustfmt::skip]
    let indices = vec![
        0, 3, 1,
        1, 3, 2,
        2, 3, 0,
        0, 1, 2,
    ];
    let mut vertices = vec![
        ModelVertex::new([-1.0, -1.0, -0.6], [0.0, 0.0], [0.0; 3]),
        ModelVertex::new([0.0, -1.0, 1.0], [0.5, 0.0], [0.0; 3]),
        ModelVertex::new([1.0, -1.0, -0.6], [1.0, 0.0], [0.0; 3]),
        ModelVertex::new([0.0, 1.0, 0.0], [0.5, 1.0], [0.0; 3]),
    ];
    calc_average_normals(&mut vertices, &indices)?;
    Ok((vertices, indices))
}

/// A 20x20 floor quad. Its texture repeats ten times along each side.
pub fn floor() -> (Vec<ModelVertex>, Vec<u32>) {
    let normal = [0.0, -1.0, 0.0];
    let vertices = vec![
        ModelVertex::new([-10.0, 0.0, -10.0], [0.0, 0.0], normal),
        ModelVertex::new([10.0, 0.0, -10.0], [10.0, 0.0], normal),
        ModelVertex::new([-10.0, 0.0, 10.0], [0.0, 10.0], normal),
        ModelVertex::new([10.0, 0.0, 10.0], [10.0, 10.0], normal),
    ];
    (vertices, vec![0, 2, 1, 1, 2, 3])
}

pub fn shiny_material() -> Material {
    Material::new(1.0, 256.0)
}

pub fn dull_material() -> Material {
    Material::new(0.3, 4.0)
}

/// The lights the demo starts with.
pub fn demo_lights() -> LightSet {
    let white: [f32; 3] = [1.0, 1.0, 1.0];
    LightSet::new(DirectionalLight::new(
        Light::new(white, 0.5, 0.5),
        [0.0, 0.0, -1.0],
    ))
    .with_point_light(PointLight::new(
        Light::new([0.0, 0.0, 1.0], 0.0, 0.1),
        [0.0, 0.0, 0.0],
        0.3,
        0.2,
        0.1,
    ))
    .with_point_light(PointLight::new(
        Light::new([0.0, 1.0, 0.0], 0.0, 0.1),
        [-4.0, 2.0, 0.0],
        0.3,
        0.1,
        0.1,
    ))
    .with_spot_light(SpotLight::new(
        PointLight::new(Light::new(white, 0.0, 2.0), [0.0, 0.0, 0.0], 1.0, 0.0, 0.0),
        [0.0, -1.0, 0.0],
        20.0,
    ))
    .with_spot_light(SpotLight::new(
        PointLight::new(Light::new(white, 0.1, 0.1), [0.0, -1.5, 0.0], 1.0, 0.0, 0.0),
        [-100.0, -1.0, 0.0],
        20.0,
    ))
}

/// Put `light` just below the camera, shining where the camera looks.
pub fn follow_camera(light: &mut SpotLight, camera: &Camera) {
    let position: Point3<f32> = camera.position() - Vector3::unit_y() * FLASH_DROP;
    light.set_flash(position, camera.direction());
}

enum Shape {
    Mesh { mesh: Mesh, texture: BoundTexture },
    Model(Model),
}

pub struct SceneObject {
    pub transform: Transform,
    pub material: Material,
    resources: ObjectResources,
    shape: Shape,
}

impl SceneObject {
    fn new(ctx: &Context, transform: Transform, material: Material, shape: Shape) -> Self {
        let resources = ObjectResources::new(
            &ctx.device,
            &ctx.pipeline.object_layout,
            transform.to_raw(&material),
        );
        Self {
            transform,
            material,
            resources,
            shape,
        }
    }

    fn render(&self) -> Render<'_> {
        match &self.shape {
            Shape::Mesh { mesh, texture } => Render::Mesh {
                mesh,
                texture,
                object: &self.resources.bind_group,
            },
            Shape::Model(model) => Render::Model {
                model,
                object: &self.resources.bind_group,
            },
        }
    }
}

pub struct DemoScene {
    objects: Vec<SceneObject>,
    lights: LightSet,
    plain_texture: BoundTexture,
    flashlight: bool,
}

impl DemoScene {
    /// Build every mesh, load the textures and the model and upload the object uniforms.
    ///
    /// Missing textures fall back to the plain texture and a model that can't be loaded
    /// is left out; both are logged. Only broken built-in geometry is an error.
    pub async fn new(ctx: &Context, config: &Config) -> anyhow::Result<Self> {
        let device = &ctx.device;
        let queue = &ctx.queue;
        let layout = &ctx.pipeline.texture_layout;
        let assets = &config.assets;

        let plain_texture =
            load_plain_texture(&config.asset_path(&assets.plain_texture), device, queue, layout)
                .await;
        let brick_path = config.asset_path(&assets.brick_texture);
        let dirt_path = config.asset_path(&assets.dirt_texture);
        let (brick_texture, dirt_texture) = futures::future::join(
            load_texture_or(&brick_path, device, queue, layout, &plain_texture),
            load_texture_or(&dirt_path, device, queue, layout, &plain_texture),
        )
        .await;

        let (pyramid_vertices, pyramid_indices) = pyramid()?;
        let (floor_vertices, floor_indices) = floor();
        let mesh = |name: &str, vertices: &[ModelVertex], indices: &[u32]| {
            create_mesh(device, name, vertices, indices, None)
                .with_context(|| format!("failed to build the {name} mesh"))
        };

        let mut objects = vec![
            SceneObject::new(
                ctx,
                Transform::from(Vector3::new(0.0, 0.0, -2.5)),
                shiny_material(),
                Shape::Mesh {
                    mesh: mesh("pyramid 1", &pyramid_vertices, &pyramid_indices)?,
                    texture: brick_texture,
                },
            ),
            SceneObject::new(
                ctx,
                Transform::from(Vector3::new(0.0, 4.0, -2.5)),
                dull_material(),
                Shape::Mesh {
                    mesh: mesh("pyramid 2", &pyramid_vertices, &pyramid_indices)?,
                    texture: dirt_texture.clone(),
                },
            ),
            SceneObject::new(
                ctx,
                Transform::from(Vector3::new(0.0, -2.0, 0.0)),
                shiny_material(),
                Shape::Mesh {
                    mesh: mesh("floor", &floor_vertices, &floor_indices)?,
                    texture: dirt_texture,
                },
            ),
        ];

        let model_path = config.asset_path(&assets.model);
        match load_model_obj(&model_path, device, queue, layout, &plain_texture).await {
            Ok(model) => objects.push(SceneObject::new(
                ctx,
                Transform::new()
                    .translated([0.0, 10.0, 0.0])
                    .scaled([0.3, 0.3, 0.3]),
                shiny_material(),
                Shape::Model(model),
            )),
            Err(e) => log::error!("Skipping the model {}: {:#}", model_path.display(), e),
        }

        let scene = Self {
            objects,
            lights: demo_lights(),
            plain_texture,
            flashlight: false,
        };
        log::info!(
            "Scene ready with {} objects in {} draw calls",
            scene.objects.len(),
            scene.on_render().draw_calls()
        );
        Ok(scene)
    }

    /// Switch the first spot light between its fixed place and following the camera.
    pub fn toggle_flashlight(&mut self) -> bool {
        self.flashlight = !self.flashlight;
        log::info!("Flashlight {}", if self.flashlight { "on" } else { "off" });
        self.flashlight
    }

    pub fn on_update(&mut self, camera: &Camera) {
        if !self.flashlight {
            return;
        }
        if let Some(flash) = self.lights.spot_lights.first_mut() {
            follow_camera(flash, camera);
        }
    }

    pub fn lights_uniform(&self) -> LightsUniform {
        self.lights.to_uniform()
    }

    /// Upload every object's model matrix and material.
    pub fn write_to_buffer(&self, queue: &wgpu::Queue) {
        for object in &self.objects {
            object
                .resources
                .write(queue, &object.transform.to_raw(&object.material));
        }
    }

    pub fn on_render(&self) -> Render<'_> {
        Render::Composed(self.objects.iter().map(SceneObject::render).collect())
    }

    /// Texture for model meshes whose material has none.
    pub fn fallback_texture(&self) -> &BoundTexture {
        &self.plain_texture
    }
}
