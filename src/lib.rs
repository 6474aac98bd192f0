//! phong-ngin
//!
//! A small real-time renderer that shows Phong lighting on textured meshes.
//! A first-person camera flies through a scene of two pyramids, a floor and an
//! OBJ model lit by one directional light, point lights and spot lights.
//!
//! High-level modules
//! - `camera`: first-person camera, projection and the camera uniform
//! - `config`: window, camera and asset settings with environment overrides
//! - `context`: central GPU and window context that owns device/queue/pipeline
//! - `data_structures`: lights, materials, meshes, textures and transforms
//! - `flow`: the winit event loop and the per-frame update/render cycle
//! - `input`: held keys and accumulated mouse motion
//! - `logging`: `env_logger` set up
//! - `pipelines`: the Phong render pipeline and its uniform buffers
//! - `render`: render composition, what a scene wants drawn each frame
//! - `resources`: helpers to load textures/models/shaders and build meshes
//! - `scene`: the demo scene and its flashlight
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod input;
pub mod logging;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;

pub use config::Config;
pub use flow::run;
