//! Engine data structures: meshes, models, textures, lights and materials.
//!
//! - `model` contains meshes, models and the draw calls for them
//! - `texture` contains GPU texture wrapper and creation utilities
//! - `transform` holds per-object placement and the object uniform
//! - `light` contains directional, point and spot lights and their GPU packing
//! - `material` holds the specular parameters of a surface

pub mod light;
pub mod material;
pub mod model;
pub mod texture;
pub mod transform;
