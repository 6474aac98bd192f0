use std::{
    io::{BufReader, Cursor},
    path::{Path, PathBuf},
};

use crate::{
    data_structures::{model, texture::BoundTexture},
    resources::texture::{load_string, load_texture_or},
};

/**
 * This module contains all logic for loading meshes, textures and shaders from external files.
 */
pub mod mesh;
pub mod texture;

/**
 * Load an OBJ model together with the textures of its materials.
 *
 * The MTL file and the texture paths inside it are resolved relative to the
 * OBJ file. Every material gets a texture slot so that the material ids of the
 * meshes stay valid: materials without a diffuse map, or whose map can't be
 * loaded, use `fallback`, and so do meshes without a material. Meshes that
 * can't be built are skipped.
 */
pub async fn load_model_obj(
    path: &Path,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    fallback: &BoundTexture,
) -> anyhow::Result<model::Model> {
    let obj_text = load_string(path).await?;
    let obj_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let obj_cursor = Cursor::new(obj_text);
    let mut obj_reader = BufReader::new(obj_cursor);

    let (models, obj_materials) = tobj::load_obj_buf_async(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |p| {
            let mtl_path = obj_dir.join(p);
            async move {
                match load_string(&mtl_path).await {
                    Ok(mat_text) => tobj::load_mtl_buf(&mut BufReader::new(Cursor::new(mat_text))),
                    Err(e) => {
                        log::error!("{:#}", e);
                        Err(tobj::LoadError::OpenFileFailed)
                    }
                }
            }
        },
    )
    .await?;

    let obj_materials = obj_materials.unwrap_or_else(|e| {
        log::warn!("No materials for {}: {}", path.display(), e);
        Vec::new()
    });

    let mut textures = Vec::with_capacity(obj_materials.len());
    for m in obj_materials {
        let texture = match &m.diffuse_texture {
            Some(diffuse) => {
                let texture_path: PathBuf = obj_dir.join(diffuse);
                load_texture_or(&texture_path, device, queue, layout, fallback).await
            }
            None => {
                log::warn!(
                    "Material {} of {} references no texture, using {}",
                    m.name,
                    path.display(),
                    fallback.name
                );
                fallback.clone()
            }
        };
        textures.push(texture);
    }

    let file_name = path.to_string_lossy();
    let meshes = mesh::load_meshes(&models, &file_name, device);

    log::info!(
        "Loaded {} with {} meshes and {} textures",
        path.display(),
        meshes.len(),
        textures.len()
    );
    Ok(model::Model { meshes, textures })
}
