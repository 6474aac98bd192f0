use std::path::Path;

use anyhow::Context as _;

use crate::data_structures::texture::{self, BoundTexture};

/// Layout of bind group 0: the diffuse texture and its sampler.
pub fn texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("texture_bind_group_layout"),
    })
}

pub async fn load_string(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("could not read {}", path.display()))
}

pub async fn load_binary(path: &Path) -> anyhow::Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("could not read {}", path.display()))
}

pub async fn load_texture(
    path: &Path,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<texture::Texture> {
    let data = load_binary(path).await?;
    let label = path.to_string_lossy();
    let format = path.extension().and_then(|ext| ext.to_str());
    texture::Texture::from_bytes(device, queue, &data, &label, format)
        .with_context(|| format!("could not decode {}", path.display()))
}

/// Load and bind a texture, falling back to `fallback` when it can't be loaded.
pub async fn load_texture_or(
    path: &Path,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    fallback: &BoundTexture,
) -> BoundTexture {
    match load_texture(path, device, queue).await {
        Ok(texture) => BoundTexture::new(device, &path.to_string_lossy(), texture, layout),
        Err(e) => {
            log::error!("Failed to load texture, using {} instead: {:#}", fallback.name, e);
            fallback.clone()
        }
    }
}

/// The plain texture meshes without their own texture are drawn with.
///
/// A missing plain texture is replaced by a generated 1x1 white one.
pub async fn load_plain_texture(
    path: &Path,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
) -> BoundTexture {
    let texture = match load_texture(path, device, queue).await {
        Ok(texture) => texture,
        Err(e) => {
            log::error!("Failed to load the plain texture, generating one: {:#}", e);
            texture::Texture::create_solid([255, 255, 255, 255], 1, 1, device, queue)
        }
    };
    BoundTexture::new(device, &path.to_string_lossy(), texture, layout)
}
