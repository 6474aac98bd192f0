//! Demo configuration.
//!
//! [`Config::default`] holds the values the demo was designed with. A few of
//! them can be overridden from the environment, see [`Config::from_env`].

use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};

pub const ASSETS_ENV: &str = "PHONG_ASSETS";
pub const WINDOW_SIZE_ENV: &str = "PHONG_WINDOW_SIZE";
pub const MODEL_ENV: &str = "PHONG_MODEL";

#[derive(Clone, Debug, PartialEq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1366,
            height: 768,
            title: "Test Window".to_string(),
        }
    }
}

/// Start parameters of the first-person camera. Angles are in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub world_up: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub move_speed: f32,
    pub turn_speed: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            world_up: [0.0, 1.0, 0.0],
            yaw: -90.0,
            pitch: 0.0,
            move_speed: 5.0,
            turn_speed: 0.25,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

/// Asset locations, relative to [`Config::asset_root`].
#[derive(Clone, Debug, PartialEq)]
pub struct AssetConfig {
    pub vertex_shader: String,
    pub fragment_shader: String,
    pub brick_texture: String,
    pub dirt_texture: String,
    pub plain_texture: String,
    pub model: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            vertex_shader: "shaders/shader.vert.wgsl".to_string(),
            fragment_shader: "shaders/shader.frag.wgsl".to_string(),
            brick_texture: "textures/brick.png".to_string(),
            dirt_texture: "textures/dirt.png".to_string(),
            plain_texture: "textures/plain.png".to_string(),
            model: "models/crate.obj".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub assets: AssetConfig,
    pub asset_root: PathBuf,
    pub clear_colour: wgpu::Color,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            assets: AssetConfig::default(),
            asset_root: PathBuf::from("assets"),
            clear_colour: wgpu::Color::BLACK,
        }
    }
}

impl Config {
    /// Defaults with overrides from `PHONG_ASSETS`, `PHONG_WINDOW_SIZE` (`WIDTHxHEIGHT`)
    /// and `PHONG_MODEL`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`] but reads the variables through `var`.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Some(root) = var(ASSETS_ENV) {
            config.asset_root = PathBuf::from(root);
        }
        if let Some(size) = var(WINDOW_SIZE_ENV) {
            let (width, height) =
                parse_window_size(&size).with_context(|| format!("invalid {WINDOW_SIZE_ENV}"))?;
            config.window.width = width;
            config.window.height = height;
        }
        if let Some(model) = var(MODEL_ENV) {
            config.assets.model = model;
        }
        Ok(config)
    }

    /// Resolve an asset path against the asset root.
    pub fn asset_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.asset_root.join(relative)
    }
}

/// Parse `WIDTHxHEIGHT`, e.g. `1366x768`.
pub fn parse_window_size(size: &str) -> anyhow::Result<(u32, u32)> {
    let Some((width, height)) = size.trim().split_once(['x', 'X']) else {
        bail!("expected WIDTHxHEIGHT, got {size:?}");
    };
    let width: u32 = width
        .trim()
        .parse()
        .with_context(|| format!("bad width {width:?}"))?;
    let height: u32 = height
        .trim()
        .parse()
        .with_context(|| format!("bad height {height:?}"))?;
    if width == 0 || height == 0 {
        bail!("window size must not be zero, got {width}x{height}");
    }
    Ok((width, height))
}
