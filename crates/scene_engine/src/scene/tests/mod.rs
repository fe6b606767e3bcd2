//! Scene-level tests against the recording backend

mod traversal;

use std::path::PathBuf;

use crate::config::SceneConfig;
use crate::render::recording::RenderCall;
use crate::render::UniformValue;

/// Config whose textures point at small PNGs written to a temp directory
pub(super) fn config_with_textures(test: &str) -> SceneConfig {
    let dir: PathBuf =
        std::env::temp_dir().join(format!("scene_engine_{}_{}", test, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let write = |name: &str, color: [u8; 4]| {
        let path = dir.join(name);
        image::RgbaImage::from_pixel(2, 2, image::Rgba(color)).save(&path).unwrap();
        path.display().to_string()
    };

    let mut config = SceneConfig::default();
    config.textures.day = write("day.png", [30, 90, 200, 255]);
    config.textures.night = write("night.png", [10, 10, 10, 255]);
    config.textures.bathymetry = write("bathymetry.png", [0, 0, 0, 255]);
    config.textures.clouds = write("clouds.png", [255, 255, 255, 128]);
    config
}

/// Uniform names in call order
pub(super) fn uniform_names(calls: &[RenderCall]) -> Vec<String> {
    calls
        .iter()
        .filter_map(|call| match call {
            RenderCall::SetUniform { name, .. } => Some(name.clone()),
            _ => None,
        })
        .collect()
}

/// Values pushed to `uniform` on `program`
pub(super) fn uniform_values(
    calls: &[RenderCall],
    program: &str,
    uniform: &str,
) -> Vec<UniformValue> {
    calls
        .iter()
        .filter_map(|call| match call {
            RenderCall::SetUniform {
                program: p,
                name,
                value,
            } if p == program && name == uniform => Some(value.clone()),
            _ => None,
        })
        .collect()
}
