//! Configuration system
//!
//! [`SceneConfig`] carries every value the planet scene used to hard-code:
//! viewport and camera, clear color, ambient light, texture paths, material
//! and light property maps, and the initial draw options. Files are TOML or
//! RON, chosen by extension.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

use crate::render::properties::{property_map, PropertyMap, PropertyValue};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match Format::of(path)? {
            Format::Toml => {
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            Format::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::of(path)? {
            Format::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Perspective camera parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position
    pub eye: [f32; 3],
    /// Point looked at
    pub target: [f32; 3],
    /// Up vector
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub fovy_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.5, 3.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fovy_degrees: 45.0,
            near: 0.01,
            far: 100.0,
        }
    }
}

/// Image files for the planet program's four texture units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    /// Daylight surface (unit 0)
    pub day: String,
    /// City lights at night (unit 1)
    pub night: String,
    /// Ocean depth mask (unit 2)
    pub bathymetry: String,
    /// Cloud cover (unit 3)
    pub clouds: String,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            day: "textures/earth_month04.jpg".to_string(),
            night: "textures/earth_at_night_2048.jpg".to_string(),
            bathymetry: "textures/earth_bathymetry_4096.jpg".to_string(),
            clouds: "textures/earth_clouds_2048.jpg".to_string(),
        }
    }
}

fn phong(ambient: [f32; 3], diffuse: [f32; 3], specular: [f32; 3], shininess: f32) -> PropertyMap {
    property_map([
        ("ambient", PropertyValue::from(ambient)),
        ("diffuse", PropertyValue::from(diffuse)),
        ("specular", PropertyValue::from(specular)),
        ("shininess", PropertyValue::from(shininess)),
    ])
}

/// Phong property maps for the scene's materials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialsConfig {
    /// Equator ring
    pub ring: PropertyMap,
    /// Solid earth
    pub earth: PropertyMap,
    /// Wireframe earth
    pub grid: PropertyMap,
}

impl Default for MaterialsConfig {
    fn default() -> Self {
        Self {
            ring: phong([0.5, 0.3, 0.3], [0.8, 0.2, 0.2], [0.4, 0.4, 0.4], 90.0),
            earth: phong([0.4, 0.4, 0.4], [1.0, 1.0, 1.0], [0.1, 0.1, 0.1], 10.0),
            grid: phong([0.5, 0.3, 0.3], [0.8, 0.2, 0.2], [0.4, 0.4, 0.4], 10.0),
        }
    }
}

/// Scene configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Viewport size in pixels, used for the projection aspect ratio
    pub viewport: (u32, u32),
    /// Camera placement and projection
    pub camera: CameraConfig,
    /// Color the frame is cleared to
    pub clear_color: [f32; 4],
    /// Ambient light pushed into the phong and planet programs
    pub ambient_light: [f32; 3],
    /// Planet textures
    pub textures: TextureConfig,
    /// Material property maps
    pub materials: MaterialsConfig,
    /// Sun light property map (`direction`, `color`)
    pub sun: PropertyMap,
    /// Initial draw options, in display order
    pub draw_options: Vec<(String, bool)>,
    /// Rotate the planet nodes so poles modeled on Z point along Y
    pub pole_axis_swap: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            viewport: (800, 600),
            camera: CameraConfig::default(),
            clear_color: [1.0, 1.0, 1.0, 1.0],
            ambient_light: [0.4, 0.4, 0.4],
            textures: TextureConfig::default(),
            materials: MaterialsConfig::default(),
            sun: property_map([("direction", [-1.0_f32, 0.0, 0.0]), ("color", [1.0, 1.0, 1.0])]),
            draw_options: ["Planet", "Ring", "PlanetAsWireframe", "LightNights", "Clouds"]
                .into_iter()
                .map(|name| (name.to_string(), false))
                .collect(),
            pole_axis_swap: true,
        }
    }
}

impl Config for SceneConfig {}

impl SceneConfig {
    /// Width over height, falling back to 1 for a degenerate viewport
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.viewport;
        if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        }
    }
}
