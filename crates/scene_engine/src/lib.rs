//! # Scene Engine
//!
//! A scene-graph renderer: a hierarchy of nodes carrying lights, materials and
//! geometry, each bound to a shading program, drawn by a per-frame traversal
//! that composes transforms, keeps every program in sync with one camera and
//! issues draw calls in declaration order.
//!
//! ## Features
//!
//! - **Scene graph**: heterogeneous child lists (capabilities and nested nodes)
//! - **Program synchronization**: one projection matrix pushed to every program
//! - **Backend abstraction**: the graphics API sits behind [`render::RenderBackend`]
//! - **Headless recording backend**: every GPU call captured in order
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SceneConfig::default();
//!     let backend = RecordingBackend::new();
//!     let mut scene = PlanetSceneBuilder::new(config).build(Box::new(backend))?;
//!     scene.draw_options.set("Planet", true);
//!     scene.draw()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, ImageData},
        config::{Config, ConfigError, SceneConfig},
        foundation::math::{Mat4, Mat4Ext, Vec3, Vec4},
        render::{
            recording::{CallLog, RecordingBackend, RenderCall},
            DirectionalLight, Geometry, PhongMaterial, ProgramKey, ProgramSource,
            RenderBackend, RenderError, RenderResult, Shape, ShaderProgram, Texture2D,
            UniformType, UniformValue,
        },
        scene::{
            Attachment, Camera, DrawOptions, PlanetSceneBuilder, Scene, SceneError, SceneNode,
        },
    };
}
