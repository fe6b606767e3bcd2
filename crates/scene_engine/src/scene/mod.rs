//! Scene graph
//!
//! Nodes own an ordered list of [`Attachment`]s: lights, materials, geometry
//! and nested nodes. A [`Scene`] owns the root node, the camera, the programs
//! and the backend, and draws one frame per call to [`Scene::draw`].
//!
//! ```text
//! Scene::draw
//!   ├─ visibility bindings      (draw options → node.visible)
//!   ├─ uniform toggles/textures (draw options → program uniforms)
//!   ├─ projection               (once per shared program)
//!   ├─ depth test, clear
//!   └─ world.draw               (recursive, declaration order)
//! ```
//!
//! [`PlanetSceneBuilder`] assembles the standard planet scene from a
//! [`crate::config::SceneConfig`].

mod camera;
mod draw_options;
mod node;
mod planet;
mod scene_renderer;

#[cfg(test)]
mod tests;

pub use camera::Camera;
pub use draw_options::DrawOptions;
pub use node::{Attachment, SceneNode};
pub use planet::{
    PlanetSceneBuilder, PlanetTextures, EARTH_NODE, RING_NODE, SUN_NODE, WIREFRAME_NODE, WORLD_NODE,
};
pub use scene_renderer::Scene;

use thiserror::Error;

use crate::assets::AssetError;
use crate::config::ConfigError;
use crate::render::{PropertyError, RenderError};

/// Scene construction errors
///
/// Any of these aborts construction; no partially built scene is returned.
#[derive(Error, Debug)]
pub enum SceneError {
    /// A texture image could not be loaded
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// The backend failed to create a resource
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A material or light was given a malformed property map
    #[error(transparent)]
    Property(#[from] PropertyError),

    /// The configuration could not be read
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Something refers to a program that is not in the registry
    #[error("'{0}' refers to a program that was never registered")]
    UnknownProgram(String),
}
