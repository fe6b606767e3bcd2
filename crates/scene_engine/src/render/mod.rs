//! # Rendering System
//!
//! The render-side half of the scene graph: the contracts the scene talks to
//! and the capability objects that are attached to scene nodes.
//!
//! ## Architecture
//!
//! - **Backend**: [`RenderBackend`] creates programs, textures and meshes and
//!   owns global rasterization state (depth test, clear)
//! - **Programs**: [`ShaderProgram`] receives uniforms and texture bindings;
//!   programs live in a [`ProgramRegistry`] and are referenced by [`ProgramKey`]
//! - **Capabilities**: [`DirectionalLight`], [`PhongMaterial`] and [`Geometry`]
//!   push their own state into the active program during traversal
//! - **Frame context**: [`FrameContext`] tracks the bound program for one frame
//!   so traversal never issues redundant activations
//!
//! The graphics API itself is external. The crate ships
//! [`recording::RecordingBackend`], a headless backend that records every call.

pub mod backend;
pub mod frame;
pub mod geometry;
pub mod lighting;
pub mod material;
pub mod program;
pub mod properties;
pub mod recording;
pub mod texture;

pub use backend::{ClearFlags, DepthFunc, MeshHandle, Primitive, RenderBackend, TextureHandle};
pub use frame::FrameContext;
pub use geometry::{Geometry, Shape};
pub use lighting::DirectionalLight;
pub use material::PhongMaterial;
pub use program::{
    ProgramKey, ProgramRegistry, ProgramSource, ShaderProgram, UniformType, UniformValue,
};
pub use properties::{PropertyError, PropertyMap, PropertyValue};
pub use texture::Texture2D;

use thiserror::Error;

/// High-level rendering error types
///
/// Construction-time variants (`ProgramCreation`, `ResourceCreation`) abort
/// scene construction. The remaining variants surface during a frame and are
/// programming errors: the frame is abandoned and the caller is expected to
/// stop rather than retry.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A shading program failed to compile or link
    #[error("Program creation failed for '{program}': {reason}")]
    ProgramCreation {
        /// Name of the program source
        program: String,
        /// Backend-provided reason
        reason: String,
    },

    /// Resource creation or management failed
    ///
    /// Occurs when GPU resources (textures, meshes) cannot be created.
    #[error("Resource creation failed: {0}")]
    ResourceCreation(String),

    /// A texture was bound to a unit the backend does not have
    #[error("Invalid texture unit {unit} (backend supports {max})")]
    InvalidTextureUnit {
        /// Requested unit
        unit: u32,
        /// Number of units the backend exposes
        max: u32,
    },

    /// A capability needed a program but none was active
    #[error("No active program while drawing '{0}'")]
    NoActiveProgram(String),

    /// A program key that is not (or no longer) in the registry
    #[error("Unknown program key")]
    UnknownProgram,

    /// A uniform value could not be built from raw components
    #[error("Invalid uniform value: {0}")]
    InvalidUniform(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
