//! Backend abstraction traits for the rendering system
//!
//! This module defines the trait that graphics backends implement so the
//! scene graph can create resources, set global rasterization state and
//! issue draw calls without knowing which API sits underneath.

use std::fmt;

use bitflags::bitflags;

use crate::assets::ImageData;
use crate::render::{ProgramSource, RenderResult, ShaderProgram, Shape};

/// Handle to a texture object owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Handle to uploaded mesh buffers owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// Primitive topology for a draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Filled triangles
    Triangles,
    /// Line segments (wireframe)
    Lines,
}

/// Depth comparison function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthFunc {
    /// Keep fragments closer than the stored depth
    Less,
}

bitflags! {
    /// Buffers cleared by [`RenderBackend::clear`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        /// Color buffer
        const COLOR = 1 << 0;
        /// Depth buffer
        const DEPTH = 1 << 1;
    }
}

/// Main rendering backend trait
///
/// Everything the scene needs from the graphics API besides per-program
/// uniform calls, which go through [`ShaderProgram`]. All methods operate on
/// global GPU state; the scene re-asserts that state every frame.
pub trait RenderBackend: fmt::Debug {
    /// Compile and link a program from named shaders
    ///
    /// Failure here is fatal for scene construction.
    fn create_program(&mut self, source: &ProgramSource) -> RenderResult<Box<dyn ShaderProgram>>;

    /// Upload decoded image data as a 2D texture
    fn create_texture(&mut self, image: &ImageData) -> RenderResult<TextureHandle>;

    /// Tessellate and upload a parametric shape
    fn upload_shape(&mut self, shape: &Shape) -> RenderResult<MeshHandle>;

    /// Enable depth testing with the given comparison
    fn enable_depth_test(&mut self, func: DepthFunc);

    /// Set the color used by subsequent clears
    fn set_clear_color(&mut self, color: [f32; 4]);

    /// Clear the selected buffers
    fn clear(&mut self, flags: ClearFlags);

    /// Draw a mesh with the currently active program
    fn draw_mesh(&mut self, mesh: MeshHandle, primitive: Primitive) -> RenderResult<()>;

    /// Number of texture units available to a program
    fn max_texture_units(&self) -> u32;
}
