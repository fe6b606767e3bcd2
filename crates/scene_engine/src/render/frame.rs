//! Per-frame traversal context
//!
//! The GPU has one bound program at a time. Instead of keeping that as hidden
//! global state, a [`FrameContext`] is created at the start of every frame and
//! threaded through the scene traversal. It remembers which program is bound
//! and only issues `use_program` when the program actually changes.
//!
//! A fresh context starts with nothing bound, so each frame re-asserts its
//! program state no matter what external code did between frames.

use crate::render::{
    MeshHandle, Primitive, ProgramKey, ProgramRegistry, RenderBackend, RenderError, RenderResult,
    ShaderProgram, Texture2D, UniformValue,
};

/// Shared traversal state for one frame
#[derive(Debug)]
pub struct FrameContext<'a> {
    backend: &'a mut dyn RenderBackend,
    programs: &'a mut ProgramRegistry,
    active: Option<ProgramKey>,
}

impl<'a> FrameContext<'a> {
    /// Start a frame with no program bound
    pub fn new(backend: &'a mut dyn RenderBackend, programs: &'a mut ProgramRegistry) -> Self {
        Self {
            backend,
            programs,
            active: None,
        }
    }

    /// Program currently bound, if any
    #[must_use]
    pub const fn active_program(&self) -> Option<ProgramKey> {
        self.active
    }

    /// Bind `key`, skipping the call if it is already bound
    pub fn bind_program(&mut self, key: ProgramKey) -> RenderResult<()> {
        if self.active == Some(key) {
            return Ok(());
        }
        self.programs
            .get_mut(key)
            .ok_or(RenderError::UnknownProgram)?
            .use_program();
        self.active = Some(key);
        Ok(())
    }

    fn active_mut(&mut self, requester: &str) -> RenderResult<&mut dyn ShaderProgram> {
        let key = self
            .active
            .ok_or_else(|| RenderError::NoActiveProgram(requester.to_string()))?;
        self.programs.get_mut(key).ok_or(RenderError::UnknownProgram)
    }

    /// Push a uniform into the bound program
    ///
    /// `requester` names the capability for the error raised when nothing is
    /// bound.
    pub fn set_uniform(
        &mut self,
        requester: &str,
        name: &str,
        value: UniformValue,
    ) -> RenderResult<()> {
        self.active_mut(requester)?.set_uniform(name, value)
    }

    /// Bind a texture to a unit of the bound program
    pub fn set_texture(
        &mut self,
        requester: &str,
        name: &str,
        unit: u32,
        texture: &Texture2D,
    ) -> RenderResult<()> {
        let max = self.backend.max_texture_units();
        if unit >= max {
            return Err(RenderError::InvalidTextureUnit { unit, max });
        }
        self.active_mut(requester)?.set_texture(name, unit, texture)
    }

    /// Issue a draw call with the bound program
    pub fn draw(
        &mut self,
        requester: &str,
        mesh: MeshHandle,
        primitive: Primitive,
    ) -> RenderResult<()> {
        if self.active.is_none() {
            return Err(RenderError::NoActiveProgram(requester.to_string()));
        }
        self.backend.draw_mesh(mesh, primitive)
    }

    /// Direct access to the backend for global state changes
    pub fn backend(&mut self) -> &mut dyn RenderBackend {
        &mut *self.backend
    }
}
