//! Frame assembly
//!
//! [`Scene`] owns everything a frame needs and pushes per-frame global state
//! before handing off to the node traversal. Draw options reach the GPU
//! through two kinds of binding: visibility bindings flip a node's `visible`
//! flag, and uniform toggles push a bool into a program.

use crate::foundation::math::Mat4;
use crate::render::{
    ClearFlags, DepthFunc, FrameContext, ProgramKey, ProgramRegistry, RenderBackend, RenderError,
    RenderResult, Texture2D, UniformValue,
};
use crate::scene::{Camera, DrawOptions, SceneError, SceneNode};

const SCENE: &str = "scene";

#[derive(Debug)]
struct VisibilityBinding {
    option: String,
    node: String,
}

#[derive(Debug)]
struct UniformToggle {
    option: String,
    program: ProgramKey,
    uniform: String,
}

#[derive(Debug)]
struct TextureBinding {
    program: ProgramKey,
    sampler: String,
    unit: u32,
    texture: Texture2D,
}

/// A drawable scene
///
/// Constructed once; [`Scene::draw`] renders one frame. The world node, the
/// camera and the draw options may be changed freely between frames.
#[derive(Debug)]
pub struct Scene {
    /// Root of the node tree
    pub world: SceneNode,
    /// Camera whose view matrix is the root's parent transform
    pub camera: Camera,
    /// On/off switches read at the start of every frame
    pub draw_options: DrawOptions,
    clear_color: [f32; 4],
    programs: ProgramRegistry,
    backend: Box<dyn RenderBackend>,
    visibility: Vec<VisibilityBinding>,
    toggles: Vec<UniformToggle>,
    textures: Vec<TextureBinding>,
}

impl Scene {
    /// Create a scene
    ///
    /// Every program referenced by the tree (node programs and light
    /// targets) must be in `programs`.
    pub fn new(
        backend: Box<dyn RenderBackend>,
        programs: ProgramRegistry,
        world: SceneNode,
        camera: Camera,
        draw_options: DrawOptions,
    ) -> Result<Self, SceneError> {
        let mut unknown = None;
        world.collect_program_refs(&mut |owner, key| {
            if unknown.is_none() && !programs.contains(key) {
                unknown = Some(owner.to_string());
            }
        });
        if let Some(owner) = unknown {
            return Err(SceneError::UnknownProgram(owner));
        }

        Ok(Self {
            world,
            camera,
            draw_options,
            clear_color: [1.0, 1.0, 1.0, 1.0],
            programs,
            backend,
            visibility: Vec::new(),
            toggles: Vec::new(),
            textures: Vec::new(),
        })
    }

    /// Color the frame is cleared to
    #[must_use]
    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    /// Drive `node`'s visibility from `option` every frame
    ///
    /// A missing option hides the node; a missing node is skipped.
    #[must_use]
    pub fn bind_visibility(mut self, option: impl Into<String>, node: impl Into<String>) -> Self {
        self.visibility.push(VisibilityBinding {
            option: option.into(),
            node: node.into(),
        });
        self
    }

    /// Push `option` into the bool uniform `uniform` of `program` every frame
    pub fn bind_uniform_toggle(
        mut self,
        option: impl Into<String>,
        program: ProgramKey,
        uniform: impl Into<String>,
    ) -> Result<Self, SceneError> {
        let uniform = uniform.into();
        if !self.programs.contains(program) {
            return Err(SceneError::UnknownProgram(uniform));
        }
        self.toggles.push(UniformToggle {
            option: option.into(),
            program,
            uniform,
        });
        Ok(self)
    }

    /// Bind `texture` to `unit` of `program` every frame
    pub fn bind_texture(
        mut self,
        program: ProgramKey,
        sampler: impl Into<String>,
        unit: u32,
        texture: Texture2D,
    ) -> Result<Self, SceneError> {
        let sampler = sampler.into();
        if !self.programs.contains(program) {
            return Err(SceneError::UnknownProgram(sampler));
        }
        let max = self.backend.max_texture_units();
        if unit >= max {
            return Err(RenderError::InvalidTextureUnit { unit, max }.into());
        }
        self.textures.push(TextureBinding {
            program,
            sampler,
            unit,
            texture,
        });
        Ok(self)
    }

    /// Programs that receive the projection matrix each frame
    #[must_use]
    pub fn shared_programs(&self) -> &[ProgramKey] {
        self.programs.shared()
    }

    /// Copy draw options onto the bound nodes' visibility flags
    ///
    /// A missing option reads as off, like a missing uniform toggle.
    fn apply_visibility(&mut self) {
        for binding in &self.visibility {
            let visible = self.draw_options.get(&binding.option).unwrap_or(false);
            if let Some(node) = self.world.find_mut(&binding.node) {
                node.visible = visible;
            }
        }
    }

    /// Draw one frame
    ///
    /// Program state is re-asserted from scratch each frame, so two frames
    /// with unchanged options and camera issue identical calls.
    pub fn draw(&mut self) -> RenderResult<()> {
        self.apply_visibility();
        log::trace!("Drawing frame");

        let shared = self.programs.shared().to_vec();
        let mut frame = FrameContext::new(self.backend.as_mut(), &mut self.programs);

        for toggle in &self.toggles {
            let on = self.draw_options.get(&toggle.option).unwrap_or(false);
            frame.bind_program(toggle.program)?;
            frame.set_uniform(SCENE, &toggle.uniform, UniformValue::Bool(on))?;
        }
        for binding in &self.textures {
            frame.bind_program(binding.program)?;
            frame.set_texture(SCENE, &binding.sampler, binding.unit, &binding.texture)?;
        }

        let projection = UniformValue::Mat4(self.camera.projection_matrix);
        for key in shared {
            frame.bind_program(key)?;
            frame.set_uniform(SCENE, "projectionMatrix", projection.clone())?;
        }

        let backend = frame.backend();
        backend.enable_depth_test(DepthFunc::Less);
        backend.set_clear_color(self.clear_color);
        backend.clear(ClearFlags::COLOR | ClearFlags::DEPTH);

        let view: Mat4 = self.camera.view_matrix;
        self.world.draw(&mut frame, None, &view)
    }
}
