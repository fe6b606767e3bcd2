//! Headless recording backend
//!
//! Implements [`RenderBackend`] and [`ShaderProgram`] without a GPU: every
//! call is appended to a shared [`CallLog`] in the order it was made. The
//! log is the instrumented stub the tests assert against, and the demo app
//! prints it to show what a frame would send to the graphics API.
//!
//! Like a real context, the log tracks which program is bound, so recorded
//! draw calls carry the program they would have rendered with.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::assets::ImageData;
use crate::render::{
    ClearFlags, DepthFunc, MeshHandle, Primitive, ProgramSource, RenderBackend, RenderError,
    RenderResult, ShaderProgram, Shape, Texture2D, TextureHandle, UniformValue,
};

/// Default number of texture units exposed by the recording backend
pub const DEFAULT_TEXTURE_UNITS: u32 = 16;

/// One recorded GPU call
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    /// A program was compiled and linked
    CreateProgram {
        /// Program name
        program: String,
    },
    /// A texture was uploaded
    CreateTexture {
        /// Handle assigned
        texture: TextureHandle,
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
    /// A parametric shape was tessellated and uploaded
    UploadShape {
        /// Handle assigned
        mesh: MeshHandle,
        /// Shape parameters
        shape: Shape,
    },
    /// A program was made active
    UseProgram {
        /// Program name
        program: String,
    },
    /// A uniform was set on a program
    SetUniform {
        /// Program name
        program: String,
        /// Uniform name
        name: String,
        /// Value pushed
        value: UniformValue,
    },
    /// A texture was bound to a unit for a sampler
    SetTexture {
        /// Program name
        program: String,
        /// Sampler uniform name
        name: String,
        /// Texture unit
        unit: u32,
        /// Texture bound
        texture: TextureHandle,
    },
    /// Depth testing was enabled
    EnableDepthTest(DepthFunc),
    /// The clear color was set
    ClearColor([f32; 4]),
    /// Buffers were cleared
    Clear(ClearFlags),
    /// A mesh was drawn
    Draw {
        /// Program bound at the time of the draw
        program: Option<String>,
        /// Mesh drawn
        mesh: MeshHandle,
        /// Topology
        primitive: Primitive,
    },
}

impl RenderCall {
    /// Program this call targets, if it is program-specific
    #[must_use]
    pub fn program(&self) -> Option<&str> {
        match self {
            Self::UseProgram { program }
            | Self::SetUniform { program, .. }
            | Self::SetTexture { program, .. } => Some(program),
            Self::Draw { program, .. } => program.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct LogState {
    calls: Vec<RenderCall>,
    bound_program: Option<String>,
}

/// Ordered log of GPU calls shared by a backend and its programs
///
/// Cloning the log shares it. The renderer is single-threaded, so the log
/// uses `Rc<RefCell<_>>` and is neither `Send` nor `Sync`.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    state: Rc<RefCell<LogState>>,
}

impl CallLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: RenderCall) {
        let mut state = self.state.borrow_mut();
        if let RenderCall::UseProgram { program } = &call {
            state.bound_program = Some(program.clone());
        }
        log::trace!("{:?}", call);
        state.calls.push(call);
    }

    fn bound_program(&self) -> Option<String> {
        self.state.borrow().bound_program.clone()
    }

    /// Copy of every call recorded so far
    #[must_use]
    pub fn snapshot(&self) -> Vec<RenderCall> {
        self.state.borrow().calls.clone()
    }

    /// Calls recorded after position `mark` (see [`CallLog::len`])
    #[must_use]
    pub fn since(&self, mark: usize) -> Vec<RenderCall> {
        self.state.borrow().calls.get(mark..).map(<[RenderCall]>::to_vec).unwrap_or_default()
    }

    /// Calls that target the named program, in order
    #[must_use]
    pub fn for_program(&self, program: &str) -> Vec<RenderCall> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|call| call.program() == Some(program))
            .cloned()
            .collect()
    }

    /// Number of calls recorded
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().calls.len()
    }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop recorded calls; the bound program is kept, as on a real GPU
    pub fn clear(&self) {
        self.state.borrow_mut().calls.clear();
    }
}

/// A program that records its calls
#[derive(Debug)]
pub struct RecordingProgram {
    name: String,
    log: CallLog,
    max_texture_units: u32,
    uniforms: HashMap<String, Vec<u8>>,
}

impl RecordingProgram {
    /// Create a program writing into `log`
    pub fn new(name: impl Into<String>, log: CallLog, max_texture_units: u32) -> Self {
        Self {
            name: name.into(),
            log,
            max_texture_units,
            uniforms: HashMap::new(),
        }
    }

    /// Bytes last uploaded for a uniform, as the GPU would hold them
    #[must_use]
    pub fn uniform_bytes(&self, name: &str) -> Option<&[u8]> {
        self.uniforms.get(name).map(Vec::as_slice)
    }
}

impl ShaderProgram for RecordingProgram {
    fn label(&self) -> &str {
        &self.name
    }

    fn use_program(&mut self) {
        self.log.push(RenderCall::UseProgram {
            program: self.name.clone(),
        });
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> RenderResult<()> {
        self.uniforms.insert(name.to_string(), value.to_bytes());
        self.log.push(RenderCall::SetUniform {
            program: self.name.clone(),
            name: name.to_string(),
            value,
        });
        Ok(())
    }

    fn set_texture(&mut self, name: &str, unit: u32, texture: &Texture2D) -> RenderResult<()> {
        if unit >= self.max_texture_units {
            return Err(RenderError::InvalidTextureUnit {
                unit,
                max: self.max_texture_units,
            });
        }
        // samplers hold the unit index
        self.uniforms
            .insert(name.to_string(), bytemuck::bytes_of(&unit).to_vec());
        self.log.push(RenderCall::SetTexture {
            program: self.name.clone(),
            name: name.to_string(),
            unit,
            texture: texture.handle,
        });
        Ok(())
    }
}

/// Backend that records instead of rendering
#[derive(Debug)]
pub struct RecordingBackend {
    log: CallLog,
    max_texture_units: u32,
    next_texture: u32,
    next_mesh: u32,
    failing_programs: HashSet<String>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingBackend {
    /// Create a backend with a fresh log
    #[must_use]
    pub fn new() -> Self {
        Self {
            log: CallLog::new(),
            max_texture_units: DEFAULT_TEXTURE_UNITS,
            next_texture: 1,
            next_mesh: 1,
            failing_programs: HashSet::new(),
        }
    }

    /// Limit the number of texture units
    #[must_use]
    pub fn with_max_texture_units(mut self, units: u32) -> Self {
        self.max_texture_units = units;
        self
    }

    /// Make `create_program` fail for the named program, as a link error would
    #[must_use]
    pub fn fail_program(mut self, name: impl Into<String>) -> Self {
        self.failing_programs.insert(name.into());
        self
    }

    /// Shared handle to the call log
    #[must_use]
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// Build a program on this backend's log without recording its creation
    #[must_use]
    pub fn program(&self, name: &str) -> Box<dyn ShaderProgram> {
        Box::new(RecordingProgram::new(name, self.log.clone(), self.max_texture_units))
    }
}

impl RenderBackend for RecordingBackend {
    fn create_program(&mut self, source: &ProgramSource) -> RenderResult<Box<dyn ShaderProgram>> {
        if self.failing_programs.contains(&source.name) {
            return Err(RenderError::ProgramCreation {
                program: source.name.clone(),
                reason: format!(
                    "link error between '{}' and '{}'",
                    source.vertex_shader, source.fragment_shader
                ),
            });
        }
        self.log.push(RenderCall::CreateProgram {
            program: source.name.clone(),
        });
        Ok(self.program(&source.name))
    }

    fn create_texture(&mut self, image: &ImageData) -> RenderResult<TextureHandle> {
        if image.width == 0 || image.height == 0 {
            return Err(RenderError::ResourceCreation(
                "cannot create a texture with a zero dimension".to_string(),
            ));
        }
        let texture = TextureHandle(self.next_texture);
        self.next_texture += 1;
        self.log.push(RenderCall::CreateTexture {
            texture,
            width: image.width,
            height: image.height,
        });
        Ok(texture)
    }

    fn upload_shape(&mut self, shape: &Shape) -> RenderResult<MeshHandle> {
        let mesh = MeshHandle(self.next_mesh);
        self.next_mesh += 1;
        self.log.push(RenderCall::UploadShape { mesh, shape: *shape });
        Ok(mesh)
    }

    fn enable_depth_test(&mut self, func: DepthFunc) {
        self.log.push(RenderCall::EnableDepthTest(func));
    }

    fn set_clear_color(&mut self, color: [f32; 4]) {
        self.log.push(RenderCall::ClearColor(color));
    }

    fn clear(&mut self, flags: ClearFlags) {
        self.log.push(RenderCall::Clear(flags));
    }

    fn draw_mesh(&mut self, mesh: MeshHandle, primitive: Primitive) -> RenderResult<()> {
        let program = self.log.bound_program();
        self.log.push(RenderCall::Draw {
            program,
            mesh,
            primitive,
        });
        Ok(())
    }

    fn max_texture_units(&self) -> u32 {
        self.max_texture_units
    }
}
