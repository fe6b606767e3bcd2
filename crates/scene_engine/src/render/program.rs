//! Shading program contract and registry
//!
//! A [`ShaderProgram`] is one compiled GPU program. Programs are created by
//! the backend, owned by a [`ProgramRegistry`] and referenced from scene
//! nodes and lights through [`ProgramKey`]s.

use std::fmt;

use slotmap::{new_key_type, SlotMap};

use crate::foundation::math::{Mat4, Vec3, Vec4};
use crate::render::{RenderError, RenderResult, Texture2D};

new_key_type! {
    /// Stable handle to a program in a [`ProgramRegistry`]
    pub struct ProgramKey;
}

/// Uniform types understood by programs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformType {
    /// Single float
    Float,
    /// Boolean (uploaded as a 32-bit integer)
    Bool,
    /// 3-component float vector
    Vec3,
    /// 4-component float vector
    Vec4,
    /// 4x4 float matrix, column-major
    Mat4,
}

impl UniformType {
    /// GLSL spelling of the type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Mat4 => "mat4",
        }
    }

    /// Number of float components a value of this type carries
    #[must_use]
    pub const fn component_count(self) -> usize {
        match self {
            Self::Float | Self::Bool => 1,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
            Self::Mat4 => 16,
        }
    }
}

impl fmt::Display for UniformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed uniform value
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    /// Single float
    Float(f32),
    /// Boolean toggle
    Bool(bool),
    /// 3-component vector (colors, directions)
    Vec3(Vec3),
    /// 4-component vector (RGBA colors)
    Vec4(Vec4),
    /// 4x4 matrix (projection, model-view)
    Mat4(Mat4),
}

impl UniformValue {
    /// The type tag of this value
    #[must_use]
    pub const fn uniform_type(&self) -> UniformType {
        match self {
            Self::Float(_) => UniformType::Float,
            Self::Bool(_) => UniformType::Bool,
            Self::Vec3(_) => UniformType::Vec3,
            Self::Vec4(_) => UniformType::Vec4,
            Self::Mat4(_) => UniformType::Mat4,
        }
    }

    /// Build a value of type `ty` from raw float components
    ///
    /// Matrices are read column-major. A bool is true for any non-zero
    /// component. The component count must match the type exactly.
    pub fn from_components(ty: UniformType, components: &[f32]) -> RenderResult<Self> {
        if components.len() != ty.component_count() {
            return Err(RenderError::InvalidUniform(format!(
                "{} expects {} components, got {}",
                ty,
                ty.component_count(),
                components.len()
            )));
        }

        Ok(match ty {
            UniformType::Float => Self::Float(components[0]),
            UniformType::Bool => Self::Bool(components[0] != 0.0),
            UniformType::Vec3 => Self::Vec3(Vec3::from_column_slice(components)),
            UniformType::Vec4 => Self::Vec4(Vec4::from_column_slice(components)),
            UniformType::Mat4 => Self::Mat4(Mat4::from_column_slice(components)),
        })
    }

    /// Raw bytes as they would be uploaded to the GPU
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Float(v) => bytemuck::bytes_of(v).to_vec(),
            Self::Bool(v) => bytemuck::bytes_of(&u32::from(*v)).to_vec(),
            Self::Vec3(v) => bytemuck::cast_slice(v.as_slice()).to_vec(),
            Self::Vec4(v) => bytemuck::cast_slice(v.as_slice()).to_vec(),
            Self::Mat4(m) => bytemuck::cast_slice(m.as_slice()).to_vec(),
        }
    }
}

/// Shader names a program is built from
///
/// Shader source text is external; programs are identified by the names of
/// their vertex and fragment shaders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSource {
    /// Human-readable program name, used in logs and recorded calls
    pub name: String,
    /// Vertex shader name
    pub vertex_shader: String,
    /// Fragment shader name
    pub fragment_shader: String,
}

impl ProgramSource {
    /// Create a new program source description
    pub fn new(
        name: impl Into<String>,
        vertex_shader: impl Into<String>,
        fragment_shader: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            vertex_shader: vertex_shader.into(),
            fragment_shader: fragment_shader.into(),
        }
    }
}

/// One compiled GPU program
///
/// Uniform and texture calls apply to this program; callers activate it with
/// [`ShaderProgram::use_program`] first, exactly as with the underlying API.
pub trait ShaderProgram: fmt::Debug {
    /// Name used in logs
    fn label(&self) -> &str;

    /// Make this the active program
    fn use_program(&mut self);

    /// Set a named uniform
    fn set_uniform(&mut self, name: &str, value: UniformValue) -> RenderResult<()>;

    /// Bind `texture` to texture `unit` and point the sampler `name` at it
    fn set_texture(&mut self, name: &str, unit: u32, texture: &Texture2D) -> RenderResult<()>;
}

/// Owner of every program in a scene
///
/// Holds all programs plus the de-duplicated, ordered list of programs that
/// receive the camera projection every frame.
#[derive(Debug, Default)]
pub struct ProgramRegistry {
    programs: SlotMap<ProgramKey, Box<dyn ShaderProgram>>,
    shared: Vec<ProgramKey>,
}

impl ProgramRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a program
    pub fn insert(&mut self, program: Box<dyn ShaderProgram>) -> ProgramKey {
        log::debug!("Registering program '{}'", program.label());
        self.programs.insert(program)
    }

    /// Add a program to the shared (projection-receiving) list
    ///
    /// Returns `false` if the key is unknown or already shared.
    pub fn share(&mut self, key: ProgramKey) -> bool {
        if !self.programs.contains_key(key) || self.shared.contains(&key) {
            return false;
        }
        self.shared.push(key);
        true
    }

    /// Insert a program and add it to the shared list
    pub fn register(&mut self, program: Box<dyn ShaderProgram>) -> ProgramKey {
        let key = self.insert(program);
        self.share(key);
        key
    }

    /// Programs that receive the projection matrix, in registration order
    #[must_use]
    pub fn shared(&self) -> &[ProgramKey] {
        &self.shared
    }

    /// Whether `key` refers to a live program
    #[must_use]
    pub fn contains(&self, key: ProgramKey) -> bool {
        self.programs.contains_key(key)
    }

    /// Borrow a program
    #[must_use]
    pub fn get(&self, key: ProgramKey) -> Option<&dyn ShaderProgram> {
        self.programs.get(key).map(|program| program.as_ref())
    }

    /// Mutably borrow a program
    pub fn get_mut(&mut self, key: ProgramKey) -> Option<&mut dyn ShaderProgram> {
        self.programs
            .get_mut(key)
            .map(|program| program.as_mut() as &mut dyn ShaderProgram)
    }

    /// Label of a program, for logs and errors
    #[must_use]
    pub fn label(&self, key: ProgramKey) -> Option<&str> {
        self.get(key).map(ShaderProgram::label)
    }

    /// Number of programs owned
    #[must_use]
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Whether the registry owns no programs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::{CallLog, RecordingProgram};

    fn program(log: &CallLog, name: &str) -> Box<dyn ShaderProgram> {
        Box::new(RecordingProgram::new(name, log.clone(), 4))
    }

    #[test]
    fn test_register_deduplicates_shared_list() {
        let log = CallLog::new();
        let mut registry = ProgramRegistry::new();
        let a = registry.register(program(&log, "a"));
        let b = registry.register(program(&log, "b"));

        assert!(!registry.share(a));
        assert_eq!(registry.shared(), &[a, b]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_insert_does_not_share() {
        let log = CallLog::new();
        let mut registry = ProgramRegistry::new();
        let key = registry.insert(program(&log, "private"));

        assert!(registry.shared().is_empty());
        assert!(registry.contains(key));
        assert_eq!(registry.label(key), Some("private"));
    }

    #[test]
    fn test_from_components_checks_arity() {
        let value =
            UniformValue::from_components(UniformType::Vec4, &[0.0, 0.0, 1.0, 1.0]).unwrap();
        assert_eq!(value, UniformValue::Vec4(Vec4::new(0.0, 0.0, 1.0, 1.0)));

        let err = UniformValue::from_components(UniformType::Vec3, &[1.0, 2.0]);
        assert!(matches!(err, Err(RenderError::InvalidUniform(_))));
    }

    #[test]
    fn test_mat4_bytes_are_column_major() {
        let m = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));
        let bytes = UniformValue::Mat4(m).to_bytes();
        assert_eq!(bytes.len(), 64);

        let floats: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        // translation lives in the fourth column
        assert_eq!(&floats[12..15], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_bool_uploads_as_u32() {
        assert_eq!(UniformValue::Bool(true).to_bytes(), 1u32.to_ne_bytes().to_vec());
        assert_eq!(UniformValue::Bool(false).uniform_type().as_str(), "bool");
    }
}
