//! Material system for rendering
//!
//! Phong materials push their reflectance coefficients into whichever program
//! is active when their node is drawn.

use crate::foundation::math::Vec3;
use crate::render::properties::PropertyReader;
use crate::render::{FrameContext, PropertyError, PropertyMap, RenderResult, UniformValue};

/// Phong material properties
#[derive(Debug, Clone, PartialEq)]
pub struct PhongMaterial {
    /// Name of the uniform struct the coefficients are pushed into
    pub name: String,
    /// Ambient reflectance (RGB)
    pub ambient: Vec3,
    /// Diffuse reflectance (RGB)
    pub diffuse: Vec3,
    /// Specular reflectance (RGB)
    pub specular: Vec3,
    /// Specular exponent
    pub shininess: f32,
}

impl PhongMaterial {
    /// Create a material from explicit coefficients
    pub fn new(
        name: impl Into<String>,
        ambient: Vec3,
        diffuse: Vec3,
        specular: Vec3,
        shininess: f32,
    ) -> Self {
        Self {
            name: name.into(),
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    /// Create a material from a property map
    ///
    /// Requires `ambient`, `diffuse`, `specular` (3 components each) and a
    /// scalar `shininess`.
    pub fn from_properties(
        name: impl Into<String>,
        properties: &PropertyMap,
    ) -> Result<Self, PropertyError> {
        let name = name.into();
        let reader = PropertyReader::new(&name, properties);
        let ambient = reader.vec3("ambient")?;
        let diffuse = reader.vec3("diffuse")?;
        let specular = reader.vec3("specular")?;
        let shininess = reader.scalar("shininess")?;
        Ok(Self::new(name, ambient, diffuse, specular, shininess))
    }

    /// Push the coefficients into the active program as `<name>.ambient` etc.
    pub fn contribute(&self, frame: &mut FrameContext<'_>) -> RenderResult<()> {
        let name = &self.name;
        frame.set_uniform(name, &format!("{name}.ambient"), UniformValue::Vec3(self.ambient))?;
        frame.set_uniform(name, &format!("{name}.diffuse"), UniformValue::Vec3(self.diffuse))?;
        frame.set_uniform(name, &format!("{name}.specular"), UniformValue::Vec3(self.specular))?;
        frame.set_uniform(name, &format!("{name}.shininess"), UniformValue::Float(self.shininess))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::properties::{property_map, PropertyValue};
    use crate::render::recording::{RecordingBackend, RenderCall};
    use crate::render::ProgramRegistry;

    fn ring_properties() -> PropertyMap {
        property_map([
            ("ambient", PropertyValue::from([0.5, 0.3, 0.3])),
            ("diffuse", PropertyValue::from([0.8, 0.2, 0.2])),
            ("specular", PropertyValue::from([0.4, 0.4, 0.4])),
            ("shininess", PropertyValue::from(90.0)),
        ])
    }

    #[test]
    fn test_from_properties() {
        let material = PhongMaterial::from_properties("RingMaterial", &ring_properties()).unwrap();
        assert_eq!(material.diffuse, Vec3::new(0.8, 0.2, 0.2));
        assert_eq!(material.shininess, 90.0);
    }

    #[test]
    fn test_from_properties_rejects_scalar_color() {
        let mut properties = ring_properties();
        properties.insert("ambient".into(), PropertyValue::Scalar(0.5));

        let err = PhongMaterial::from_properties("RingMaterial", &properties).unwrap_err();
        assert!(matches!(err, PropertyError::ExpectedVector { ref key, .. } if key == "ambient"));
    }

    #[test]
    fn test_contribute_pushes_four_uniforms_in_order() {
        let mut backend = RecordingBackend::new();
        let log = backend.log();
        let mut programs = ProgramRegistry::new();
        let phong = programs.register(backend.program("phong"));
        let material = PhongMaterial::from_properties("material", &ring_properties()).unwrap();

        let mut frame = FrameContext::new(&mut backend, &mut programs);
        frame.bind_program(phong).unwrap();
        material.contribute(&mut frame).unwrap();

        let names: Vec<String> = log
            .for_program("phong")
            .into_iter()
            .filter_map(|call| match call {
                RenderCall::SetUniform { name, .. } => Some(name),
                _ => None,
            })
            .collect();
        assert_eq!(
            names,
            vec!["material.ambient", "material.diffuse", "material.specular", "material.shininess"]
        );
    }

    #[test]
    fn test_name_prefixes_uniforms() {
        let mut backend = RecordingBackend::new();
        let log = backend.log();
        let mut programs = ProgramRegistry::new();
        let blue = programs.register(backend.program("blue"));
        let grid = PhongMaterial::from_properties("grid", &ring_properties()).unwrap();

        let mut frame = FrameContext::new(&mut backend, &mut programs);
        frame.bind_program(blue).unwrap();
        grid.contribute(&mut frame).unwrap();

        assert_eq!(
            log.for_program("blue")[4],
            RenderCall::SetUniform {
                program: "blue".into(),
                name: "grid.shininess".into(),
                value: UniformValue::Float(90.0),
            }
        );
    }
}
