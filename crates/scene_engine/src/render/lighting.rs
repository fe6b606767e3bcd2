//! Lighting system
//!
//! A directional light pushes its color and eye-space direction into the
//! programs it was registered with. The direction is given in the
//! coordinate frame of the node the light is attached to and transformed by
//! that node's accumulated model-view matrix when drawn.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::render::properties::PropertyReader;
use crate::render::{
    FrameContext, ProgramKey, PropertyError, PropertyMap, RenderError, RenderResult, UniformValue,
};

/// Directional light source (like sunlight)
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    /// Name of the uniform struct the light is pushed into
    pub name: String,
    /// Direction the light travels, in the attaching node's frame
    pub direction: Vec3,
    /// Light color
    pub color: Vec3,
    /// Programs receiving this light; empty means "the active program"
    pub programs: Vec<ProgramKey>,
}

impl DirectionalLight {
    /// Create a directional light
    pub fn new(
        name: impl Into<String>,
        direction: Vec3,
        color: Vec3,
        programs: Vec<ProgramKey>,
    ) -> Self {
        Self {
            name: name.into(),
            direction,
            color,
            programs,
        }
    }

    /// Create a light from a property map with `direction` and `color`
    pub fn from_properties(
        name: impl Into<String>,
        properties: &PropertyMap,
        programs: Vec<ProgramKey>,
    ) -> Result<Self, PropertyError> {
        let name = name.into();
        let reader = PropertyReader::new(&name, properties);
        let direction = reader.vec3("direction")?;
        let color = reader.vec3("color")?;
        Ok(Self::new(name, direction, color, programs))
    }

    /// Light direction in eye coordinates under `model_view`
    #[must_use]
    pub fn eye_direction(&self, model_view: &Mat4) -> Vec3 {
        let direction = model_view.transform_direction(&self.direction);
        direction.try_normalize(f32::EPSILON).unwrap_or(direction)
    }

    /// Push `<name>.on`, `<name>.direction` and `<name>.color` into its programs
    ///
    /// Leaves the last target program bound; the traversal re-binds the
    /// node's program before the next capability.
    pub fn contribute(
        &self,
        frame: &mut FrameContext<'_>,
        active: Option<ProgramKey>,
        model_view: &Mat4,
    ) -> RenderResult<()> {
        let fallback;
        let targets: &[ProgramKey] = if self.programs.is_empty() {
            fallback = [active.ok_or_else(|| RenderError::NoActiveProgram(self.name.clone()))?];
            &fallback
        } else {
            &self.programs
        };

        let name = &self.name;
        let direction = self.eye_direction(model_view);
        for &key in targets {
            frame.bind_program(key)?;
            frame.set_uniform(name, &format!("{name}.on"), UniformValue::Bool(true))?;
            frame.set_uniform(name, &format!("{name}.direction"), UniformValue::Vec3(direction))?;
            frame.set_uniform(name, &format!("{name}.color"), UniformValue::Vec3(self.color))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::HALF_PI;
    use crate::render::properties::property_map;
    use crate::render::recording::{RecordingBackend, RenderCall};
    use crate::render::ProgramRegistry;
    use approx::assert_relative_eq;

    #[test]
    fn test_eye_direction_follows_view_rotation() {
        let light = DirectionalLight::new("sun", -Vec3::x(), Vec3::repeat(1.0), vec![]);
        let view = Mat4::rotation(HALF_PI, Vec3::y())
            * Mat4::new_translation(&Vec3::new(0.0, 0.0, -3.0));

        // rotating -X by +90 degrees about Y gives +Z
        assert_relative_eq!(light.eye_direction(&view), Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_contribute_targets_registered_programs_only() {
        let mut backend = RecordingBackend::new();
        let log = backend.log();
        let mut programs = ProgramRegistry::new();
        let phong = programs.register(backend.program("phong"));
        let planet = programs.register(backend.program("planet"));
        let light = DirectionalLight::from_properties(
            "light",
            &property_map([("direction", [-1.0_f32, 0.0, 0.0]), ("color", [1.0, 1.0, 1.0])]),
            vec![phong],
        )
        .unwrap();

        let mut frame = FrameContext::new(&mut backend, &mut programs);
        frame.bind_program(planet).unwrap();
        light.contribute(&mut frame, Some(planet), &Mat4::identity()).unwrap();

        assert_eq!(frame.active_program(), Some(phong));
        let phong_calls = log.for_program("phong");
        assert_eq!(phong_calls.len(), 4);
        assert_eq!(
            phong_calls[2],
            RenderCall::SetUniform {
                program: "phong".into(),
                name: "light.direction".into(),
                value: UniformValue::Vec3(Vec3::new(-1.0, 0.0, 0.0)),
            }
        );
        // planet only saw its own activation
        assert_eq!(log.for_program("planet").len(), 1);
    }

    #[test]
    fn test_contribute_without_programs_uses_active() {
        let mut backend = RecordingBackend::new();
        let log = backend.log();
        let mut programs = ProgramRegistry::new();
        let p = programs.register(backend.program("P"));
        let light = DirectionalLight::new("light", Vec3::x(), Vec3::new(1.0, 0.9, 0.8), vec![]);

        let mut frame = FrameContext::new(&mut backend, &mut programs);
        let err = light.contribute(&mut frame, None, &Mat4::identity());
        assert!(matches!(err, Err(RenderError::NoActiveProgram(_))));

        frame.bind_program(p).unwrap();
        light.contribute(&mut frame, Some(p), &Mat4::identity()).unwrap();
        assert_eq!(log.for_program("P").len(), 4);
    }
}
