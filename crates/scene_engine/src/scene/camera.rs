//! Camera

use crate::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// View and projection matrices shared by every program
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// World to eye transform; the root node's parent transform
    pub view_matrix: Mat4,
    /// Eye to clip transform; pushed into every shared program
    pub projection_matrix: Mat4,
    fovy: f32,
    near: f32,
    far: f32,
}

impl Camera {
    /// Perspective camera looking from `eye` at `target`
    ///
    /// `fovy` is in radians.
    #[must_use]
    pub fn new(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        fovy: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            view_matrix: Mat4::look_at(eye, target, up),
            projection_matrix: Mat4::perspective(fovy, aspect, near, far),
            fovy,
            near,
            far,
        }
    }

    /// Build from configuration
    #[must_use]
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self::new(
            Vec3::from(config.eye),
            Vec3::from(config.target),
            Vec3::from(config.up),
            utils::deg_to_rad(config.fovy_degrees),
            aspect,
            config.near,
            config.far,
        )
    }

    /// Recompute the projection for a new viewport size
    ///
    /// A zero height is ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if height == 0 {
            log::warn!("Ignoring viewport with zero height");
            return;
        }
        let aspect = width as f32 / height as f32;
        self.projection_matrix = Mat4::perspective(self.fovy, aspect, self.near, self.far);
    }
}
