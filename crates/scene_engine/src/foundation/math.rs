//! Math utilities and types
//!
//! Provides the matrix and vector types used by the scene graph. All matrices
//! are column-major, right-handed, with OpenGL clip-space depth in [-1, 1].

pub use nalgebra::{Matrix4, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    #[must_use]
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix of `angle` radians around an arbitrary axis
    fn rotation(angle: f32, axis: Vec3) -> Mat4;

    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a perspective projection matrix (`fov_y` in radians)
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Transform a direction by the upper 3x3 of this matrix (translation ignored)
    fn transform_direction(&self, direction: &Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn rotation(angle: f32, axis: Vec3) -> Mat4 {
        nalgebra::Rotation3::from_axis_angle(&Unit::new_normalize(axis), angle).to_homogeneous()
    }

    fn rotation_x(angle: f32) -> Mat4 {
        Self::rotation(angle, Vec3::x())
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }

    fn transform_direction(&self, direction: &Vec3) -> Vec3 {
        self.fixed_view::<3, 3>(0, 0) * direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_rotation_x_swaps_z_onto_y() {
        let rot = Mat4::rotation_x(constants::HALF_PI);
        let pole = rot.transform_direction(&Vec3::z());
        assert_relative_eq!(pole, Vec3::new(0.0, -1.0, 0.0), epsilon = EPSILON);
        let up = rot.transform_direction(&Vec3::y());
        assert_relative_eq!(up, Vec3::new(0.0, 0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_look_at_maps_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.5, 3.0);
        let view = Mat4::look_at(eye, Vec3::zeros(), Vec3::y());
        let eye_in_view = view.transform_point(&Point3::from(eye));
        assert_relative_eq!(eye_in_view.coords, Vec3::zeros(), epsilon = 1e-5);
    }

    #[test]
    fn test_transform_direction_ignores_translation() {
        let translate = Mat4::new_translation(&Vec3::new(5.0, 6.0, 7.0));
        let dir = translate.transform_direction(&Vec3::new(-1.0, 0.0, 0.0));
        assert_relative_eq!(dir, Vec3::new(-1.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_deg_to_rad() {
        assert_relative_eq!(utils::deg_to_rad(180.0), constants::PI, epsilon = EPSILON);
    }
}
