//! Drawable geometry
//!
//! Shapes are described parametrically and tessellated by the backend when
//! uploaded. A [`Geometry`] keeps the resulting mesh handle and issues one
//! draw call each time its node is traversed.

use crate::foundation::math::Mat4;
use crate::render::{FrameContext, MeshHandle, Primitive, RenderBackend, RenderResult, UniformValue};

/// Parametric shape description
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// UV sphere centered at the origin
    Sphere {
        /// Sphere radius
        radius: f32,
        /// Segments around the equator
        u_segments: u32,
        /// Segments from pole to pole
        v_segments: u32,
        /// Draw as lines instead of triangles
        wireframe: bool,
    },
    /// Torus in the XY plane centered at the origin
    Torus {
        /// Distance from the center to the tube center
        radius: f32,
        /// Tube radius
        tube_radius: f32,
        /// Segments around the ring
        u_segments: u32,
        /// Segments around the tube
        v_segments: u32,
        /// Draw as lines instead of triangles
        wireframe: bool,
    },
}

impl Shape {
    /// Solid sphere
    #[must_use]
    pub const fn sphere(radius: f32, u_segments: u32, v_segments: u32) -> Self {
        Self::Sphere {
            radius,
            u_segments,
            v_segments,
            wireframe: false,
        }
    }

    /// Solid torus
    #[must_use]
    pub const fn torus(radius: f32, tube_radius: f32, u_segments: u32, v_segments: u32) -> Self {
        Self::Torus {
            radius,
            tube_radius,
            u_segments,
            v_segments,
            wireframe: false,
        }
    }

    /// Same shape drawn as lines
    #[must_use]
    pub const fn wireframe(self) -> Self {
        match self {
            Self::Sphere {
                radius,
                u_segments,
                v_segments,
                ..
            } => Self::Sphere {
                radius,
                u_segments,
                v_segments,
                wireframe: true,
            },
            Self::Torus {
                radius,
                tube_radius,
                u_segments,
                v_segments,
                ..
            } => Self::Torus {
                radius,
                tube_radius,
                u_segments,
                v_segments,
                wireframe: true,
            },
        }
    }

    /// Whether the shape is drawn as lines
    #[must_use]
    pub const fn is_wireframe(&self) -> bool {
        match self {
            Self::Sphere { wireframe, .. } | Self::Torus { wireframe, .. } => *wireframe,
        }
    }

    /// Topology used to draw the shape
    #[must_use]
    pub const fn primitive(&self) -> Primitive {
        if self.is_wireframe() {
            Primitive::Lines
        } else {
            Primitive::Triangles
        }
    }
}

/// Uploaded shape attached to a scene node
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Name for debugging
    pub name: String,
    /// Parameters the mesh was built from
    pub shape: Shape,
    /// Backend mesh
    pub mesh: MeshHandle,
}

impl Geometry {
    /// Upload `shape` through the backend
    pub fn new(
        backend: &mut dyn RenderBackend,
        name: impl Into<String>,
        shape: Shape,
    ) -> RenderResult<Self> {
        let name = name.into();
        let mesh = backend.upload_shape(&shape)?;
        log::debug!("Uploaded geometry '{}' as {:?}", name, mesh);
        Ok(Self { name, shape, mesh })
    }

    /// Push the model-view matrix and draw
    pub fn contribute(&self, frame: &mut FrameContext<'_>, model_view: &Mat4) -> RenderResult<()> {
        frame.set_uniform(&self.name, "modelViewMatrix", UniformValue::Mat4(*model_view))?;
        frame.draw(&self.name, self.mesh, self.shape.primitive())
    }
}
