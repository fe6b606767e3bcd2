//! Scene nodes
//!
//! A node has a local transform, an optional program and an ordered list of
//! attachments. Drawing a node composes its transform onto the parent's,
//! picks its program (or inherits the parent's) and lets each attachment
//! contribute in declaration order.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::render::{
    DirectionalLight, FrameContext, Geometry, PhongMaterial, ProgramKey, RenderError, RenderResult,
};

/// Something attached to a node
#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    /// Pushes light state into its programs
    Light(DirectionalLight),
    /// Pushes material coefficients into the active program
    Material(PhongMaterial),
    /// Pushes the model-view matrix and draws
    Geometry(Geometry),
    /// A nested node, drawn recursively
    Node(SceneNode),
}

impl From<DirectionalLight> for Attachment {
    fn from(light: DirectionalLight) -> Self {
        Self::Light(light)
    }
}

impl From<PhongMaterial> for Attachment {
    fn from(material: PhongMaterial) -> Self {
        Self::Material(material)
    }
}

impl From<Geometry> for Attachment {
    fn from(geometry: Geometry) -> Self {
        Self::Geometry(geometry)
    }
}

impl From<SceneNode> for Attachment {
    fn from(node: SceneNode) -> Self {
        Self::Node(node)
    }
}

/// A node in the scene graph
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Node name, unique within a tree
    pub name: String,
    /// Local transform relative to the parent
    pub transformation: Mat4,
    /// Attachments in draw order
    pub children: Vec<Attachment>,
    /// Program for this subtree; `None` inherits the parent's
    pub program: Option<ProgramKey>,
    /// Hidden nodes skip their whole subtree
    pub visible: bool,
}

impl SceneNode {
    /// Create a visible node with an identity transform
    pub fn new(
        name: impl Into<String>,
        children: Vec<Attachment>,
        program: Option<ProgramKey>,
    ) -> Self {
        Self {
            name: name.into(),
            transformation: Mat4::identity(),
            children,
            program,
            visible: true,
        }
    }

    /// Append an attachment
    pub fn add_child(&mut self, child: impl Into<Attachment>) {
        self.children.push(child.into());
    }

    /// Post-multiply the local transform by a rotation of `angle` radians
    pub fn rotate(&mut self, angle: f32, axis: Vec3) {
        self.transformation *= Mat4::rotation(angle, axis);
    }

    /// Direct child nodes, skipping capabilities
    pub fn child_nodes(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|child| match child {
            Attachment::Node(node) => Some(node),
            _ => None,
        })
    }

    /// Find a node in this subtree by name (depth-first, self first)
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Self> {
        if self.name == name {
            return Some(self);
        }
        self.child_nodes().find_map(|node| node.find(name))
    }

    /// Mutable variant of [`SceneNode::find`]
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Self> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| match child {
            Attachment::Node(node) => node.find_mut(name),
            _ => None,
        })
    }

    /// Every program referenced by this subtree, first appearance first
    ///
    /// Includes node programs and the target programs of lights.
    #[must_use]
    pub fn program_keys(&self) -> Vec<ProgramKey> {
        let mut keys = Vec::new();
        self.collect_program_refs(&mut |_, key| {
            if !keys.contains(&key) {
                keys.push(key);
            }
        });
        keys
    }

    /// Call `f` with the name of each referencing node or light and the key
    pub(crate) fn collect_program_refs(&self, f: &mut impl FnMut(&str, ProgramKey)) {
        if let Some(key) = self.program {
            f(&self.name, key);
        }
        for child in &self.children {
            match child {
                Attachment::Light(light) => {
                    for &key in &light.programs {
                        f(&light.name, key);
                    }
                }
                Attachment::Node(node) => node.collect_program_refs(f),
                Attachment::Material(_) | Attachment::Geometry(_) => {}
            }
        }
    }

    /// Walk visible nodes, passing each its effective transform
    ///
    /// Hidden nodes and their subtrees are skipped, as when drawing.
    pub fn visit_effective(&self, parent_transform: &Mat4, f: &mut impl FnMut(&Self, &Mat4)) {
        if !self.visible {
            return;
        }
        let current = parent_transform * self.transformation;
        f(self, &current);
        for node in self.child_nodes() {
            node.visit_effective(&current, f);
        }
    }

    /// Draw this node and its subtree
    ///
    /// `parent_transform` is the accumulated model-view matrix of the parent
    /// (the camera's view matrix for the root).
    pub fn draw(
        &self,
        frame: &mut FrameContext<'_>,
        parent_program: Option<ProgramKey>,
        parent_transform: &Mat4,
    ) -> RenderResult<()> {
        if !self.visible {
            return Ok(());
        }

        let current = parent_transform * self.transformation;
        let active = self.program.or(parent_program);
        log::trace!("Drawing node '{}'", self.name);
        if let Some(key) = active {
            frame.bind_program(key)?;
        }

        for child in &self.children {
            match child {
                Attachment::Node(node) => node.draw(frame, active, &current)?,
                Attachment::Light(light) => {
                    if let Some(key) = active {
                        frame.bind_program(key)?;
                    }
                    light.contribute(frame, active, &current)?;
                }
                Attachment::Material(material) => {
                    frame.bind_program(Self::require(active, &material.name)?)?;
                    material.contribute(frame)?;
                }
                Attachment::Geometry(geometry) => {
                    frame.bind_program(Self::require(active, &geometry.name)?)?;
                    geometry.contribute(frame, &current)?;
                }
            }
        }
        Ok(())
    }

    // a program bound by an unrelated node must not be picked up
    fn require(active: Option<ProgramKey>, requester: &str) -> RenderResult<ProgramKey> {
        active.ok_or_else(|| RenderError::NoActiveProgram(requester.to_string()))
    }
}
