//! Traversal properties on small hand-built trees

use approx::assert_relative_eq;

use super::{uniform_names, uniform_values};
use crate::foundation::math::{constants::HALF_PI, Mat4, Mat4Ext, Vec3};
use crate::render::properties::property_map;
use crate::render::recording::{CallLog, RecordingBackend, RenderCall};
use crate::render::{
    DirectionalLight, Geometry, PhongMaterial, Primitive, ProgramKey, ProgramRegistry, RenderError,
    Shape, UniformValue,
};
use crate::scene::{Camera, DrawOptions, Scene, SceneError, SceneNode};

struct Fixture {
    backend: RecordingBackend,
    log: CallLog,
    programs: ProgramRegistry,
    p: ProgramKey,
}

impl Fixture {
    fn new() -> Self {
        let backend = RecordingBackend::new();
        let log = backend.log();
        let mut programs = ProgramRegistry::new();
        let p = programs.register(backend.program("P"));
        Self {
            backend,
            log,
            programs,
            p,
        }
    }

    fn geometry(&mut self, name: &str) -> Geometry {
        Geometry::new(&mut self.backend, name, Shape::sphere(1.0, 8, 8)).unwrap()
    }

    fn scene(self, world: SceneNode) -> (Scene, CallLog) {
        let mut camera = Camera::new(Vec3::z(), Vec3::zeros(), Vec3::y(), HALF_PI, 1.0, 0.1, 10.0);
        camera.view_matrix = Mat4::new_translation(&Vec3::new(0.0, 0.0, -5.0));
        let backend = Box::new(self.backend);
        let scene = Scene::new(backend, self.programs, world, camera, DrawOptions::default())
            .unwrap();
        (scene, self.log)
    }
}

fn material() -> PhongMaterial {
    PhongMaterial::new("material", Vec3::repeat(0.2), Vec3::repeat(0.8), Vec3::repeat(0.5), 32.0)
}

fn draws(calls: &[RenderCall]) -> usize {
    calls.iter().filter(|call| matches!(call, RenderCall::Draw { .. })).count()
}

#[test]
fn test_light_material_geometry_order_on_program() {
    let mut fixture = Fixture::new();
    let p = fixture.p;
    let light = DirectionalLight::from_properties(
        "light",
        &property_map([("direction", [-1.0_f32, 0.0, 0.0]), ("color", [1.0, 1.0, 1.0])]),
        vec![p],
    )
    .unwrap();
    let geometry = fixture.geometry("G");
    let mesh = geometry.mesh;
    let node = SceneNode::new("N", vec![light.into(), material().into(), geometry.into()], Some(p));
    let (mut scene, log) = fixture.scene(SceneNode::new("root", vec![node.into()], None));

    let mark = log.len();
    scene.draw().unwrap();
    let calls = log.since(mark);

    // the first uniform is the frame's projection
    let names = uniform_names(&calls);
    assert_eq!(
        names[1..],
        [
            "light.on",
            "light.direction",
            "light.color",
            "material.ambient",
            "material.diffuse",
            "material.specular",
            "material.shininess",
            "modelViewMatrix",
        ]
    );
    assert_eq!(
        calls.last(),
        Some(&RenderCall::Draw {
            program: Some("P".into()),
            mesh,
            primitive: Primitive::Triangles,
        })
    );
    assert_eq!(draws(&calls), 1);
}

#[test]
fn test_invisible_node_skips_whole_subtree() {
    let mut fixture = Fixture::new();
    let leaf = SceneNode::new("B", vec![material().into(), fixture.geometry("G").into()], None);
    let mut hidden = SceneNode::new("A", vec![leaf.into()], Some(fixture.p));
    hidden.visible = false;
    let (mut scene, log) = fixture.scene(SceneNode::new("root", vec![hidden.into()], None));

    let mark = log.len();
    scene.draw().unwrap();
    let calls = log.since(mark);

    assert_eq!(draws(&calls), 0);
    assert_eq!(uniform_names(&calls), vec!["projectionMatrix"]);
}

#[test]
fn test_model_view_is_ordered_product() {
    let mut fixture = Fixture::new();
    let t1 = Mat4::new_translation(&Vec3::new(1.0, 0.0, 0.0));
    let r2 = Mat4::rotation(HALF_PI, Vec3::y());

    let mut child = SceneNode::new("child", vec![fixture.geometry("G").into()], None);
    child.transformation = r2;
    let mut sibling = SceneNode::new("sibling", vec![], None);
    sibling.transformation = Mat4::new_scaling(3.0);
    let mut parent = SceneNode::new("parent", vec![sibling.into(), child.into()], Some(fixture.p));
    parent.transformation = t1;
    let (mut scene, log) = fixture.scene(parent);

    let mark = log.len();
    scene.draw().unwrap();
    let model_view = uniform_values(&log.since(mark), "P", "modelViewMatrix");

    let expected = scene.camera.view_matrix * t1 * r2;
    assert_eq!(model_view.len(), 1);
    match &model_view[0] {
        UniformValue::Mat4(m) => assert_relative_eq!(*m, expected, epsilon = 1e-6),
        other => panic!("expected mat4, got {:?}", other),
    }
}

#[test]
fn test_geometry_without_program_is_an_error() {
    let mut fixture = Fixture::new();
    let orphan = SceneNode::new("orphan", vec![fixture.geometry("G").into()], None);
    let (mut scene, _log) = fixture.scene(orphan);

    let err = scene.draw().unwrap_err();
    assert!(matches!(err, RenderError::NoActiveProgram(ref name) if name == "G"));
}

#[test]
fn test_nested_node_program_does_not_leak_into_sibling() {
    let mut fixture = Fixture::new();
    let q = fixture.programs.register(fixture.backend.program("Q"));
    let nested = SceneNode::new("nested", vec![fixture.geometry("inner").into()], Some(q));
    let outer_geometry = fixture.geometry("outer");
    let outer_mesh = outer_geometry.mesh;
    let parent = SceneNode::new(
        "parent",
        vec![nested.into(), outer_geometry.into()],
        Some(fixture.p),
    );
    let (mut scene, log) = fixture.scene(parent);

    let mark = log.len();
    scene.draw().unwrap();
    let calls = log.since(mark);

    let outer_draw = calls
        .iter()
        .find(|call| matches!(call, RenderCall::Draw { mesh, .. } if *mesh == outer_mesh))
        .unwrap();
    assert_eq!(outer_draw.program(), Some("P"));
}

#[test]
fn test_unknown_program_rejected_at_construction() {
    let fixture = Fixture::new();
    let stray = SceneNode::new("stray", vec![], Some(ProgramKey::default()));
    let world = SceneNode::new("root", vec![stray.into()], Some(fixture.p));
    let camera = Camera::new(Vec3::z(), Vec3::zeros(), Vec3::y(), HALF_PI, 1.0, 0.1, 10.0);

    let backend = Box::new(fixture.backend);
    let err = Scene::new(backend, fixture.programs, world, camera, DrawOptions::default())
        .unwrap_err();
    assert!(matches!(err, SceneError::UnknownProgram(ref owner) if owner == "stray"));
}

fn model_views(calls: &[RenderCall]) -> Vec<Mat4> {
    uniform_values(calls, "P", "modelViewMatrix")
        .into_iter()
        .filter_map(|value| match value {
            UniformValue::Mat4(m) => Some(m),
            _ => None,
        })
        .collect()
}

#[test]
fn test_sibling_order_does_not_change_transforms() {
    let draw_with = |reversed: bool| {
        let mut fixture = Fixture::new();
        let mut a = SceneNode::new("a", vec![fixture.geometry("A").into()], None);
        a.transformation = Mat4::new_translation(&Vec3::new(0.0, 2.0, 0.0));
        let mut b = SceneNode::new("b", vec![fixture.geometry("B").into()], None);
        b.rotate(HALF_PI, Vec3::z());

        let mut parent = SceneNode::new("parent", vec![], Some(fixture.p));
        parent.transformation = Mat4::new_translation(&Vec3::new(1.0, 0.0, 0.0));
        if reversed {
            parent.add_child(b);
            parent.add_child(a);
        } else {
            parent.add_child(a);
            parent.add_child(b);
        }

        let (mut scene, log) = fixture.scene(parent);
        let mark = log.len();
        scene.draw().unwrap();
        model_views(&log.since(mark))
    };

    let forward = draw_with(false);
    let mut backward = draw_with(true);
    backward.reverse();

    assert_eq!(forward.len(), 2);
    for (f, b) in forward.iter().zip(&backward) {
        assert_relative_eq!(*f, *b, epsilon = 1e-6);
    }
}
