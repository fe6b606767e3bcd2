//! The planet scene
//!
//! Three programs (flat blue, phong, planet), four earth textures, a sun, an
//! equator ring, a textured earth and a wireframe earth, all under one world
//! node. Values that can vary live in [`SceneConfig`].

use crate::config::SceneConfig;
use crate::foundation::math::{constants::HALF_PI, Vec3, Vec4};
use crate::render::{
    DirectionalLight, Geometry, PhongMaterial, ProgramKey, ProgramRegistry, ProgramSource,
    RenderBackend, Shape, Texture2D, UniformValue,
};
use crate::scene::{Camera, DrawOptions, Scene, SceneError, SceneNode};

/// Root node
pub const WORLD_NODE: &str = "world";
/// Node carrying the sun light
pub const SUN_NODE: &str = "SunNode";
/// Equator ring node
pub const RING_NODE: &str = "EquatorNode";
/// Textured earth node
pub const EARTH_NODE: &str = "EarthNode";
/// Wireframe earth node
pub const WIREFRAME_NODE: &str = "EarthWithWireframesNode";

/// The four textures sampled by the planet program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanetTextures {
    /// Daylight surface, unit 0
    pub day: Texture2D,
    /// Night lights, unit 1
    pub night: Texture2D,
    /// Ocean mask, unit 2
    pub bathymetry: Texture2D,
    /// Clouds, unit 3
    pub clouds: Texture2D,
}

impl PlanetTextures {
    /// Load and upload the configured texture files
    pub fn load(backend: &mut dyn RenderBackend, config: &SceneConfig) -> Result<Self, SceneError> {
        Ok(Self {
            day: Texture2D::from_file(backend, &config.textures.day)?,
            night: Texture2D::from_file(backend, &config.textures.night)?,
            bathymetry: Texture2D::from_file(backend, &config.textures.bathymetry)?,
            clouds: Texture2D::from_file(backend, &config.textures.clouds)?,
        })
    }
}

struct PlanetPrograms {
    blue: ProgramKey,
    phong: ProgramKey,
    planet: ProgramKey,
}

/// Builds the planet [`Scene`]
#[derive(Debug, Clone, Default)]
pub struct PlanetSceneBuilder {
    config: SceneConfig,
}

impl PlanetSceneBuilder {
    /// Builder for `config`
    #[must_use]
    pub const fn new(config: SceneConfig) -> Self {
        Self { config }
    }

    /// Create programs, upload resources and assemble the scene
    ///
    /// Fails without returning a partial scene if a program does not link,
    /// a texture is missing or a property map is malformed.
    pub fn build(self, mut backend: Box<dyn RenderBackend>) -> Result<Scene, SceneError> {
        let config = &self.config;
        let mut registry = ProgramRegistry::new();
        let programs = Self::create_programs(backend.as_mut(), &mut registry, config)?;
        let textures = PlanetTextures::load(backend.as_mut(), config)?;

        let mut world = Self::build_world(backend.as_mut(), &programs, config)?;
        if config.pole_axis_swap {
            Self::apply_pole_axis_swap(&mut world);
        }

        let camera = Camera::from_config(&config.camera, config.aspect_ratio());
        let draw_options = DrawOptions::from(config.draw_options.clone());
        log::info!("Planet scene built with {} programs", registry.len());

        Scene::new(backend, registry, world, camera, draw_options)?
            .with_clear_color(config.clear_color)
            .bind_visibility("Planet", EARTH_NODE)
            .bind_visibility("Ring", RING_NODE)
            .bind_visibility("PlanetAsWireframe", WIREFRAME_NODE)
            .bind_uniform_toggle("LightNights", programs.planet, "booleanNight")?
            .bind_uniform_toggle("Clouds", programs.planet, "boolClouds")?
            .bind_texture(programs.planet, "daylightTexture", 0, textures.day)?
            .bind_texture(programs.planet, "nightlightTexture", 1, textures.night)?
            .bind_texture(programs.planet, "bathymetryTexture", 2, textures.bathymetry)?
            .bind_texture(programs.planet, "cloudTexture", 3, textures.clouds)
    }

    /// Rotate the ring and both earth nodes by 90 degrees about X
    ///
    /// The meshes are modeled with the poles on Z; this puts them on Y.
    /// Nodes that are not in `world` are left alone.
    pub fn apply_pole_axis_swap(world: &mut SceneNode) {
        for name in [RING_NODE, EARTH_NODE, WIREFRAME_NODE] {
            if let Some(node) = world.find_mut(name) {
                node.rotate(HALF_PI, Vec3::x());
            }
        }
    }

    fn create_programs(
        backend: &mut dyn RenderBackend,
        registry: &mut ProgramRegistry,
        config: &SceneConfig,
    ) -> Result<PlanetPrograms, SceneError> {
        let ambient = UniformValue::Vec3(Vec3::from(config.ambient_light));

        let blue_color = UniformValue::Vec4(Vec4::new(0.0, 0.0, 1.0, 1.0));

        let mut blue =
            backend.create_program(&ProgramSource::new("blue", "minimal_vs", "frag_color_fs"))?;
        blue.use_program();
        blue.set_uniform("fragColor", blue_color)?;

        let mut phong =
            backend.create_program(&ProgramSource::new("phong", "phong_vs", "phong_fs"))?;
        phong.use_program();
        phong.set_uniform("ambientLight", ambient.clone())?;

        let mut planet =
            backend.create_program(&ProgramSource::new("planet", "planet_vs", "planet_fs"))?;
        planet.use_program();
        planet.set_uniform("ambientLight", ambient)?;

        Ok(PlanetPrograms {
            blue: registry.register(blue),
            phong: registry.register(phong),
            planet: registry.register(planet),
        })
    }

    fn build_world(
        backend: &mut dyn RenderBackend,
        programs: &PlanetPrograms,
        config: &SceneConfig,
    ) -> Result<SceneNode, SceneError> {
        let materials = &config.materials;

        let sun = DirectionalLight::from_properties("light", &config.sun, vec![programs.phong])?;
        let sun_node = SceneNode::new(SUN_NODE, vec![sun.into()], Some(programs.planet));

        let ring_material = PhongMaterial::from_properties("material", &materials.ring)?;
        let ring = Geometry::new(backend, "EquatorRing", Shape::torus(1.2, 0.04, 80, 40))?;
        let ring_node = SceneNode::new(
            RING_NODE,
            vec![ring_material.into(), ring.into()],
            Some(programs.phong),
        );

        let earth_material = PhongMaterial::from_properties("material", &materials.earth)?;
        let earth = Geometry::new(backend, "Earth", Shape::sphere(1.0, 40, 20))?;
        let earth_node = SceneNode::new(
            EARTH_NODE,
            vec![earth_material.into(), earth.into()],
            Some(programs.planet),
        );

        let grid_material = PhongMaterial::from_properties("material", &materials.grid)?;
        let grid_shape = Shape::sphere(0.9, 80, 40).wireframe();
        let grid = Geometry::new(backend, "EarthGrid", grid_shape)?;
        let grid_node = SceneNode::new(
            WIREFRAME_NODE,
            vec![grid_material.into(), grid.into()],
            Some(programs.blue),
        );

        Ok(SceneNode::new(
            WORLD_NODE,
            vec![sun_node.into(), ring_node.into(), earth_node.into(), grid_node.into()],
            Some(programs.blue),
        ))
    }
}
