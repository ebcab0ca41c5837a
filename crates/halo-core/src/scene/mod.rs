//! Procedural scene content: the drifting root with its ring cluster and
//! particle field, static furniture, lights and shader assets.

pub mod geometry;
pub mod graph;
pub mod lights;
pub mod material;
pub mod particles;
pub mod rings;

use glam::{Mat4, Vec3};
use rand::Rng;
use smallvec::SmallVec;

use crate::constants::*;
use crate::interaction::InteractionResponder;
use geometry::Geometry;
use graph::{NodeId, SceneGraph, Transform};
use lights::Lighting;
use material::Material;
use particles::ParticleField;
use rings::RingCluster;

/// Slot of a mesh in [`SceneContent::meshes`]; stable for the engine's life.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(pub(crate) usize);

impl MeshId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Geometry and material for one drawable, as handed to the backend.
#[derive(Clone, Debug)]
pub struct MeshSource {
    pub label: &'static str,
    pub geometry: Geometry,
    pub material: Material,
}

/// Shader source treated as an opaque asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShaderAsset {
    pub label: &'static str,
    pub source: &'static str,
}

pub const SCENE_SHADER: ShaderAsset = ShaderAsset {
    label: "scene_shader",
    source: crate::SCENE_WGSL,
};

pub const PARTICLE_SHADER: ShaderAsset = ShaderAsset {
    label: "particle_shader",
    source: crate::PARTICLES_WGSL,
};

/// One mesh to draw this frame with its world matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    pub mesh: MeshId,
    pub model: Mat4,
}

pub type DrawList = SmallVec<[DrawItem; 16]>;

#[derive(Clone, Copy, Debug)]
struct Furniture {
    mesh: MeshId,
    model: Mat4,
}

pub struct SceneContent {
    graph: SceneGraph,
    rings: RingCluster,
    particles: ParticleField,
    lighting: Lighting,
    meshes: Vec<MeshSource>,
    furniture: Vec<Furniture>,
    shaders: [ShaderAsset; 2],
}

impl SceneContent {
    pub fn build<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut graph = SceneGraph::new("drift_root");
        let mut meshes = Vec::with_capacity(RING_COUNT + 2);

        let furniture = vec![
            push_furniture(
                &mut meshes,
                "environment",
                Geometry::sphere(ENVIRONMENT_RADIUS, 32, 16, true),
                Material::environment(),
                Mat4::IDENTITY,
            ),
            push_furniture(
                &mut meshes,
                "ground",
                Geometry::ground_plane(GROUND_SIZE),
                Material::ground(),
                Mat4::from_translation(Vec3::new(0.0, GROUND_Y, 0.0)),
            ),
        ];

        let root = graph.root();
        let rings = RingCluster::build(&mut graph, root, RING_COUNT, &mut meshes);
        let particle_node = graph.add_child(root, "particle_field", Transform::default());
        let particles = ParticleField::generate(particle_node, PARTICLE_COUNT, rng);
        graph.update_world();

        Self {
            graph,
            rings,
            particles,
            lighting: Lighting::default(),
            meshes,
            furniture,
            shaders: [SCENE_SHADER, PARTICLE_SHADER],
        }
    }

    /// Advance everything that depends on elapsed time, then let the
    /// responder react to `pointer` (world space).
    pub fn update(&mut self, elapsed_ms: f64, pointer: Vec3, responder: &InteractionResponder) {
        let e = elapsed_ms as f32;
        let root = self.graph.root();
        {
            let drift = self.graph.local_mut(root);
            drift.rotation.y = (e * DRIFT_YAW_RATE).sin() * DRIFT_YAW_AMPLITUDE;
            drift.position.y = (e * DRIFT_BOB_RATE).sin() * DRIFT_BOB_AMPLITUDE;
        }
        self.particles.set_elapsed(elapsed_ms);
        self.lighting.advance(elapsed_ms);

        // Ring world positions must reflect this frame's drift before the
        // proximity pass reads them.
        self.graph.update_world();
        responder.respond(&mut self.graph, self.rings.rings(), pointer);
        self.graph.update_world();
    }

    pub fn draw_list(&self) -> DrawList {
        let mut list: DrawList = self
            .furniture
            .iter()
            .map(|f| DrawItem {
                mesh: f.mesh,
                model: f.model,
            })
            .collect();
        list.extend(self.rings.rings().iter().map(|r| DrawItem {
            mesh: r.mesh,
            model: self.graph.world(r.node),
        }));
        list
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn rings(&self) -> &RingCluster {
        &self.rings
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn particle_model(&self) -> Mat4 {
        self.graph.world(self.particles.node)
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn meshes(&self) -> &[MeshSource] {
        &self.meshes
    }

    pub fn shaders(&self) -> &[ShaderAsset] {
        &self.shaders
    }

    pub fn root(&self) -> NodeId {
        self.graph.root()
    }
}

fn push_furniture(
    meshes: &mut Vec<MeshSource>,
    label: &'static str,
    geometry: Geometry,
    material: Material,
    model: Mat4,
) -> Furniture {
    let mesh = MeshId(meshes.len());
    meshes.push(MeshSource {
        label,
        geometry,
        material,
    });
    Furniture { mesh, model }
}
