use glam::{EulerRot, Mat4, Quat, Vec3};

/// Index of a node inside a [`SceneGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Local transform relative to the parent node. Rotation is XYZ Euler
/// angles in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rot, self.position)
    }
}

#[derive(Clone, Debug)]
struct Node {
    label: &'static str,
    parent: Option<NodeId>,
    local: Transform,
    world: Mat4,
}

/// Rooted transform tree stored as an arena.
///
/// A parent always precedes its children in storage, so world matrices
/// resolve in a single forward pass and a cycle cannot be expressed.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new(root_label: &'static str) -> Self {
        Self {
            nodes: vec![Node {
                label: root_label,
                parent: None,
                local: Transform::default(),
                world: Mat4::IDENTITY,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Attach a new node under `parent`.
    pub fn add_child(&mut self, parent: NodeId, label: &'static str, local: Transform) -> NodeId {
        debug_assert!(parent.0 < self.nodes.len());
        let world = self.nodes[parent.0].world * local.matrix();
        self.nodes.push(Node {
            label,
            parent: Some(parent),
            local,
            world,
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn label(&self, id: NodeId) -> &'static str {
        self.nodes[id.0].label
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn local(&self, id: NodeId) -> &Transform {
        &self.nodes[id.0].local
    }

    pub fn local_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.0].local
    }

    /// World matrix as of the last [`SceneGraph::update_world`].
    pub fn world(&self, id: NodeId) -> Mat4 {
        self.nodes[id.0].world
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.nodes[id.0].world.w_axis.truncate()
    }

    pub fn update_world(&mut self) {
        for i in 0..self.nodes.len() {
            let local = self.nodes[i].local.matrix();
            self.nodes[i].world = match self.nodes[i].parent {
                Some(p) => self.nodes[p.0].world * local,
                None => local,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_world_follows_parent() {
        let mut g = SceneGraph::new("root");
        let group = g.add_child(
            g.root(),
            "group",
            Transform {
                position: Vec3::new(0.0, 1.0, 0.0),
                ..Default::default()
            },
        );
        let leaf = g.add_child(
            group,
            "leaf",
            Transform {
                position: Vec3::new(2.0, 0.0, 0.0),
                ..Default::default()
            },
        );
        g.update_world();
        assert!((g.world_position(leaf) - Vec3::new(2.0, 1.0, 0.0)).length() < 1e-6);

        g.local_mut(g.root()).position.y = -1.0;
        g.update_world();
        assert!((g.world_position(leaf) - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-6);
        assert_eq!(g.parent(leaf), Some(group));
        assert_eq!(g.parent(g.root()), None);
    }
}
