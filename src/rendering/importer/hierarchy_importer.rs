use glam::{Quat, Vec3};
use log::trace;
use sceneport_files::node::types::NodeRecord;

use crate::ImportError;
use crate::rendering::common::coordinate_systems;
use crate::rendering::common::types::{ImportedScene, Material, Mesh, RenderInstance, SceneNode};

/// Tolerance of the identity check that decides whether a node can be collapsed.
pub const IDENTITY_EPSILON: f32 = 1e-6;

/// Receives the imported node tree, e.g. to create the engine's own scene nodes from it.
pub trait SceneSink {
    type NodeId: Copy;

    /// `parent` is `None` for the roots. The transform is relative to the parent.
    fn create_node(
        &mut self,
        parent: Option<Self::NodeId>,
        name: &str,
        translation: Vec3,
        rotation: Quat,
        scale: Vec3,
    ) -> Self::NodeId;

    fn attach_render_instance(&mut self, node: Self::NodeId, mesh: &Mesh, material: &Material);
}

pub struct HierarchyImporter {}

impl HierarchyImporter {
    /// A node that contributes neither a transform nor geometry and only forwards to a single child.
    pub fn is_pass_through(node: &NodeRecord) -> bool {
        node.meshes.is_empty() && node.children.len() == 1 && node.transformation.is_identity(IDENTITY_EPSILON)
    }

    /// Builds the subtree(s) that replace `node` below its parent: either `node` itself, or, when
    /// it is a pass-through node, whatever its only child turns into.
    pub fn build(node: &NodeRecord, meshes: &[Mesh]) -> Result<Vec<SceneNode>, ImportError> {
        if HierarchyImporter::is_pass_through(node) {
            if let [only_child] = node.children.as_slice() {
                trace!("Collapsing pass-through node \"{}\"", node.name);
                return HierarchyImporter::build(only_child, meshes);
            }
        }

        let (scale, rotation, translation) = coordinate_systems::decompose(&node.transformation);

        let instances = node
            .meshes
            .iter()
            .map(|&index| {
                let mesh = meshes
                    .get(index as usize)
                    .ok_or_else(|| ImportError::MeshIndexOutOfRange {
                        node: node.name.clone(),
                        index,
                        count: meshes.len(),
                    })?;
                Ok(RenderInstance {
                    mesh_index: index as usize,
                    material_index: mesh.material_index as usize,
                })
            })
            .collect::<Result<Vec<_>, ImportError>>()?;

        let mut children = Vec::with_capacity(node.children.len());
        for child in &node.children {
            children.extend(HierarchyImporter::build(child, meshes)?);
        }

        Ok(vec![SceneNode {
            name: node.name.clone(),
            translation,
            rotation,
            scale,
            instances,
            children,
        }])
    }
}

impl ImportedScene {
    /// Replays the node tree into `sink`, depth first, parents before their children.
    pub fn emit<S: SceneSink>(&self, sink: &mut S) {
        for root in &self.roots {
            self.emit_node(root, None, sink);
        }
    }

    fn emit_node<S: SceneSink>(&self, node: &SceneNode, parent: Option<S::NodeId>, sink: &mut S) {
        let id = sink.create_node(parent, &node.name, node.translation, node.rotation, node.scale);

        for instance in &node.instances {
            // The indices have been validated when building the tree
            if let (Some(mesh), Some(material)) = (
                self.meshes.get(instance.mesh_index),
                self.materials.get(instance.material_index),
            ) {
                sink.attach_render_instance(id, mesh, material);
            }
        }

        for child in &node.children {
            self.emit_node(child, Some(id), sink);
        }
    }
}
