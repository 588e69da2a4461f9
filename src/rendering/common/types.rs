use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use glam::{Quat, Vec2, Vec3, Vec4};
use image::RgbaImage;

use crate::rendering::common::diagnostics::ImportDiagnostic;

#[derive(Clone)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffers: VertexBuffers,
    /// Triangle list, always a multiple of 3 and in range of the vertex buffers.
    pub index_buffer: Vec<u32>,
    pub bounds: BoundingBox,
    pub material_index: u32,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.index_buffer.len() / 3
    }
}

impl Debug for Mesh {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ name: {:?}, ", self.name)?;
        write!(f, "vertex_buffers: {:?}, ", self.vertex_buffers)?;
        write!(f, "index_buffer: [{}], ", self.index_buffer.len())?;
        write!(f, "bounds: {:?}, ", self.bounds)?;
        write!(f, "material_index: {} }}", self.material_index)
    }
}

#[derive(Clone, Default)]
pub struct VertexBuffers {
    pub position_buffer: Vec<Vec3>,
    pub normals_buffer: Vec<Vec3>,
    /// Empty if the mesh has no UV channel.
    pub texcoord_buffer_0: Vec<Vec2>,
}

impl Debug for VertexBuffers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ position_buffer: [{}], ", self.position_buffer.len())?;
        write!(f, "normals_buffer: [{}], ", self.normals_buffer.len())?;
        write!(f, "texcoord_buffer_0: [{}] }}", self.texcoord_buffer_0.len())
    }
}

/// Axis aligned, `min == max == 0` for meshes without vertices.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }
}

#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    /// Linear rgba, white if the material doesn't specify a diffuse color.
    pub base_color: Vec4,
    /// Shared between all materials that referenced the texture by the same string.
    pub albedo_texture: Option<Arc<Texture>>,
}

pub struct Texture {
    /// The reference this texture has been resolved from, e.g. `*0` or `textures/wall.png`.
    pub reference: String,
    /// Rows are stored bottom-up, i.e. the first row is the bottom of the image.
    pub data: RgbaImage,
}

impl Debug for Texture {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ reference: {:?}, data: {}x{} }}",
            self.reference,
            self.data.width(),
            self.data.height()
        )
    }
}

/// Draw `mesh_index` with `material_index`, both index into [`ImportedScene`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RenderInstance {
    pub mesh_index: usize,
    pub material_index: usize,
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    /// Relative to the parent node.
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub instances: Vec<RenderInstance>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::count).sum::<usize>()
    }
}

/// The result of one import. Nothing in here refers to the native memory of the import anymore.
#[derive(Debug, Clone, Default)]
pub struct ImportedScene {
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
    /// Usually a single root, unless the native root node has been collapsed.
    pub roots: Vec<SceneNode>,
    pub diagnostics: Vec<ImportDiagnostic>,
}
