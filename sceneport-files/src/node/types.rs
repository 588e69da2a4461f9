use sceneport_files_derive_parseable::Parse;

use crate::common::types::{AiString, Matrix4x4, Pointer};

/// Deepest hierarchy accepted. Cycles are detected separately, this only bounds the recursion, so
/// that a corrupt blob can't exhaust the stack. Long bone chains stay well below it.
pub const MAX_NODE_DEPTH: usize = 1024;

/// `aiNode`
#[derive(Debug, Clone, Parse)]
pub struct NodeRaw {
    pub name: AiString,
    pub transformation: Matrix4x4,
    pub _padding0: u32,
    pub parent: Pointer,
    pub num_children: u32,
    pub _padding1: u32,
    pub children: Pointer,
    pub num_meshes: u32,
    pub _padding2: u32,
    pub meshes: Pointer,
    pub metadata: Pointer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub name: String,
    /// Relative to the parent node.
    pub transformation: Matrix4x4,
    /// Indices into the scene's meshes.
    pub meshes: Vec<u32>,
    pub children: Vec<NodeRecord>,
}

impl NodeRecord {
    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(NodeRecord::count).sum::<usize>()
    }
}
