use std::collections::HashSet;

use crate::ParserError;
use crate::common::reader::Blob;
use crate::common::types::Pointer;
use crate::node::types::{MAX_NODE_DEPTH, NodeRaw, NodeRecord};

pub struct NodeReader {}

impl NodeReader {
    pub fn parse_node(blob: &Blob, address: Pointer) -> Result<NodeRecord, ParserError> {
        let mut visited = HashSet::new();
        NodeReader::parse_node_at_depth(blob, address, 0, &mut visited)
    }

    /// Every node has exactly one parent, so reaching an address twice means the blob is cyclic.
    fn parse_node_at_depth(
        blob: &Blob,
        address: Pointer,
        depth: usize,
        visited: &mut HashSet<Pointer>,
    ) -> Result<NodeRecord, ParserError> {
        if !visited.insert(address) {
            return Err(ParserError::FormatError {
                reason: "Node hierarchy contains a cycle",
            });
        }
        if depth >= MAX_NODE_DEPTH {
            return Err(ParserError::FormatError {
                reason: "Node hierarchy exceeds the maximum depth",
            });
        }

        let raw = blob.read_required::<NodeRaw>(address, "aiNode")?;
        let meshes = blob.read_inline_array::<u32>(raw.meshes, raw.num_meshes as usize, "aiNode::mMeshes")?;
        let children = blob.read_pointer_array(
            raw.children,
            raw.num_children as usize,
            "aiNode::mChildren",
            |blob, child| NodeReader::parse_node_at_depth(blob, child, depth + 1, visited),
        )?;

        Ok(NodeRecord {
            name: raw.name.0,
            transformation: raw.transformation,
            meshes,
            children,
        })
    }
}
