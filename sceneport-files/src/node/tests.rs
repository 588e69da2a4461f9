use crate::ParserError;
use crate::common::types::Matrix4x4;
use crate::node::reader::NodeReader;
use crate::node::types::MAX_NODE_DEPTH;
use crate::scene::reader::SceneReader;
use crate::writer::{NodeDesc, SceneBuilder};

const BASE: u64 = 0x40_0000;

#[test]
fn decodes_the_hierarchy_in_order() -> Result<(), anyhow::Error> {
    let moved = Matrix4x4::from_rows([
        [1.0, 0.0, 0.0, 5.0],
        [0.0, 1.0, 0.0, 6.0],
        [0.0, 0.0, 1.0, 7.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    let root = NodeDesc::new("Root")
        .with_child(NodeDesc::new("A").with_transformation(moved).with_meshes(&[0, 2]))
        .with_child(NodeDesc::new("B").with_child(NodeDesc::new("B.1")));
    let built = SceneBuilder::new().with_root(root).build(BASE);
    let blob = built.blob();
    let scene = SceneReader::parse_scene(&blob, built.scene)?;

    assert_eq!(scene.root.name, "Root");
    assert_eq!(scene.root.count(), 4);
    assert_eq!(scene.root.children[0].name, "A");
    assert_eq!(scene.root.children[0].meshes, vec![0, 2]);
    assert_eq!(scene.root.children[0].transformation, moved);
    assert_eq!(scene.root.children[1].children[0].name, "B.1");
    assert!(scene.root.transformation.is_identity(0.0));
    Ok(())
}

#[test]
fn cyclic_hierarchies_are_rejected() -> Result<(), anyhow::Error> {
    let mut built = SceneBuilder::new()
        .with_root(NodeDesc::new("Root").with_child(NodeDesc::new("Loop")))
        .build(BASE);
    let (root, children) = {
        let blob = built.blob();
        let header = SceneReader::parse_header(&blob, built.scene)?;
        // aiNode::mChildren
        let children = blob.read_pointer(header.root_node.offset(1112).unwrap())?;
        (header.root_node, children)
    };

    // Let the only child slot point back at the root.
    built.writer.write_pointer_at(children, root);

    let blob = built.blob();
    assert!(matches!(
        NodeReader::parse_node(&blob, root),
        Err(ParserError::FormatError {
            reason: "Node hierarchy contains a cycle"
        })
    ));
    Ok(())
}

fn chain(length: usize) -> NodeDesc {
    (1..length).fold(NodeDesc::new("Bone"), |child, _| NodeDesc::new("Bone").with_child(child))
}

fn depth_of(node: &crate::node::types::NodeRecord) -> usize {
    1 + node.children.first().map_or(0, depth_of)
}

#[test]
fn deep_bone_chains_are_accepted() -> Result<(), anyhow::Error> {
    let built = SceneBuilder::new().with_root(chain(300)).build(BASE);
    let blob = built.blob();
    let scene = SceneReader::parse_scene(&blob, built.scene)?;

    assert_eq!(depth_of(&scene.root), 300);
    Ok(())
}

#[test]
fn nodes_shared_between_parents_are_rejected() -> Result<(), anyhow::Error> {
    let mut built = SceneBuilder::new()
        .with_root(NodeDesc::new("Root").with_child(NodeDesc::new("A")).with_child(NodeDesc::new("B")))
        .build(BASE);
    let children = {
        let blob = built.blob();
        let header = SceneReader::parse_header(&blob, built.scene)?;
        blob.read_pointer(header.root_node.offset(1112).unwrap())?
    };

    // Both child slots refer to "A".
    let first = built.blob().read_pointer(children)?;
    built.writer.write_pointer_at(children.offset(8).unwrap(), first);

    let blob = built.blob();
    assert!(matches!(
        SceneReader::parse_scene(&blob, built.scene),
        Err(ParserError::FormatError { .. })
    ));
    Ok(())
}

#[test]
fn hierarchies_beyond_the_depth_limit_are_rejected() -> Result<(), anyhow::Error> {
    // Building, decoding and dropping the chain all recurse, so don't rely on the test thread's stack.
    let rejected = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let built = SceneBuilder::new().with_root(chain(MAX_NODE_DEPTH + 1)).build(BASE);
            let blob = built.blob();
            matches!(
                SceneReader::parse_scene(&blob, built.scene),
                Err(ParserError::FormatError {
                    reason: "Node hierarchy exceeds the maximum depth"
                })
            )
        })?
        .join()
        .map_err(|_| anyhow::anyhow!("decoding thread panicked"))?;

    assert!(rejected);
    Ok(())
}
