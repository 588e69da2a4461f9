//! Serializes scene descriptions into the native memory layout, so that the readers can be tested
//! without the import library. Only compiled for tests and with the `test-tools` feature.
use byteorder::{LittleEndian, WriteBytesExt};

use crate::common::reader::Blob;
use crate::common::types::{Color4D, MAX_STRING_LENGTH, Matrix4x4, Pointer, Texel, Vector3D};
use crate::material::types::{MATKEY_COLOR_DIFFUSE, MATKEY_NAME, MATKEY_TEXTURE, TEXTURE_TYPE_DIFFUSE, TEXTURE_TYPE_NONE};
use crate::mesh::types::{MAX_COLOR_SETS, MAX_TEXTURE_COORDS, PrimitiveTypes};
use crate::texture::types::FORMAT_HINT_LENGTH;

/// Where `aiNode::mParent` lives inside a node record.
const NODE_PARENT_OFFSET: usize = 1096;

/// A growing memory image that is addressed as if it was mapped at `base`.
#[derive(Debug, Clone)]
pub struct BlobWriter {
    base: u64,
    data: Vec<u8>,
}

impl BlobWriter {
    pub fn new(base: u64) -> Self {
        assert_ne!(base, 0, "The base address must not be null");
        assert_eq!(base % 8, 0, "The base address must be 8 byte aligned");
        Self { base, data: vec![] }
    }

    /// Reserves `len` zeroed bytes at the next 8 byte aligned address.
    pub fn alloc(&mut self, len: usize) -> Pointer {
        let aligned = self.data.len().next_multiple_of(8);
        self.data.resize(aligned + len.next_multiple_of(8), 0);
        Pointer(self.base + aligned as u64)
    }

    /// Copies `bytes` into a new allocation. Nothing is allocated for empty input, which yields null.
    pub fn push(&mut self, bytes: &[u8]) -> Pointer {
        if bytes.is_empty() {
            return Pointer::NULL;
        }

        let address = self.alloc(bytes.len());
        self.write_at(address, bytes);
        address
    }

    /// Overwrites already allocated memory.
    pub fn write_at(&mut self, address: Pointer, bytes: &[u8]) {
        let offset = (address.0 - self.base) as usize;
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    pub fn write_pointer_at(&mut self, address: Pointer, value: Pointer) {
        self.write_at(address, &value.0.to_le_bytes());
    }

    pub fn blob(&self) -> Blob<'_> {
        Blob::new(self.base, &self.data)
    }

    pub fn into_parts(self) -> (u64, Vec<u8>) {
        (self.base, self.data)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MeshDesc {
    pub name: String,
    pub vertices: Vec<Vector3D>,
    /// Up to 8 channels, `None` leaves the native slot null.
    pub texture_coords: Vec<Option<Vec<Vector3D>>>,
    pub faces: Vec<Vec<u32>>,
    pub material_index: u32,
}

impl MeshDesc {
    pub fn new(name: &str, vertices: Vec<Vector3D>, faces: Vec<Vec<u32>>, material_index: u32) -> Self {
        Self {
            name: name.to_string(),
            vertices,
            texture_coords: vec![],
            faces,
            material_index,
        }
    }

    pub fn with_texture_coords(mut self, channel: Vec<Vector3D>) -> Self {
        self.texture_coords.push(Some(channel));
        self
    }

    fn primitive_types(&self) -> PrimitiveTypes {
        self.faces
            .iter()
            .map(|face| match face.len() {
                1 => PrimitiveTypes::POINT,
                2 => PrimitiveTypes::LINE,
                3 => PrimitiveTypes::TRIANGLE,
                _ => PrimitiveTypes::POLYGON,
            })
            .fold(PrimitiveTypes::empty(), |acc, kind| acc | kind)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MaterialDesc {
    pub name: Option<String>,
    pub diffuse: Option<Color4D>,
    pub diffuse_texture: Option<String>,
}

impl MaterialDesc {
    pub fn colored(name: &str, diffuse: Color4D) -> Self {
        Self {
            name: Some(name.to_string()),
            diffuse: Some(diffuse),
            diffuse_texture: None,
        }
    }

    pub fn with_texture(mut self, reference: &str) -> Self {
        self.diffuse_texture = Some(reference.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub struct TextureDesc {
    pub width: u32,
    pub height: u32,
    pub format_hint: String,
    pub filename: String,
    pub data: Vec<u8>,
}

impl TextureDesc {
    /// `texels` row by row, top row first.
    pub fn raw(width: u32, height: u32, texels: &[Texel]) -> Self {
        assert_eq!(texels.len(), (width * height) as usize);
        Self {
            width,
            height,
            format_hint: "argb8888".to_string(),
            filename: String::new(),
            data: texels.iter().flat_map(|&texel| u32::from(texel).to_le_bytes()).collect(),
        }
    }

    pub fn compressed(format_hint: &str, bytes: Vec<u8>) -> Self {
        Self {
            width: bytes.len() as u32,
            height: 0,
            format_hint: format_hint.to_string(),
            filename: String::new(),
            data: bytes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NodeDesc {
    pub name: String,
    pub transformation: Matrix4x4,
    pub meshes: Vec<u32>,
    pub children: Vec<NodeDesc>,
}

impl NodeDesc {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            transformation: Matrix4x4::IDENTITY,
            meshes: vec![],
            children: vec![],
        }
    }

    pub fn with_transformation(mut self, transformation: Matrix4x4) -> Self {
        self.transformation = transformation;
        self
    }

    pub fn with_meshes(mut self, meshes: &[u32]) -> Self {
        self.meshes = meshes.to_vec();
        self
    }

    pub fn with_child(mut self, child: NodeDesc) -> Self {
        self.children.push(child);
        self
    }
}

/// A serialized scene: `scene` is the address of the `aiScene` record inside `data`.
#[derive(Debug, Clone)]
pub struct BuiltScene {
    pub writer: BlobWriter,
    pub scene: Pointer,
}

impl BuiltScene {
    pub fn blob(&self) -> Blob<'_> {
        self.writer.blob()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    pub flags: u32,
    pub meshes: Vec<MeshDesc>,
    pub materials: Vec<MaterialDesc>,
    pub textures: Vec<TextureDesc>,
    pub root: Option<NodeDesc>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mesh(mut self, mesh: MeshDesc) -> Self {
        self.meshes.push(mesh);
        self
    }

    pub fn with_material(mut self, material: MaterialDesc) -> Self {
        self.materials.push(material);
        self
    }

    pub fn with_texture(mut self, texture: TextureDesc) -> Self {
        self.textures.push(texture);
        self
    }

    pub fn with_root(mut self, root: NodeDesc) -> Self {
        self.root = Some(root);
        self
    }

    /// Lays the scene out at `base`, the `aiScene` record comes first.
    pub fn build(&self, base: u64) -> BuiltScene {
        let mut writer = BlobWriter::new(base);
        let scene = writer.alloc(80);

        let materials: Vec<Pointer> = self
            .materials
            .iter()
            .map(|material| write_material(&mut writer, material))
            .collect();
        let meshes: Vec<Pointer> = self.meshes.iter().map(|mesh| write_mesh(&mut writer, mesh)).collect();
        let textures: Vec<Pointer> = self
            .textures
            .iter()
            .map(|texture| write_texture(&mut writer, texture))
            .collect();
        let root = match &self.root {
            Some(root) => write_node(&mut writer, root),
            None => Pointer::NULL,
        };

        let materials_array = write_pointer_array(&mut writer, &materials);
        let meshes_array = write_pointer_array(&mut writer, &meshes);
        let textures_array = write_pointer_array(&mut writer, &textures);

        let mut header = vec![];
        header.write_u32::<LittleEndian>(self.flags).unwrap();
        header.write_u32::<LittleEndian>(0).unwrap();
        header.write_u64::<LittleEndian>(root.0).unwrap();
        for (count, array) in [
            (meshes.len(), meshes_array),
            (materials.len(), materials_array),
            (0, Pointer::NULL), // animations
            (textures.len(), textures_array),
        ] {
            header.write_u32::<LittleEndian>(count as u32).unwrap();
            header.write_u32::<LittleEndian>(0).unwrap();
            header.write_u64::<LittleEndian>(array.0).unwrap();
        }
        writer.write_at(scene, &header);

        BuiltScene { writer, scene }
    }
}

fn write_ai_string(buf: &mut Vec<u8>, value: &str) {
    assert!(value.len() < MAX_STRING_LENGTH, "aiString overflow: {}", value);
    buf.write_u32::<LittleEndian>(value.len() as u32).unwrap();
    let start = buf.len();
    buf.extend_from_slice(value.as_bytes());
    buf.resize(start + MAX_STRING_LENGTH, 0);
}

fn write_pointer_array(writer: &mut BlobWriter, pointers: &[Pointer]) -> Pointer {
    let bytes: Vec<u8> = pointers.iter().flat_map(|pointer| pointer.0.to_le_bytes()).collect();
    writer.push(&bytes)
}

fn write_vectors(writer: &mut BlobWriter, vectors: &[Vector3D]) -> Pointer {
    let bytes: Vec<u8> = vectors
        .iter()
        .flat_map(|v| [v.x, v.y, v.z])
        .flat_map(f32::to_le_bytes)
        .collect();
    writer.push(&bytes)
}

fn write_mesh(writer: &mut BlobWriter, mesh: &MeshDesc) -> Pointer {
    assert!(mesh.texture_coords.len() <= MAX_TEXTURE_COORDS);

    let vertices = write_vectors(writer, &mesh.vertices);
    let mut texture_coords = [Pointer::NULL; MAX_TEXTURE_COORDS];
    let mut num_uv_components = [0u32; MAX_TEXTURE_COORDS];
    for (slot, channel) in mesh.texture_coords.iter().enumerate() {
        if let Some(channel) = channel {
            texture_coords[slot] = write_vectors(writer, channel);
            num_uv_components[slot] = 2;
        }
    }

    let mut faces = vec![];
    for face in &mesh.faces {
        let indices: Vec<u8> = face.iter().flat_map(|index| index.to_le_bytes()).collect();
        let indices = writer.push(&indices);
        faces.write_u32::<LittleEndian>(face.len() as u32).unwrap();
        faces.write_u32::<LittleEndian>(0).unwrap();
        faces.write_u64::<LittleEndian>(indices.0).unwrap();
    }
    let faces = writer.push(&faces);

    let mut buf = vec![];
    buf.write_u32::<LittleEndian>(mesh.primitive_types().bits()).unwrap();
    buf.write_u32::<LittleEndian>(mesh.vertices.len() as u32).unwrap();
    buf.write_u32::<LittleEndian>(mesh.faces.len() as u32).unwrap();
    buf.write_u32::<LittleEndian>(0).unwrap();
    buf.write_u64::<LittleEndian>(vertices.0).unwrap();
    // normals, tangents, bitangents and the color sets stay null
    for _ in 0..3 + MAX_COLOR_SETS {
        buf.write_u64::<LittleEndian>(0).unwrap();
    }
    for channel in texture_coords {
        buf.write_u64::<LittleEndian>(channel.0).unwrap();
    }
    for components in num_uv_components {
        buf.write_u32::<LittleEndian>(components).unwrap();
    }
    buf.write_u64::<LittleEndian>(faces.0).unwrap();
    buf.write_u32::<LittleEndian>(0).unwrap(); // bones
    buf.write_u32::<LittleEndian>(0).unwrap();
    buf.write_u64::<LittleEndian>(0).unwrap();
    buf.write_u32::<LittleEndian>(mesh.material_index).unwrap();
    write_ai_string(&mut buf, &mesh.name);

    writer.push(&buf)
}

fn write_property(writer: &mut BlobWriter, key: &str, semantic: u32, property_type: u32, data: &[u8]) -> Pointer {
    let data_pointer = writer.push(data);

    let mut buf = vec![];
    write_ai_string(&mut buf, key);
    buf.write_u32::<LittleEndian>(semantic).unwrap();
    buf.write_u32::<LittleEndian>(0).unwrap(); // index
    buf.write_u32::<LittleEndian>(data.len() as u32).unwrap();
    buf.write_u32::<LittleEndian>(property_type).unwrap();
    buf.write_u32::<LittleEndian>(0).unwrap();
    buf.write_u64::<LittleEndian>(data_pointer.0).unwrap();
    writer.push(&buf)
}

fn string_payload(value: &str) -> Vec<u8> {
    let mut buf = vec![];
    buf.write_u32::<LittleEndian>(value.len() as u32).unwrap();
    buf.extend_from_slice(value.as_bytes());
    buf.push(0);
    buf
}

fn write_material(writer: &mut BlobWriter, material: &MaterialDesc) -> Pointer {
    let mut properties = vec![];

    if let Some(name) = &material.name {
        properties.push(write_property(writer, MATKEY_NAME, TEXTURE_TYPE_NONE, 3, &string_payload(name)));
    }

    if let Some(diffuse) = material.diffuse {
        let floats: Vec<u8> = [diffuse.r, diffuse.g, diffuse.b, diffuse.a]
            .into_iter()
            .flat_map(f32::to_le_bytes)
            .collect();
        properties.push(write_property(writer, MATKEY_COLOR_DIFFUSE, TEXTURE_TYPE_NONE, 1, &floats));
    }

    if let Some(texture) = &material.diffuse_texture {
        properties.push(write_property(
            writer,
            MATKEY_TEXTURE,
            TEXTURE_TYPE_DIFFUSE,
            3,
            &string_payload(texture),
        ));
    }

    let array = write_pointer_array(writer, &properties);
    let mut buf = vec![];
    buf.write_u64::<LittleEndian>(array.0).unwrap();
    buf.write_u32::<LittleEndian>(properties.len() as u32).unwrap();
    buf.write_u32::<LittleEndian>(properties.len() as u32).unwrap();
    writer.push(&buf)
}

fn write_texture(writer: &mut BlobWriter, texture: &TextureDesc) -> Pointer {
    assert!(texture.format_hint.len() < FORMAT_HINT_LENGTH);
    let data = writer.push(&texture.data);

    let mut buf = vec![];
    buf.write_u32::<LittleEndian>(texture.width).unwrap();
    buf.write_u32::<LittleEndian>(texture.height).unwrap();
    let mut hint = [0u8; FORMAT_HINT_LENGTH + 7];
    hint[..texture.format_hint.len()].copy_from_slice(texture.format_hint.as_bytes());
    buf.extend_from_slice(&hint);
    buf.write_u64::<LittleEndian>(data.0).unwrap();
    write_ai_string(&mut buf, &texture.filename);
    writer.push(&buf)
}

fn write_node(writer: &mut BlobWriter, node: &NodeDesc) -> Pointer {
    let children: Vec<Pointer> = node.children.iter().map(|child| write_node(writer, child)).collect();
    let children_array = write_pointer_array(writer, &children);
    let meshes: Vec<u8> = node.meshes.iter().flat_map(|index| index.to_le_bytes()).collect();
    let meshes = writer.push(&meshes);

    let mut buf = vec![];
    write_ai_string(&mut buf, &node.name);
    for value in node.transformation.to_rows().iter().flatten() {
        buf.write_f32::<LittleEndian>(*value).unwrap();
    }
    buf.write_u32::<LittleEndian>(0).unwrap();
    buf.write_u64::<LittleEndian>(0).unwrap(); // parent, patched below
    buf.write_u32::<LittleEndian>(children.len() as u32).unwrap();
    buf.write_u32::<LittleEndian>(0).unwrap();
    buf.write_u64::<LittleEndian>(children_array.0).unwrap();
    buf.write_u32::<LittleEndian>(node.meshes.len() as u32).unwrap();
    buf.write_u32::<LittleEndian>(0).unwrap();
    buf.write_u64::<LittleEndian>(meshes.0).unwrap();
    buf.write_u64::<LittleEndian>(0).unwrap(); // metadata
    let address = writer.push(&buf);

    for child in children {
        let parent_field = child.offset(NODE_PARENT_OFFSET).unwrap();
        writer.write_pointer_at(parent_field, address);
    }

    address
}
