use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use sceneport_files::common::types::{Matrix4x4, Vector3D};
use sceneport_files::scene::types::ImportFlags;

/// The winding order that is considered front facing.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum FrontFace {
    /// Left-handed engines (e.g. D3D style), what the importer produces with `MAKE_LEFT_HANDED`.
    #[default]
    Clockwise,
    CounterClockwise,
}

/// Decides whether triangles have to be flipped on their way into the index buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WindingPolicy {
    flip: bool,
}

impl WindingPolicy {
    /// The importer emits counter-clockwise faces unless asked for `FLIP_WINDING_ORDER`.
    pub fn new(flags: ImportFlags, front_face: FrontFace) -> Self {
        let source = if flags.contains(ImportFlags::FLIP_WINDING_ORDER) {
            FrontFace::Clockwise
        } else {
            FrontFace::CounterClockwise
        };

        Self {
            flip: source != front_face,
        }
    }

    pub fn flips(&self) -> bool {
        self.flip
    }

    /// `(i0, i1, i2)` becomes `(i0, i2, i1)` when flipping, so the first vertex stays the first.
    #[inline]
    pub fn apply(&self, [i0, i1, i2]: [u32; 3]) -> [u32; 3] {
        if self.flip { [i0, i2, i1] } else { [i0, i1, i2] }
    }
}

#[inline]
pub fn native_to_vec3(source: &Vector3D) -> Vec3 {
    Vec3::new(source.x, source.y, source.z)
}

/// UV channels are stored as 3 component vectors, the third component is unused for 2D textures.
#[inline]
pub fn native_to_uv(source: &Vector3D) -> Vec2 {
    Vec2::new(source.x, source.y)
}

/// The native matrices are row-major (translation in `a4`, `b4`, `c4`), glam is column-major.
#[inline]
pub fn native_to_mat4(source: &Matrix4x4) -> Mat4 {
    Mat4::from_cols(
        Vec4::new(source.a1, source.b1, source.c1, source.d1),
        Vec4::new(source.a2, source.b2, source.c2, source.d2),
        Vec4::new(source.a3, source.b3, source.c3, source.d3),
        Vec4::new(source.a4, source.b4, source.c4, source.d4),
    )
}

#[inline]
pub fn mat4_to_native(source: &Mat4) -> Matrix4x4 {
    Matrix4x4::from_rows(source.transpose().to_cols_array_2d())
}

/// Splits an affine, shear free transform into (scale, rotation, translation).
pub fn decompose(source: &Matrix4x4) -> (Vec3, Quat, Vec3) {
    native_to_mat4(source).to_scale_rotation_translation()
}
