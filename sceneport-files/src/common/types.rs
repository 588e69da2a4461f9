use std::fmt::{Debug, Formatter};

use sceneport_files_derive_parseable::Parse;

/// Maximum number of bytes in an inline `aiString` buffer (`AI_MAXLEN`).
pub const MAX_STRING_LENGTH: usize = 1024;

/// A native pointer as found inside the blob. Pointers are absolute addresses, they are only
/// resolved (and bounds checked) by [`crate::common::reader::Blob`].
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pointer(pub u64);

impl Pointer {
    pub const NULL: Pointer = Pointer(0);

    #[inline]
    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// The address `bytes` behind this one, `None` on overflow.
    #[inline]
    pub fn offset(self, bytes: usize) -> Option<Pointer> {
        self.0.checked_add(bytes as u64).map(Pointer)
    }
}

impl Debug for Pointer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pointer({:#x})", self.0)
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Parse)]
pub struct Vector3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Parse)]
pub struct Color4D {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4D {
    pub const WHITE: Color4D = Color4D {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
}

/// Row-major 4x4 matrix, the translation lives in `a4`, `b4`, `c4`.
#[derive(Debug, Copy, Clone, PartialEq, Parse)]
pub struct Matrix4x4 {
    pub a1: f32,
    pub a2: f32,
    pub a3: f32,
    pub a4: f32,
    pub b1: f32,
    pub b2: f32,
    pub b3: f32,
    pub b4: f32,
    pub c1: f32,
    pub c2: f32,
    pub c3: f32,
    pub c4: f32,
    pub d1: f32,
    pub d2: f32,
    pub d3: f32,
    pub d4: f32,
}

impl Matrix4x4 {
    pub const IDENTITY: Matrix4x4 = Matrix4x4::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let [a, b, c, d] = rows;
        Matrix4x4 {
            a1: a[0],
            a2: a[1],
            a3: a[2],
            a4: a[3],
            b1: b[0],
            b2: b[1],
            b3: b[2],
            b4: b[3],
            c1: c[0],
            c2: c[1],
            c3: c[2],
            c4: c[3],
            d1: d[0],
            d2: d[1],
            d3: d[2],
            d4: d[3],
        }
    }

    pub fn to_rows(&self) -> [[f32; 4]; 4] {
        [
            [self.a1, self.a2, self.a3, self.a4],
            [self.b1, self.b2, self.b3, self.b4],
            [self.c1, self.c2, self.c3, self.c4],
            [self.d1, self.d2, self.d3, self.d4],
        ]
    }

    /// Same tolerance semantics as the native `IsIdentity(epsilon)`: every element within `epsilon`.
    pub fn is_identity(&self, epsilon: f32) -> bool {
        let identity = Matrix4x4::IDENTITY.to_rows();
        self.to_rows()
            .iter()
            .flatten()
            .zip(identity.iter().flatten())
            .all(|(value, expected)| (value - expected).abs() <= epsilon)
    }
}

/// The inline string type of the native library: a byte length followed by a fixed buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AiString(pub String);

impl AiString {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One texel of an uncompressed embedded texture. In memory it is stored as b, g, r, a, which is
/// the little endian reading of the packed word `a << 24 | r << 16 | g << 8 | b`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Texel {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl From<u32> for Texel {
    fn from(value: u32) -> Self {
        let bytes = value.to_le_bytes();
        Texel {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
            a: bytes[3],
        }
    }
}

impl From<Texel> for u32 {
    fn from(value: Texel) -> Self {
        u32::from_le_bytes([value.b, value.g, value.r, value.a])
    }
}
