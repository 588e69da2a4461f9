use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::ParserError;
use crate::common::types::{AiString, MAX_STRING_LENGTH, Pointer, Texel};

/// A value with a fixed inline layout inside the blob.
pub trait Parseable<T> {
    /// The number of bytes one inline element occupies, padding included.
    const SIZE: usize;

    fn parse<R: Read>(rdr: &mut R) -> Result<T, ParserError>;
}

impl Parseable<u8> for u8 {
    const SIZE: usize = 1;

    fn parse<R: Read>(rdr: &mut R) -> Result<u8, ParserError> {
        Ok(rdr.read_u8()?)
    }
}

impl Parseable<u16> for u16 {
    const SIZE: usize = 2;

    fn parse<R: Read>(rdr: &mut R) -> Result<u16, ParserError> {
        Ok(rdr.read_u16::<LittleEndian>()?)
    }
}

impl Parseable<u32> for u32 {
    const SIZE: usize = 4;

    fn parse<R: Read>(rdr: &mut R) -> Result<u32, ParserError> {
        Ok(rdr.read_u32::<LittleEndian>()?)
    }
}

impl Parseable<i32> for i32 {
    const SIZE: usize = 4;

    fn parse<R: Read>(rdr: &mut R) -> Result<i32, ParserError> {
        Ok(rdr.read_i32::<LittleEndian>()?)
    }
}

impl Parseable<f32> for f32 {
    const SIZE: usize = 4;

    fn parse<R: Read>(rdr: &mut R) -> Result<f32, ParserError> {
        Ok(rdr.read_f32::<LittleEndian>()?)
    }
}

impl Parseable<f64> for f64 {
    const SIZE: usize = 8;

    fn parse<R: Read>(rdr: &mut R) -> Result<f64, ParserError> {
        Ok(rdr.read_f64::<LittleEndian>()?)
    }
}

impl Parseable<u64> for u64 {
    const SIZE: usize = 8;

    fn parse<R: Read>(rdr: &mut R) -> Result<u64, ParserError> {
        Ok(rdr.read_u64::<LittleEndian>()?)
    }
}

impl Parseable<Pointer> for Pointer {
    const SIZE: usize = 8;

    fn parse<R: Read>(rdr: &mut R) -> Result<Pointer, ParserError> {
        Ok(Pointer(rdr.read_u64::<LittleEndian>()?))
    }
}

impl Parseable<Texel> for Texel {
    const SIZE: usize = 4;

    fn parse<R: Read>(rdr: &mut R) -> Result<Texel, ParserError> {
        Ok(Texel::from(rdr.read_u32::<LittleEndian>()?))
    }
}

/// Fixed-count inline buffers, e.g. the 8 texture coordinate channel pointers of a mesh.
impl<T: Parseable<T> + Copy + Default, const N: usize> Parseable<[T; N]> for [T; N] {
    const SIZE: usize = <T as Parseable<T>>::SIZE * N;

    fn parse<R: Read>(rdr: &mut R) -> Result<[T; N], ParserError> {
        let mut array = [T::default(); N];
        for element in array.iter_mut() {
            *element = T::parse(rdr)?;
        }
        Ok(array)
    }
}

impl Parseable<AiString> for AiString {
    const SIZE: usize = 4 + MAX_STRING_LENGTH;

    fn parse<R: Read>(rdr: &mut R) -> Result<AiString, ParserError> {
        let length = rdr.read_u32::<LittleEndian>()? as usize;
        let mut buf = vec![0u8; MAX_STRING_LENGTH];
        rdr.read_exact(&mut buf)?;

        if length >= MAX_STRING_LENGTH {
            return Err(ParserError::FormatError {
                reason: "aiString length exceeds its inline buffer",
            });
        }

        // Names come from arbitrary source files, which are not guaranteed to be UTF-8.
        Ok(AiString(String::from_utf8_lossy(&buf[..length]).into_owned()))
    }
}

/// A borrowed view onto the native memory of one import. `base` is the address the first byte of
/// `data` lives at, so that the absolute pointers stored inside the records can be translated into
/// offsets. Every access is checked against `[base, base + data.len())`.
#[derive(Debug, Copy, Clone)]
pub struct Blob<'a> {
    base: u64,
    data: &'a [u8],
}

impl<'a> Blob<'a> {
    pub fn new(base: u64, data: &'a [u8]) -> Self {
        Self { base, data }
    }

    /// Wraps native memory that has been handed out by the import library.
    ///
    /// # Safety
    /// `ptr` must point to `len` readable bytes, that stay valid and unmodified for `'a`.
    pub unsafe fn from_raw_parts(ptr: *const u8, len: usize) -> Self {
        Self {
            base: ptr as u64,
            data: std::slice::from_raw_parts(ptr, len),
        }
    }

    #[inline]
    pub fn base(&self) -> Pointer {
        Pointer(self.base)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn out_of_bounds(&self, address: Pointer, len: usize) -> ParserError {
        ParserError::OutOfBounds {
            address: address.0,
            len,
            base: self.base,
            blob_len: self.data.len(),
        }
    }

    /// The `len` bytes starting at `address`, without copying.
    pub fn range(&self, address: Pointer, len: usize) -> Result<&'a [u8], ParserError> {
        let offset = address
            .0
            .checked_sub(self.base)
            .and_then(|offset| usize::try_from(offset).ok())
            .ok_or_else(|| self.out_of_bounds(address, len))?;
        let end = offset
            .checked_add(len)
            .ok_or_else(|| self.out_of_bounds(address, len))?;

        self.data
            .get(offset..end)
            .ok_or_else(|| self.out_of_bounds(address, len))
    }

    /// Reads a single fixed layout value.
    pub fn read<T: Parseable<T>>(&self, address: Pointer) -> Result<T, ParserError> {
        let mut rdr = Cursor::new(self.range(address, T::SIZE)?);
        T::parse(&mut rdr)
    }

    /// Same as [`Blob::read`], but fails with [`ParserError::NullPointer`] for a null `address`.
    pub fn read_required<T: Parseable<T>>(&self, address: Pointer, field: &'static str) -> Result<T, ParserError> {
        if address.is_null() {
            return Err(ParserError::NullPointer { field });
        }
        self.read(address)
    }

    #[inline]
    pub fn read_u32(&self, address: Pointer) -> Result<u32, ParserError> {
        self.read::<u32>(address)
    }

    #[inline]
    pub fn read_f32(&self, address: Pointer) -> Result<f32, ParserError> {
        self.read::<f32>(address)
    }

    #[inline]
    pub fn read_pointer(&self, address: Pointer) -> Result<Pointer, ParserError> {
        self.read::<Pointer>(address)
    }

    /// Copies `len` raw bytes. A null `address` is only accepted for `len == 0`.
    pub fn read_bytes(&self, address: Pointer, len: usize, field: &'static str) -> Result<Vec<u8>, ParserError> {
        if len == 0 {
            return Ok(Vec::new());
        }
        if address.is_null() {
            return Err(ParserError::NullPointer { field });
        }
        Ok(self.range(address, len)?.to_vec())
    }

    /// Reads `count` elements that are laid out contiguously at `address`, without any indirection.
    pub fn read_inline_array<T: Parseable<T>>(
        &self,
        address: Pointer,
        count: usize,
        field: &'static str,
    ) -> Result<Vec<T>, ParserError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if address.is_null() {
            return Err(ParserError::NullPointer { field });
        }

        let total = T::SIZE
            .checked_mul(count)
            .ok_or_else(|| self.out_of_bounds(address, usize::MAX))?;
        // Checking the whole range up front also keeps a corrupt count from triggering a huge allocation.
        let mut rdr = Cursor::new(self.range(address, total)?);

        let mut list: Vec<T> = Vec::with_capacity(count);
        for _ in 0..count {
            list.push(T::parse(&mut rdr)?);
        }

        Ok(list)
    }

    /// Reads `count` pointer slots at `address` and hands every (non-null) slot to `decode`.
    pub fn read_pointer_array<T, F>(
        &self,
        address: Pointer,
        count: usize,
        field: &'static str,
        mut decode: F,
    ) -> Result<Vec<T>, ParserError>
    where
        F: FnMut(&Blob<'a>, Pointer) -> Result<T, ParserError>,
    {
        let pointers: Vec<Pointer> = self.read_inline_array(address, count, field)?;

        let mut list = Vec::with_capacity(pointers.len());
        for pointer in pointers {
            if pointer.is_null() {
                return Err(ParserError::NullPointer { field });
            }
            list.push(decode(self, pointer)?);
        }

        Ok(list)
    }
}
