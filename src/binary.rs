//! Flat binary formatter.
//!
//! Fields are packed back to back with no tags or padding: fixed-width integers
//! and floats in the configured byte order, one byte per `bool`, and strings and
//! integer arrays prefixed with an `i32` length. Nested objects leave no trace in
//! the stream, so structure comes from call order alone.

use crate::{BinaryOptions, Endian, Error, Formatter, Quaternion, Result, Saveable, Vector3};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Formatter over a flat byte buffer.
#[derive(Debug, Default)]
pub struct BinaryFormatter {
    output: BytesMut,
    input: Bytes,
    input_len: usize,
    endian: Endian,
}

macro_rules! fixed_width {
    ($write:ident, $read:ident, $ty:ty, $put_le:ident, $put_be:ident, $get_le:ident, $get_be:ident) => {
        fn $write(&mut self, value: $ty) -> Result<()> {
            match self.endian {
                Endian::Little => self.output.$put_le(value),
                Endian::Big => self.output.$put_be(value),
            }
            Ok(())
        }

        fn $read(&mut self) -> Result<$ty> {
            self.ensure(std::mem::size_of::<$ty>(), stringify!($ty))?;
            Ok(match self.endian {
                Endian::Little => self.input.$get_le(),
                Endian::Big => self.input.$get_be(),
            })
        }
    };
}

impl BinaryFormatter {
    /// Creates a formatter for saving.
    pub fn new(options: &BinaryOptions) -> Self {
        BinaryFormatter {
            output: BytesMut::with_capacity(256),
            input: Bytes::new(),
            input_len: 0,
            endian: options.endian,
        }
    }

    /// Creates a formatter that reads from `bytes`.
    pub fn reader(bytes: impl Into<Bytes>, options: &BinaryOptions) -> Self {
        let input = bytes.into();
        BinaryFormatter {
            output: BytesMut::new(),
            input_len: input.len(),
            input,
            endian: options.endian,
        }
    }

    /// Bytes written so far.
    #[inline]
    pub fn written(&self) -> usize {
        self.output.len()
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.input_len - self.input.remaining()
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.input.remaining()
    }

    pub fn into_bytes(self) -> Bytes {
        self.output.freeze()
    }

    fn ensure(&self, needed: usize, expected: &str) -> Result<()> {
        if self.input.remaining() < needed {
            return Err(Error::unexpected_eof(self.consumed(), "bytes", expected));
        }
        Ok(())
    }

    fn read_length(&mut self, what: &str) -> Result<usize> {
        let at = self.consumed();
        let length = self.read_i32()?;
        usize::try_from(length).map_err(|_| {
            Error::invalid_format(at, "byte", &format!("negative {} length {}", what, length))
        })
    }
}

impl Formatter for BinaryFormatter {
    fixed_width!(write_i32, read_i32, i32, put_i32_le, put_i32, get_i32_le, get_i32);
    fixed_width!(write_u32, read_u32, u32, put_u32_le, put_u32, get_u32_le, get_u32);
    fixed_width!(write_i64, read_i64, i64, put_i64_le, put_i64, get_i64_le, get_i64);
    fixed_width!(write_f32, read_f32, f32, put_f32_le, put_f32, get_f32_le, get_f32);

    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.output.put_u8(value);
        Ok(())
    }

    fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1, "u8")?;
        Ok(self.input.get_u8())
    }

    fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(u8::from(value))
    }

    fn read_bool(&mut self) -> Result<bool> {
        self.ensure(1, "bool")?;
        Ok(self.input.get_u8() != 0)
    }

    fn write_str(&mut self, value: &str) -> Result<()> {
        let length =
            i32::try_from(value.len()).map_err(|_| Error::InvalidLength(value.len() as i64))?;
        self.write_i32(length)?;
        self.output.put_slice(value.as_bytes());
        Ok(())
    }

    fn read_string(&mut self) -> Result<String> {
        let length = self.read_length("string")?;
        self.ensure(length, "string bytes")?;
        let at = self.consumed();
        let raw = self.input.split_to(length);
        String::from_utf8(raw.to_vec())
            .map_err(|e| Error::invalid_format(at, "byte", &format!("invalid UTF-8: {}", e)))
    }

    fn write_vector3(&mut self, value: Vector3) -> Result<()> {
        for component in <[f32; 3]>::from(value) {
            self.write_f32(component)?;
        }
        Ok(())
    }

    fn read_vector3(&mut self) -> Result<Vector3> {
        self.ensure(12, "vec3")?;
        Ok(Vector3::new(self.read_f32()?, self.read_f32()?, self.read_f32()?))
    }

    fn write_quaternion(&mut self, value: Quaternion) -> Result<()> {
        for component in <[f32; 4]>::from(value) {
            self.write_f32(component)?;
        }
        Ok(())
    }

    fn read_quaternion(&mut self) -> Result<Quaternion> {
        self.ensure(16, "quat")?;
        Ok(Quaternion::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    fn write_i32_array(&mut self, value: &[i32]) -> Result<()> {
        let count =
            i32::try_from(value.len()).map_err(|_| Error::InvalidLength(value.len() as i64))?;
        self.write_i32(count)?;
        for item in value {
            self.write_i32(*item)?;
        }
        Ok(())
    }

    fn read_i32_array(&mut self) -> Result<Vec<i32>> {
        let count = self.read_length("array")?;
        // the whole array must fit in the remaining input
        self.ensure(count.saturating_mul(4), "array elements")?;
        (0..count).map(|_| self.read_i32()).collect()
    }

    fn save<S: Saveable>(&mut self, child: &S) -> Result<()> {
        child.save(self)
    }

    fn load<S: Saveable>(&mut self, child: &mut S) -> Result<()> {
        child.load(self)
    }
}
