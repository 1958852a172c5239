//! Byte-level reader with bounded operations.

use uuid::Uuid;

use crate::error::{DecodeError, WireResult};
use crate::quantize::{byte_to_angle, from_fixed_point};
use crate::writer::VARINT_MAX_BYTES;

/// A reader for big-endian protocol primitives.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the unread tail without consuming it.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos.min(self.data.len())..]
    }

    /// Reads exactly `len` bytes.
    pub fn read_slice(&mut self, len: usize) -> WireResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(DecodeError::UnexpectedEof {
                requested: len,
                available: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> WireResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_slice(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> WireResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_bool(&mut self) -> WireResult<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(DecodeError::InvalidBool { value }),
        }
    }

    pub fn read_i16(&mut self) -> WireResult<i16> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> WireResult<i32> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    pub fn read_f64(&mut self) -> WireResult<f64> {
        Ok(f64::from_be_bytes(self.read_array()?))
    }

    /// Reads a VarInt of at most five bytes.
    pub fn read_var_i32(&mut self) -> WireResult<i32> {
        let mut value = 0u32;
        for i in 0..VARINT_MAX_BYTES {
            let byte = self.read_u8()?;
            value |= u32::from(byte & 0x7F) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value as i32);
            }
        }
        Err(DecodeError::InvalidVarInt)
    }

    /// Reads a non-negative VarInt length prefix.
    pub fn read_var_len(&mut self) -> WireResult<usize> {
        let value = self.read_var_i32()?;
        usize::try_from(value).map_err(|_| DecodeError::NegativeLength { value })
    }

    pub fn read_uuid(&mut self) -> WireResult<Uuid> {
        Ok(Uuid::from_bytes(self.read_array()?))
    }

    /// Reads an angle byte and expands it to degrees.
    pub fn read_angle(&mut self) -> WireResult<f32> {
        Ok(byte_to_angle(self.read_u8()?))
    }

    /// Reads a 32x fixed-point coordinate and converts it to blocks.
    pub fn read_fixed_point(&mut self) -> WireResult<f64> {
        Ok(from_fixed_point(self.read_i32()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::ByteWriter;

    #[test]
    fn empty_reader() {
        let reader = ByteReader::new(&[]);
        assert!(reader.is_empty());
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn read_past_end_fails() {
        let mut reader = ByteReader::new(&[0x01, 0x02]);
        let err = reader.read_i32().unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnexpectedEof {
                requested: 4,
                available: 2
            }
        );
        // A failed read does not consume input.
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn var_int_known_decodings() {
        let cases: [(&[u8], i32); 5] = [
            (&[0x00], 0),
            (&[0x80, 0x01], 128),
            (&[0xDD, 0xC7, 0x01], 25_565),
            (&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F], -1),
            (&[0x80, 0x80, 0x80, 0x80, 0x08], i32::MIN),
        ];
        for (bytes, expected) in cases {
            let mut reader = ByteReader::new(bytes);
            assert_eq!(reader.read_var_i32().unwrap(), expected);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn var_int_too_long() {
        let mut reader = ByteReader::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]);
        assert_eq!(reader.read_var_i32(), Err(DecodeError::InvalidVarInt));
    }

    #[test]
    fn var_int_truncated() {
        let mut reader = ByteReader::new(&[0x80]);
        assert!(matches!(
            reader.read_var_i32(),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn var_len_rejects_negative() {
        let mut reader = ByteReader::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
        assert_eq!(
            reader.read_var_len(),
            Err(DecodeError::NegativeLength { value: -1 })
        );
    }

    #[test]
    fn bool_rejects_other_bytes() {
        let mut reader = ByteReader::new(&[0x02]);
        assert_eq!(reader.read_bool(), Err(DecodeError::InvalidBool { value: 2 }));
    }

    #[test]
    fn mixed_sequence() {
        let uuid = Uuid::from_u128(42);
        let mut writer = ByteWriter::new();
        writer.write_var_i32(300);
        writer.write_uuid(uuid);
        writer.write_fixed_point(-1.5);
        writer.write_f64(64.25);
        writer.write_angle(90.0);
        writer.write_i16(-7);
        writer.write_bool(false);
        let bytes = writer.finish();

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_var_i32().unwrap(), 300);
        assert_eq!(reader.read_uuid().unwrap(), uuid);
        assert_eq!(reader.read_fixed_point().unwrap(), -1.5);
        assert_eq!(reader.read_f64().unwrap(), 64.25);
        assert_eq!(reader.read_angle().unwrap(), 90.0);
        assert_eq!(reader.read_i16().unwrap(), -7);
        assert!(!reader.read_bool().unwrap());
        assert!(reader.is_empty());
    }

    #[test]
    fn rest_returns_unread_tail() {
        let mut reader = ByteReader::new(&[1, 2, 3]);
        reader.read_u8().unwrap();
        assert_eq!(reader.rest(), &[2, 3]);
    }
}
