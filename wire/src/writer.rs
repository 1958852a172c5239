//! Byte-level writer for protocol primitives.

use uuid::Uuid;

use crate::quantize::{angle_to_byte, to_fixed_point};

/// Maximum encoded length of a VarInt.
pub const VARINT_MAX_BYTES: usize = 5;

/// A growable writer for big-endian protocol primitives.
///
/// Writes never fail; call [`finish`](Self::finish) to take the bytes.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    /// Creates a new empty `ByteWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `ByteWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.bytes.push(u8::from(value));
    }

    pub fn write_i16(&mut self, value: i16) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Writes a VarInt: the two's-complement bits in 7-bit groups, least
    /// significant group first, high bit set on every byte but the last.
    pub fn write_var_i32(&mut self, value: i32) {
        let mut value = value as u32;
        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            self.bytes.push(byte);
            if value == 0 {
                break;
            }
        }
    }

    /// Writes a UUID as 16 big-endian bytes.
    pub fn write_uuid(&mut self, value: Uuid) {
        self.bytes.extend_from_slice(value.as_bytes());
    }

    /// Writes an angle in degrees as a single quantized byte.
    pub fn write_angle(&mut self, degrees: f32) {
        self.write_u8(angle_to_byte(degrees));
    }

    /// Writes a coordinate as a 32x fixed-point `i32`.
    pub fn write_fixed_point(&mut self, coord: f64) {
        self.write_i32(to_fixed_point(coord));
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

/// Returns the number of bytes `value` occupies as a VarInt.
#[must_use]
pub fn var_i32_len(value: i32) -> usize {
    let mut value = value as u32;
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var_bytes(value: i32) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        writer.write_var_i32(value);
        writer.finish()
    }

    #[test]
    fn empty_writer() {
        let writer = ByteWriter::new();
        assert!(writer.is_empty());
        assert!(writer.finish().is_empty());
    }

    #[test]
    fn var_int_known_encodings() {
        assert_eq!(var_bytes(0), vec![0x00]);
        assert_eq!(var_bytes(1), vec![0x01]);
        assert_eq!(var_bytes(127), vec![0x7F]);
        assert_eq!(var_bytes(128), vec![0x80, 0x01]);
        assert_eq!(var_bytes(255), vec![0xFF, 0x01]);
        assert_eq!(var_bytes(25_565), vec![0xDD, 0xC7, 0x01]);
        assert_eq!(var_bytes(2_097_151), vec![0xFF, 0xFF, 0x7F]);
        assert_eq!(var_bytes(i32::MAX), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x07]);
        assert_eq!(var_bytes(-1), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
        assert_eq!(var_bytes(i32::MIN), vec![0x80, 0x80, 0x80, 0x80, 0x08]);
    }

    #[test]
    fn var_int_len_matches_encoding() {
        for value in [0, 1, 127, 128, 16_383, 16_384, 2_097_151, i32::MAX, -1] {
            assert_eq!(var_i32_len(value), var_bytes(value).len(), "value {value}");
        }
    }

    #[test]
    fn scalars_are_big_endian() {
        let mut writer = ByteWriter::new();
        writer.write_i16(0x0102);
        writer.write_i32(0x0304_0506);
        writer.write_bool(true);
        writer.write_i8(-1);
        assert_eq!(
            writer.finish(),
            vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x01, 0xFF]
        );
    }

    #[test]
    fn f64_is_big_endian() {
        let mut writer = ByteWriter::new();
        writer.write_f64(1.0);
        assert_eq!(writer.finish(), 1.0f64.to_be_bytes().to_vec());
    }

    #[test]
    fn uuid_written_as_16_bytes() {
        let uuid = Uuid::from_u128(0x0011_2233_4455_6677_8899_AABB_CCDD_EEFF);
        let mut writer = ByteWriter::new();
        writer.write_uuid(uuid);
        let bytes = writer.finish();
        assert_eq!(bytes.len(), 16);
        assert_eq!(bytes[0], 0x00);
        assert_eq!(bytes[15], 0xFF);
    }

    #[test]
    fn angle_and_fixed_point() {
        let mut writer = ByteWriter::new();
        writer.write_angle(180.0);
        writer.write_fixed_point(2.0);
        assert_eq!(writer.finish(), vec![128, 0, 0, 0, 64]);
    }

    #[test]
    fn with_capacity_starts_empty() {
        let writer = ByteWriter::with_capacity(64);
        assert_eq!(writer.len(), 0);
    }
}
