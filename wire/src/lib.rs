//! Byte-level primitives and packet framing for the gbeam client protocol.
//!
//! This crate handles the binary building blocks of the target client
//! protocol: big-endian scalars, VarInts, UUIDs, quantized angles and
//! fixed-point coordinates, and length-prefixed packet frames. It does not
//! know about entities or beams, only how bytes are laid out.
//!
//! # Design Principles
//!
//! - **Bit-exact quantization** - Angle and coordinate conversions match the client.
//! - **Bounded decoding** - All length fields are validated against limits before use.
//! - **No domain knowledge** - Opcodes are looked up, never interpreted.
//!
//! # Example
//!
//! ```
//! use wire::{ByteReader, ByteWriter};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_var_i32(300);
//! writer.write_angle(180.0);
//!
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0xAC, 0x02, 128]);
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_var_i32().unwrap(), 300);
//! assert_eq!(reader.read_angle().unwrap(), 180.0);
//! ```

mod error;
mod frame;
mod limits;
mod quantize;
mod reader;
mod version;
mod writer;

pub use error::{DecodeError, LimitKind, WireResult};
pub use frame::{decode_frame, encode_frame, Frame};
pub use limits::Limits;
pub use quantize::{
    angle_to_byte, byte_to_angle, from_fixed_point, to_fixed_point, ANGLE_STEPS,
    FIXED_POINT_SCALE,
};
pub use reader::ByteReader;
pub use version::{PacketKind, ProtocolVersion, UnknownVersion};
pub use writer::{var_i32_len, ByteWriter, VARINT_MAX_BYTES};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = Limits::default();
        let _ = ProtocolVersion::default();
        let _ = PacketKind::SpawnMob;
        let _ = FIXED_POINT_SCALE;

        // Error types
        let _: WireResult<()> = Ok(());
    }

    #[test]
    fn framed_primitives_integration() {
        let version = ProtocolVersion::V1_8;
        let mut body = ByteWriter::new();
        body.write_var_i32(7);
        body.write_fixed_point(10.5);
        let bytes = encode_frame(version.packet_id(PacketKind::EntityTeleport), &body.finish());

        let frame = decode_frame(&bytes, &Limits::for_testing()).unwrap();
        assert_eq!(version.packet_kind(frame.packet_id), Some(PacketKind::EntityTeleport));

        let mut reader = ByteReader::new(frame.body);
        assert_eq!(reader.read_var_i32().unwrap(), 7);
        assert_eq!(reader.read_fixed_point().unwrap(), 10.5);
        assert!(reader.is_empty());
    }
}
