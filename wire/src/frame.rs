//! Length-prefixed packet framing.
//!
//! A frame is `VarInt(len) ++ VarInt(packet_id) ++ body`, where `len` counts
//! the packet id and the body. Compression is never enabled for the frames
//! produced here.

use crate::error::{DecodeError, LimitKind, WireResult};
use crate::limits::Limits;
use crate::reader::ByteReader;
use crate::writer::{var_i32_len, ByteWriter};

/// A decoded frame borrowing its body from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub packet_id: i32,
    pub body: &'a [u8],
}

/// Frames a packet body under `packet_id`.
#[must_use]
pub fn encode_frame(packet_id: i32, body: &[u8]) -> Vec<u8> {
    let inner_len = var_i32_len(packet_id) + body.len();
    let mut writer = ByteWriter::with_capacity(inner_len + 3);
    // Frames are bounded far below i32::MAX by construction.
    writer.write_var_i32(inner_len as i32);
    writer.write_var_i32(packet_id);
    writer.write_bytes(body);
    writer.finish()
}

/// Decodes exactly one frame occupying all of `buf`.
pub fn decode_frame<'a>(buf: &'a [u8], limits: &Limits) -> WireResult<Frame<'a>> {
    let mut reader = ByteReader::new(buf);
    let declared = reader.read_var_len()?;
    if declared > limits.max_frame_bytes {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::FrameBytes,
            limit: limits.max_frame_bytes,
            actual: declared,
        });
    }
    if declared != reader.remaining() {
        return Err(DecodeError::FrameLengthMismatch {
            declared,
            available: reader.remaining(),
        });
    }

    let packet_id = reader.read_var_i32()?;
    Ok(Frame {
        packet_id,
        body: reader.rest(),
    })
}
