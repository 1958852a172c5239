//! Error types for codec operations.

use thiserror::Error;
use wire::{PacketKind, ProtocolVersion};

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while decoding beam packets.
///
/// Encoding is total over valid geometry and never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// Wire format error.
    #[error("wire error: {0}")]
    Wire(#[from] wire::DecodeError),

    /// The frame carries an opcode this codec does not produce.
    #[error("unknown packet id 0x{packet_id:02X} for protocol {version}")]
    UnknownPacketId {
        packet_id: i32,
        version: ProtocolVersion,
    },

    /// The opcode is known but the codec has no body layout for it.
    #[error("unsupported packet kind {kind:?}")]
    UnsupportedPacket { kind: PacketKind },

    /// The spawn packet names a mob type other than squid or guardian.
    #[error("unknown entity type id {type_id}")]
    UnknownEntityType { type_id: u8 },

    /// The attribute block contains a value type the layout does not define.
    #[error("unknown metadata type {type_id} at index {index}")]
    UnknownMetadataType { index: u8, type_id: i32 },

    /// A known attribute index carries the wrong value type.
    #[error("metadata index {index} has unexpected type")]
    MetadataMismatch { index: u8 },

    /// Bytes remained after the packet body was parsed.
    #[error("{remaining} trailing bytes after packet body")]
    TrailingBytes { remaining: usize },
}
