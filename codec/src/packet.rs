//! Typed beam packets and their framed encoding.

use uuid::Uuid;
use wire::{decode_frame, encode_frame, ByteReader, ByteWriter, Limits, PacketKind, ProtocolVersion};

use crate::error::{CodecError, CodecResult};
use crate::layout::layout;
use crate::metadata::EntityAttributes;
use crate::types::{EntityId, EntityKind, Placement};

/// A packet with a fixed opcode kind and a version-dependent body.
pub trait BeamPacket {
    const KIND: PacketKind;

    fn write_body(&self, version: ProtocolVersion, out: &mut ByteWriter);

    /// Encodes the complete frame for `version`.
    fn encode(&self, version: ProtocolVersion) -> Vec<u8> {
        let mut body = ByteWriter::with_capacity(64);
        self.write_body(version, &mut body);
        encode_frame(version.packet_id(Self::KIND), &body.finish())
    }
}

/// Spawns a living entity, including its attribute block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnMob {
    pub entity_id: EntityId,
    /// Correlation token; only protocols with spawn UUIDs put it on the wire.
    pub uuid: Uuid,
    pub kind: EntityKind,
    pub placement: Placement,
    pub attributes: EntityAttributes,
}

impl BeamPacket for SpawnMob {
    const KIND: PacketKind = PacketKind::SpawnMob;

    fn write_body(&self, version: ProtocolVersion, out: &mut ByteWriter) {
        layout(version).write_spawn_mob(self, out);
    }
}

/// Moves an entity to an absolute placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityTeleport {
    pub entity_id: EntityId,
    pub placement: Placement,
    pub on_ground: bool,
}

impl BeamPacket for EntityTeleport {
    const KIND: PacketKind = PacketKind::EntityTeleport;

    fn write_body(&self, version: ProtocolVersion, out: &mut ByteWriter) {
        layout(version).write_teleport(self, out);
    }
}

/// Despawns any number of entities at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestroyEntities {
    pub entity_ids: Vec<EntityId>,
}

impl BeamPacket for DestroyEntities {
    const KIND: PacketKind = PacketKind::DestroyEntities;

    fn write_body(&self, version: ProtocolVersion, out: &mut ByteWriter) {
        layout(version).write_destroy(self, out);
    }
}

/// Any packet the codec produces.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    SpawnMob(SpawnMob),
    EntityTeleport(EntityTeleport),
    DestroyEntities(DestroyEntities),
}

impl Packet {
    #[must_use]
    pub const fn kind(&self) -> PacketKind {
        match self {
            Self::SpawnMob(_) => PacketKind::SpawnMob,
            Self::EntityTeleport(_) => PacketKind::EntityTeleport,
            Self::DestroyEntities(_) => PacketKind::DestroyEntities,
        }
    }

    /// Encodes the complete frame for `version`.
    #[must_use]
    pub fn encode(&self, version: ProtocolVersion) -> Vec<u8> {
        match self {
            Self::SpawnMob(packet) => packet.encode(version),
            Self::EntityTeleport(packet) => packet.encode(version),
            Self::DestroyEntities(packet) => packet.encode(version),
        }
    }

    /// Returns every entity id the packet refers to, target ids included.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<EntityId> {
        match self {
            Self::SpawnMob(packet) => std::iter::once(packet.entity_id)
                .chain(packet.attributes.target)
                .collect(),
            Self::EntityTeleport(packet) => vec![packet.entity_id],
            Self::DestroyEntities(packet) => packet.entity_ids.clone(),
        }
    }
}

impl From<SpawnMob> for Packet {
    fn from(packet: SpawnMob) -> Self {
        Self::SpawnMob(packet)
    }
}

impl From<EntityTeleport> for Packet {
    fn from(packet: EntityTeleport) -> Self {
        Self::EntityTeleport(packet)
    }
}

impl From<DestroyEntities> for Packet {
    fn from(packet: DestroyEntities) -> Self {
        Self::DestroyEntities(packet)
    }
}

/// Decodes exactly one framed packet encoded for `version`.
pub fn decode_packet(buf: &[u8], version: ProtocolVersion, limits: &Limits) -> CodecResult<Packet> {
    let frame = decode_frame(buf, limits)?;
    let kind = version
        .packet_kind(frame.packet_id)
        .ok_or(CodecError::UnknownPacketId {
            packet_id: frame.packet_id,
            version,
        })?;

    let layout = layout(version);
    let mut reader = ByteReader::new(frame.body);
    let packet = match kind {
        PacketKind::SpawnMob => layout.read_spawn_mob(&mut reader)?.into(),
        PacketKind::EntityTeleport => layout.read_teleport(&mut reader)?.into(),
        PacketKind::DestroyEntities => layout.read_destroy(&mut reader, limits)?.into(),
        PacketKind::EntityMetadata => return Err(CodecError::UnsupportedPacket { kind }),
    };

    if !reader.is_empty() {
        return Err(CodecError::TrailingBytes {
            remaining: reader.remaining(),
        });
    }
    Ok(packet)
}
