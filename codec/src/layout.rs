//! Versioned packet body layouts.
//!
//! Both supported protocol versions share the same packet shapes; they
//! differ in how coordinates are written, whether spawns carry a UUID, and
//! the attribute block format. Each version is one [`WireLayout`].

use glam::DVec3;
use uuid::Uuid;
use wire::{ByteReader, ByteWriter, DecodeError, LimitKind, Limits, ProtocolVersion, WireResult};

use crate::error::{CodecError, CodecResult};
use crate::metadata::{attribute_entries, attributes_from_entries, read_metadata, write_metadata};
use crate::packet::{DestroyEntities, EntityTeleport, SpawnMob};
use crate::types::{EntityId, EntityKind, Placement};

pub(crate) trait WireLayout: Sync {
    fn version(&self) -> ProtocolVersion;

    fn has_spawn_uuid(&self) -> bool;

    fn write_coord(&self, value: f64, out: &mut ByteWriter);

    fn read_coord(&self, reader: &mut ByteReader<'_>) -> WireResult<f64>;

    fn write_position(&self, position: DVec3, out: &mut ByteWriter) {
        self.write_coord(position.x, out);
        self.write_coord(position.y, out);
        self.write_coord(position.z, out);
    }

    fn read_position(&self, reader: &mut ByteReader<'_>) -> WireResult<DVec3> {
        let x = self.read_coord(reader)?;
        let y = self.read_coord(reader)?;
        let z = self.read_coord(reader)?;
        Ok(DVec3::new(x, y, z))
    }

    fn write_spawn_mob(&self, packet: &SpawnMob, out: &mut ByteWriter) {
        out.write_var_i32(packet.entity_id.raw());
        if self.has_spawn_uuid() {
            out.write_uuid(packet.uuid);
        }
        out.write_u8(packet.kind.type_id());
        self.write_position(packet.placement.position, out);
        out.write_angle(packet.placement.yaw);
        out.write_angle(packet.placement.pitch);
        // Head angle follows the body.
        out.write_angle(packet.placement.yaw);
        for _ in 0..3 {
            out.write_i16(0);
        }
        let entries = attribute_entries(packet.kind, &packet.attributes, self.version());
        write_metadata(&entries, self.version(), out);
    }

    fn read_spawn_mob(&self, reader: &mut ByteReader<'_>) -> CodecResult<SpawnMob> {
        let entity_id = EntityId::new(reader.read_var_i32()?);
        let uuid = if self.has_spawn_uuid() {
            reader.read_uuid()?
        } else {
            Uuid::nil()
        };
        let type_id = reader.read_u8()?;
        let kind =
            EntityKind::from_type_id(type_id).ok_or(CodecError::UnknownEntityType { type_id })?;
        let position = self.read_position(reader)?;
        let yaw = reader.read_angle()?;
        let pitch = reader.read_angle()?;
        let _head = reader.read_angle()?;
        for _ in 0..3 {
            reader.read_i16()?;
        }
        let entries = read_metadata(reader, self.version())?;
        let attributes = attributes_from_entries(kind, &entries, self.version())?;
        Ok(SpawnMob {
            entity_id,
            uuid,
            kind,
            placement: Placement::new(position, yaw, pitch),
            attributes,
        })
    }

    fn write_teleport(&self, packet: &EntityTeleport, out: &mut ByteWriter) {
        out.write_var_i32(packet.entity_id.raw());
        self.write_position(packet.placement.position, out);
        out.write_angle(packet.placement.yaw);
        out.write_angle(packet.placement.pitch);
        out.write_bool(packet.on_ground);
    }

    fn read_teleport(&self, reader: &mut ByteReader<'_>) -> CodecResult<EntityTeleport> {
        let entity_id = EntityId::new(reader.read_var_i32()?);
        let position = self.read_position(reader)?;
        let yaw = reader.read_angle()?;
        let pitch = reader.read_angle()?;
        let on_ground = reader.read_bool()?;
        Ok(EntityTeleport {
            entity_id,
            placement: Placement::new(position, yaw, pitch),
            on_ground,
        })
    }

    fn write_destroy(&self, packet: &DestroyEntities, out: &mut ByteWriter) {
        // Destroy lists are two ids in practice.
        out.write_var_i32(packet.entity_ids.len() as i32);
        for id in &packet.entity_ids {
            out.write_var_i32(id.raw());
        }
    }

    fn read_destroy(
        &self,
        reader: &mut ByteReader<'_>,
        limits: &Limits,
    ) -> CodecResult<DestroyEntities> {
        let count = reader.read_var_len()?;
        if count > limits.max_array_len {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::ArrayLength,
                limit: limits.max_array_len,
                actual: count,
            }
            .into());
        }
        let mut entity_ids = Vec::with_capacity(count);
        for _ in 0..count {
            entity_ids.push(EntityId::new(reader.read_var_i32()?));
        }
        Ok(DestroyEntities { entity_ids })
    }
}

/// Protocol 47: 32x fixed-point `i32` coordinates, no spawn UUID.
struct FixedPointLayout;

impl WireLayout for FixedPointLayout {
    fn version(&self) -> ProtocolVersion {
        ProtocolVersion::V1_8
    }

    fn has_spawn_uuid(&self) -> bool {
        false
    }

    fn write_coord(&self, value: f64, out: &mut ByteWriter) {
        out.write_fixed_point(value);
    }

    fn read_coord(&self, reader: &mut ByteReader<'_>) -> WireResult<f64> {
        reader.read_fixed_point()
    }
}

/// Protocol 107: `f64` coordinates, spawn UUID.
struct FloatLayout;

impl WireLayout for FloatLayout {
    fn version(&self) -> ProtocolVersion {
        ProtocolVersion::V1_9
    }

    fn has_spawn_uuid(&self) -> bool {
        true
    }

    fn write_coord(&self, value: f64, out: &mut ByteWriter) {
        out.write_f64(value);
    }

    fn read_coord(&self, reader: &mut ByteReader<'_>) -> WireResult<f64> {
        reader.read_f64()
    }
}

pub(crate) fn layout(version: ProtocolVersion) -> &'static dyn WireLayout {
    match version {
        ProtocolVersion::V1_8 => &FixedPointLayout,
        ProtocolVersion::V1_9 => &FloatLayout,
    }
}
