//! Entity attribute blocks ("metadata").
//!
//! The beam only ever needs three attributes: the generic invisibility flag,
//! the guardian's spike flag, and the guardian's target. Each protocol
//! version stores them at different indices with different value types and
//! entry headers, so the logical [`EntityAttributes`] is lowered to raw
//! entries per version.

use wire::{ByteReader, ByteWriter, ProtocolVersion};

use crate::error::{CodecError, CodecResult};
use crate::types::{EntityId, EntityKind};

/// Bit in the generic entity flags byte that hides the model.
pub const FLAG_INVISIBLE: u8 = 0x20;

const LEGACY_TERMINATOR: u8 = 0x7F;
const MODERN_TERMINATOR: u8 = 0xFF;

/// Attributes the beam sets on its fake entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityAttributes {
    pub invisible: bool,
    /// Guardian only.
    pub retracting_spikes: bool,
    /// Guardian only: the entity the beam is drawn towards.
    pub target: Option<EntityId>,
}

impl EntityAttributes {
    /// An invisible entity with no other attributes.
    #[must_use]
    pub const fn invisible() -> Self {
        Self {
            invisible: true,
            retracting_spikes: false,
            target: None,
        }
    }

    /// An invisible guardian with spikes extended, locked onto `target`.
    #[must_use]
    pub const fn guardian_targeting(target: EntityId) -> Self {
        Self {
            invisible: true,
            retracting_spikes: false,
            target: Some(target),
        }
    }
}

/// A raw attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataValue {
    Byte(u8),
    Int(i32),
    VarInt(i32),
}

impl MetadataValue {
    fn as_i32(self) -> i32 {
        match self {
            Self::Byte(value) => i32::from(value),
            Self::Int(value) | Self::VarInt(value) => value,
        }
    }
}

/// One raw entry of an attribute block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataEntry {
    pub index: u8,
    pub value: MetadataValue,
}

impl MetadataEntry {
    #[must_use]
    pub const fn new(index: u8, value: MetadataValue) -> Self {
        Self { index, value }
    }
}

/// Where a protocol version keeps the attributes the beam uses.
struct AttributeSlots {
    flags: u8,
    guardian_flags: u8,
    guardian_retracting_bit: i32,
    guardian_target: u8,
    guardian_value: fn(i32) -> MetadataValue,
    target_value: fn(i32) -> MetadataValue,
}

const LEGACY_SLOTS: AttributeSlots = AttributeSlots {
    flags: 0,
    guardian_flags: 16,
    guardian_retracting_bit: 0x04,
    guardian_target: 17,
    guardian_value: MetadataValue::Int,
    target_value: MetadataValue::Int,
};

const MODERN_SLOTS: AttributeSlots = AttributeSlots {
    flags: 0,
    guardian_flags: 11,
    guardian_retracting_bit: 0x02,
    guardian_target: 12,
    // The modern guardian flags are a single byte.
    guardian_value: modern_guardian_flags,
    target_value: MetadataValue::VarInt,
};

fn modern_guardian_flags(bits: i32) -> MetadataValue {
    MetadataValue::Byte((bits & 0xFF) as u8)
}

const fn slots(version: ProtocolVersion) -> &'static AttributeSlots {
    match version {
        ProtocolVersion::V1_8 => &LEGACY_SLOTS,
        ProtocolVersion::V1_9 => &MODERN_SLOTS,
    }
}

/// Lowers attributes to the raw entries `version` expects for `kind`.
///
/// Guardian-only attributes are dropped for squids.
#[must_use]
pub fn attribute_entries(
    kind: EntityKind,
    attributes: &EntityAttributes,
    version: ProtocolVersion,
) -> Vec<MetadataEntry> {
    let slots = slots(version);
    let flags = if attributes.invisible { FLAG_INVISIBLE } else { 0 };
    let mut entries = vec![MetadataEntry::new(slots.flags, MetadataValue::Byte(flags))];

    if kind == EntityKind::Guardian {
        let bits = if attributes.retracting_spikes {
            slots.guardian_retracting_bit
        } else {
            0
        };
        entries.push(MetadataEntry::new(
            slots.guardian_flags,
            (slots.guardian_value)(bits),
        ));
        if let Some(target) = attributes.target {
            entries.push(MetadataEntry::new(
                slots.guardian_target,
                (slots.target_value)(target.raw()),
            ));
        }
    }
    entries
}

/// Lifts raw entries back to attributes. Unknown indices are ignored.
pub fn attributes_from_entries(
    kind: EntityKind,
    entries: &[MetadataEntry],
    version: ProtocolVersion,
) -> CodecResult<EntityAttributes> {
    let slots = slots(version);
    let mut attributes = EntityAttributes::default();
    for entry in entries {
        if entry.index == slots.flags {
            let MetadataValue::Byte(flags) = entry.value else {
                return Err(CodecError::MetadataMismatch { index: entry.index });
            };
            attributes.invisible = flags & FLAG_INVISIBLE != 0;
        } else if kind == EntityKind::Guardian && entry.index == slots.guardian_flags {
            attributes.retracting_spikes =
                entry.value.as_i32() & slots.guardian_retracting_bit != 0;
        } else if kind == EntityKind::Guardian && entry.index == slots.guardian_target {
            attributes.target = Some(EntityId::new(entry.value.as_i32()));
        }
    }
    Ok(attributes)
}

/// Writes a terminated attribute block.
pub(crate) fn write_metadata(
    entries: &[MetadataEntry],
    version: ProtocolVersion,
    out: &mut ByteWriter,
) {
    match version {
        ProtocolVersion::V1_8 => {
            for entry in entries {
                // Header byte: 3-bit type, 5-bit index.
                let index = entry.index & 0x1F;
                match entry.value {
                    MetadataValue::Byte(v) => {
                        out.write_u8(index);
                        out.write_u8(v);
                    }
                    MetadataValue::Int(v) | MetadataValue::VarInt(v) => {
                        out.write_u8((2 << 5) | index);
                        out.write_i32(v);
                    }
                }
            }
            out.write_u8(LEGACY_TERMINATOR);
        }
        ProtocolVersion::V1_9 => {
            for entry in entries {
                out.write_u8(entry.index);
                match entry.value {
                    MetadataValue::Byte(v) => {
                        out.write_var_i32(0);
                        out.write_u8(v);
                    }
                    MetadataValue::Int(v) | MetadataValue::VarInt(v) => {
                        out.write_var_i32(1);
                        out.write_var_i32(v);
                    }
                }
            }
            out.write_u8(MODERN_TERMINATOR);
        }
    }
}

/// Reads a terminated attribute block.
pub(crate) fn read_metadata(
    reader: &mut ByteReader<'_>,
    version: ProtocolVersion,
) -> CodecResult<Vec<MetadataEntry>> {
    let mut entries = Vec::new();
    match version {
        ProtocolVersion::V1_8 => loop {
            let header = reader.read_u8()?;
            if header == LEGACY_TERMINATOR {
                break;
            }
            let index = header & 0x1F;
            let value = match header >> 5 {
                0 => MetadataValue::Byte(reader.read_u8()?),
                2 => MetadataValue::Int(reader.read_i32()?),
                other => {
                    return Err(CodecError::UnknownMetadataType {
                        index,
                        type_id: i32::from(other),
                    })
                }
            };
            entries.push(MetadataEntry::new(index, value));
        },
        ProtocolVersion::V1_9 => loop {
            let index = reader.read_u8()?;
            if index == MODERN_TERMINATOR {
                break;
            }
            let value = match reader.read_var_i32()? {
                0 => MetadataValue::Byte(reader.read_u8()?),
                1 => MetadataValue::VarInt(reader.read_var_i32()?),
                type_id => return Err(CodecError::UnknownMetadataType { index, type_id }),
            };
            entries.push(MetadataEntry::new(index, value));
        },
    }
    Ok(entries)
}
