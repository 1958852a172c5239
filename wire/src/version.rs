//! Target protocol versions and their opcode tables.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Clientbound packet kinds the beam protocol emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketKind {
    SpawnMob,
    EntityTeleport,
    DestroyEntities,
    EntityMetadata,
}

impl PacketKind {
    pub const ALL: [Self; 4] = [
        Self::SpawnMob,
        Self::EntityTeleport,
        Self::DestroyEntities,
        Self::EntityMetadata,
    ];
}

/// Client protocol version the encoder targets.
///
/// The two versions differ in opcodes, coordinate encoding and the shape of
/// the attribute block, so every packet must be encoded for exactly one of
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProtocolVersion {
    /// Protocol 47: fixed-point coordinates, no spawn UUID.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "1.8"))]
    V1_8,
    /// Protocol 107: double coordinates, spawn UUID.
    #[cfg_attr(feature = "serde", serde(rename = "1.9"))]
    V1_9,
}

impl ProtocolVersion {
    pub const ALL: [Self; 2] = [Self::V1_8, Self::V1_9];

    /// Returns the protocol number sent during the handshake.
    #[must_use]
    pub const fn protocol_number(self) -> i32 {
        match self {
            Self::V1_8 => 47,
            Self::V1_9 => 107,
        }
    }

    /// Returns the opcode for `kind` in this version.
    #[must_use]
    pub const fn packet_id(self, kind: PacketKind) -> i32 {
        match (self, kind) {
            (Self::V1_8, PacketKind::SpawnMob) => 0x0F,
            (Self::V1_8, PacketKind::EntityTeleport) => 0x18,
            (Self::V1_8, PacketKind::DestroyEntities) => 0x13,
            (Self::V1_8, PacketKind::EntityMetadata) => 0x1C,
            (Self::V1_9, PacketKind::SpawnMob) => 0x03,
            (Self::V1_9, PacketKind::EntityTeleport) => 0x4A,
            (Self::V1_9, PacketKind::DestroyEntities) => 0x30,
            (Self::V1_9, PacketKind::EntityMetadata) => 0x39,
        }
    }

    /// Reverse opcode lookup.
    #[must_use]
    pub fn packet_kind(self, packet_id: i32) -> Option<PacketKind> {
        PacketKind::ALL
            .into_iter()
            .find(|kind| self.packet_id(*kind) == packet_id)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::V1_8 => "1.8",
            Self::V1_9 => "1.9",
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown version name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown protocol version {0:?}, expected one of: 1.8, 1.9")]
pub struct UnknownVersion(pub String);

impl FromStr for ProtocolVersion {
    type Err = UnknownVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|version| version.name() == s)
            .ok_or_else(|| UnknownVersion(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_fixed_point_version() {
        assert_eq!(ProtocolVersion::default(), ProtocolVersion::V1_8);
    }

    #[test]
    fn opcodes_unique_per_version() {
        for version in ProtocolVersion::ALL {
            for kind in PacketKind::ALL {
                assert_eq!(version.packet_kind(version.packet_id(kind)), Some(kind));
            }
        }
    }

    #[test]
    fn legacy_opcodes() {
        let v = ProtocolVersion::V1_8;
        assert_eq!(v.packet_id(PacketKind::SpawnMob), 0x0F);
        assert_eq!(v.packet_id(PacketKind::EntityTeleport), 0x18);
        assert_eq!(v.packet_id(PacketKind::DestroyEntities), 0x13);
    }

    #[test]
    fn unknown_opcode() {
        assert_eq!(ProtocolVersion::V1_9.packet_kind(0x7F), None);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("1.9".parse::<ProtocolVersion>(), Ok(ProtocolVersion::V1_9));
        assert_eq!(ProtocolVersion::V1_8.to_string(), "1.8");
        let err = "1.12".parse::<ProtocolVersion>().unwrap_err();
        assert!(err.to_string().contains("1.12"));
    }
}
