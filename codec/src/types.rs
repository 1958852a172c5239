//! Core types for the codec.

use std::fmt;

use glam::DVec3;

/// A client-side entity identifier.
///
/// The protocol carries entity ids as signed 32-bit VarInts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(i32);

impl EntityId {
    /// Creates a new entity ID.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw entity ID value.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl From<i32> for EntityId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<EntityId> for i32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two mob kinds a beam is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    /// The beam's far end: an invisible squid the guardian locks onto.
    Squid,
    /// The beam's origin: an invisible guardian targeting the squid.
    Guardian,
}

impl EntityKind {
    /// Returns the mob type id on the wire.
    #[must_use]
    pub const fn type_id(self) -> u8 {
        match self {
            Self::Squid => 94,
            Self::Guardian => 68,
        }
    }

    /// Parses a mob type id.
    #[must_use]
    pub const fn from_type_id(type_id: u8) -> Option<Self> {
        match type_id {
            94 => Some(Self::Squid),
            68 => Some(Self::Guardian),
            _ => None,
        }
    }
}

/// Position and orientation of an entity as sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub position: DVec3,
    /// Yaw in degrees.
    pub yaw: f32,
    /// Pitch in degrees.
    pub pitch: f32,
}

impl Placement {
    #[must_use]
    pub const fn new(position: DVec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
        }
    }

    /// Placement at `position` with zero rotation.
    #[must_use]
    pub const fn at(position: DVec3) -> Self {
        Self::new(position, 0.0, 0.0)
    }
}
