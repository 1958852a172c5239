//! Packet construction and decoding for client-side guardian beams.
//!
//! A beam is rendered by two entities that exist only on one client: an
//! invisible squid and an invisible guardian whose attribute block targets
//! the squid. This crate builds the packets for those entities on top of the
//! `wire` primitives and decodes them again for tooling.
//!
//! # Features
//!
//! - Spawn, teleport and destroy packets for both supported protocol versions
//! - Per-version attribute blocks (invisibility, guardian target)
//! - Pure builder functions with value semantics
//! - Lock-free synthetic entity id allocation
//!
//! # Design Principles
//!
//! - **Encoding is total** - Any placement encodes; callers validate worlds beforehand.
//! - **Versioned layouts** - One packet model, one layout per protocol version.
//! - **Bounded decoding** - Decoders enforce `wire::Limits` and reject trailing data.

mod allocator;
mod error;
mod factory;
mod layout;
mod metadata;
mod packet;
mod types;

pub use allocator::{EntityIdAllocator, SYNTHETIC_ID_BASE};
pub use error::{CodecError, CodecResult};
pub use factory::{
    apply_position_to_move, build_guardian_spawn, build_move_skeleton, build_remove_entities,
    build_squid_spawn, rebase_spawn_position,
};
pub use metadata::{
    attribute_entries, attributes_from_entries, EntityAttributes, MetadataEntry, MetadataValue,
    FLAG_INVISIBLE,
};
pub use packet::{decode_packet, BeamPacket, DestroyEntities, EntityTeleport, Packet, SpawnMob};
pub use types::{EntityId, EntityKind, Placement};
pub use wire::{Limits as WireLimits, PacketKind, ProtocolVersion};
