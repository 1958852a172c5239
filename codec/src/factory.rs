//! Builders for the packets that make up a beam.
//!
//! A beam is an invisible guardian locked onto an invisible squid. These
//! functions are pure: each returns a new packet value, and the "mutating"
//! ones take the previous packet by reference and return an updated copy.

use uuid::Uuid;

use crate::metadata::EntityAttributes;
use crate::packet::{DestroyEntities, EntityTeleport, SpawnMob};
use crate::types::{EntityId, EntityKind, Placement};

/// Spawn packet for the beam's squid end.
#[must_use]
pub fn build_squid_spawn(id: EntityId, placement: Placement) -> SpawnMob {
    SpawnMob {
        entity_id: id,
        uuid: Uuid::new_v4(),
        kind: EntityKind::Squid,
        placement,
        attributes: EntityAttributes::invisible(),
    }
}

/// Spawn packet for the beam's guardian end, targeting `target`.
///
/// `target` must already be allocated; the client resolves it by value.
#[must_use]
pub fn build_guardian_spawn(id: EntityId, placement: Placement, target: EntityId) -> SpawnMob {
    SpawnMob {
        entity_id: id,
        uuid: Uuid::new_v4(),
        kind: EntityKind::Guardian,
        placement,
        attributes: EntityAttributes::guardian_targeting(target),
    }
}

/// Returns `packet` relocated to `placement`. Identity and attributes are kept.
#[must_use]
pub fn rebase_spawn_position(packet: &SpawnMob, placement: Placement) -> SpawnMob {
    SpawnMob {
        placement,
        ..*packet
    }
}

/// A teleport packet for `id` with no destination filled in yet.
#[must_use]
pub fn build_move_skeleton(id: EntityId) -> EntityTeleport {
    EntityTeleport {
        entity_id: id,
        placement: Placement::default(),
        on_ground: false,
    }
}

/// Returns `packet` with its destination set to `placement`.
#[must_use]
pub fn apply_position_to_move(packet: &EntityTeleport, placement: Placement) -> EntityTeleport {
    EntityTeleport {
        placement,
        ..*packet
    }
}

/// A single packet despawning both beam entities.
#[must_use]
pub fn build_remove_entities(a: EntityId, b: EntityId) -> DestroyEntities {
    DestroyEntities {
        entity_ids: vec![a, b],
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;

    fn placement(x: f64) -> Placement {
        Placement::new(DVec3::new(x, 64.0, 0.0), 45.0, -10.0)
    }

    #[test]
    fn squid_spawn_is_invisible_squid() {
        let packet = build_squid_spawn(EntityId::new(1), placement(10.0));
        assert_eq!(packet.kind, EntityKind::Squid);
        assert_eq!(packet.entity_id, EntityId::new(1));
        assert!(packet.attributes.invisible);
        assert_eq!(packet.attributes.target, None);
        assert_eq!(packet.placement, placement(10.0));
    }

    #[test]
    fn guardian_spawn_targets_squid() {
        let squid = build_squid_spawn(EntityId::new(1), placement(10.0));
        let guardian = build_guardian_spawn(EntityId::new(2), placement(0.0), squid.entity_id);
        assert_eq!(guardian.kind, EntityKind::Guardian);
        assert!(guardian.attributes.invisible);
        assert!(!guardian.attributes.retracting_spikes);
        assert_eq!(guardian.attributes.target, Some(squid.entity_id));
    }

    #[test]
    fn spawns_get_fresh_tokens() {
        let a = build_squid_spawn(EntityId::new(1), placement(0.0));
        let b = build_squid_spawn(EntityId::new(1), placement(0.0));
        assert_ne!(a.uuid, b.uuid);
        assert!(!a.uuid.is_nil());
    }

    #[test]
    fn rebase_keeps_identity() {
        let original = build_guardian_spawn(EntityId::new(2), placement(0.0), EntityId::new(1));
        let moved = rebase_spawn_position(&original, placement(5.0));
        assert_eq!(moved.placement, placement(5.0));
        assert_eq!(moved.entity_id, original.entity_id);
        assert_eq!(moved.uuid, original.uuid);
        assert_eq!(moved.attributes, original.attributes);
        // The previous value is untouched.
        assert_eq!(original.placement, placement(0.0));
    }

    #[test]
    fn move_skeleton_then_position() {
        let skeleton = build_move_skeleton(EntityId::new(7));
        assert_eq!(skeleton.entity_id, EntityId::new(7));
        assert_eq!(skeleton.placement, Placement::default());

        let moved = apply_position_to_move(&skeleton, placement(3.0));
        assert_eq!(moved.entity_id, EntityId::new(7));
        assert_eq!(moved.placement, placement(3.0));
        assert!(!moved.on_ground);
    }

    #[test]
    fn remove_lists_both_ids_in_order() {
        let packet = build_remove_entities(EntityId::new(1), EntityId::new(2));
        assert_eq!(packet.entity_ids, vec![EntityId::new(1), EntityId::new(2)]);
    }
}
