//! Packet-level beam rendering for one observer.
//!
//! The renderer owns the two fake entities and the packets that represent
//! them. It never schedules anything: callers decide when to show, hide or
//! relocate, and hand in the channel to write to.

use codec::{
    apply_position_to_move, build_guardian_spawn, build_move_skeleton, build_remove_entities,
    build_squid_spawn, rebase_spawn_position, BeamPacket, DestroyEntities, EntityId,
    EntityIdAllocator, EntityKind, EntityTeleport, Placement, ProtocolVersion, SpawnMob,
};
use tracing::{trace, warn};

use crate::endpoint::BeamEndpoint;
use crate::error::{BeamResult, ConfigError, DeliveryFailed};
use crate::observer::ObserverChannel;

/// A client-only entity as the renderer last described it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FakeEntity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub placement: Placement,
    pub target: Option<EntityId>,
}

impl From<&SpawnMob> for FakeEntity {
    fn from(packet: &SpawnMob) -> Self {
        Self {
            id: packet.entity_id,
            kind: packet.kind,
            placement: packet.placement,
            target: packet.attributes.target,
        }
    }
}

/// Builds and dispatches the packets of a single beam.
///
/// The squid sits at the end endpoint and the guardian at the start,
/// targeting the squid.
#[derive(Debug, Clone)]
pub struct BeamRenderer {
    version: ProtocolVersion,
    start: BeamEndpoint,
    end: BeamEndpoint,
    squid_spawn: SpawnMob,
    guardian_spawn: SpawnMob,
    squid_move: EntityTeleport,
    guardian_move: EntityTeleport,
    remove: DestroyEntities,
    spawned: bool,
}

impl BeamRenderer {
    /// Allocates both entity ids and prepares every packet.
    pub fn new(
        start: BeamEndpoint,
        end: BeamEndpoint,
        version: ProtocolVersion,
        allocator: &EntityIdAllocator,
    ) -> BeamResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ConfigError::NonFiniteCoordinate.into());
        }
        if start.world != end.world {
            return Err(ConfigError::CrossWorldEndpoints {
                start: start.world,
                end: end.world,
            }
            .into());
        }

        let squid_id = allocator.next();
        let guardian_id = allocator.next();
        let squid_spawn = build_squid_spawn(squid_id, end.placement());
        let guardian_spawn = build_guardian_spawn(guardian_id, start.placement(), squid_id);

        Ok(Self {
            version,
            start,
            end,
            squid_spawn,
            guardian_spawn,
            squid_move: apply_position_to_move(&build_move_skeleton(squid_id), end.placement()),
            guardian_move: apply_position_to_move(
                &build_move_skeleton(guardian_id),
                start.placement(),
            ),
            remove: build_remove_entities(squid_id, guardian_id),
            spawned: false,
        })
    }

    /// Spawns both entities, squid first.
    ///
    /// Does nothing if already shown. If the guardian cannot be sent after
    /// the squid was, the remove packet is sent before the error is returned
    /// so the client is never left with half a beam.
    pub fn show<C: ObserverChannel + ?Sized>(&mut self, channel: &mut C) -> BeamResult<()> {
        if self.spawned {
            return Ok(());
        }
        if !channel.is_open() {
            return Err(DeliveryFailed.into());
        }

        dispatch(channel, &self.squid_spawn, self.version)?;
        if let Err(err) = dispatch(channel, &self.guardian_spawn, self.version) {
            warn!(
                squid = %self.squid_spawn.entity_id,
                guardian = %self.guardian_spawn.entity_id,
                "guardian spawn failed, removing squid"
            );
            if dispatch(channel, &self.remove, self.version).is_err() {
                warn!(squid = %self.squid_spawn.entity_id, "rollback remove was not delivered");
            }
            return Err(err.into());
        }

        self.spawned = true;
        Ok(())
    }

    /// Despawns both entities. Does nothing unless currently shown.
    pub fn hide<C: ObserverChannel + ?Sized>(&mut self, channel: &mut C) -> BeamResult<()> {
        if !self.spawned {
            return Ok(());
        }
        self.spawned = false;
        dispatch(channel, &self.remove, self.version)?;
        Ok(())
    }

    /// Moves the guardian end. Sends a teleport only while shown.
    pub fn relocate_start<C: ObserverChannel + ?Sized>(
        &mut self,
        endpoint: BeamEndpoint,
        channel: &mut C,
    ) -> BeamResult<()> {
        self.check_endpoint(&endpoint)?;
        self.start = endpoint;
        self.guardian_spawn = rebase_spawn_position(&self.guardian_spawn, endpoint.placement());
        self.guardian_move = apply_position_to_move(&self.guardian_move, endpoint.placement());
        if self.spawned {
            dispatch(channel, &self.guardian_move, self.version)?;
        }
        Ok(())
    }

    /// Moves the squid end. Sends a teleport only while shown.
    pub fn relocate_end<C: ObserverChannel + ?Sized>(
        &mut self,
        endpoint: BeamEndpoint,
        channel: &mut C,
    ) -> BeamResult<()> {
        self.check_endpoint(&endpoint)?;
        self.end = endpoint;
        self.squid_spawn = rebase_spawn_position(&self.squid_spawn, endpoint.placement());
        self.squid_move = apply_position_to_move(&self.squid_move, endpoint.placement());
        if self.spawned {
            dispatch(channel, &self.squid_move, self.version)?;
        }
        Ok(())
    }

    fn check_endpoint(&self, endpoint: &BeamEndpoint) -> Result<(), ConfigError> {
        if endpoint.world != self.start.world {
            return Err(ConfigError::WrongWorld {
                expected: self.start.world,
                actual: endpoint.world,
            });
        }
        if !endpoint.is_finite() {
            return Err(ConfigError::NonFiniteCoordinate);
        }
        Ok(())
    }

    #[must_use]
    pub fn squid(&self) -> FakeEntity {
        FakeEntity::from(&self.squid_spawn)
    }

    #[must_use]
    pub fn guardian(&self) -> FakeEntity {
        FakeEntity::from(&self.guardian_spawn)
    }

    #[must_use]
    pub const fn start(&self) -> &BeamEndpoint {
        &self.start
    }

    #[must_use]
    pub const fn end(&self) -> &BeamEndpoint {
        &self.end
    }

    #[must_use]
    pub const fn squid_move(&self) -> &EntityTeleport {
        &self.squid_move
    }

    #[must_use]
    pub const fn guardian_move(&self) -> &EntityTeleport {
        &self.guardian_move
    }

    #[must_use]
    pub const fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// True between a successful `show` and the next `hide`.
    #[must_use]
    pub const fn is_spawned(&self) -> bool {
        self.spawned
    }
}

fn dispatch<C, P>(channel: &mut C, packet: &P, version: ProtocolVersion) -> Result<(), DeliveryFailed>
where
    C: ObserverChannel + ?Sized,
    P: BeamPacket,
{
    let bytes = packet.encode(version);
    trace!(kind = ?P::KIND, len = bytes.len(), "dispatch packet");
    channel.send(&bytes)
}
