//! Shared fixtures for unit tests.

use std::sync::Arc;

use codec::{decode_packet, EntityId, Packet, ProtocolVersion, WireLimits};
use glam::DVec3;
use parking_lot::Mutex;
use uuid::Uuid;
use wire::PacketKind;

use crate::endpoint::{BeamEndpoint, WorldId};
use crate::error::DeliveryFailed;
use crate::observer::{ObserverChannel, ObserverStatus, PositionProvider};

pub const TEST_WORLD: WorldId = WorldId::new(Uuid::from_u128(1));

pub fn endpoint(x: f64, y: f64, z: f64) -> BeamEndpoint {
    BeamEndpoint::new(TEST_WORLD, DVec3::new(x, y, z))
}

#[derive(Debug)]
struct State {
    status: ObserverStatus,
    open: bool,
    attempts: usize,
    fail_on: Option<usize>,
    sent: Vec<Vec<u8>>,
}

/// An observer whose clones share state, so tests can steer it after
/// handing it to a controller.
#[derive(Debug, Clone)]
pub struct RecordingObserver {
    state: Arc<Mutex<State>>,
}

impl RecordingObserver {
    pub fn new(position: DVec3) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                status: ObserverStatus {
                    online: true,
                    world: TEST_WORLD,
                    position,
                },
                open: true,
                attempts: 0,
                fail_on: None,
                sent: Vec::new(),
            })),
        }
    }

    pub fn move_to(&self, position: DVec3) {
        self.state.lock().status.position = position;
    }

    pub fn set_online(&self, online: bool) {
        self.state.lock().status.online = online;
    }

    pub fn change_world(&self, world: WorldId) {
        self.state.lock().status.world = world;
    }

    pub fn close(&self) {
        self.state.lock().open = false;
    }

    /// Makes the send attempt with this index (counted from now, zero-based) fail.
    pub fn fail_send(&self, nth: usize) {
        let mut state = self.state.lock();
        state.fail_on = Some(state.attempts + nth);
    }

    pub fn clear(&self) {
        self.state.lock().sent.clear();
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.state.lock().sent.clone()
    }

    pub fn decoded(&self, version: ProtocolVersion) -> Vec<Packet> {
        self.sent()
            .iter()
            .map(|bytes| decode_packet(bytes, version, &WireLimits::default()).unwrap())
            .collect()
    }

    pub fn sent_kinds(&self, version: ProtocolVersion) -> Vec<PacketKind> {
        self.decoded(version).iter().map(Packet::kind).collect()
    }

    pub fn sent_entity_ids(&self, version: ProtocolVersion) -> Vec<Vec<EntityId>> {
        self.decoded(version).iter().map(Packet::entity_ids).collect()
    }
}

impl ObserverChannel for RecordingObserver {
    fn send(&mut self, packet: &[u8]) -> Result<(), DeliveryFailed> {
        let mut state = self.state.lock();
        let attempt = state.attempts;
        state.attempts += 1;
        if !state.open || state.fail_on == Some(attempt) {
            return Err(DeliveryFailed);
        }
        state.sent.push(packet.to_vec());
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.state.lock().open
    }
}

impl PositionProvider for RecordingObserver {
    fn status(&self) -> ObserverStatus {
        self.state.lock().status
    }
}
