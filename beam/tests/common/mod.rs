#![allow(dead_code)]

use std::sync::Arc;

use beam::{BeamEndpoint, DeliveryFailed, ObserverChannel, ObserverStatus, PositionProvider, WorldId};
use codec::{decode_packet, Packet, ProtocolVersion, WireLimits};
use glam::DVec3;
use parking_lot::Mutex;
use uuid::Uuid;

pub const WORLD: WorldId = WorldId::new(Uuid::from_u128(0xB3A4));

pub fn at(x: f64, y: f64, z: f64) -> BeamEndpoint {
    BeamEndpoint::new(WORLD, DVec3::new(x, y, z))
}

#[derive(Debug)]
struct Inner {
    status: ObserverStatus,
    open: bool,
    attempts: usize,
    fail_on: Option<usize>,
    sent: Vec<Vec<u8>>,
}

/// Test observer. Clones share state.
#[derive(Debug, Clone)]
pub struct TestObserver {
    inner: Arc<Mutex<Inner>>,
}

impl TestObserver {
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                status: ObserverStatus {
                    online: true,
                    world: WORLD,
                    position: DVec3::new(x, y, z),
                },
                open: true,
                attempts: 0,
                fail_on: None,
                sent: Vec::new(),
            })),
        }
    }

    pub fn teleport(&self, x: f64, y: f64, z: f64) {
        self.inner.lock().status.position = DVec3::new(x, y, z);
    }

    pub fn disconnect(&self) {
        let mut inner = self.inner.lock();
        inner.status.online = false;
    }

    /// Closes the channel without taking the observer offline.
    pub fn close_channel(&self) {
        self.inner.lock().open = false;
    }

    pub fn fail_next_send_after(&self, successes: usize) {
        let mut inner = self.inner.lock();
        inner.fail_on = Some(inner.attempts + successes);
    }

    pub fn take_packets(&self, version: ProtocolVersion) -> Vec<Packet> {
        let sent = std::mem::take(&mut self.inner.lock().sent);
        sent.iter()
            .map(|bytes| decode_packet(bytes, version, &WireLimits::default()).unwrap())
            .collect()
    }
}

impl ObserverChannel for TestObserver {
    fn send(&mut self, packet: &[u8]) -> Result<(), DeliveryFailed> {
        let mut inner = self.inner.lock();
        let attempt = inner.attempts;
        inner.attempts += 1;
        if !inner.open || inner.fail_on == Some(attempt) {
            return Err(DeliveryFailed);
        }
        inner.sent.push(packet.to_vec());
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.inner.lock().open
    }
}

impl PositionProvider for TestObserver {
    fn status(&self) -> ObserverStatus {
        self.inner.lock().status
    }
}
