//! The observer side of a beam: where packets go and where the observer is.

use glam::DVec3;

use crate::endpoint::WorldId;
use crate::error::DeliveryFailed;

/// A per-observer packet sink. Each call carries one framed packet.
pub trait ObserverChannel {
    fn send(&mut self, packet: &[u8]) -> Result<(), DeliveryFailed>;

    fn is_open(&self) -> bool;
}

/// Where an observer is, sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverStatus {
    pub online: bool,
    pub world: WorldId,
    pub position: DVec3,
}

/// Supplies the observer's reachability and location.
pub trait PositionProvider {
    fn status(&self) -> ObserverStatus;
}

/// An observer the visibility controller can both locate and send to.
pub trait Observer: ObserverChannel + PositionProvider {}

impl<T: ObserverChannel + PositionProvider + ?Sized> Observer for T {}

impl<C: ObserverChannel + ?Sized> ObserverChannel for &mut C {
    fn send(&mut self, packet: &[u8]) -> Result<(), DeliveryFailed> {
        (**self).send(packet)
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }
}

impl<C: ObserverChannel + ?Sized> ObserverChannel for Box<C> {
    fn send(&mut self, packet: &[u8]) -> Result<(), DeliveryFailed> {
        (**self).send(packet)
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }
}

impl<P: PositionProvider + ?Sized> PositionProvider for Box<P> {
    fn status(&self) -> ObserverStatus {
        (**self).status()
    }
}
