//! Per-observer visibility state machine.
//!
//! ```text
//! Inactive --activate--> Hidden --close--> Shown
//!    ^                     ^                 |
//!    |                     +------far--------+
//!    +--- deactivate / observer unreachable (from Hidden or Shown)
//! ```
//!
//! "Close" means within the viewing radius of either endpoint, boundary
//! included. Distances are compared squared.

use codec::EntityIdAllocator;
use glam::DVec3;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::BeamConfig;
use crate::driver::TaskStatus;
use crate::endpoint::{BeamEndpoint, WorldId};
use crate::error::{BeamError, BeamResult, ConfigError, StateError};
use crate::observer::{Observer, ObserverStatus};
use crate::renderer::BeamRenderer;

/// Lifecycle state of a beam as seen by its observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Not started, or stopped. Updates are no-ops.
    #[default]
    Inactive,
    /// Active, but the observer is out of range.
    Hidden,
    /// Active and spawned on the observer's client.
    Shown,
}

impl Visibility {
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Inactive)
    }
}

/// Decides each tick whether one observer should see the beam.
#[derive(Debug)]
pub struct VisibilityController<O> {
    observer: O,
    renderer: BeamRenderer,
    state: Visibility,
    radius_squared: f64,
    delivery_failed: bool,
}

impl<O: Observer> VisibilityController<O> {
    /// Builds the beam with ids from the process-wide allocator.
    pub fn new(
        observer: O,
        start: BeamEndpoint,
        end: BeamEndpoint,
        config: &BeamConfig,
    ) -> BeamResult<Self> {
        Self::with_allocator(observer, start, end, config, EntityIdAllocator::global())
    }

    pub fn with_allocator(
        observer: O,
        start: BeamEndpoint,
        end: BeamEndpoint,
        config: &BeamConfig,
        allocator: &EntityIdAllocator,
    ) -> BeamResult<Self> {
        config.validate()?;
        let renderer = BeamRenderer::new(start, end, config.protocol, allocator)?;
        Ok(Self {
            observer,
            renderer,
            state: Visibility::Inactive,
            radius_squared: config.viewing_radius_squared(),
            delivery_failed: false,
        })
    }

    /// Enters `Hidden`. The next update decides whether to show.
    pub fn activate(&mut self) -> BeamResult<()> {
        if self.state.is_active() {
            return Err(StateError::AlreadyActive.into());
        }
        self.delivery_failed = false;
        if !self.is_reachable(&self.observer.status()) {
            return Err(StateError::ObserverUnreachable.into());
        }
        self.transition(Visibility::Hidden);
        Ok(())
    }

    /// Hides the beam if shown and returns to `Inactive`.
    ///
    /// A failed remove is logged; the controller still deactivates.
    pub fn deactivate(&mut self) -> BeamResult<()> {
        if !self.state.is_active() {
            return Err(StateError::NotActive.into());
        }
        self.shut_down();
        Ok(())
    }

    /// One visibility check. Returns `Finished` once the controller is inactive.
    pub fn update(&mut self) -> TaskStatus {
        if !self.state.is_active() {
            return TaskStatus::Finished;
        }

        let status = self.observer.status();
        if !self.is_reachable(&status) {
            debug!(
                online = status.online,
                world = %status.world,
                delivery_failed = self.delivery_failed,
                "observer unreachable, deactivating beam"
            );
            self.shut_down();
            return TaskStatus::Finished;
        }

        let close = self.is_close(status.position);
        match (self.state, close) {
            (Visibility::Hidden, true) => match self.renderer.show(&mut self.observer) {
                Ok(()) => self.transition(Visibility::Shown),
                Err(err) => {
                    warn!(%err, "failed to show beam");
                    self.delivery_failed = true;
                }
            },
            (Visibility::Shown, false) => {
                if let Err(err) = self.renderer.hide(&mut self.observer) {
                    warn!(%err, "failed to hide beam");
                    self.delivery_failed = true;
                }
                self.transition(Visibility::Hidden);
            }
            _ => {}
        }
        TaskStatus::Continue
    }

    /// Moves the guardian end of the beam.
    pub fn relocate_start(&mut self, endpoint: BeamEndpoint) -> BeamResult<()> {
        self.check_relocation(&endpoint)?;
        let result = self.renderer.relocate_start(endpoint, &mut self.observer);
        self.note_delivery(result)
    }

    /// Moves the squid end of the beam.
    pub fn relocate_end(&mut self, endpoint: BeamEndpoint) -> BeamResult<()> {
        self.check_relocation(&endpoint)?;
        let result = self.renderer.relocate_end(endpoint, &mut self.observer);
        self.note_delivery(result)
    }

    fn check_relocation(&self, endpoint: &BeamEndpoint) -> BeamResult<()> {
        if endpoint.world != self.world() {
            return Err(ConfigError::WrongWorld {
                expected: self.world(),
                actual: endpoint.world,
            }
            .into());
        }
        if !self.is_reachable(&self.observer.status()) {
            return Err(StateError::ObserverUnreachable.into());
        }
        Ok(())
    }

    fn note_delivery(&mut self, result: BeamResult<()>) -> BeamResult<()> {
        if let Err(BeamError::DeliveryFailed(_)) = &result {
            warn!("failed to send beam move");
            self.delivery_failed = true;
        }
        result
    }

    fn is_reachable(&self, status: &ObserverStatus) -> bool {
        !self.delivery_failed
            && status.online
            && status.world == self.world()
            && self.observer.is_open()
    }

    fn is_close(&self, position: DVec3) -> bool {
        self.renderer.start().distance_squared(position) <= self.radius_squared
            || self.renderer.end().distance_squared(position) <= self.radius_squared
    }

    fn shut_down(&mut self) {
        if self.state == Visibility::Shown {
            if let Err(err) = self.renderer.hide(&mut self.observer) {
                warn!(%err, "failed to hide beam while deactivating");
            }
        }
        self.transition(Visibility::Inactive);
    }

    fn transition(&mut self, next: Visibility) {
        if self.state != next {
            debug!(
                squid = %self.renderer.squid().id,
                from = ?self.state,
                to = ?next,
                "beam visibility changed"
            );
            self.state = next;
        }
    }
}

impl<O> VisibilityController<O> {
    #[must_use]
    pub const fn state(&self) -> Visibility {
        self.state
    }

    /// True unless `Inactive`.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// True while the beam is spawned on the observer's client.
    #[must_use]
    pub const fn is_viewing(&self) -> bool {
        matches!(self.state, Visibility::Shown)
    }

    #[must_use]
    pub const fn world(&self) -> WorldId {
        self.renderer.start().world
    }

    #[must_use]
    pub const fn renderer(&self) -> &BeamRenderer {
        &self.renderer
    }

    #[must_use]
    pub const fn observer(&self) -> &O {
        &self.observer
    }
}
