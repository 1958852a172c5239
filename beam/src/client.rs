//! A visibility controller bound to a tick driver.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::debug;

use crate::config::BeamConfig;
use crate::driver::{TaskId, TaskStatus, TickDriver};
use crate::endpoint::BeamEndpoint;
use crate::error::BeamResult;
use crate::observer::Observer;
use crate::renderer::FakeEntity;
use crate::visibility::{Visibility, VisibilityController};

/// A beam shown to one observer, re-evaluated on a fixed tick period.
///
/// The scheduled task only holds a weak reference to the controller, so
/// dropping the `ClientBeam` ends the task on its next run. Dropping an
/// active beam deactivates it first, removing the entities if shown.
#[derive(Debug)]
pub struct ClientBeam<O: Observer> {
    controller: Arc<Mutex<VisibilityController<O>>>,
    initial_delay: u32,
    update_period: u32,
    task: Option<TaskId>,
}

impl<O: Observer + Send + 'static> ClientBeam<O> {
    /// Builds a beam for `observer` with ids from the process-wide allocator.
    pub fn new(
        observer: O,
        start: BeamEndpoint,
        end: BeamEndpoint,
        config: &BeamConfig,
    ) -> BeamResult<Self> {
        let controller = VisibilityController::new(observer, start, end, config)?;
        Ok(Self::from_controller(controller, config))
    }

    /// Wraps an existing controller; `config` supplies the schedule.
    pub fn from_controller(controller: VisibilityController<O>, config: &BeamConfig) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            initial_delay: config.initial_delay,
            update_period: config.update_period,
            task: None,
        }
    }

    /// Activates the beam and schedules its visibility checks.
    pub fn start<D: TickDriver + ?Sized>(&mut self, driver: &mut D) -> BeamResult<()> {
        self.controller.lock().activate()?;
        if let Some(stale) = self.task.take() {
            driver.cancel(stale);
        }

        let weak: Weak<Mutex<VisibilityController<O>>> = Arc::downgrade(&self.controller);
        let task = driver.schedule(
            Box::new(move || match weak.upgrade() {
                Some(controller) => controller.lock().update(),
                None => TaskStatus::Finished,
            }),
            self.initial_delay,
            self.update_period,
        );
        debug!(task = task.raw(), period = self.update_period, "beam started");
        self.task = Some(task);
        Ok(())
    }

    /// Hides the beam if shown and cancels its visibility checks.
    pub fn stop<D: TickDriver + ?Sized>(&mut self, driver: &mut D) -> BeamResult<()> {
        self.controller.lock().deactivate()?;
        if let Some(task) = self.task.take() {
            driver.cancel(task);
            debug!(task = task.raw(), "beam stopped");
        }
        Ok(())
    }

    pub fn relocate_start(&self, endpoint: BeamEndpoint) -> BeamResult<()> {
        self.controller.lock().relocate_start(endpoint)
    }

    pub fn relocate_end(&self, endpoint: BeamEndpoint) -> BeamResult<()> {
        self.controller.lock().relocate_end(endpoint)
    }
}

impl<O: Observer> ClientBeam<O> {
    #[must_use]
    pub fn state(&self) -> Visibility {
        self.controller.lock().state()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.controller.lock().is_active()
    }

    #[must_use]
    pub fn is_viewing(&self) -> bool {
        self.controller.lock().is_viewing()
    }

    #[must_use]
    pub fn squid(&self) -> FakeEntity {
        self.controller.lock().renderer().squid()
    }

    #[must_use]
    pub fn guardian(&self) -> FakeEntity {
        self.controller.lock().renderer().guardian()
    }

    /// The task id of the running schedule, if any.
    #[must_use]
    pub const fn task(&self) -> Option<TaskId> {
        self.task
    }
}

impl<O: Observer> Drop for ClientBeam<O> {
    fn drop(&mut self) {
        if self.controller.lock().deactivate().is_ok() {
            debug!("beam dropped while active");
        }
    }
}
