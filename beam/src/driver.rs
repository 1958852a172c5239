//! Periodic task scheduling.
//!
//! The host owns the tick loop. Beams only need a way to register a
//! callback that runs every `period` ticks and to cancel it again.

use std::collections::BTreeMap;
use std::fmt;

use tracing::trace;

/// Returned by a scheduled task after each run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Keep running the task on its period.
    Continue,
    /// Drop the task; it will not run again.
    Finished,
}

/// A callback run by a [`TickDriver`].
pub type TickTask = Box<dyn FnMut() -> TaskStatus + Send>;

/// Handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// The host's periodic scheduler.
pub trait TickDriver {
    /// Runs `task` after `initial_delay` ticks and then every `period` ticks.
    fn schedule(&mut self, task: TickTask, initial_delay: u32, period: u32) -> TaskId;

    /// Stops a task. Unknown or finished ids are ignored.
    fn cancel(&mut self, task: TaskId);
}

struct ScheduledTask {
    task: TickTask,
    next_run: u64,
    period: u64,
}

/// A deterministic driver advanced explicitly by the caller.
#[derive(Default)]
pub struct ManualTickDriver {
    now: u64,
    next_id: u64,
    tasks: BTreeMap<TaskId, ScheduledTask>,
}

impl ManualTickDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current tick number.
    #[must_use]
    pub const fn now(&self) -> u64 {
        self.now
    }

    /// Number of tasks still scheduled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_scheduled(&self, task: TaskId) -> bool {
        self.tasks.contains_key(&task)
    }

    /// Runs every task due at the current tick, in scheduling order, then
    /// advances the clock. Returns how many tasks ran.
    pub fn tick(&mut self) -> usize {
        let now = self.now;
        let mut ran = 0;
        self.tasks.retain(|id, scheduled| {
            if scheduled.next_run > now {
                return true;
            }
            ran += 1;
            scheduled.next_run = now + scheduled.period;
            match (scheduled.task)() {
                TaskStatus::Continue => true,
                TaskStatus::Finished => {
                    trace!(task = id.raw(), tick = now, "task finished");
                    false
                }
            }
        });
        self.now += 1;
        ran
    }

    /// Ticks `ticks` times.
    pub fn advance(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick();
        }
    }
}

impl TickDriver for ManualTickDriver {
    fn schedule(&mut self, task: TickTask, initial_delay: u32, period: u32) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.insert(
            id,
            ScheduledTask {
                task,
                next_run: self.now + u64::from(initial_delay),
                period: u64::from(period.max(1)),
            },
        );
        trace!(task = id.raw(), initial_delay, period, "task scheduled");
        id
    }

    fn cancel(&mut self, task: TaskId) {
        if self.tasks.remove(&task).is_some() {
            trace!(task = task.raw(), "task cancelled");
        }
    }
}

impl fmt::Debug for ManualTickDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualTickDriver")
            .field("now", &self.now)
            .field("tasks", &self.tasks.keys().collect::<Vec<_>>())
            .finish()
    }
}
