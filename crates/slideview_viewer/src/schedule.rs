//! Delayed tasks and debouncing.
//!
//! Timers are the only scheduling primitive in the viewer: the blur idle
//! timer and the sidebar re-fit delay. Both are [`Debounce`]s, which cancel
//! their own previous task before arming a new one.

use std::cell::Cell;
use std::rc::Rc;

/// A deferred unit of work. Runs at most once, on the UI thread.
pub type Task = Box<dyn FnOnce()>;

/// Opaque identifier of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub i32);

/// Something that can run a task after a delay.
pub trait Scheduler {
    /// Run `task` once `delay_ms` milliseconds have elapsed.
    fn schedule(&self, delay_ms: u32, task: Task) -> TaskHandle;

    /// Drop a pending task. Cancelling a task that already ran is a no-op.
    fn cancel(&self, handle: TaskHandle);
}

/// A re-armable single-slot timer.
///
/// Every [`arm`](Debounce::arm) supersedes the previous one, so the task
/// only runs once the delay passes without another call.
pub struct Debounce {
    scheduler: Rc<dyn Scheduler>,
    delay_ms: u32,
    pending: Cell<Option<TaskHandle>>,
}

impl Debounce {
    /// Create a debounce with a fixed delay.
    pub fn new(scheduler: Rc<dyn Scheduler>, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            pending: Cell::new(None),
        }
    }

    /// The configured delay in milliseconds.
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Cancel any pending task and schedule `task` in its place.
    pub fn arm(&self, task: Task) {
        self.cancel();
        let handle = self.scheduler.schedule(self.delay_ms, task);
        self.pending.set(Some(handle));
    }

    /// Cancel the pending task, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}
