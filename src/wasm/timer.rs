//! `setTimeout` scheduler.
//!
//! Pending timers are owned here; dropping a [`Timeout`] clears it and frees
//! its closure, so cancelled tasks are released immediately.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use slideview_viewer::{Scheduler, Task, TaskHandle};

#[derive(Default)]
pub struct BrowserScheduler {
    next_id: Cell<i32>,
    timers: Rc<RefCell<HashMap<i32, Timeout>>>,
}

impl BrowserScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TaskHandle {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));

        let timers = Rc::clone(&self.timers);
        let timeout = Timeout::new(delay_ms, move || {
            timers.borrow_mut().remove(&id);
            task();
        });
        self.timers.borrow_mut().insert(id, timeout);
        TaskHandle(id)
    }

    fn cancel(&self, handle: TaskHandle) {
        if self.timers.borrow_mut().remove(&handle.0).is_none() {
            log::trace!("Timer {} already finished", handle.0);
        }
    }
}
