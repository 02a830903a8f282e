//! In-memory doubles for the widget, class lists and timers.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use crate::schedule::{Scheduler, Task, TaskHandle};
use crate::style::StyleTarget;
use crate::viewer::{Bounds, Viewer};

/// A command recorded by [`MockViewer`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCall {
    FitBounds(Bounds, bool),
    SetMinZoom(f64),
    ZoomTo(f64, bool),
    GoHome(bool),
    Open(String),
}

/// Viewer that records commands instead of drawing.
///
/// Zoom only changes through `zoom_to`, `go_home` or [`MockViewer::set_zoom`].
pub struct MockViewer {
    items: Cell<usize>,
    home_bounds: Bounds,
    home_zoom: f64,
    zoom: Cell<f64>,
    min_zoom: Cell<Option<f64>>,
    calls: RefCell<Vec<ViewerCall>>,
}

impl MockViewer {
    /// A viewer with nothing open.
    pub fn empty() -> Self {
        Self::new(0, Bounds::new(0.0, 0.0, 1.0, 1.0), 1.0)
    }

    /// A viewer with one open image.
    pub fn with_image(home_bounds: Bounds, home_zoom: f64) -> Self {
        Self::new(1, home_bounds, home_zoom)
    }

    fn new(items: usize, home_bounds: Bounds, home_zoom: f64) -> Self {
        Self {
            items: Cell::new(items),
            home_bounds,
            home_zoom,
            zoom: Cell::new(home_zoom),
            min_zoom: Cell::new(None),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn set_zoom(&self, zoom: f64) {
        self.zoom.set(zoom);
    }

    pub fn min_zoom_level(&self) -> Option<f64> {
        self.min_zoom.get()
    }

    pub fn calls(&self) -> Vec<ViewerCall> {
        self.calls.borrow().clone()
    }

    /// Sources passed to `open`, oldest first.
    pub fn opened(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                ViewerCall::Open(source) => Some(source.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ViewerCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Viewer for MockViewer {
    fn item_count(&self) -> usize {
        self.items.get()
    }

    fn home_bounds(&self) -> Bounds {
        self.home_bounds
    }

    fn fit_bounds(&self, bounds: Bounds, immediately: bool) {
        self.record(ViewerCall::FitBounds(bounds, immediately));
    }

    fn home_zoom(&self) -> f64 {
        self.home_zoom
    }

    fn zoom(&self) -> f64 {
        self.zoom.get()
    }

    fn set_min_zoom_level(&self, zoom: f64) {
        self.min_zoom.set(Some(zoom));
        self.record(ViewerCall::SetMinZoom(zoom));
    }

    fn zoom_to(&self, zoom: f64, immediately: bool) {
        self.zoom.set(zoom);
        self.record(ViewerCall::ZoomTo(zoom, immediately));
    }

    fn go_home(&self, immediately: bool) {
        self.zoom.set(self.home_zoom);
        self.record(ViewerCall::GoHome(immediately));
    }

    fn open(&self, source: &str) {
        self.items.set(1);
        self.record(ViewerCall::Open(source.to_string()));
    }
}

/// Class list held in memory.
#[derive(Debug, Default)]
pub struct MemoryStyle {
    classes: RefCell<HashSet<String>>,
}

impl StyleTarget for MemoryStyle {
    fn set_class(&self, class: &str, on: bool) {
        let mut classes = self.classes.borrow_mut();
        if on {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }
}

/// Scheduler driven by a virtual millisecond clock.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<u64>,
    next_id: Cell<i32>,
    tasks: RefCell<Vec<(TaskHandle, u64, Task)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks still waiting.
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Move the clock forward, running every task that falls due in order.
    /// Tasks scheduled by running tasks are honoured within the same call.
    pub fn advance(&self, ms: u32) {
        let target = self.now.get() + u64::from(ms);
        loop {
            let next = {
                let mut tasks = self.tasks.borrow_mut();
                let due = tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, (_, at, _))| *at <= target)
                    .min_by_key(|(_, (_, at, _))| *at)
                    .map(|(index, _)| index);
                due.map(|index| tasks.remove(index))
            };
            let Some((_, at, task)) = next else {
                break;
            };
            self.now.set(at);
            task();
        }
        self.now.set(target);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TaskHandle {
        let handle = TaskHandle(self.next_id.get());
        self.next_id.set(handle.0 + 1);
        let due = self.now.get() + u64::from(delay_ms);
        self.tasks.borrow_mut().push((handle, due, task));
        handle
    }

    fn cancel(&self, handle: TaskHandle) {
        self.tasks.borrow_mut().retain(|(h, _, _)| *h != handle);
    }
}
