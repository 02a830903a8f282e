//! Blur-while-loading effect.
//!
//! The viewer container carries [`BLURRING_CLASS`] while the view is moving
//! or a new image is opening. Each qualifying widget event re-arms an idle
//! timer; the class is removed only after a full idle period with no further
//! event, which hides half-loaded tile mosaics behind a soft blur.

use std::rc::Rc;

use crate::schedule::{Debounce, Scheduler};
use crate::style::StyleTarget;

/// CSS class applied to the viewer container while loading.
pub const BLURRING_CLASS: &str = "blurring";

/// Idle period after the last qualifying event before the blur clears.
pub const DEFAULT_BLUR_IDLE_MS: u32 = 120;

/// Debounced blur state on the viewer container. Cheap to clone.
#[derive(Clone)]
pub struct BlurEffect {
    inner: Rc<BlurInner>,
}

struct BlurInner {
    target: Rc<dyn StyleTarget>,
    idle: Debounce,
}

impl BlurEffect {
    /// Attach the effect to `target`, clearing after `idle_ms` of quiet.
    pub fn new(target: Rc<dyn StyleTarget>, scheduler: Rc<dyn Scheduler>, idle_ms: u32) -> Self {
        Self {
            inner: Rc::new(BlurInner {
                target,
                idle: Debounce::new(scheduler, idle_ms),
            }),
        }
    }

    /// The viewport moved (pan, zoom, animation frame).
    pub fn on_viewport_update(&self) {
        self.set(true);
        self.schedule_clear();
    }

    /// A new image finished opening.
    pub fn on_open(&self) {
        self.set(true);
        self.schedule_clear();
    }

    /// A tile finished loading, successfully or not.
    ///
    /// Only postpones the clear; it never switches the blur on.
    pub fn on_tile_settled(&self) {
        self.schedule_clear();
    }

    /// Switch the blur on ahead of any widget event, without arming the
    /// idle timer. The widget's own `open` event arms it later.
    pub fn engage(&self) {
        self.set(true);
    }

    /// Whether the container is currently blurred.
    pub fn is_blurring(&self) -> bool {
        self.inner.target.has_class(BLURRING_CLASS)
    }

    fn set(&self, on: bool) {
        self.inner.target.set_class(BLURRING_CLASS, on);
    }

    fn schedule_clear(&self) {
        let target = Rc::clone(&self.inner.target);
        self.inner
            .idle
            .arm(Box::new(move || target.set_class(BLURRING_CLASS, false)));
    }
}
