//! Viewer-side behaviour for SlideView.
//!
//! The deep-zoom widget itself is an opaque collaborator reached through the
//! [`Viewer`] trait. This crate holds everything that decides *what* to tell
//! it: the fit-and-lock zoom rule, the blur-while-loading effect, the event
//! routing performed at construction time and the fixed widget options.
//!
//! Nothing here touches the browser directly, so the whole crate is tested
//! natively against the doubles in [`testing`].

pub mod blur;
pub mod options;
pub mod schedule;
pub mod session;
pub mod style;
pub mod viewer;
pub mod zoom;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use blur::{BlurEffect, BLURRING_CLASS, DEFAULT_BLUR_IDLE_MS};
pub use options::ViewerOptions;
pub use schedule::{Debounce, Scheduler, Task, TaskHandle};
pub use session::{ViewerEvent, ViewerSession};
pub use style::StyleTarget;
pub use viewer::{Bounds, Viewer};
pub use zoom::fit_and_lock_min_zoom;
