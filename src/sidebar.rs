//! Collapsible sidebar.

use std::rc::Rc;

use slideview_viewer::{fit_and_lock_min_zoom, Debounce, Scheduler, StyleTarget, Viewer};

use crate::constants::SIDEBAR_COLLAPSED_CLASS;

/// Collapses the sidebar and re-fits the viewer once the layout settles.
pub struct Sidebar {
    app_root: Rc<dyn StyleTarget>,
    viewer: Option<Rc<dyn Viewer>>,
    refit: Debounce,
}

impl Sidebar {
    pub fn new(
        app_root: Rc<dyn StyleTarget>,
        viewer: Option<Rc<dyn Viewer>>,
        scheduler: Rc<dyn Scheduler>,
        refit_ms: u32,
    ) -> Self {
        Self {
            app_root,
            viewer,
            refit: Debounce::new(scheduler, refit_ms),
        }
    }

    /// Flip the collapsed state; returns whether the sidebar is now collapsed.
    pub fn toggle(&self) -> bool {
        let collapsed = self.app_root.toggle_class(SIDEBAR_COLLAPSED_CLASS);
        log::debug!("Sidebar {}", if collapsed { "collapsed" } else { "expanded" });

        if let Some(viewer) = &self.viewer {
            let viewer = Rc::clone(viewer);
            self.refit.arm(Box::new(move || {
                fit_and_lock_min_zoom(viewer.as_ref());
            }));
        }
        collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slideview_viewer::testing::{ManualScheduler, MemoryStyle, MockViewer, ViewerCall};
    use slideview_viewer::Bounds;

    fn sidebar(viewer: Option<Rc<MockViewer>>) -> (Sidebar, Rc<MemoryStyle>, Rc<ManualScheduler>) {
        let root = Rc::new(MemoryStyle::default());
        let scheduler = Rc::new(ManualScheduler::new());
        let viewer = viewer.map(|v| v as Rc<dyn Viewer>);
        let sidebar = Sidebar::new(root.clone(), viewer, scheduler.clone(), 220);
        (sidebar, root, scheduler)
    }

    #[test]
    fn test_toggle_flips_class() {
        let (sidebar, root, _scheduler) = sidebar(None);

        assert!(sidebar.toggle());
        assert!(root.has_class(SIDEBAR_COLLAPSED_CLASS));
        assert!(!sidebar.toggle());
        assert!(!root.has_class(SIDEBAR_COLLAPSED_CLASS));
    }

    #[test]
    fn test_refit_after_delay() {
        let viewer = Rc::new(MockViewer::with_image(Bounds::new(0.0, 0.0, 1.0, 1.0), 0.7));
        let (sidebar, _root, scheduler) = sidebar(Some(viewer.clone()));

        sidebar.toggle();
        scheduler.advance(219);
        assert!(viewer.calls().is_empty());

        scheduler.advance(1);
        assert_eq!(viewer.min_zoom_level(), Some(0.7));
    }

    #[test]
    fn test_rapid_toggles_refit_once() {
        let viewer = Rc::new(MockViewer::with_image(Bounds::new(0.0, 0.0, 1.0, 1.0), 0.7));
        let (sidebar, _root, scheduler) = sidebar(Some(viewer.clone()));

        sidebar.toggle();
        scheduler.advance(100);
        sidebar.toggle();
        scheduler.advance(500);

        let fits = viewer
            .calls()
            .iter()
            .filter(|c| matches!(c, ViewerCall::FitBounds(..)))
            .count();
        assert_eq!(fits, 1);
    }

    #[test]
    fn test_no_viewer_schedules_nothing() {
        let (sidebar, _root, scheduler) = sidebar(None);

        sidebar.toggle();
        assert_eq!(scheduler.pending(), 0);
    }
}
