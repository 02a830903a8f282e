//! Fit-to-window zoom with a minimum-zoom lock.
//!
//! Fitting happens on open, on resize and after the sidebar changes the
//! available space. The fitted zoom becomes a lasting lower bound, so the
//! user can never zoom out past the whole-image view.

use crate::viewer::Viewer;

/// Fit the viewer to its home bounds and lock the minimum zoom there.
///
/// The fit is immediate; if the current zoom still sits below the new
/// minimum, the viewer animates up to it. Returns the locked zoom, or `None`
/// when no image is open (in which case the viewer is left untouched).
pub fn fit_and_lock_min_zoom(viewer: &dyn Viewer) -> Option<f64> {
    if viewer.item_count() == 0 {
        return None;
    }

    let bounds = viewer.home_bounds();
    viewer.fit_bounds(bounds, true);

    let fit_zoom = viewer.home_zoom();
    viewer.set_min_zoom_level(fit_zoom);

    if viewer.zoom() < fit_zoom {
        viewer.zoom_to(fit_zoom, false);
    }

    log::debug!("Locked minimum zoom at {:.4}", fit_zoom);
    Some(fit_zoom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockViewer, ViewerCall};
    use crate::viewer::Bounds;

    #[test]
    fn test_no_image_is_a_noop() {
        let viewer = MockViewer::empty();

        assert_eq!(fit_and_lock_min_zoom(&viewer), None);
        assert!(viewer.calls().is_empty());
        assert_eq!(viewer.min_zoom_level(), None);
    }

    #[test]
    fn test_fit_locks_min_zoom() {
        let viewer = MockViewer::with_image(Bounds::new(0.0, 0.0, 1.0, 0.75), 0.8);
        viewer.set_zoom(1.5);

        assert_eq!(fit_and_lock_min_zoom(&viewer), Some(0.8));
        assert_eq!(viewer.min_zoom_level(), Some(0.8));
        assert_eq!(
            viewer.calls(),
            vec![
                ViewerCall::FitBounds(Bounds::new(0.0, 0.0, 1.0, 0.75), true),
                ViewerCall::SetMinZoom(0.8),
            ]
        );
    }

    #[test]
    fn test_zoom_below_fit_animates_up() {
        let viewer = MockViewer::with_image(Bounds::new(0.0, 0.0, 1.0, 1.0), 0.8);
        viewer.set_zoom(0.5);

        fit_and_lock_min_zoom(&viewer);

        assert_eq!(viewer.calls().last(), Some(&ViewerCall::ZoomTo(0.8, false)));
        assert!((viewer.zoom() - 0.8).abs() < f64::EPSILON);
    }
}
