//! Routing of widget events to the zoom lock and the blur effect.

use std::rc::Rc;

use crate::blur::BlurEffect;
use crate::viewer::Viewer;
use crate::zoom::fit_and_lock_min_zoom;

/// Widget events SlideView listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerEvent {
    /// A tile source finished opening
    Open,
    /// The container changed size
    Resize,
    /// The viewport was redrawn after a pan or zoom step
    UpdateViewport,
    /// A tile arrived
    TileLoaded,
    /// A tile request failed
    TileLoadFailed,
}

impl ViewerEvent {
    /// Every event, in registration order.
    pub const ALL: [ViewerEvent; 5] = [
        ViewerEvent::Open,
        ViewerEvent::Resize,
        ViewerEvent::UpdateViewport,
        ViewerEvent::TileLoaded,
        ViewerEvent::TileLoadFailed,
    ];

    /// Event name as the widget spells it.
    pub fn name(&self) -> &'static str {
        match self {
            ViewerEvent::Open => "open",
            ViewerEvent::Resize => "resize",
            ViewerEvent::UpdateViewport => "update-viewport",
            ViewerEvent::TileLoaded => "tile-loaded",
            ViewerEvent::TileLoadFailed => "tile-load-failed",
        }
    }
}

/// A live viewer together with the behaviour wired to it at construction.
#[derive(Clone)]
pub struct ViewerSession {
    viewer: Rc<dyn Viewer>,
    blur: BlurEffect,
}

impl ViewerSession {
    pub fn new(viewer: Rc<dyn Viewer>, blur: BlurEffect) -> Self {
        Self { viewer, blur }
    }

    /// Shared handle to the widget.
    pub fn viewer(&self) -> Rc<dyn Viewer> {
        Rc::clone(&self.viewer)
    }

    /// The blur effect on the viewer container.
    pub fn blur(&self) -> &BlurEffect {
        &self.blur
    }

    /// React to one widget event.
    pub fn handle(&self, event: ViewerEvent) {
        match event {
            ViewerEvent::Open => {
                fit_and_lock_min_zoom(self.viewer.as_ref());
                self.blur.on_open();
            }
            ViewerEvent::Resize => {
                fit_and_lock_min_zoom(self.viewer.as_ref());
            }
            ViewerEvent::UpdateViewport => self.blur.on_viewport_update(),
            ViewerEvent::TileLoaded | ViewerEvent::TileLoadFailed => self.blur.on_tile_settled(),
        }
    }
}
