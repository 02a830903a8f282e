//! The deep-zoom widget as seen from Rust.

/// Rectangle in viewport coordinates (image width is 1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create bounds from origin and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Commands and queries SlideView issues against the viewer widget.
///
/// The widget is a single shared mutable object; every method takes `&self`
/// so one handle can be held by the tree, the sidebar and the event router
/// at once.
pub trait Viewer {
    /// Number of images currently open in the world.
    fn item_count(&self) -> usize;

    /// Bounds that make every open image visible.
    fn home_bounds(&self) -> Bounds;

    /// Fit the viewport to `bounds`.
    fn fit_bounds(&self, bounds: Bounds, immediately: bool);

    /// Zoom level at which the home bounds fill the viewport.
    fn home_zoom(&self) -> f64;

    /// Current zoom level.
    fn zoom(&self) -> f64;

    /// Lowest zoom level the user may reach.
    fn set_min_zoom_level(&self, zoom: f64);

    /// Zoom around the viewport centre.
    fn zoom_to(&self, zoom: f64, immediately: bool);

    /// Return to the home view.
    fn go_home(&self, immediately: bool);

    /// Replace the open image with `source` (an `info.json` URL).
    fn open(&self, source: &str);
}
