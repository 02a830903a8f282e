/// An element whose CSS class list SlideView flips.
pub trait StyleTarget {
    /// Add or remove `class`.
    fn set_class(&self, class: &str, on: bool);

    /// Whether `class` is currently present.
    fn has_class(&self, class: &str) -> bool;

    /// Flip `class` and return whether it is now present.
    fn toggle_class(&self, class: &str) -> bool {
        let on = !self.has_class(class);
        self.set_class(class, on);
        on
    }
}
