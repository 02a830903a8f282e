//! A rendered tree together with the surface it lives on.

use crate::click::{classify, ClickTarget};
use crate::model::{NodeId, SourceTree};
use crate::node::SourceNode;
use crate::render::render_tree;
use crate::search::apply_search;
use crate::surface::TreeSurface;

/// Model and surface kept in step. Every mutation goes through here.
#[derive(Debug)]
pub struct TreeView<S: TreeSurface> {
    tree: SourceTree,
    surface: S,
}

impl<S: TreeSurface> TreeView<S> {
    /// Render `nodes` onto `surface`.
    pub fn render(nodes: &[SourceNode], mut surface: S) -> Self {
        let tree = render_tree(nodes, &mut surface);
        Self { tree, surface }
    }

    pub fn tree(&self) -> &SourceTree {
        &self.tree
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Filter leaves by the search input; returns the match count.
    pub fn search(&mut self, input: &str) -> usize {
        apply_search(&mut self.tree, &mut self.surface, input)
    }

    /// What a click on `id` means.
    pub fn classify(&self, id: NodeId) -> Option<ClickTarget> {
        classify(&self.tree, id)
    }

    /// Flip a folder open or closed; returns the new state.
    pub fn toggle_folder(&mut self, id: NodeId) -> Option<bool> {
        let expanded = self.tree.toggle_expanded(id)?;
        self.surface.set_folder_expanded(id, expanded);
        Some(expanded)
    }

    /// Move the current marker. Folders only clear it.
    pub fn mark_current(&mut self, id: Option<NodeId>) {
        if let Some(previous) = self.tree.set_current(id) {
            self.surface.set_current(previous, false);
        }
        if let Some(current) = self.tree.current() {
            self.surface.set_current(current, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    fn view() -> TreeView<MemorySurface> {
        TreeView::render(
            &[
                SourceNode::folder("F", false, vec![SourceNode::leaf("A", "a")]),
                SourceNode::leaf("B", "b"),
            ],
            MemorySurface::new(),
        )
    }

    #[test]
    fn test_toggle_folder_syncs_surface() {
        let mut view = view();

        assert_eq!(view.toggle_folder(NodeId(0)), Some(true));
        assert!(view.surface().row(NodeId(0)).unwrap().children_displayed);
        assert_eq!(view.toggle_folder(NodeId(0)), Some(false));
        assert!(!view.surface().row(NodeId(0)).unwrap().expanded);
        assert_eq!(view.toggle_folder(NodeId(1)), None);
    }

    #[test]
    fn test_current_marker_moves() {
        let mut view = view();

        view.mark_current(Some(NodeId(1)));
        assert_eq!(view.surface().current(), vec![NodeId(1)]);

        view.mark_current(Some(NodeId(2)));
        assert_eq!(view.surface().current(), vec![NodeId(2)]);
        assert_eq!(view.tree().current(), Some(NodeId(2)));
    }
}
