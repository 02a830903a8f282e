//! Tree behaviour: loading, search and click dispatch.

use std::rc::Rc;

use slideview_tree::{ClickTarget, NodeId, PresetAction, TreeSurface, TreeView};
use slideview_viewer::{BlurEffect, Viewer};

use crate::sources::SourceChain;
use crate::storage::KeyValueStore;

/// Drives a rendered tree and forwards leaf clicks to the viewer.
pub struct TreeController<S: TreeSurface> {
    view: TreeView<S>,
    store: Rc<dyn KeyValueStore>,
    storage_key: String,
    viewer: Option<Rc<dyn Viewer>>,
    blur: Option<BlurEffect>,
}

impl<S: TreeSurface> TreeController<S> {
    /// Wrap an already rendered view.
    pub fn new(view: TreeView<S>, store: Rc<dyn KeyValueStore>, storage_key: impl Into<String>) -> Self {
        Self {
            view,
            store,
            storage_key: storage_key.into(),
            viewer: None,
            blur: None,
        }
    }

    /// Load the source list through `chain` and render it onto `surface`.
    pub async fn load(
        chain: SourceChain,
        surface: S,
        store: Rc<dyn KeyValueStore>,
        storage_key: impl Into<String>,
    ) -> Self {
        let nodes = chain.load().await;
        Self::new(TreeView::render(&nodes, surface), store, storage_key)
    }

    /// Send leaf clicks to `viewer`.
    pub fn with_viewer(mut self, viewer: Rc<dyn Viewer>) -> Self {
        self.viewer = Some(viewer);
        self
    }

    /// Blur the viewer container as soon as a leaf is opened.
    pub fn with_blur(mut self, blur: BlurEffect) -> Self {
        self.blur = Some(blur);
        self
    }

    pub fn view(&self) -> &TreeView<S> {
        &self.view
    }

    /// Apply the search input.
    pub fn search(&mut self, input: &str) -> usize {
        self.view.search(input)
    }

    /// Handle a click on row `id`; returns what the click meant, or `None`
    /// when `id` is not part of the tree.
    pub fn click(&mut self, id: NodeId) -> Option<ClickTarget> {
        let target = self.view.classify(id)?;

        match &target {
            ClickTarget::FolderToggle(folder) => {
                self.view.toggle_folder(*folder);
            }
            ClickTarget::Preset(preset) => {
                if let Some(viewer) = &self.viewer {
                    apply_preset(viewer.as_ref(), *preset);
                }
            }
            ClickTarget::OpenLeaf(source) => self.open(source),
            ClickTarget::Plain => {}
        }

        if target.marks_current() {
            self.view.mark_current(Some(id));
        }
        Some(target)
    }

    fn open(&self, source: &str) {
        let Some(viewer) = &self.viewer else {
            return;
        };
        log::info!("Opening {}", source);
        viewer.open(source);
        if let Err(e) = self.store.set(&self.storage_key, source) {
            log::warn!("Could not remember last source: {}", e);
        }
        if let Some(blur) = &self.blur {
            blur.engage();
        }
    }
}

/// Run a zoom preset, animated.
pub fn apply_preset(viewer: &dyn Viewer, preset: PresetAction) {
    match preset.zoom() {
        Some(zoom) => viewer.zoom_to(zoom, false),
        None => viewer.go_home(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slideview_tree::{MemorySurface, SourceNode};
    use slideview_viewer::testing::{ManualScheduler, MemoryStyle, MockViewer, ViewerCall};
    use slideview_viewer::{Bounds, DEFAULT_BLUR_IDLE_MS};

    use crate::error::{SourceError, StorageError};
    use crate::storage::MemoryStore;

    const KEY: &str = "lastIiif";

    struct Fixture {
        controller: TreeController<MemorySurface>,
        viewer: Rc<MockViewer>,
        store: Rc<MemoryStore>,
        blur: BlurEffect,
    }

    fn nodes() -> Vec<SourceNode> {
        vec![
            SourceNode::folder(
                "Slides",
                false,
                vec![
                    SourceNode::leaf("Slide A", "http://x/info.json"),
                    SourceNode::leaf("Slide B", "http://y/info.json"),
                ],
            ),
            SourceNode::preset("Zoom 2x", "2x"),
            SourceNode::preset("Fit", "fit"),
        ]
    }

    fn fixture() -> Fixture {
        let viewer = Rc::new(MockViewer::with_image(Bounds::new(0.0, 0.0, 1.0, 1.0), 0.5));
        let store = Rc::new(MemoryStore::new());
        let blur = BlurEffect::new(
            Rc::new(MemoryStyle::default()),
            Rc::new(ManualScheduler::new()),
            DEFAULT_BLUR_IDLE_MS,
        );
        let view = TreeView::render(&nodes(), MemorySurface::new());
        let controller = TreeController::new(view, store.clone(), KEY)
            .with_viewer(viewer.clone())
            .with_blur(blur.clone());
        Fixture {
            controller,
            viewer,
            store,
            blur,
        }
    }

    #[test]
    fn test_leaf_click_opens_and_persists() {
        let mut f = fixture();

        let target = f.controller.click(NodeId(1));

        assert_eq!(target, Some(ClickTarget::OpenLeaf("http://x/info.json".into())));
        assert_eq!(f.viewer.opened(), vec!["http://x/info.json"]);
        assert_eq!(f.store.get(KEY).as_deref(), Some("http://x/info.json"));
        assert!(f.blur.is_blurring());
        assert_eq!(f.controller.view().surface().current(), vec![NodeId(1)]);
    }

    #[test]
    fn test_folder_click_toggles_only() {
        let mut f = fixture();
        f.controller.click(NodeId(2));

        assert_eq!(f.controller.click(NodeId(0)), Some(ClickTarget::FolderToggle(NodeId(0))));

        let row = f.controller.view().surface().row(NodeId(0)).unwrap();
        assert!(row.expanded && row.children_displayed);
        assert_eq!(f.viewer.opened(), vec!["http://y/info.json"]);
        assert_eq!(f.controller.view().surface().current(), vec![NodeId(2)]);
    }

    #[test]
    fn test_second_leaf_moves_current() {
        let mut f = fixture();

        f.controller.click(NodeId(1));
        f.controller.click(NodeId(2));

        assert_eq!(f.controller.view().surface().current(), vec![NodeId(2)]);
        assert_eq!(f.store.get(KEY).as_deref(), Some("http://y/info.json"));
    }

    #[test]
    fn test_presets_drive_zoom() {
        let mut f = fixture();

        f.controller.click(NodeId(3));
        f.controller.click(NodeId(4));

        assert_eq!(
            f.viewer.calls(),
            vec![ViewerCall::ZoomTo(2.0, false), ViewerCall::GoHome(false)]
        );
        assert!(f.viewer.opened().is_empty());
        assert_eq!(f.controller.view().surface().current(), vec![NodeId(4)]);
    }

    #[test]
    fn test_without_viewer_nothing_is_opened() {
        let store = Rc::new(MemoryStore::new());
        let view = TreeView::render(&nodes(), MemorySurface::new());
        let mut controller = TreeController::new(view, store.clone(), KEY);

        controller.click(NodeId(1));

        assert_eq!(store.get(KEY), None);
        assert_eq!(controller.view().surface().current(), vec![NodeId(1)]);
    }

    #[test]
    fn test_unknown_node_is_ignored() {
        let mut f = fixture();
        assert_eq!(f.controller.click(NodeId(99)), None);
        assert!(f.viewer.calls().is_empty());
    }

    #[test]
    fn test_storage_failure_still_opens() {
        struct FullStore;
        impl KeyValueStore for FullStore {
            fn get(&self, _key: &str) -> Option<String> {
                None
            }
            fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
                Err(StorageError::Write {
                    key: key.to_string(),
                    message: "quota exceeded".into(),
                })
            }
        }

        let viewer = Rc::new(MockViewer::empty());
        let view = TreeView::render(&nodes(), MemorySurface::new());
        let mut controller =
            TreeController::new(view, Rc::new(FullStore), KEY).with_viewer(viewer.clone());

        controller.click(NodeId(1));
        assert_eq!(viewer.opened(), vec!["http://x/info.json"]);
    }

    #[test]
    fn test_search_through_controller() {
        let mut f = fixture();

        assert_eq!(f.controller.search("slide"), 2);
        assert_eq!(
            f.controller.view().surface().visible_leaves(),
            vec!["Slide A", "Slide B"]
        );
    }

    #[test]
    fn test_load_with_failed_sources_renders_nothing() {
        let chain = SourceChain::new()
            .with_result("remote", Err(SourceError::Http { status: 404 }))
            .with_result("inline", Err(SourceError::Missing { id: "x".into() }));

        let controller = pollster::block_on(TreeController::load(
            chain,
            MemorySurface::new(),
            Rc::new(MemoryStore::new()),
            KEY,
        ));

        assert!(controller.view().tree().is_empty());
        assert_eq!(controller.view().surface().leaf_count(), 0);
    }
}
