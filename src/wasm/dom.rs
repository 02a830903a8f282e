//! DOM rendering of the source tree and small element helpers.

use std::collections::HashMap;

use slideview_tree::{NodeId, TreeSurface};
use slideview_viewer::StyleTarget;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::config::ElementsConfig;
use crate::constants::toggle_button;
use crate::error::BootError;

/// Class of every clickable row.
pub const ROW_CLASS: &str = "tree__node";
const EXPANDED_CLASS: &str = "expanded";
const CHILDREN_CLASS: &str = "tree__children";
const CARET_CLASS: &str = "tree__caret";
const ICON_CLASS: &str = "tree__icon";
const LABEL_CLASS: &str = "tree__label";
const CARET: &str = "▸";
const SVG_NS: &str = "http://www.w3.org/2000/svg";
const FOLDER_ICON: &str = r#"<path d="M14 4H8.4L7 2.6 6.6 2H2a1 1 0 0 0-1 1v10a1 1 0 0 0 1 1h12a1 1 0 0 0 1-1V5a1 1 0 0 0-1-1z"/>"#;

pub(crate) fn dom_error(e: JsValue) -> BootError {
    BootError::Dom(format!("{:?}", e))
}

/// Class list of one element.
pub struct DomClasses(Element);

impl DomClasses {
    pub fn new(element: Element) -> Self {
        Self(element)
    }
}

impl StyleTarget for DomClasses {
    fn set_class(&self, class: &str, on: bool) {
        if let Err(e) = self.0.class_list().toggle_with_force(class, on) {
            log::warn!("Could not set class '{}': {:?}", class, e);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }
}

fn set_display(element: &Element, value: &str) {
    let Some(html) = element.dyn_ref::<HtmlElement>() else {
        return;
    };
    let style = html.style();
    let result = if value.is_empty() {
        style.remove_property("display").map(|_| ())
    } else {
        style.set_property("display", value)
    };
    if let Err(e) = result {
        log::warn!("Could not set display: {:?}", e);
    }
}

/// Renders tree rows as nested `<ul>/<li>` under a root element.
pub struct DomTreeSurface {
    document: Document,
    root: Element,
    rows: HashMap<NodeId, Element>,
    containers: HashMap<NodeId, Element>,
}

impl DomTreeSurface {
    /// Render into `root`, after any content it already has.
    pub fn new(document: Document, root: Element) -> Self {
        Self {
            document,
            root,
            rows: HashMap::new(),
            containers: HashMap::new(),
        }
    }

    fn container(&self, parent: Option<NodeId>) -> &Element {
        parent
            .and_then(|p| self.containers.get(&p))
            .unwrap_or(&self.root)
    }

    fn row(&self, id: NodeId) -> Result<Element, JsValue> {
        let row = self.document.create_element("div")?;
        row.set_class_name(ROW_CLASS);
        row.set_attribute("role", "treeitem")?;
        row.set_attribute("data-node", &id.to_string())?;
        Ok(row)
    }

    fn try_add_folder(
        &mut self,
        parent: Option<NodeId>,
        id: NodeId,
        label: &str,
        expanded: bool,
    ) -> Result<(), JsValue> {
        let item = self.document.create_element("li")?;
        let row = self.row(id)?;
        row.set_attribute("data-folder", "")?;
        row.set_attribute("aria-expanded", if expanded { "true" } else { "false" })?;
        if expanded {
            row.class_list().add_1(EXPANDED_CLASS)?;
        }

        let caret = self.document.create_element("span")?;
        caret.set_class_name(CARET_CLASS);
        caret.set_text_content(Some(CARET));

        let icon = self.document.create_element_ns(Some(SVG_NS), "svg")?;
        icon.set_attribute("class", ICON_CLASS)?;
        icon.set_attribute("viewBox", "0 0 16 16")?;
        icon.set_attribute("aria-hidden", "true")?;
        icon.set_inner_html(FOLDER_ICON);

        let text = self.document.create_element("span")?;
        text.set_class_name(LABEL_CLASS);
        text.set_text_content(Some(label));

        row.append_child(&caret)?;
        row.append_child(&icon)?;
        row.append_child(&text)?;

        let children = self.document.create_element("ul")?;
        children.set_class_name(CHILDREN_CLASS);
        children.set_attribute("role", "group")?;
        set_display(&children, if expanded { "block" } else { "none" });

        item.append_child(&row)?;
        item.append_child(&children)?;
        self.container(parent).append_child(&item)?;

        self.rows.insert(id, row);
        self.containers.insert(id, children);
        Ok(())
    }

    fn try_add_leaf(
        &mut self,
        parent: Option<NodeId>,
        id: NodeId,
        label: &str,
        source: Option<&str>,
        action: Option<&str>,
    ) -> Result<(), JsValue> {
        let item = self.document.create_element("li")?;
        let row = self.row(id)?;
        if let Some(source) = source {
            row.set_attribute("data-iiif", source)?;
        }
        if let Some(action) = action {
            row.set_attribute("data-action", action)?;
        }
        row.set_text_content(Some(label));

        item.append_child(&row)?;
        self.container(parent).append_child(&item)?;
        self.rows.insert(id, row);
        Ok(())
    }
}

impl TreeSurface for DomTreeSurface {
    fn add_folder(&mut self, parent: Option<NodeId>, id: NodeId, label: &str, expanded: bool) {
        if let Err(e) = self.try_add_folder(parent, id, label, expanded) {
            log::error!("Failed to render folder {}: {:?}", id, e);
        }
    }

    fn add_leaf(
        &mut self,
        parent: Option<NodeId>,
        id: NodeId,
        label: &str,
        source: Option<&str>,
        action: Option<&str>,
    ) {
        if let Err(e) = self.try_add_leaf(parent, id, label, source, action) {
            log::error!("Failed to render leaf {}: {:?}", id, e);
        }
    }

    fn set_folder_expanded(&mut self, id: NodeId, expanded: bool) {
        if let Some(row) = self.rows.get(&id) {
            let classes = row.class_list();
            let result = classes.toggle_with_force(EXPANDED_CLASS, expanded).and_then(|_| {
                row.set_attribute("aria-expanded", if expanded { "true" } else { "false" })
            });
            if let Err(e) = result {
                log::warn!("Could not update folder {}: {:?}", id, e);
            }
        }
        if let Some(children) = self.containers.get(&id) {
            set_display(children, if expanded { "block" } else { "none" });
        }
    }

    fn set_entry_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(item) = self.rows.get(&id).and_then(|row| row.parent_element()) {
            set_display(&item, if visible { "" } else { "none" });
        }
    }

    fn set_current(&mut self, id: NodeId, current: bool) {
        let Some(row) = self.rows.get(&id) else {
            return;
        };
        let result = if current {
            row.set_attribute("aria-current", "true")
        } else {
            row.remove_attribute("aria-current")
        };
        if let Err(e) = result {
            log::warn!("Could not mark row {}: {:?}", id, e);
        }
    }
}

/// Id of the tree row an event target sits in, if any.
pub fn row_id(target: &Element) -> Option<NodeId> {
    let row = target.closest(&format!(".{}", ROW_CLASS)).ok().flatten()?;
    row.get_attribute("data-node")?.parse().ok()
}

/// Find the sidebar toggle button, creating it in the toolbar when the page
/// does not provide one. `None` when there is neither button nor toolbar.
pub fn ensure_toggle_button(
    document: &Document,
    elements: &ElementsConfig,
) -> Result<Option<Element>, BootError> {
    if let Some(button) = document.get_element_by_id(&elements.toggle_button) {
        return Ok(Some(button));
    }
    let Some(toolbar) = document.query_selector(&elements.toolbar).ok().flatten() else {
        return Ok(None);
    };

    let button = document.create_element("button").map_err(dom_error)?;
    button.set_id(&elements.toggle_button);
    button.set_class_name(toggle_button::CLASS);
    button
        .set_attribute("title", toggle_button::TITLE)
        .map_err(dom_error)?;
    button
        .set_attribute("aria-label", toggle_button::TITLE)
        .map_err(dom_error)?;
    button.set_text_content(Some(toggle_button::LABEL));
    toolbar.prepend_with_node_1(&button).map_err(dom_error)?;

    log::debug!("Created sidebar toggle button in {}", elements.toolbar);
    Ok(Some(button))
}

#[cfg(test)]
mod tests {
    use super::*;
    use slideview_tree::{render_tree, SourceNode};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().and_then(|w| w.document()).unwrap()
    }

    #[wasm_bindgen_test]
    fn rendering_appends_after_existing_content() {
        let document = document();
        let root = document.create_element("ul").unwrap();
        let placeholder = document.create_element("li").unwrap();
        root.append_child(&placeholder).unwrap();

        let nodes = [
            SourceNode::folder("Liver", false, vec![SourceNode::leaf("CMU-1", "http://x/info.json")]),
            SourceNode::leaf("Loose", "http://y/info.json"),
        ];
        let mut surface = DomTreeSurface::new(document, root.clone());
        render_tree(&nodes, &mut surface);

        assert_eq!(root.child_element_count(), 3);
        assert_eq!(root.first_element_child(), Some(placeholder));
        let leaf = root.query_selector("[data-iiif='http://x/info.json']").unwrap().unwrap();
        assert_eq!(row_id(&leaf), Some(NodeId(1)));
    }

    #[wasm_bindgen_test]
    fn collapsed_folder_hides_children() {
        let document = document();
        let root = document.create_element("ul").unwrap();
        let nodes = [SourceNode::folder("Liver", false, vec![SourceNode::leaf("A", "x")])];
        let mut surface = DomTreeSurface::new(document, root.clone());
        render_tree(&nodes, &mut surface);

        let folder = root.query_selector("[data-folder]").unwrap().unwrap();
        assert_eq!(folder.get_attribute("aria-expanded").as_deref(), Some("false"));

        surface.set_folder_expanded(NodeId(0), true);
        assert!(folder.class_list().contains("expanded"));
        let children = root.query_selector(".tree__children").unwrap().unwrap();
        let display = children
            .dyn_into::<HtmlElement>()
            .unwrap()
            .style()
            .get_property_value("display")
            .unwrap();
        assert_eq!(display, "block");
    }
}
