//! Where the tree is drawn.
//!
//! [`TreeSurface`] is the narrow set of mutations the tree performs on its
//! page: append rows once, then flip classes, attributes and styles in
//! place. The browser build implements it over `web-sys`;
//! [`MemorySurface`] keeps the same state in memory for tests and the
//! outline tool.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::model::NodeId;

/// Mutations the tree applies to its rendering target.
pub trait TreeSurface {
    /// Append a folder row (with its empty child container) under `parent`,
    /// or at the top level when `parent` is `None`.
    fn add_folder(&mut self, parent: Option<NodeId>, id: NodeId, label: &str, expanded: bool);

    /// Append a leaf row under `parent`.
    fn add_leaf(
        &mut self,
        parent: Option<NodeId>,
        id: NodeId,
        label: &str,
        source: Option<&str>,
        action: Option<&str>,
    );

    /// Sync a folder's expanded class, `aria-expanded` and child visibility.
    fn set_folder_expanded(&mut self, id: NodeId, expanded: bool);

    /// Show or hide a row's list item.
    fn set_entry_visible(&mut self, id: NodeId, visible: bool);

    /// Set or clear the current marker on a row.
    fn set_current(&mut self, id: NodeId, current: bool);
}

/// State of one row held by [`MemorySurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRow {
    pub parent: Option<NodeId>,
    pub label: String,
    pub folder: bool,
    pub source: Option<String>,
    pub action: Option<String>,
    /// `expanded` class and `aria-expanded` (folders)
    pub expanded: bool,
    /// Display of the child container (folders)
    pub children_displayed: bool,
    /// Display of the row's list item
    pub displayed: bool,
    /// `aria-current`
    pub current: bool,
}

/// In-memory tree surface.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    rows: BTreeMap<NodeId, MemoryRow>,
    order: Vec<NodeId>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self, id: NodeId) -> Option<&MemoryRow> {
        self.rows.get(&id)
    }

    /// Number of rendered rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of leaf rows, at any depth.
    pub fn leaf_count(&self) -> usize {
        self.rows.values().filter(|row| !row.folder).count()
    }

    /// Labels of leaf rows currently displayed, in document order.
    pub fn visible_leaves(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter_map(|id| self.rows.get(id))
            .filter(|row| !row.folder && row.displayed)
            .map(|row| row.label.as_str())
            .collect()
    }

    /// Rows carrying the current marker.
    pub fn current(&self) -> Vec<NodeId> {
        self.rows
            .iter()
            .filter(|(_, row)| row.current)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Indented text rendering of what a user would see.
    ///
    /// Hidden rows and the contents of collapsed folders are left out; the
    /// current leaf is starred.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_level(&mut out, None, 0);
        out
    }

    fn write_level(&self, out: &mut String, parent: Option<NodeId>, depth: usize) {
        for id in self.order.iter().filter(|id| self.rows[*id].parent == parent) {
            let row = &self.rows[id];
            if !row.displayed {
                continue;
            }
            let indent = "  ".repeat(depth);
            if row.folder {
                let caret = if row.children_displayed { '▾' } else { '▸' };
                let _ = writeln!(out, "{}{} {}/", indent, caret, row.label);
                if row.children_displayed {
                    self.write_level(out, Some(*id), depth + 1);
                }
            } else {
                let marker = if row.current { '*' } else { '-' };
                let _ = match (&row.source, &row.action) {
                    (_, Some(action)) => writeln!(out, "{}{} {} [{}]", indent, marker, row.label, action),
                    (Some(source), None) => writeln!(out, "{}{} {}  {}", indent, marker, row.label, source),
                    (None, None) => writeln!(out, "{}{} {}", indent, marker, row.label),
                };
            }
        }
    }

    fn insert(&mut self, id: NodeId, row: MemoryRow) {
        if self.rows.insert(id, row).is_none() {
            self.order.push(id);
        }
    }
}

impl TreeSurface for MemorySurface {
    fn add_folder(&mut self, parent: Option<NodeId>, id: NodeId, label: &str, expanded: bool) {
        self.insert(
            id,
            MemoryRow {
                parent,
                label: label.to_string(),
                folder: true,
                source: None,
                action: None,
                expanded,
                children_displayed: expanded,
                displayed: true,
                current: false,
            },
        );
    }

    fn add_leaf(
        &mut self,
        parent: Option<NodeId>,
        id: NodeId,
        label: &str,
        source: Option<&str>,
        action: Option<&str>,
    ) {
        self.insert(
            id,
            MemoryRow {
                parent,
                label: label.to_string(),
                folder: false,
                source: source.map(str::to_string),
                action: action.map(str::to_string),
                expanded: false,
                children_displayed: false,
                displayed: true,
                current: false,
            },
        );
    }

    fn set_folder_expanded(&mut self, id: NodeId, expanded: bool) {
        if let Some(row) = self.rows.get_mut(&id).filter(|row| row.folder) {
            row.expanded = expanded;
            row.children_displayed = expanded;
        }
    }

    fn set_entry_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(row) = self.rows.get_mut(&id) {
            row.displayed = visible;
        }
    }

    fn set_current(&mut self, id: NodeId, current: bool) {
        if let Some(row) = self.rows.get_mut(&id) {
            row.current = current;
        }
    }
}
