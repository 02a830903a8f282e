//! In-memory mirror of the rendered tree.
//!
//! Source Nodes are flattened into an arena in depth-first order. Each
//! entry keeps the state the page shows for it (expansion, visibility,
//! current marker) so search and clicks can be decided without reading the
//! DOM back.

use std::fmt;
use std::str::FromStr;

use crate::click::PresetAction;
use crate::node::SourceNode;

/// Stable identifier of a rendered entry, also written to `data-node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error parsing a [`NodeId`] from a DOM attribute.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid node id '{0}'")]
pub struct ParseNodeIdError(pub String);

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(NodeId)
            .map_err(|_| ParseNodeIdError(s.to_string()))
    }
}

/// Folder or leaf payload of an entry.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryKind {
    Folder {
        expanded: bool,
        children: Vec<NodeId>,
    },
    Leaf {
        source: Option<String>,
        action: Option<String>,
    },
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEntry {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub label: String,
    pub kind: EntryKind,
    /// Whether the row's list item is shown (search filter)
    pub visible: bool,
}

impl TreeEntry {
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, EntryKind::Folder { .. })
    }

    /// Expansion state; `None` for leaves.
    pub fn expanded(&self) -> Option<bool> {
        match self.kind {
            EntryKind::Folder { expanded, .. } => Some(expanded),
            EntryKind::Leaf { .. } => None,
        }
    }

    /// Image source of a leaf.
    pub fn source(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Leaf { source, .. } => source.as_deref(),
            EntryKind::Folder { .. } => None,
        }
    }

    /// Raw preset action string of a leaf.
    pub fn action(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Leaf { action, .. } => action.as_deref(),
            EntryKind::Folder { .. } => None,
        }
    }

    /// Recognised preset action of a leaf.
    pub fn preset(&self) -> Option<PresetAction> {
        self.action().and_then(|a| a.parse().ok())
    }
}

/// Flattened tree with at most one current leaf.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceTree {
    entries: Vec<TreeEntry>,
    roots: Vec<NodeId>,
    current: Option<NodeId>,
}

impl SourceTree {
    /// Flatten `nodes`; ids follow depth-first document order.
    pub fn build(nodes: &[SourceNode]) -> Self {
        let mut tree = Self::default();
        for node in nodes {
            let id = tree.push(node, None);
            tree.roots.push(id);
        }
        tree
    }

    fn push(&mut self, node: &SourceNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.entries.len());
        let kind = if node.is_folder() {
            EntryKind::Folder {
                expanded: node.expanded,
                children: Vec::new(),
            }
        } else {
            EntryKind::Leaf {
                source: node.source().map(str::to_string),
                action: node.action.clone(),
            }
        };
        self.entries.push(TreeEntry {
            id,
            parent,
            label: node.label().to_string(),
            kind,
            visible: true,
        });

        if node.is_folder() {
            let children: Vec<NodeId> = node
                .children
                .iter()
                .map(|child| self.push(child, Some(id)))
                .collect();
            if let EntryKind::Folder { children: slot, .. } = &mut self.entries[id.0].kind {
                *slot = children;
            }
        }
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-level entries in order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeEntry> {
        self.entries.get(id.0)
    }

    /// Children of a folder, empty for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.get(id).map(|e| &e.kind) {
            Some(EntryKind::Folder { children, .. }) => children,
            _ => &[],
        }
    }

    pub fn folders(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter().filter(|e| e.is_folder())
    }

    pub fn leaves(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter().filter(|e| !e.is_folder())
    }

    /// The leaf marked current, if any.
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Mark `id` current; returns the previously current entry.
    ///
    /// Folders and unknown ids clear the marker without setting a new one.
    pub fn set_current(&mut self, id: Option<NodeId>) -> Option<NodeId> {
        let next = id.filter(|id| self.get(*id).is_some_and(|e| !e.is_folder()));
        std::mem::replace(&mut self.current, next)
    }

    /// Set a folder's expansion. Returns `false` if `id` is not a folder.
    pub fn set_expanded(&mut self, id: NodeId, value: bool) -> bool {
        match self.entries.get_mut(id.0).map(|e| &mut e.kind) {
            Some(EntryKind::Folder { expanded, .. }) => {
                *expanded = value;
                true
            }
            _ => false,
        }
    }

    /// Flip a folder's expansion, returning the new state.
    pub fn toggle_expanded(&mut self, id: NodeId) -> Option<bool> {
        let next = !self.get(id)?.expanded()?;
        self.set_expanded(id, next);
        Some(next)
    }

    /// Show or hide an entry's row.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(entry) = self.entries.get_mut(id.0) {
            entry.visible = visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<SourceNode> {
        vec![
            SourceNode::folder(
                "Cases",
                true,
                vec![
                    SourceNode::leaf("Slide A", "http://x/a/info.json"),
                    SourceNode::folder("Nested", false, vec![SourceNode::leaf("Slide B", "b")]),
                ],
            ),
            SourceNode::leaf("Other", "http://x/o/info.json"),
        ]
    }

    #[test]
    fn test_build_depth_first_ids() {
        let tree = SourceTree::build(&sample());

        assert_eq!(tree.len(), 5);
        assert_eq!(tree.roots(), &[NodeId(0), NodeId(4)]);
        assert_eq!(tree.children(NodeId(0)), &[NodeId(1), NodeId(2)]);
        assert_eq!(tree.children(NodeId(2)), &[NodeId(3)]);
        assert_eq!(tree.get(NodeId(3)).unwrap().parent, Some(NodeId(2)));
        assert_eq!(tree.leaves().count(), 3);
    }

    #[test]
    fn test_current_only_on_leaves() {
        let mut tree = SourceTree::build(&sample());

        assert_eq!(tree.set_current(Some(NodeId(1))), None);
        assert_eq!(tree.set_current(Some(NodeId(0))), Some(NodeId(1)));
        assert_eq!(tree.current(), None);
    }

    #[test]
    fn test_toggle_expanded() {
        let mut tree = SourceTree::build(&sample());

        assert_eq!(tree.toggle_expanded(NodeId(2)), Some(true));
        assert_eq!(tree.toggle_expanded(NodeId(2)), Some(false));
        assert_eq!(tree.toggle_expanded(NodeId(1)), None);
        assert_eq!(tree.toggle_expanded(NodeId(99)), None);
    }

    #[test]
    fn test_parse_node_id() {
        assert_eq!(" 12 ".parse::<NodeId>(), Ok(NodeId(12)));
        assert!("abc".parse::<NodeId>().is_err());
        assert_eq!(NodeId(7).to_string(), "7");
    }
}
