//! Rendering Source Nodes onto a surface.

use crate::model::{EntryKind, NodeId, SourceTree};
use crate::node::SourceNode;
use crate::surface::TreeSurface;

/// Render `nodes` onto `surface` and return the model of what was drawn.
///
/// Only appends; binds no behaviour.
pub fn render_tree<S: TreeSurface>(nodes: &[SourceNode], surface: &mut S) -> SourceTree {
    let tree = SourceTree::build(nodes);
    for &root in tree.roots() {
        render_entry(&tree, root, surface);
    }
    log::debug!("Rendered {} tree entries", tree.len());
    tree
}

fn render_entry<S: TreeSurface>(tree: &SourceTree, id: NodeId, surface: &mut S) {
    let Some(entry) = tree.get(id) else {
        return;
    };
    match &entry.kind {
        EntryKind::Folder { expanded, children } => {
            surface.add_folder(entry.parent, id, &entry.label, *expanded);
            for &child in children {
                render_entry(tree, child, surface);
            }
        }
        EntryKind::Leaf { source, action } => {
            surface.add_leaf(
                entry.parent,
                id,
                &entry.label,
                source.as_deref(),
                action.as_deref(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::total_leaves;
    use crate::surface::MemorySurface;

    fn nested() -> Vec<SourceNode> {
        vec![
            SourceNode::folder(
                "Liver",
                true,
                vec![
                    SourceNode::leaf("CMU-1", "http://localhost:5050/iiif/CMU-1.svs/info.json"),
                    SourceNode::folder(
                        "Archive",
                        false,
                        vec![
                            SourceNode::leaf("Old 1", "a"),
                            SourceNode::leaf("Old 2", "b"),
                            SourceNode::folder("Deeper", false, vec![SourceNode::leaf("Old 3", "c")]),
                        ],
                    ),
                ],
            ),
            SourceNode::leaf("Loose", "d"),
            SourceNode::preset("Fit", "fit"),
        ]
    }

    #[test]
    fn test_leaf_count_matches_source() {
        let nodes = nested();
        let mut surface = MemorySurface::new();

        let tree = render_tree(&nodes, &mut surface);

        assert_eq!(surface.leaf_count(), total_leaves(&nodes));
        assert_eq!(surface.leaf_count(), 6);
        assert_eq!(surface.len(), tree.len());
    }

    #[test]
    fn test_expanded_flag_sets_child_visibility() {
        let mut surface = MemorySurface::new();
        let tree = render_tree(&nested(), &mut surface);

        let liver = tree.roots()[0];
        let archive = tree.children(liver)[1];
        assert!(surface.row(liver).unwrap().children_displayed);
        assert!(!surface.row(archive).unwrap().children_displayed);
        assert_eq!(surface.row(archive).unwrap().parent, Some(liver));
    }

    #[test]
    fn test_leaf_carries_source_and_action() {
        let mut surface = MemorySurface::new();
        let tree = render_tree(&nested(), &mut surface);

        let loose = surface.row(tree.roots()[1]).unwrap();
        assert_eq!(loose.source.as_deref(), Some("d"));
        let fit = surface.row(tree.roots()[2]).unwrap();
        assert_eq!(fit.action.as_deref(), Some("fit"));
        assert_eq!(fit.source, None);
    }

    #[test]
    fn test_empty_list_renders_nothing() {
        let mut surface = MemorySurface::new();
        let tree = render_tree(&[], &mut surface);

        assert!(tree.is_empty());
        assert!(surface.is_empty());
        assert_eq!(surface.outline(), "");
    }

    #[test]
    fn test_outline_hides_collapsed_children() {
        let mut surface = MemorySurface::new();
        render_tree(&nested(), &mut surface);

        let outline = surface.outline();
        assert!(outline.contains("▾ Liver/"));
        assert!(outline.contains("  ▸ Archive/"));
        assert!(!outline.contains("Old 1"));
        assert!(outline.contains("- Fit [fit]"));
    }
}
