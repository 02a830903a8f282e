//! Substring filter over leaf labels.

use crate::model::SourceTree;
use crate::surface::TreeSurface;

/// Normalise raw input into the query that is matched.
pub fn normalize_query(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Whether `label` matches an already normalised `query`.
pub fn matches(label: &str, query: &str) -> bool {
    label.trim().to_lowercase().contains(query)
}

/// Apply the search box contents to the tree and its surface.
///
/// Leaves are shown iff their label contains the query, ignoring case;
/// folder rows always stay. A non-empty query force-expands every folder.
/// Every folder is then re-synced with its expansion state, so clearing the
/// query leaves previously forced folders open.
///
/// Returns the number of matching leaves.
pub fn apply_search<S: TreeSurface>(tree: &mut SourceTree, surface: &mut S, input: &str) -> usize {
    let query = normalize_query(input);

    let verdicts: Vec<_> = tree
        .leaves()
        .map(|leaf| (leaf.id, matches(&leaf.label, &query)))
        .collect();
    for &(id, visible) in &verdicts {
        tree.set_visible(id, visible);
        surface.set_entry_visible(id, visible);
    }

    let force_open = !query.is_empty();
    let folders: Vec<_> = tree.folders().map(|f| f.id).collect();
    for id in folders {
        if force_open {
            tree.set_expanded(id, true);
        }
        let expanded = tree.get(id).and_then(|f| f.expanded()).unwrap_or(false);
        surface.set_folder_expanded(id, expanded);
    }

    let matched = verdicts.iter().filter(|(_, visible)| *visible).count();
    log::debug!("Search '{}' matched {} of {} leaves", query, matched, verdicts.len());
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SourceNode;
    use crate::render::render_tree;
    use crate::surface::MemorySurface;

    fn setup() -> (SourceTree, MemorySurface) {
        let nodes = vec![
            SourceNode::folder(
                "Group",
                false,
                vec![
                    SourceNode::leaf("Slide A", "a"),
                    SourceNode::folder("Inner", false, vec![SourceNode::leaf("Slide B", "b")]),
                ],
            ),
            SourceNode::leaf("Other", "o"),
        ];
        let mut surface = MemorySurface::new();
        let tree = render_tree(&nodes, &mut surface);
        (tree, surface)
    }

    #[test]
    fn test_search_filters_case_insensitively() {
        let (mut tree, mut surface) = setup();

        let matched = apply_search(&mut tree, &mut surface, "  SLIDE ");

        assert_eq!(matched, 2);
        assert_eq!(surface.visible_leaves(), vec!["Slide A", "Slide B"]);
    }

    #[test]
    fn test_query_expands_every_folder() {
        let (mut tree, mut surface) = setup();

        apply_search(&mut tree, &mut surface, "slide");

        for folder in tree.folders() {
            assert_eq!(folder.expanded(), Some(true));
            let row = surface.row(folder.id).unwrap();
            assert!(row.expanded && row.children_displayed && row.displayed);
        }
    }

    #[test]
    fn test_clearing_keeps_folders_expanded() {
        let (mut tree, mut surface) = setup();

        apply_search(&mut tree, &mut surface, "slide");
        let matched = apply_search(&mut tree, &mut surface, "");

        assert_eq!(matched, 3);
        assert_eq!(surface.visible_leaves(), vec!["Slide A", "Slide B", "Other"]);
        assert!(tree.folders().all(|f| f.expanded() == Some(true)));
        assert!(tree.folders().all(|f| surface.row(f.id).unwrap().children_displayed));
    }

    #[test]
    fn test_empty_query_leaves_collapsed_folders_alone() {
        let (mut tree, mut surface) = setup();

        apply_search(&mut tree, &mut surface, "   ");

        assert!(tree.folders().all(|f| f.expanded() == Some(false)));
        assert_eq!(surface.visible_leaves().len(), 3);
    }

    #[test]
    fn test_no_match_hides_all_leaves_but_not_folders() {
        let (mut tree, mut surface) = setup();

        assert_eq!(apply_search(&mut tree, &mut surface, "zzz"), 0);
        assert!(surface.visible_leaves().is_empty());
        assert!(tree.folders().all(|f| surface.row(f.id).unwrap().displayed));
    }
}
