//! The image source tree of SlideView.
//!
//! Source Nodes arrive as JSON, are rendered once onto a [`TreeSurface`],
//! and from then on are only mutated in place: search filtering, folder
//! toggles and the current-leaf marker.

pub mod click;
pub mod model;
pub mod node;
pub mod render;
pub mod search;
pub mod surface;
pub mod view;

pub use click::{classify, ClickTarget, PresetAction};
pub use model::{EntryKind, NodeId, ParseNodeIdError, SourceTree, TreeEntry};
pub use node::{total_leaves, SourceNode};
pub use render::render_tree;
pub use search::apply_search;
pub use surface::{MemoryRow, MemorySurface, TreeSurface};
pub use view::TreeView;
