//! Source Nodes: the JSON description of the image tree.

use serde::{Deserialize, Deserializer, Serialize};

/// Label shown for a folder without a name.
pub const DEFAULT_FOLDER_LABEL: &str = "Folder";

/// Label shown for a leaf without a name.
pub const DEFAULT_LEAF_LABEL: &str = "Untitled";

/// One entry of the source list: a folder or a leaf image.
///
/// Folder and leaf fields are mutually exclusive by convention only; a
/// node with `folder: true` is a folder whatever else it carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceNode {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether this node groups other nodes
    #[serde(skip_serializing_if = "std::ops::Not::not", deserialize_with = "null_as_default")]
    pub folder: bool,
    /// Ordered children (folders only)
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub children: Vec<SourceNode>,
    /// Initially expanded (folders only)
    #[serde(skip_serializing_if = "std::ops::Not::not", deserialize_with = "null_as_default")]
    pub expanded: bool,
    /// Image manifest URL (leaves only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iiif: Option<String>,
    /// Preset viewer action such as `fit` or `2x` (leaves only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// Hand-written lists sometimes carry `null` where a field is meant to be absent.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl SourceNode {
    /// Create a folder node.
    pub fn folder(name: impl Into<String>, expanded: bool, children: Vec<SourceNode>) -> Self {
        Self {
            name: Some(name.into()),
            folder: true,
            children,
            expanded,
            ..Self::default()
        }
    }

    /// Create a leaf node pointing at an image source.
    pub fn leaf(name: impl Into<String>, iiif: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            iiif: Some(iiif.into()),
            ..Self::default()
        }
    }

    /// Create a leaf node carrying a preset action.
    pub fn preset(name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            action: Some(action.into()),
            ..Self::default()
        }
    }

    pub fn is_folder(&self) -> bool {
        self.folder
    }

    /// Name to display, falling back to a generic label when missing or empty.
    pub fn label(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ if self.folder => DEFAULT_FOLDER_LABEL,
            _ => DEFAULT_LEAF_LABEL,
        }
    }

    /// Image source, ignoring empty strings.
    pub fn source(&self) -> Option<&str> {
        self.iiif.as_deref().filter(|s| !s.is_empty())
    }

    /// Number of leaves in this subtree (a leaf counts itself).
    pub fn leaf_count(&self) -> usize {
        if self.folder {
            self.children.iter().map(SourceNode::leaf_count).sum()
        } else {
            1
        }
    }
}

/// Total number of leaves across a whole source list.
pub fn total_leaves(nodes: &[SourceNode]) -> usize {
    nodes.iter().map(SourceNode::leaf_count).sum()
}
