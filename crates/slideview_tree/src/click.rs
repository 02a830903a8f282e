//! Classification of clicks on tree rows.

use std::fmt;
use std::str::FromStr;

use crate::model::{EntryKind, NodeId, SourceTree};

/// Zoom presets a leaf can trigger instead of opening an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetAction {
    /// Return to the home view (`fit` or `home`)
    Home,
    /// Zoom to 1.0 (`1x`)
    OneX,
    /// Zoom to 2.0 (`2x`)
    TwoX,
}

impl PresetAction {
    /// Target zoom, or `None` for the home view.
    pub fn zoom(&self) -> Option<f64> {
        match self {
            PresetAction::Home => None,
            PresetAction::OneX => Some(1.0),
            PresetAction::TwoX => Some(2.0),
        }
    }
}

impl FromStr for PresetAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fit" | "home" => Ok(PresetAction::Home),
            "1x" => Ok(PresetAction::OneX),
            "2x" => Ok(PresetAction::TwoX),
            other => Err(format!("unknown preset action '{}'", other)),
        }
    }
}

impl fmt::Display for PresetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PresetAction::Home => "home",
            PresetAction::OneX => "1x",
            PresetAction::TwoX => "2x",
        };
        f.write_str(name)
    }
}

/// What a click on a row means.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickTarget {
    /// Expand or collapse a folder
    FolderToggle(NodeId),
    /// Run a zoom preset
    Preset(PresetAction),
    /// Open an image source
    OpenLeaf(String),
    /// A leaf with nothing to do beyond becoming current
    Plain,
}

impl ClickTarget {
    /// Whether the clicked row may become the current leaf.
    pub fn marks_current(&self) -> bool {
        !matches!(self, ClickTarget::FolderToggle(_))
    }
}

/// Classify a click on `id`. Returns `None` for ids not in the tree.
///
/// Folders win over everything; a recognised preset wins over an image
/// source; an unrecognised action string is ignored.
pub fn classify(tree: &SourceTree, id: NodeId) -> Option<ClickTarget> {
    let entry = tree.get(id)?;
    let target = match &entry.kind {
        EntryKind::Folder { .. } => ClickTarget::FolderToggle(id),
        EntryKind::Leaf { source, .. } => match (entry.preset(), source) {
            (Some(preset), _) => ClickTarget::Preset(preset),
            (None, Some(source)) => ClickTarget::OpenLeaf(source.clone()),
            (None, None) => ClickTarget::Plain,
        },
    };
    Some(target)
}
