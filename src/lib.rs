//! SlideView - a whole-slide image viewer page
//!
//! Wires an OpenSeadragon deep-zoom viewer to a searchable tree of IIIF image
//! sources, with a loading blur, a zoom floor that keeps the image filling the
//! viewport, and a collapsible sidebar. Everything except the browser glue in
//! `wasm` runs natively and is tested without a browser.

pub mod config;
pub mod constants;
pub mod error;
pub mod sidebar;
pub mod sources;
pub mod storage;
pub mod tree_controller;

pub use config::AppConfig;
pub use error::{BootError, SourceError, StorageError};
pub use sidebar::Sidebar;
pub use sources::{parse_sources, SourceChain};
pub use storage::{resolve_initial_source, KeyValueStore, MemoryStore};
pub use tree_controller::{apply_preset, TreeController};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
