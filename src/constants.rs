//! Global constants for SlideView

/// Source list fetched at startup, relative to the page
pub const DEFAULT_SOURCES_URL: &str = "./iiif-sources/samples.json";

/// Element holding the inline source list used when the fetch fails
pub const DEFAULT_INLINE_FALLBACK_ID: &str = "iiif-sources-inline";

/// Image opened when neither the query string nor storage names one
pub const DEFAULT_IIIF_SOURCE: &str = "http://localhost:5050/iiif/CMU-1.svs/info.json";

/// Storage key of the last opened image source
pub const LAST_SOURCE_KEY: &str = "lastIiif";

/// Query parameter that selects the initial image source
pub const SOURCE_QUERY_PARAM: &str = "iiif";

/// Element holding the optional inline JSON configuration
pub const CONFIG_ELEMENT_ID: &str = "slideview-config";

/// Delay before re-fitting after the sidebar moves, matching its CSS transition
pub const DEFAULT_SIDEBAR_REFIT_MS: u32 = 220;

/// Class on the app root while the sidebar is collapsed
pub const SIDEBAR_COLLAPSED_CLASS: &str = "sidebar-collapsed";

/// Page elements SlideView binds to.
pub mod elements {
    /// Viewer container id (required)
    pub const VIEWER: &str = "openseadragon";
    /// Tree container id
    pub const TREE: &str = "tree";
    /// Search input id
    pub const SEARCH: &str = "tree-search";
    /// App root selector
    pub const APP_ROOT: &str = ".app";
    /// Sidebar toggle button id
    pub const TOGGLE_BUTTON: &str = "btn-toggle-sidebar";
    /// Toolbar selector that receives a generated toggle button
    pub const TOOLBAR: &str = ".viewer__toolbar";
}

/// The generated sidebar toggle button.
pub mod toggle_button {
    pub const CLASS: &str = "bx--btn bx--btn--ghost";
    pub const TITLE: &str = "Toggle sidebar";
    pub const LABEL: &str = "☰";
}
