//! Configuration for SlideView.
//!
//! Every setting has a default matching the stock page, so a deployment only
//! writes the keys it changes. In the browser the JSON lives in an inline
//! element (`#slideview-config`); the outline tool reads it from a file.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{self, elements};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Version of the configuration format
    pub version: u32,

    /// Log verbosity
    pub log_level: LogLevel,

    /// Where the source list comes from
    pub sources: SourcesConfig,

    /// How the first image is chosen and remembered
    pub initial_source: InitialSourceConfig,

    /// Page elements to bind
    pub elements: ElementsConfig,

    /// Timer delays
    pub timing: TimingConfig,

    /// Widget options merged over the built-in ones
    pub viewer_overrides: Map<String, Value>,
}

/// Source list locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// JSON file URL, relative to the page
    pub url: String,
    /// Id of the inline JSON fallback element
    pub inline_fallback_id: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            url: constants::DEFAULT_SOURCES_URL.to_string(),
            inline_fallback_id: constants::DEFAULT_INLINE_FALLBACK_ID.to_string(),
        }
    }
}

/// Initial image selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialSourceConfig {
    /// Query parameter that overrides everything else
    pub query_param: String,
    /// Storage key of the last opened source
    pub storage_key: String,
    /// Source used when nothing else applies
    pub default_source: String,
}

impl Default for InitialSourceConfig {
    fn default() -> Self {
        Self {
            query_param: constants::SOURCE_QUERY_PARAM.to_string(),
            storage_key: constants::LAST_SOURCE_KEY.to_string(),
            default_source: constants::DEFAULT_IIIF_SOURCE.to_string(),
        }
    }
}

/// Element ids and selectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementsConfig {
    pub viewer: String,
    pub tree: String,
    pub search: String,
    /// CSS selector
    pub app_root: String,
    pub toggle_button: String,
    /// CSS selector
    pub toolbar: String,
}

impl Default for ElementsConfig {
    fn default() -> Self {
        Self {
            viewer: elements::VIEWER.to_string(),
            tree: elements::TREE.to_string(),
            search: elements::SEARCH.to_string(),
            app_root: elements::APP_ROOT.to_string(),
            toggle_button: elements::TOGGLE_BUTTON.to_string(),
            toolbar: elements::TOOLBAR.to_string(),
        }
    }
}

/// Timer delays in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Quiet period before the loading blur clears
    pub blur_idle_ms: u32,
    /// Wait after a sidebar toggle before re-fitting
    pub sidebar_refit_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            blur_idle_ms: slideview_viewer::DEFAULT_BLUR_IDLE_MS,
            sidebar_refit_ms: constants::DEFAULT_SIDEBAR_REFIT_MS,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            sources: SourcesConfig::default(),
            initial_source: InitialSourceConfig::default(),
            elements: ElementsConfig::default(),
            timing: TimingConfig::default(),
            viewer_overrides: Map::new(),
        }
    }
}

impl AppConfig {
    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Load configuration from a JSON file, falling back to defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from {:?}", path);
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Load configuration from the page's inline config element (WASM only).
    /// Falls back to defaults when the element is absent or invalid.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_page() -> Self {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return Self::default();
        };
        let Some(json) = document
            .get_element_by_id(constants::CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            log::debug!("No inline configuration, using defaults");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded configuration from #{}", constants::CONFIG_ELEMENT_ID);
                config
            }
            Err(e) => {
                log::warn!("Failed to parse inline configuration: {}", e);
                Self::default()
            }
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.sources.url, "./iiif-sources/samples.json");
        assert_eq!(config.initial_source.storage_key, "lastIiif");
        assert_eq!(config.timing.blur_idle_ms, 120);
        assert_eq!(config.timing.sidebar_refit_ms, 220);
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_json(
            r#"{
                "log_level": "debug",
                "sources": { "url": "/lists/pathology.json" },
                "timing": { "blur_idle_ms": 200 },
                "viewer_overrides": { "showNavigator": false }
            }"#,
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.sources.url, "/lists/pathology.json");
        assert_eq!(config.sources.inline_fallback_id, "iiif-sources-inline");
        assert_eq!(config.timing.blur_idle_ms, 200);
        assert_eq!(config.timing.sidebar_refit_ms, 220);
        assert_eq!(config.viewer_overrides["showNavigator"], Value::Bool(false));
    }

    #[test]
    fn test_newer_version_rejected() {
        let err = AppConfig::from_json(r#"{"version": 99}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            }
        ));
    }

    #[test]
    fn test_json_roundtrip_keeps_overrides() {
        let mut config = AppConfig::default();
        config
            .viewer_overrides
            .insert("blendTime".into(), serde_json::json!(0.1));

        let parsed = AppConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }
}
