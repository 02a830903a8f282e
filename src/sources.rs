//! Loading the source list through an ordered fallback chain.
//!
//! Providers are tried in order and the first success wins. Every failure is
//! logged and swallowed; when all providers fail the chain yields an empty
//! list, so callers always get something to render.

use std::future::Future;
use std::pin::Pin;

use slideview_tree::SourceNode;
use web_time::Instant;

use crate::error::SourceError;

/// Future returned by a provider.
pub type SourceFuture = Pin<Box<dyn Future<Output = Result<Vec<SourceNode>, SourceError>>>>;

/// A deferred attempt at producing the source list.
pub type SourceProvider = Box<dyn FnOnce() -> SourceFuture>;

/// Ordered list of providers.
#[derive(Default)]
pub struct SourceChain {
    providers: Vec<(String, SourceProvider)>,
}

impl SourceChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider, tried after every provider added before it.
    pub fn with_provider<F>(mut self, label: impl Into<String>, provider: F) -> Self
    where
        F: FnOnce() -> SourceFuture + 'static,
    {
        self.providers.push((label.into(), Box::new(provider)));
        self
    }

    /// Append a provider that is already resolved.
    pub fn with_result(
        self,
        label: impl Into<String>,
        result: Result<Vec<SourceNode>, SourceError>,
    ) -> Self {
        self.with_provider(label, move || Box::pin(async move { result }))
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Run the providers in order until one succeeds.
    pub async fn load(self) -> Vec<SourceNode> {
        for (label, provider) in self.providers {
            let started = Instant::now();
            let result = provider().await;
            log::debug!(
                "Source provider '{}' took {:.1} ms",
                label,
                started.elapsed().as_secs_f64() * 1000.0
            );
            match result {
                Ok(nodes) => {
                    log::info!("Loaded {} source nodes from {}", nodes.len(), label);
                    return nodes;
                }
                Err(e) => log::warn!("Failed to load sources from {}: {}", label, e),
            }
        }
        log::warn!("No source list available, tree will be empty");
        Vec::new()
    }
}

/// Parse a source list document.
pub fn parse_sources(json: &str) -> Result<Vec<SourceNode>, SourceError> {
    Ok(serde_json::from_str(json)?)
}

/// Provider reading a source list from a local file.
#[cfg(not(target_arch = "wasm32"))]
pub fn file_provider(path: std::path::PathBuf) -> impl FnOnce() -> SourceFuture {
    move || -> SourceFuture {
        Box::pin(async move {
            let json = std::fs::read_to_string(&path)?;
            parse_sources(&json)
        })
    }
}
