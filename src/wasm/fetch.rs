//! Browser source providers: HTTP fetch and inline JSON.

use slideview_tree::SourceNode;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, Response, Url};

use crate::config::SourcesConfig;
use crate::error::SourceError;
use crate::sources::{parse_sources, SourceChain, SourceFuture};

fn network(e: JsValue) -> SourceError {
    SourceError::Network(format!("{:?}", e))
}

fn window() -> Result<web_sys::Window, SourceError> {
    web_sys::window().ok_or_else(|| SourceError::Network("no window".into()))
}

async fn fetch_sources(url: &str) -> Result<Vec<SourceNode>, SourceError> {
    let window = window()?;
    let base = window.location().href().map_err(network)?;
    let resolved = Url::new_with_base(url, &base).map_err(network)?.href();

    let init = RequestInit::new();
    init.set_method("GET");
    init.set_cache(RequestCache::NoCache);
    let request = Request::new_with_str_and_init(&resolved, &init).map_err(network)?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network)?
        .dyn_into()
        .map_err(network)?;
    if !response.ok() {
        return Err(SourceError::Http {
            status: response.status(),
        });
    }

    let body = JsFuture::from(response.text().map_err(network)?)
        .await
        .map_err(network)?;
    let text = body
        .as_string()
        .ok_or_else(|| SourceError::Network("response body is not text".into()))?;
    parse_sources(&text)
}

fn inline_sources(id: &str) -> Result<Vec<SourceNode>, SourceError> {
    let document = window()?
        .document()
        .ok_or_else(|| SourceError::Network("no document".into()))?;
    let text = document
        .get_element_by_id(id)
        .and_then(|element| element.text_content())
        .ok_or_else(|| SourceError::Missing { id: id.to_string() })?;
    parse_sources(&text)
}

/// Fetch the list from `url`, resolved against the page, bypassing the cache.
pub fn fetch_provider(url: String) -> impl FnOnce() -> SourceFuture {
    move || -> SourceFuture { Box::pin(async move { fetch_sources(&url).await }) }
}

/// Read the list from the text of element `#id`.
pub fn inline_provider(id: String) -> impl FnOnce() -> SourceFuture {
    move || -> SourceFuture { Box::pin(async move { inline_sources(&id) }) }
}

/// The page's chain: remote list first, inline list second.
pub fn page_chain(config: &SourcesConfig) -> SourceChain {
    SourceChain::new()
        .with_provider(config.url.clone(), fetch_provider(config.url.clone()))
        .with_provider(
            format!("#{}", config.inline_fallback_id),
            inline_provider(config.inline_fallback_id.clone()),
        )
}
