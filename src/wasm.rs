//! Browser entry point: wires the page elements to the viewer, tree and sidebar.

mod dom;
mod fetch;
mod osd;
mod storage;
mod timer;

use std::cell::RefCell;
use std::rc::Rc;

use slideview_viewer::{Scheduler, ViewerSession};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement, UrlSearchParams, Window};

use crate::config::AppConfig;
use crate::error::{optional_feature, BootError};
use crate::sidebar::Sidebar;
use crate::storage::{resolve_initial_source, KeyValueStore};
use crate::tree_controller::TreeController;
use dom::{DomClasses, DomTreeSurface};
use storage::LocalStorage;
use timer::BrowserScheduler;

type PageTree = Rc<RefCell<TreeController<DomTreeSurface>>>;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Trace).is_err() {
        web_sys::console::warn_1(&"SlideView: logger already initialized".into());
    }

    let config = AppConfig::load_from_page();
    log::set_max_level(config.log_level.to_level_filter());
    log::info!("SlideView starting");

    on_dom_ready(move || {
        if let Err(e) = boot(&config) {
            log::error!("SlideView initialization aborted: {}", e);
        }
    });
}

fn on_dom_ready(ready: impl FnOnce() + 'static) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("No document, nothing to initialize");
        return;
    };
    if document.ready_state() != "loading" {
        ready();
        return;
    }
    let callback = Closure::once_into_js(ready);
    if let Err(e) =
        document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
    {
        log::error!("Could not wait for DOMContentLoaded: {:?}", e);
    }
}

fn query_param(window: &Window, name: &str) -> Option<String> {
    let search = window.location().search().ok()?;
    UrlSearchParams::new_with_str(&search).ok()?.get(name)
}

fn boot(config: &AppConfig) -> Result<(), BootError> {
    let window = web_sys::window().ok_or_else(|| BootError::Dom("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| BootError::Dom("no document".into()))?;
    let elements = &config.elements;

    let viewer_element = document
        .get_element_by_id(&elements.viewer)
        .ok_or_else(|| BootError::MissingElement(format!("#{}", elements.viewer)))?;
    let tree_element = document.get_element_by_id(&elements.tree);
    let search_input = document
        .get_element_by_id(&elements.search)
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok());
    let app_root = document.query_selector(&elements.app_root).ok().flatten();
    let toggle = optional_feature(
        "Sidebar toggle",
        dom::ensure_toggle_button(&document, elements),
    );

    let store: Rc<dyn KeyValueStore> = Rc::new(LocalStorage::open());
    let query = query_param(&window, &config.initial_source.query_param);
    let initial = resolve_initial_source(query.as_deref(), store.as_ref(), &config.initial_source);
    log::info!("Initial source: {}", initial);

    let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new());
    let session = osd::init_viewer(&initial, &viewer_element, config, Rc::clone(&scheduler))?;

    match tree_element {
        Some(tree_element) => {
            let config = config.clone();
            let session = session.clone();
            wasm_bindgen_futures::spawn_local(async move {
                init_tree(document, tree_element, search_input, session, store, &config).await;
            });
        }
        None => log::debug!("No #{} element, source tree disabled", elements.tree),
    }

    match (app_root, toggle) {
        (Some(app_root), Some(toggle)) => init_sidebar(app_root, &toggle, &session, scheduler, config),
        _ => log::debug!("Sidebar toggle not available"),
    }

    Ok(())
}

async fn init_tree(
    document: Document,
    tree_element: Element,
    search_input: Option<HtmlInputElement>,
    session: ViewerSession,
    store: Rc<dyn KeyValueStore>,
    config: &AppConfig,
) {
    let chain = fetch::page_chain(&config.sources);
    let surface = DomTreeSurface::new(document, tree_element.clone());
    let controller = TreeController::load(
        chain,
        surface,
        store,
        config.initial_source.storage_key.clone(),
    )
    .await
    .with_viewer(session.viewer())
    .with_blur(session.blur().clone());
    log::info!(
        "Source tree ready with {} entries",
        controller.view().tree().len()
    );

    let tree: PageTree = Rc::new(RefCell::new(controller));
    if let Some(search_input) = search_input {
        bind_search(&search_input, Rc::clone(&tree));
    }
    bind_clicks(&tree_element, tree);
}

fn bind_search(input: &HtmlInputElement, tree: PageTree) {
    let source = input.clone();
    let handler = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        let shown = tree.borrow_mut().search(&source.value());
        log::debug!("Search shows {} leaves", shown);
    });
    if let Err(e) = input.add_event_listener_with_callback("input", handler.as_ref().unchecked_ref())
    {
        log::error!("Could not bind search input: {:?}", e);
    }
    handler.forget();
}

fn bind_clicks(root: &Element, tree: PageTree) {
    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(id) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|t| dom::row_id(&t))
        else {
            return;
        };
        if let Some(target) = tree.borrow_mut().click(id) {
            log::debug!("Clicked {}: {:?}", id, target);
        }
    });
    if let Err(e) = root.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref()) {
        log::error!("Could not bind tree clicks: {:?}", e);
    }
    handler.forget();
}

fn init_sidebar(
    app_root: Element,
    toggle: &Element,
    session: &ViewerSession,
    scheduler: Rc<dyn Scheduler>,
    config: &AppConfig,
) {
    let sidebar = Sidebar::new(
        Rc::new(DomClasses::new(app_root)),
        Some(session.viewer()),
        scheduler,
        config.timing.sidebar_refit_ms,
    );
    let handler = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        sidebar.toggle();
    });
    if let Err(e) = toggle.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref()) {
        log::error!("Could not bind sidebar toggle: {:?}", e);
    }
    handler.forget();
}
