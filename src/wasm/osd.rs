//! OpenSeadragon bindings and viewer construction.
#![allow(unsafe_code)]

use std::rc::Rc;

use js_sys::{Function, Reflect};
use serde_json::Value;
use slideview_viewer::options::SMOOTH_TILE_EDGES_KEY;
use slideview_viewer::{
    BlurEffect, Bounds, Scheduler, Viewer, ViewerEvent, ViewerOptions, ViewerSession,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use super::dom::DomClasses;
use crate::config::AppConfig;
use crate::error::BootError;

#[wasm_bindgen]
extern "C" {
    /// A viewer instance created by `OpenSeadragon(options)`.
    pub type OsdViewer;

    #[wasm_bindgen(catch, js_name = OpenSeadragon)]
    fn create_viewer(options: &JsValue) -> Result<OsdViewer, JsValue>;

    #[wasm_bindgen(method, js_name = addHandler)]
    fn add_handler(this: &OsdViewer, event: &str, handler: &Function);

    #[wasm_bindgen(method, js_name = open)]
    fn open_source(this: &OsdViewer, source: &str);

    #[wasm_bindgen(method, getter)]
    fn world(this: &OsdViewer) -> OsdWorld;

    #[wasm_bindgen(method, getter)]
    fn viewport(this: &OsdViewer) -> OsdViewport;

    pub type OsdWorld;

    #[wasm_bindgen(method, js_name = getItemCount)]
    fn get_item_count(this: &OsdWorld) -> u32;

    #[wasm_bindgen(method, js_name = getHomeBounds)]
    fn get_home_bounds(this: &OsdWorld) -> OsdRect;

    pub type OsdViewport;

    #[wasm_bindgen(method, js_name = fitBounds)]
    fn fit_bounds(this: &OsdViewport, bounds: &OsdRect, immediately: bool);

    #[wasm_bindgen(method, js_name = getHomeZoom)]
    fn get_home_zoom(this: &OsdViewport) -> f64;

    #[wasm_bindgen(method, js_name = getZoom)]
    fn get_zoom(this: &OsdViewport) -> f64;

    #[wasm_bindgen(method, setter = minZoomLevel)]
    fn set_min_zoom_level(this: &OsdViewport, zoom: f64);

    #[wasm_bindgen(method, js_name = zoomTo)]
    fn zoom_to(this: &OsdViewport, zoom: f64, ref_point: &JsValue, immediately: bool);

    #[wasm_bindgen(method, js_name = goHome)]
    fn go_home(this: &OsdViewport, immediately: bool);

    #[wasm_bindgen(js_namespace = OpenSeadragon, js_name = Rect)]
    pub type OsdRect;

    #[wasm_bindgen(constructor, js_namespace = OpenSeadragon, js_class = "Rect")]
    fn new(x: f64, y: f64, width: f64, height: f64) -> OsdRect;

    #[wasm_bindgen(method, getter)]
    fn x(this: &OsdRect) -> f64;

    #[wasm_bindgen(method, getter)]
    fn y(this: &OsdRect) -> f64;

    #[wasm_bindgen(method, getter)]
    fn width(this: &OsdRect) -> f64;

    #[wasm_bindgen(method, getter)]
    fn height(this: &OsdRect) -> f64;
}

/// [`Viewer`] over a live OpenSeadragon instance.
pub struct OsdHandle {
    viewer: OsdViewer,
}

impl Viewer for OsdHandle {
    fn item_count(&self) -> usize {
        self.viewer.world().get_item_count() as usize
    }

    fn home_bounds(&self) -> Bounds {
        let rect = self.viewer.world().get_home_bounds();
        Bounds::new(rect.x(), rect.y(), rect.width(), rect.height())
    }

    fn fit_bounds(&self, bounds: Bounds, immediately: bool) {
        let rect = OsdRect::new(bounds.x, bounds.y, bounds.width, bounds.height);
        self.viewer.viewport().fit_bounds(&rect, immediately);
    }

    fn home_zoom(&self) -> f64 {
        self.viewer.viewport().get_home_zoom()
    }

    fn zoom(&self) -> f64 {
        self.viewer.viewport().get_zoom()
    }

    fn set_min_zoom_level(&self, zoom: f64) {
        self.viewer.viewport().set_min_zoom_level(zoom);
    }

    fn zoom_to(&self, zoom: f64, immediately: bool) {
        self.viewer
            .viewport()
            .zoom_to(zoom, &JsValue::NULL, immediately);
    }

    fn go_home(&self, immediately: bool) {
        self.viewer.viewport().go_home(immediately);
    }

    fn open(&self, source: &str) {
        self.viewer.open_source(source);
    }
}

/// Construct the widget in `container` showing `initial_source`, and wire
/// the zoom lock and the loading blur to its events.
pub fn init_viewer(
    initial_source: &str,
    container: &Element,
    config: &AppConfig,
    scheduler: Rc<dyn Scheduler>,
) -> Result<ViewerSession, BootError> {
    let options = ViewerOptions::for_container(container.id())
        .to_object(initial_source, &config.viewer_overrides);
    let infinite_smoothing = ViewerOptions::needs_infinite_smoothing(&options);

    let js_options = js_sys::JSON::parse(&Value::Object(options).to_string())
        .map_err(|e| BootError::Viewer(format!("invalid options: {:?}", e)))?;
    if infinite_smoothing {
        Reflect::set(
            &js_options,
            &JsValue::from_str(SMOOTH_TILE_EDGES_KEY),
            &JsValue::from_f64(f64::INFINITY),
        )
        .map_err(|e| BootError::Viewer(format!("{:?}", e)))?;
    }

    let viewer = create_viewer(&js_options).map_err(|e| BootError::Viewer(format!("{:?}", e)))?;

    let blur = BlurEffect::new(
        Rc::new(DomClasses::new(container.clone())),
        scheduler,
        config.timing.blur_idle_ms,
    );
    let session = ViewerSession::new(
        Rc::new(OsdHandle {
            viewer: viewer.clone(),
        }),
        blur,
    );

    for event in ViewerEvent::ALL {
        let session = session.clone();
        let handler = Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| session.handle(event));
        viewer.add_handler(event.name(), handler.as_ref().unchecked_ref());
        handler.forget();
    }

    log::info!("Viewer created in #{}", container.id());
    Ok(session)
}
