//! Construction options for the deep-zoom widget.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which the widget expects its tile source.
pub const TILE_SOURCES_KEY: &str = "tileSources";

/// Key of the tile-edge smoothing threshold, disabled by default.
pub const SMOOTH_TILE_EDGES_KEY: &str = "smoothTileEdgesMinZoom";

/// Fixed widget configuration, serialized with the widget's own key names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerOptions {
    /// Id of the container element
    pub id: String,
    /// Where the widget finds its button images
    pub prefix_url: String,
    pub immediate_render: bool,
    pub always_blend: bool,
    /// Tile blend duration in seconds
    pub blend_time: f64,
    /// `None` disables tile-edge smoothing entirely (infinite threshold,
    /// which JSON cannot carry)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smooth_tile_edges_min_zoom: Option<f64>,
    pub max_zoom_pixel_ratio: f64,
    pub visibility_ratio: f64,
    pub constrain_during_pan: bool,
    pub load_tiles_with_ajax: bool,
    pub cross_origin_policy: String,
    /// Concurrent tile requests
    pub image_loader_limit: u32,
    pub max_image_cache_count: u32,
    pub show_navigator: bool,
    pub show_rotation_control: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            id: "openseadragon".to_string(),
            prefix_url: "https://cdnjs.cloudflare.com/ajax/libs/openseadragon/5.0.1/images/"
                .to_string(),
            immediate_render: true,
            always_blend: true,
            blend_time: 0.35,
            smooth_tile_edges_min_zoom: None,
            max_zoom_pixel_ratio: 1.0,
            visibility_ratio: 1.0,
            constrain_during_pan: true,
            load_tiles_with_ajax: true,
            cross_origin_policy: "Anonymous".to_string(),
            image_loader_limit: 12,
            max_image_cache_count: 512,
            show_navigator: true,
            show_rotation_control: true,
        }
    }
}

impl ViewerOptions {
    /// Options for the container with the given id.
    pub fn for_container(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Build the widget's option object.
    ///
    /// `tile_source` becomes `tileSources`; `overrides` are then merged key by
    /// key on top, replacing whole values.
    pub fn to_object(&self, tile_source: &str, overrides: &Map<String, Value>) -> Map<String, Value> {
        let mut object = match serde_json::to_value(self) {
            Ok(Value::Object(object)) => object,
            _ => Map::new(),
        };
        object.insert(
            TILE_SOURCES_KEY.to_string(),
            Value::String(tile_source.to_string()),
        );
        for (key, value) in overrides {
            object.insert(key.clone(), value.clone());
        }
        object
    }

    /// Whether the built object still needs the infinite smoothing
    /// threshold patched in after conversion.
    pub fn needs_infinite_smoothing(object: &Map<String, Value>) -> bool {
        !object.contains_key(SMOOTH_TILE_EDGES_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_serialize_with_widget_names() {
        let object = ViewerOptions::default().to_object("http://x/info.json", &Map::new());

        assert_eq!(object["id"], json!("openseadragon"));
        assert_eq!(object["tileSources"], json!("http://x/info.json"));
        assert_eq!(object["immediateRender"], json!(true));
        assert_eq!(object["alwaysBlend"], json!(true));
        assert_eq!(object["blendTime"], json!(0.35));
        assert_eq!(object["maxZoomPixelRatio"], json!(1.0));
        assert_eq!(object["visibilityRatio"], json!(1.0));
        assert_eq!(object["constrainDuringPan"], json!(true));
        assert_eq!(object["loadTilesWithAjax"], json!(true));
        assert_eq!(object["crossOriginPolicy"], json!("Anonymous"));
        assert_eq!(object["imageLoaderLimit"], json!(12));
        assert_eq!(object["maxImageCacheCount"], json!(512));
        assert_eq!(object["showNavigator"], json!(true));
        assert_eq!(object["showRotationControl"], json!(true));
        assert!(ViewerOptions::needs_infinite_smoothing(&object));
    }

    #[test]
    fn test_overrides_win() {
        let overrides = json!({
            "showNavigator": false,
            "imageLoaderLimit": 4,
            "smoothTileEdgesMinZoom": 1.1,
            "debugMode": true
        });
        let Value::Object(overrides) = overrides else {
            panic!("expected object");
        };

        let object = ViewerOptions::for_container("viewer").to_object("src", &overrides);

        assert_eq!(object["id"], json!("viewer"));
        assert_eq!(object["showNavigator"], json!(false));
        assert_eq!(object["imageLoaderLimit"], json!(4));
        assert_eq!(object["debugMode"], json!(true));
        assert!(!ViewerOptions::needs_infinite_smoothing(&object));
    }

    #[test]
    fn test_partial_options_fill_defaults() {
        let options: ViewerOptions = serde_json::from_str(r#"{"blendTime": 0.1}"#).unwrap();
        assert_eq!(options.blend_time, 0.1);
        assert_eq!(options.image_loader_limit, 12);
    }
}
