//! The rendering capability the map view drives.
//!
//! A `MapSurface` is the slippy map plus the page chrome around it: the
//! marker layer, the counter, the banner area and the filter controls.

use geo::Rect;
use serde::{Deserialize, Serialize};

use super::banner::{Banner, BannerId};
use crate::error::Result;
use crate::filter::FilterCriteria;
use crate::models::{LatLng, RecordId};
use crate::popup::PopupOptions;
use crate::style::{MarkerStyle, StyleKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Position name as understood by the browser map library
    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::TopLeft => "topleft",
            Corner::TopRight => "topright",
            Corner::BottomLeft => "bottomleft",
            Corner::BottomRight => "bottomright",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
            max_zoom: 19,
        }
    }
}

/// Map construction options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub zoom_control: Corner,
    pub scroll_wheel_zoom: bool,
    pub tile_layer: TileLayer,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: LatLng {
                lat: 4.5709,
                lng: -74.2973,
            },
            zoom: 13,
            min_zoom: 5,
            max_zoom: 19,
            zoom_control: Corner::TopRight,
            scroll_wheel_zoom: true,
            tile_layer: TileLayer::default(),
        }
    }
}

/// Viewport fitting applied after a render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitOptions {
    pub padding: [u32; 2],
    pub max_zoom: u8,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            padding: [50, 50],
            max_zoom: 16,
        }
    }
}

/// A marker ready to be placed on the layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedMarker {
    pub id: RecordId,
    pub position: LatLng,
    pub kind: StyleKind,
    pub style: MarkerStyle,
    pub popup_html: String,
    pub popup: PopupOptions,
}

pub trait MapSurface {
    /// Create the map, its tile layer and an empty marker layer
    fn create_map(&mut self, options: &MapOptions) -> Result<()>;

    /// Remove every marker from the layer. Must be safe on an empty layer.
    fn clear_markers(&mut self) -> Result<()>;

    fn add_marker(&mut self, marker: PlacedMarker) -> Result<()>;

    fn fit_bounds(&mut self, bounds: Rect<f64>, options: FitOptions) -> Result<()>;

    /// Recompute the map size after the container changed
    fn invalidate_size(&mut self);

    fn set_counter(&mut self, count: usize);

    fn show_banner(&mut self, banner: &Banner);

    fn remove_banner(&mut self, id: BannerId);

    /// Read the current values of the filter controls
    fn read_filters(&self) -> Result<FilterCriteria>;

    fn clear_filters(&mut self) -> Result<()>;
}
