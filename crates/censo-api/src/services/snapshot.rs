//! Server-side render of the map view.
//!
//! The view runs against a recording surface; whatever it placed on the
//! surface is what the browser script draws.

use censo_core::filter::FilterCriteria;
use censo_core::models::MarkerSet;
use censo_core::view::{MapView, PlacedMarker, RecordingSurface, ViewConfig};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewSnapshot {
    /// Counter value after the render
    pub counter: usize,
    pub markers: Vec<PlacedMarker>,
    /// `[min_lng, min_lat, max_lng, max_lat]`, absent when nothing was plotted
    pub bounds: Option<[f64; 4]>,
    /// Banner left up by the render, if any
    pub notice: Option<String>,
}

pub fn render_snapshot(
    config: &ViewConfig,
    markers: MarkerSet,
    criteria: &FilterCriteria,
) -> ViewSnapshot {
    let surface = RecordingSurface::new().with_filters(criteria.clone());
    let Some(mut view) = MapView::mount(config.clone(), Some(surface), markers) else {
        return ViewSnapshot::default();
    };

    if !criteria.is_empty() {
        view.apply_filter();
    }

    let notice = view.banner().map(|b| b.message.clone());
    let surface = view.unmount();

    // A filter that matched nothing leaves the initial fit in place; only
    // report bounds for markers actually on the layer.
    let bounds = if surface.markers.is_empty() {
        None
    } else {
        surface.fitted.map(|(rect, _)| {
            let (min, max) = (rect.min(), rect.max());
            [min.x, min.y, max.x, max.y]
        })
    };

    ViewSnapshot {
        counter: surface.counter.unwrap_or(0),
        markers: surface.markers,
        bounds,
        notice,
    }
}
