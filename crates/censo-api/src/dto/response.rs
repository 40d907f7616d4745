use censo_core::models::{FilterOptions, MarkerRecord};
use censo_core::view::PlacedMarker;
use serde::Serialize;

/// Filtered census markers for one project
#[derive(Debug, Serialize)]
pub struct MarkersResponse {
    pub project: String,
    /// Records loaded for the project
    pub total: usize,
    /// Records matching the filters (the counter value)
    pub matched: usize,
    /// Matching records that landed on the map
    pub plotted: usize,
    /// `[min_lng, min_lat, max_lng, max_lat]` of the plotted markers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<[f64; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub records: Vec<MarkerRecord>,
    pub markers: Vec<PlacedMarker>,
    pub options: FilterOptions,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            service: "censo-api",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
