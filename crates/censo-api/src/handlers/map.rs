use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Html,
};
use censo_core::filter::FilterCriteria;
use censo_core::models::{FilterOptions, MarkerSet, ProjectRef};

use crate::error::ApiError;
use crate::services::{render_map_page, render_snapshot, MarkerProvider};
use crate::state::AppState;

pub async fn show_map(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> Result<Html<String>, ApiError> {
    tracing::info!(project = %project_id, "Rendering census map");

    let project_map = MarkerProvider::load(&state, &ProjectRef::parse(&project_id)).await?;
    let markers = MarkerSet::ingest(&project_map.payload.markers);

    let options = FilterOptions {
        localities: project_map.payload.localities,
        building_types: project_map.payload.building_types,
        statuses: markers.status_options(),
    };
    let snapshot = render_snapshot(&state.view, markers.clone(), &FilterCriteria::default());

    let html = render_map_page(&project_map.project, &markers, &options, &snapshot, &state.view)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to render census map page");
            ApiError::from(e)
        })?;

    Ok(Html(html))
}
