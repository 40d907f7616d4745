use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use censo_core::filter::FilterCriteria;
use censo_core::models::{FilterOptions, MarkerSet, ProjectRef};

use crate::dto::{MarkerQuery, MarkersResponse};
use crate::error::ApiError;
use crate::services::{render_snapshot, MarkerProvider};
use crate::state::AppState;

pub async fn list_markers(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
    query: Result<Query<MarkerQuery>, QueryRejection>,
) -> Result<Json<MarkersResponse>, ApiError> {
    let Query(query) = query.map_err(|e| {
        tracing::warn!(project = %project_id, error = %e, "Rejected marker query");
        ApiError::bad_request("Invalid filter query").with_details(e.body_text())
    })?;
    let criteria = FilterCriteria::from(query);
    tracing::info!(project = %project_id, ?criteria, "Listing census markers");

    let project_map = MarkerProvider::load(&state, &ProjectRef::parse(&project_id)).await?;
    let markers = MarkerSet::ingest(&project_map.payload.markers);

    let records = criteria.apply(&markers).into_iter().cloned().collect();
    let snapshot = render_snapshot(&state.view, markers.clone(), &criteria);

    Ok(Json(MarkersResponse {
        project: project_map.project.identifier,
        total: markers.len(),
        matched: snapshot.counter,
        plotted: snapshot.markers.len(),
        bounds: snapshot.bounds,
        notice: snapshot.notice,
        records,
        markers: snapshot.markers,
        options: FilterOptions {
            localities: project_map.payload.localities,
            building_types: project_map.payload.building_types,
            statuses: markers.status_options(),
        },
    }))
}
