use std::collections::HashMap;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use censo_api::{create_router, AppState};
use censo_core::config::{FieldMapping, LayeredConfig};
use censo_core::models::{CensusIssue, Project};
use censo_store::memory::MemoryCensusStore;
use serde_json::Value;
use tower::ServiceExt;

const TRACKER: i32 = 9;

fn census_issue(id: i32, status_id: i32, lat: &str, lng: &str, locality: &str) -> CensusIssue {
    let fields = FieldMapping::default();
    let mut custom_values = HashMap::new();
    custom_values.insert(fields.latitude, lat.to_string());
    custom_values.insert(fields.longitude, lng.to_string());
    custom_values.insert(fields.locality, locality.to_string());
    custom_values.insert(fields.address, format!("Calle {} #10-20", id));
    custom_values.insert(fields.building_type, "House".to_string());

    CensusIssue {
        id,
        subject: format!("Census {}", id),
        status_id,
        status_name: if status_id == 12 { "Rejected" } else { "In progress" }.to_string(),
        updated_on: None,
        custom_values,
    }
}

fn seeded_store() -> MemoryCensusStore {
    let fields = FieldMapping::default();
    let store = MemoryCensusStore::new();
    store.add_project(Project {
        id: 2,
        name: "Census 2024".to_string(),
        identifier: "censo".to_string(),
    });

    store.add_issue(2, TRACKER, false, census_issue(1, 12, "4.60", "-74.08", "A"));
    store.add_issue(2, TRACKER, false, census_issue(2, 5, "4.61", "-74.09", "B"));
    store.add_issue(2, TRACKER, false, census_issue(3, 5, "x", "-74.0", "A"));
    // Closed and other-tracker issues never reach the map
    store.add_issue(2, TRACKER, true, census_issue(4, 5, "4.62", "-74.1", "A"));
    store.add_issue(2, 1, false, census_issue(5, 5, "4.63", "-74.1", "A"));

    store.set_possible_values(fields.locality, vec!["A".to_string(), "B".to_string()]);
    store.set_possible_values(fields.building_type, vec!["House".to_string()]);
    store
}

fn app(store: MemoryCensusStore) -> Router {
    let state = AppState::new(Arc::new(store), LayeredConfig::with_defaults()).unwrap();
    create_router(Arc::new(state))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json(app(MemoryCensusStore::new()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "censo-api");
}

#[tokio::test]
async fn test_markers_unfiltered() {
    let (status, body) = get_json(app(seeded_store()), "/projects/censo/censo_mapa/markers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["project"], "censo");
    assert_eq!(body["total"], 3);
    assert_eq!(body["matched"], 3);
    assert_eq!(body["plotted"], 2);
    assert!(body.get("notice").is_none());

    let markers = body["markers"].as_array().unwrap();
    assert_eq!(markers[0]["id"], "1");
    assert_eq!(markers[0]["kind"], "rejected");
    assert_eq!(markers[0]["style"]["fill_color"], "#e74c3c");
    assert_eq!(markers[1]["style"]["fill_color"], "#3498db");

    assert_eq!(body["options"]["localities"], serde_json::json!(["A", "B"]));
    assert_eq!(body["options"]["statuses"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_markers_by_numeric_project_id() {
    let (status, body) = get_json(app(seeded_store()), "/projects/2/censo_mapa/markers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn test_markers_filtered_by_location() {
    let (status, body) =
        get_json(app(seeded_store()), "/projects/censo/censo_mapa/markers?location=A").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matched"], 2);
    assert_eq!(body["plotted"], 1);
    assert_eq!(body["records"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_markers_filtered_by_census_number_and_address() {
    let (_, body) = get_json(
        app(seeded_store()),
        "/projects/censo/censo_mapa/markers?census_number=2&address=calle%202",
    )
    .await;

    assert_eq!(body["matched"], 1);
    assert_eq!(body["records"][0]["id"], "2");
}

#[tokio::test]
async fn test_markers_no_results_reports_notice() {
    let (status, body) =
        get_json(app(seeded_store()), "/projects/censo/censo_mapa/markers?location=Z").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matched"], 0);
    assert_eq!(body["plotted"], 0);
    assert!(body.get("bounds").is_none());
    assert_eq!(body["notice"], "No results found for the applied filters.");
}

#[tokio::test]
async fn test_repeated_filter_parameter_is_bad_request() {
    let (status, body) = get_json(
        app(seeded_store()),
        "/projects/censo/censo_mapa/markers?location=A&location=B",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid filter query");
    assert!(body["details"].as_str().unwrap().contains("location"));
}

#[tokio::test]
async fn test_unknown_project_is_not_found() {
    let (status, body) = get_json(app(seeded_store()), "/projects/nope/censo_mapa/markers").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Project not found");
}

#[tokio::test]
async fn test_missing_custom_field_is_server_error() {
    let store = MemoryCensusStore::new();
    store.add_project(Project {
        id: 2,
        name: "Census 2024".to_string(),
        identifier: "censo".to_string(),
    });

    let (status, body) = get_json(app(store), "/projects/censo/censo_mapa/markers").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Census map is misconfigured");
}

#[tokio::test]
async fn test_map_page() {
    let (status, html) = get(app(seeded_store()), "/projects/censo/censo_mapa").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"<div id="censo-map"></div>"#));
    assert!(html.contains(r#"<span id="censo-counter">3</span>"#));
    assert!(html.contains(r#"<option value="B">B</option>"#));
    assert!(html.contains(r#"<select id="status-filter">"#));
    assert!(html.contains(r#"<script id="censo-map-data" type="application/json">"#));
    assert!(html.contains(r#"src="/assets/censo_mapa.js""#));
}

#[tokio::test]
async fn test_map_script_served() {
    let response = app(MemoryCensusStore::new())
        .oneshot(Request::builder().uri("/assets/censo_mapa.js").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/javascript; charset=utf-8"
    );

    let script = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let script = String::from_utf8(script.to_vec()).unwrap();
    // Address matching uses the server-folded key and a bad payload is caught
    assert!(script.contains("record.address_key"));
    assert!(!script.contains("record.address || \"\").toLowerCase()"));
    assert!(script.contains("Failed to read census map data"));
}
