use axum::{http::header, response::IntoResponse};

const MAP_SCRIPT: &str = include_str!("../../assets/censo_mapa.js");

pub async fn map_script() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript; charset=utf-8")], MAP_SCRIPT)
}
