//! Service info endpoint

use axum::{extract::State, routing::get, Json, Router};
use core_config::AppInfo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: BTreeMap<String, String>,
}

async fn info(State(app): State<AppInfo>) -> Json<ServiceInfo> {
    let endpoints = [
        ("products", "/api/products"),
        ("health", "/health"),
        ("docs", "/swagger-ui"),
    ]
    .into_iter()
    .map(|(name, path)| (name.to_string(), path.to_string()))
    .collect();

    Json(ServiceInfo {
        name: app.name.to_string(),
        version: app.version.to_string(),
        description: "RESTful API for managing products".to_string(),
        endpoints,
    })
}

pub fn router(app: AppInfo) -> Router {
    Router::new().route("/", get(info)).with_state(app)
}
