// crates/server/src/routes/datasets.rs
//! Dataset listing endpoint.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

fn default_language() -> String {
    "en".to_string()
}

/// Request body for POST /datasets.
#[derive(Debug, Deserialize)]
pub struct DatasetsRequest {
    #[serde(default = "default_language")]
    pub language: String,
}

/// Response for POST /datasets.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct DatasetsResponse {
    pub datasets: Vec<String>,
}

/// POST /datasets - Datasets reportable in the requested language.
///
/// Only datasets that are both loaded in the store and covered by the
/// language's pack are offered.
pub async fn list_datasets(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DatasetsRequest>,
) -> ApiResult<Json<DatasetsResponse>> {
    let datasets = state
        .datasets_for(&request.language)
        .map_err(|_| ApiError::InvalidLanguage)?;
    Ok(Json(DatasetsResponse { datasets }))
}

/// Create the datasets routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/datasets", post(list_datasets))
}
