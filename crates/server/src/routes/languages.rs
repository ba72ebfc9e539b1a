// crates/server/src/routes/languages.rs
//! Language listing endpoint.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /languages.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct LanguagesResponse {
    pub languages: Vec<String>,
}

/// GET /languages - Supported report languages, in pack order.
pub async fn list_languages(State(state): State<Arc<AppState>>) -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: state.realizer.languages(),
    })
}

/// Create the languages routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/languages", get(list_languages))
}
