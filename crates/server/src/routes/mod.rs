//! API route handlers for the eunlg server.

pub mod datasets;
pub mod health;
pub mod languages;
pub mod locations;
pub mod report;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined API router, mounted at the root path.
///
/// Routes:
/// - GET  /health    - Health check
/// - GET  /languages - Supported report languages
/// - POST /datasets  - Datasets reportable in a language
/// - POST /locations - Locations present in a dataset
/// - POST /eunlg     - Generate a news report
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(languages::router())
        .merge(datasets::router())
        .merge(locations::router())
        .merge(report::router())
        .with_state(state)
}
