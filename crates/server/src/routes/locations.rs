// crates/server/src/routes/locations.rs
//! Location listing endpoint.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request body for POST /locations.
#[derive(Debug, Deserialize)]
pub struct LocationsRequest {
    pub dataset: Option<String>,
}

/// Response for POST /locations.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct LocationsResponse {
    pub locations: Vec<String>,
}

/// POST /locations - Locations present in the requested dataset's cache.
pub async fn list_locations(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LocationsRequest>,
) -> ApiResult<Json<LocationsResponse>> {
    let dataset = request.dataset.ok_or(ApiError::MissingDataset)?;
    if !state.store.contains_dataset(&dataset) {
        return Err(ApiError::InvalidDataset);
    }

    let locations = state
        .store
        .locations(&dataset)
        .map_err(|e| ApiError::Pipeline(e.into()))?;
    Ok(Json(LocationsResponse { locations }))
}

/// Create the locations routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/locations", post(list_locations))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_field_is_optional_at_parse_time() {
        // Missing field parses; the handler turns None into a 400.
        let request: LocationsRequest = serde_json::from_str("{}").unwrap();
        assert!(request.dataset.is_none());
    }

    #[test]
    fn test_locations_response_serialization() {
        let response = LocationsResponse {
            locations: vec!["DE".to_string(), "FI".to_string()],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"locations":["DE","FI"]}"#);
    }
}
