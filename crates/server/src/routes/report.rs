// crates/server/src/routes/report.rs
//! News report generation endpoint.
//!
//! POST /eunlg runs the full pipeline for one (dataset, location) pair and
//! realizes the resulting plan in the requested language.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use eunlg_core::pipeline::{self, ReportQuery};
use eunlg_realizer::RealizedReport;
use eunlg_types::TimeRange;

fn default_language() -> String {
    "en".to_string()
}

/// Request body for POST /eunlg.
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub dataset: Option<String>,
    pub location: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

/// Response for POST /eunlg.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ReportResponse {
    pub location: String,
    pub location_type: String,
    pub language: String,
    pub header: String,
    pub body: String,
}

/// POST /eunlg - Generate a news report.
///
/// Validation order matters: language first, then dataset, then location,
/// each with its own fixed error string.
pub async fn generate_report(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReportRequest>,
) -> ApiResult<Json<ReportResponse>> {
    let language = request.language;
    if !state.realizer.languages().iter().any(|l| l == &language) {
        return Err(ApiError::InvalidLanguage);
    }

    let dataset = request.dataset.ok_or(ApiError::MissingDataset)?;
    let offered = state
        .datasets_for(&language)
        .map_err(|_| ApiError::InvalidLanguage)?;
    if !offered.contains(&dataset) {
        return Err(ApiError::InvalidDataset);
    }

    let location = request.location.ok_or(ApiError::MissingLocation)?;
    let known = state
        .store
        .locations(&dataset)
        .map_err(|e| ApiError::Pipeline(e.into()))?;
    if !known.contains(&location) {
        return Err(ApiError::InvalidLocation);
    }

    // Embedding-filter runs are CPU-heavy; the gate caps how many run at once.
    let permit = match &state.report_gate {
        Some(gate) => Some(
            gate.clone()
                .acquire_owned()
                .await
                .map_err(|e| ApiError::Internal(format!("Report gate closed: {}", e)))?,
        ),
        None => None,
    };

    let ctx = state.pipeline.clone();
    let store = state.store.clone();
    let realizer = state.realizer.clone();
    let query = ReportQuery {
        dataset,
        location: location.clone(),
        range: TimeRange::all(),
    };
    let report_language = language.clone();

    let report = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        let plan = pipeline::run(&ctx, store.as_ref(), &query)?;
        let report = realizer.realize(&plan, &report_language)?;
        Ok::<RealizedReport, ApiError>(report)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Task join error: {}", e)))??;

    Ok(Json(ReportResponse {
        location,
        // TODO: derive from the request once region-level caches are generated
        location_type: "C".to_string(),
        language,
        header: report.header,
        body: report.body,
    }))
}

/// Create the report routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/eunlg", post(generate_report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_request_defaults() {
        let request: ReportRequest = serde_json::from_str(r#"{"dataset":"cphi"}"#).unwrap();
        assert_eq!(request.dataset.as_deref(), Some("cphi"));
        assert!(request.location.is_none());
        assert_eq!(request.language, "en");
    }

    #[test]
    fn test_report_response_field_order() {
        let response = ReportResponse {
            location: "FI".to_string(),
            location_type: "C".to_string(),
            language: "en".to_string(),
            header: "h".to_string(),
            body: "b".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            r#"{"location":"FI","location_type":"C","language":"en","header":"h","body":"b"}"#
        );
    }
}
