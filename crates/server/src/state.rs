// crates/server/src/state.rs
//! Application state for the Axum server.

use std::sync::Arc;
use std::time::Instant;

use eunlg_core::PipelineContext;
use eunlg_data::DataStore;
use eunlg_realizer::{RealizeError, Realizer};
use tokio::sync::Semaphore;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// Pre-generated dataset caches, loaded once at startup.
    pub store: Arc<DataStore>,
    /// Template-based surface realizer.
    pub realizer: Arc<Realizer>,
    /// Weights, threshold, and similarity filter shared by every report run.
    pub pipeline: PipelineContext,
    /// Bounds concurrent report generation when the embedding filter is
    /// active. `None` with the rule-based filter, which is cheap enough
    /// to run unbounded.
    pub report_gate: Option<Arc<Semaphore>>,
}

impl AppState {
    /// Create a new application state wrapped in an Arc for sharing.
    pub fn new(
        store: Arc<DataStore>,
        realizer: Arc<Realizer>,
        pipeline: PipelineContext,
        report_gate: Option<Arc<Semaphore>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            store,
            realizer,
            pipeline,
            report_gate,
        })
    }

    /// Get the server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Datasets that are both loaded in the store and realizable in
    /// `language`. The pack may name datasets the operator chose not to
    /// load; those are not offered.
    pub fn datasets_for(&self, language: &str) -> Result<Vec<String>, RealizeError> {
        let datasets = self
            .realizer
            .datasets_for(language)?
            .into_iter()
            .filter(|d| self.store.contains_dataset(d))
            .collect();
        Ok(datasets)
    }
}
