// crates/core/src/source.rs
//! ObservationSource trait defining the interface to statistical data.

use eunlg_types::{Observation, TimePeriod, TimeRange};

use crate::error::DataError;

/// Trait for statistical data backends the pipeline can draw from.
///
/// Implementations include:
/// - `DataStore`: pre-generated JSON dataset caches loaded at startup
/// - In-memory fixture sources used by tests
pub trait ObservationSource: Send + Sync {
    /// All observations for one location in one dataset, restricted to
    /// `range`. Ordered by (period, variable) so extraction is
    /// deterministic.
    fn query(
        &self,
        dataset: &str,
        location: &str,
        range: &TimeRange,
    ) -> Result<Vec<Observation>, DataError>;

    /// Observations for `variable` at `period` across every location in
    /// the dataset, ordered by location. The peer group for ranks,
    /// comparisons and outlierness.
    fn peers(
        &self,
        dataset: &str,
        variable: &str,
        period: TimePeriod,
    ) -> Result<Vec<Observation>, DataError>;
}
