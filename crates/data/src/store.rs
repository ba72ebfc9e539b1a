// crates/data/src/store.rs
//! In-memory observation store over pre-generated dataset caches.
//!
//! One `<dataset>.json` file per dataset, each an array of rows with
//! `location`, `variable`, `period`, `value` and `unit`. Everything is
//! loaded and sorted once at startup; queries afterwards are slice
//! scans over immutable data.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;

use eunlg_core::error::DataError;
use eunlg_core::source::ObservationSource;
use eunlg_types::{Observation, TimePeriod, TimeRange};

use crate::error::StoreError;

/// One row of a cache file. The dataset name comes from the file name.
#[derive(Debug, Deserialize)]
struct CacheRow {
    location: String,
    variable: String,
    period: TimePeriod,
    value: f64,
    unit: String,
}

impl CacheRow {
    fn into_observation(self, dataset: &str) -> Observation {
        Observation {
            dataset: dataset.to_string(),
            location: self.location,
            variable: self.variable,
            period: self.period,
            value: self.value,
            unit: self.unit,
        }
    }
}

/// All configured datasets, keyed by name.
///
/// Tables are sorted by (location, period, variable), which gives both
/// query orders for free: a location slice is already in (period,
/// variable) order, and a (variable, period) slice is already in
/// location order.
#[derive(Debug)]
pub struct DataStore {
    tables: BTreeMap<String, Vec<Observation>>,
}

impl DataStore {
    /// Load every named dataset from `dir`.
    ///
    /// A missing cache file is a hard error: the caches are produced by
    /// an offline preprocessing step and the server has nothing to
    /// serve without them.
    pub fn load(dir: &Path, datasets: &[String]) -> Result<Self, StoreError> {
        let mut tables = BTreeMap::new();
        for name in datasets {
            let path = dir.join(format!("{name}.json"));
            let raw = std::fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
            let rows: Vec<CacheRow> =
                serde_json::from_str(&raw).map_err(|e| StoreError::Malformed {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
            let observations = rows
                .into_iter()
                .map(|row| row.into_observation(name))
                .collect();
            let observations = sorted(observations);
            tracing::info!(
                dataset = %name,
                rows = observations.len(),
                "loaded dataset cache"
            );
            tables.insert(name.clone(), observations);
        }
        Ok(Self { tables })
    }

    /// Build a store straight from observations, grouped by their
    /// dataset field. Used by tests and embedded setups.
    pub fn from_observations(rows: Vec<Observation>) -> Self {
        let mut tables: BTreeMap<String, Vec<Observation>> = BTreeMap::new();
        for row in rows {
            tables.entry(row.dataset.clone()).or_default().push(row);
        }
        let tables = tables
            .into_iter()
            .map(|(name, rows)| (name, sorted(rows)))
            .collect();
        Self { tables }
    }

    /// Configured dataset names, sorted.
    pub fn datasets(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn contains_dataset(&self, dataset: &str) -> bool {
        self.tables.contains_key(dataset)
    }

    /// Distinct locations present in a dataset, sorted.
    pub fn locations(&self, dataset: &str) -> Result<Vec<String>, DataError> {
        let rows = self.table(dataset)?;
        let unique: BTreeSet<&str> = rows.iter().map(|o| o.location.as_str()).collect();
        Ok(unique.into_iter().map(str::to_string).collect())
    }

    fn table(&self, dataset: &str) -> Result<&[Observation], DataError> {
        self.tables
            .get(dataset)
            .map(Vec::as_slice)
            .ok_or_else(|| DataError::UnknownDataset {
                dataset: dataset.to_string(),
            })
    }
}

fn sorted(mut rows: Vec<Observation>) -> Vec<Observation> {
    rows.sort_by(|a, b| {
        a.location
            .cmp(&b.location)
            .then_with(|| a.period.cmp(&b.period))
            .then_with(|| a.variable.cmp(&b.variable))
    });
    rows
}

impl ObservationSource for DataStore {
    fn query(
        &self,
        dataset: &str,
        location: &str,
        range: &TimeRange,
    ) -> Result<Vec<Observation>, DataError> {
        let rows: Vec<Observation> = self
            .table(dataset)?
            .iter()
            .filter(|o| o.location == location && range.contains(&o.period))
            .cloned()
            .collect();
        if rows.is_empty() {
            return Err(DataError::DataUnavailable {
                dataset: dataset.to_string(),
                location: location.to_string(),
            });
        }
        Ok(rows)
    }

    fn peers(
        &self,
        dataset: &str,
        variable: &str,
        period: TimePeriod,
    ) -> Result<Vec<Observation>, DataError> {
        Ok(self
            .table(dataset)?
            .iter()
            .filter(|o| o.variable == variable && o.period == period)
            .cloned()
            .collect())
    }
}
