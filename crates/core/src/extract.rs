// crates/core/src/extract.rs
//! Derives candidate news facts from raw observations.
//!
//! For every observation of a location we emit a plain value fact, and
//! when a peer group exists, a rank fact and a comparison against the
//! group mean. Each variable with history additionally yields one
//! trend fact covering its earliest to latest reading.
//!
//! Emission order is fixed (variables in name order, periods
//! ascending, value/rank/comparison then the trend) so downstream
//! tie-breaks are stable across runs.

use std::collections::BTreeMap;

use eunlg_types::{FactKind, Message, Metrics, Observation, TimeRange};

use crate::error::DataError;
use crate::source::ObservationSource;
use crate::stats::{dense_rank_desc, five_number_summary, mean, outlierness};

/// Deltas smaller than this count as "no difference" in comparisons.
const EQUAL_DELTA: f64 = 1e-9;

/// Extract every candidate message for `location` in `dataset`.
///
/// Fails with [`DataError::DataUnavailable`] when the query matches no
/// observations.
pub fn extract_messages(
    source: &dyn ObservationSource,
    dataset: &str,
    location: &str,
    range: &TimeRange,
) -> Result<Vec<Message>, DataError> {
    let rows = source.query(dataset, location, range)?;
    if rows.is_empty() {
        return Err(DataError::DataUnavailable {
            dataset: dataset.to_string(),
            location: location.to_string(),
        });
    }

    // Group by variable; query order keeps periods ascending per group.
    let mut by_variable: BTreeMap<String, Vec<Observation>> = BTreeMap::new();
    for row in rows {
        by_variable.entry(row.variable.clone()).or_default().push(row);
    }

    let mut messages = Vec::new();
    for (variable, series) in &by_variable {
        for obs in series {
            let peers = source.peers(dataset, variable, obs.period)?;
            let peer_values: Vec<f64> = peers.iter().map(|p| p.value).collect();

            let outl = five_number_summary(&peer_values)
                .map(|summary| outlierness(obs.value, &summary, peer_values.len()))
                .unwrap_or(0.5);
            messages.push(Message {
                dataset: dataset.to_string(),
                location: location.to_string(),
                variable: variable.clone(),
                period: obs.period,
                metrics: Metrics::Value {
                    value: obs.value,
                    outlierness: outl,
                },
                text_key: FactKind::Value.to_string(),
                provenance: vec![obs.clone()],
            });

            // Ranks and comparisons need at least one other location.
            if peers.len() >= 2 {
                messages.push(Message {
                    dataset: dataset.to_string(),
                    location: location.to_string(),
                    variable: variable.clone(),
                    period: obs.period,
                    metrics: Metrics::Rank {
                        position: dense_rank_desc(obs.value, &peer_values),
                        of: peers.len() as u32,
                    },
                    text_key: FactKind::Rank.to_string(),
                    provenance: peers.clone(),
                });

                if let Some(reference) = mean(&peer_values) {
                    let delta = obs.value - reference;
                    let text_key = if delta.abs() < EQUAL_DELTA {
                        "comp-equal"
                    } else if delta > 0.0 {
                        "comp-above"
                    } else {
                        "comp-below"
                    };
                    messages.push(Message {
                        dataset: dataset.to_string(),
                        location: location.to_string(),
                        variable: variable.clone(),
                        period: obs.period,
                        metrics: Metrics::Comparison {
                            value: obs.value,
                            reference,
                            delta,
                        },
                        text_key: text_key.to_string(),
                        provenance: peers,
                    });
                }
            }
        }

        if let Some(trend) = trend_message(dataset, location, variable, series) {
            messages.push(trend);
        }
    }

    tracing::debug!(
        dataset,
        location,
        count = messages.len(),
        "extracted candidate messages"
    );
    Ok(messages)
}

/// One trend fact per variable, from its earliest to latest reading.
///
/// Needs at least two distinct periods, and a non-zero starting value
/// so the percentage change is defined.
fn trend_message(
    dataset: &str,
    location: &str,
    variable: &str,
    series: &[Observation],
) -> Option<Message> {
    let first = series.first()?;
    let last = series.last()?;
    if first.period == last.period || first.value == 0.0 {
        return None;
    }
    let change_pct = (last.value - first.value) / first.value.abs() * 100.0;
    let text_key = if change_pct > 0.0 {
        "trend-rise"
    } else if change_pct < 0.0 {
        "trend-fall"
    } else {
        "trend-flat"
    };
    Some(Message {
        dataset: dataset.to_string(),
        location: location.to_string(),
        variable: variable.to_string(),
        period: last.period,
        metrics: Metrics::Trend {
            from: first.value,
            to: last.value,
            change_pct,
        },
        text_key: text_key.to_string(),
        provenance: vec![first.clone(), last.clone()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::test_helpers::{cphi_panel, FixtureSource};
    use eunlg_types::TimePeriod;

    fn solo_series() -> Vec<Observation> {
        vec![
            Observation {
                dataset: "cphi".to_string(),
                location: "FI".to_string(),
                variable: "hicp2015".to_string(),
                period: TimePeriod::Year(2019),
                value: 100.0,
                unit: "index".to_string(),
            },
            Observation {
                dataset: "cphi".to_string(),
                location: "FI".to_string(),
                variable: "hicp2015".to_string(),
                period: TimePeriod::Year(2020),
                value: 105.0,
                unit: "index".to_string(),
            },
        ]
    }

    #[test]
    fn test_missing_location_is_an_error() {
        let source = FixtureSource::new(cphi_panel());
        let err = extract_messages(&source, "cphi", "XX", &TimeRange::all()).unwrap_err();
        assert!(matches!(err, DataError::DataUnavailable { .. }));
    }

    #[test]
    fn test_solo_location_gets_value_and_trend_only() {
        let source = FixtureSource::new(solo_series());
        let messages = extract_messages(&source, "cphi", "FI", &TimeRange::all()).unwrap();
        let kinds: Vec<FactKind> = messages.iter().map(|m| m.kind()).collect();
        assert_eq!(
            kinds,
            vec![FactKind::Value, FactKind::Value, FactKind::Trend]
        );
    }

    #[test]
    fn test_panel_emits_all_four_kinds() {
        let source = FixtureSource::new(cphi_panel());
        let messages = extract_messages(&source, "cphi", "FI", &TimeRange::all()).unwrap();
        for kind in [
            FactKind::Value,
            FactKind::Rank,
            FactKind::Trend,
            FactKind::Comparison,
        ] {
            assert!(
                messages.iter().any(|m| m.kind() == kind),
                "no {kind} message extracted"
            );
        }
    }

    #[test]
    fn test_rank_positions_in_2020() {
        // 2020 panel: EE 110, FR 107, FI 105, DE 102, SE 99.
        let source = FixtureSource::new(cphi_panel());
        let messages = extract_messages(&source, "cphi", "FI", &TimeRange::all()).unwrap();
        let rank = messages
            .iter()
            .find(|m| m.kind() == FactKind::Rank && m.period == TimePeriod::Year(2020))
            .unwrap();
        assert_eq!(
            rank.metrics,
            Metrics::Rank {
                position: 3,
                of: 5
            }
        );
    }

    #[test]
    fn test_trend_spans_first_to_last() {
        let source = FixtureSource::new(cphi_panel());
        let messages = extract_messages(&source, "cphi", "FI", &TimeRange::all()).unwrap();
        let trend = messages
            .iter()
            .find(|m| m.kind() == FactKind::Trend)
            .unwrap();
        assert_eq!(trend.text_key, "trend-rise");
        assert_eq!(trend.period, TimePeriod::Year(2020));
        match trend.metrics {
            Metrics::Trend {
                from,
                to,
                change_pct,
            } => {
                assert_eq!(from, 100.0);
                assert_eq!(to, 105.0);
                assert!((change_pct - 5.0).abs() < 1e-12);
            }
            _ => panic!("wrong metrics: {:?}", trend.metrics),
        }
        assert_eq!(trend.provenance.len(), 2);
    }

    #[test]
    fn test_no_trend_for_single_period() {
        let source = FixtureSource::new(cphi_panel());
        let range = TimeRange {
            from: Some(TimePeriod::Year(2020)),
            to: None,
        };
        let messages = extract_messages(&source, "cphi", "FI", &range).unwrap();
        assert!(messages.iter().all(|m| m.kind() != FactKind::Trend));
    }

    #[test]
    fn test_comparison_direction_keys() {
        let source = FixtureSource::new(cphi_panel());
        // 2020 mean is 104.6; FI reads 105 and sits above it.
        let fi = extract_messages(&source, "cphi", "FI", &TimeRange::all()).unwrap();
        let above = fi
            .iter()
            .find(|m| m.kind() == FactKind::Comparison && m.period == TimePeriod::Year(2020))
            .unwrap();
        assert_eq!(above.text_key, "comp-above");

        let se = extract_messages(&source, "cphi", "SE", &TimeRange::all()).unwrap();
        let below = se
            .iter()
            .find(|m| m.kind() == FactKind::Comparison && m.period == TimePeriod::Year(2020))
            .unwrap();
        assert_eq!(below.text_key, "comp-below");
    }

    #[test]
    fn test_flat_series_yields_flat_trend() {
        let mut rows = solo_series();
        rows[1].value = rows[0].value;
        let source = FixtureSource::new(rows);
        let messages = extract_messages(&source, "cphi", "FI", &TimeRange::all()).unwrap();
        let trend = messages
            .iter()
            .find(|m| m.kind() == FactKind::Trend)
            .unwrap();
        assert_eq!(trend.text_key, "trend-flat");
    }

    #[test]
    fn test_zero_baseline_skips_trend() {
        let mut rows = solo_series();
        rows[0].value = 0.0;
        let source = FixtureSource::new(rows);
        let messages = extract_messages(&source, "cphi", "FI", &TimeRange::all()).unwrap();
        assert!(messages.iter().all(|m| m.kind() != FactKind::Trend));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let source = FixtureSource::new(cphi_panel());
        let first = extract_messages(&source, "cphi", "FI", &TimeRange::all()).unwrap();
        let second = extract_messages(&source, "cphi", "FI", &TimeRange::all()).unwrap();
        assert_eq!(first, second);
    }
}
