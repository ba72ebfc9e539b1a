// crates/core/src/stats.rs
//! Pure math shared by the message extractor.
//!
//! Outlierness follows the quartile construction used when the dataset
//! caches are generated: a value's distance from the median in units of
//! the interquartile range, damped for small peer groups.

/// Upper bound the degenerate-spread branch scales towards.
const MAX_OUTLIERNESS: f64 = 2.0;

/// Five-number summary of a peer group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Linear-interpolated quantile of an ascending-sorted slice.
///
/// `q` is in [0.0, 1.0]. Matches the interpolation the cache
/// generator applies, so outlierness reproduces its values.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lower = pos.floor() as usize;
    let frac = pos - lower as f64;
    if lower + 1 >= n {
        return sorted[n - 1];
    }
    sorted[lower] + frac * (sorted[lower + 1] - sorted[lower])
}

/// Five-number summary of `values`, or `None` when empty.
pub fn five_number_summary(values: &[f64]) -> Option<FiveNumberSummary> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some(FiveNumberSummary {
        min: sorted[0],
        q1: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        q3: quantile_sorted(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

/// How unusual `value` is inside a peer group of `count` members with
/// the given summary. 0.0 is dead typical; values above ~1.0 stand out.
///
/// Small groups are damped by `sqrt(1/sqrt(count))` so a "1st of 3"
/// never outscores a genuine outlier in a wide panel. When the IQR
/// collapses (all quartiles equal) the score interpolates between 0.5
/// at the median and [`MAX_OUTLIERNESS`] at the extremes. Inside a
/// healthy IQR the score is capped at whichever quartile edge is
/// closer to the median.
pub fn outlierness(value: f64, summary: &FiveNumberSummary, count: usize) -> f64 {
    let size_weight = (1.0 / (count as f64).sqrt()).sqrt();
    let s = summary;
    if s.q1 == s.q3 {
        if value > s.q3 {
            return 0.5 + (MAX_OUTLIERNESS - 0.5) * (value - s.median) / (s.max - s.median)
                * size_weight;
        }
        if value < s.q1 {
            return 0.5 + (MAX_OUTLIERNESS - 0.5) * (s.median - value) / (s.median - s.min)
                * size_weight;
        }
        return 0.5 * size_weight;
    }
    let iqr = s.q3 - s.q1;
    if s.q1 < value && value < s.q3 {
        let at_q1 = (s.q1 - s.median).abs() / iqr * size_weight;
        let at_q3 = (s.q3 - s.median).abs() / iqr * size_weight;
        return at_q1.min(at_q3) * size_weight;
    }
    (value - s.median).abs() / iqr * size_weight
}

/// Arithmetic mean, or `None` when empty.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Dense rank of `value` among `peers`, counted from the top.
///
/// 1-based: the largest distinct value ranks 1, ties share a rank and
/// no positions are skipped after a tie.
pub fn dense_rank_desc(value: f64, peers: &[f64]) -> u32 {
    let mut greater: Vec<f64> = peers.iter().copied().filter(|&v| v > value).collect();
    greater.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    greater.dedup();
    greater.len() as u32 + 1
}
