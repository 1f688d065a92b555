//! Summary charts computed once, right after the dataset loads.

use std::collections::BTreeMap;

use tree_census_analytics_models::{
    CategoryCount, DiameterHistogram, HealthLevel, HistogramBin, PieSlice, StaticAnalytics,
};
use tree_census_dataset::Dataset;

/// Diameters at or above this value are treated as data-entry noise by the
/// histogram.
pub const DIAMETER_CUTOFF: f64 = 100.0;

/// Number of equal-width diameter buckets.
pub const HISTOGRAM_BINS: usize = 20;

/// Computes every static summary chart for `dataset`.
#[must_use]
pub fn precompute(dataset: &Dataset) -> StaticAnalytics {
    let health_counts = count_by(
        dataset.iter().filter_map(|r| r.health()),
        HealthLevel::color_for,
    );
    let status_counts = count_by(dataset.iter().filter_map(|r| r.status()), |_| None);

    let mut status_values: Vec<String> = status_counts.iter().map(|c| c.name.clone()).collect();
    status_values.sort();
    let health_values = health_counts.iter().map(|c| c.name.clone()).collect();

    let analytics = StaticAnalytics {
        health_shares: shares(&health_counts),
        status_shares: shares(&status_counts),
        diameter_histogram: diameter_histogram(dataset),
        health_counts,
        status_counts,
        status_values,
        health_values,
    };

    log::info!(
        "Precomputed analytics: {} health values, {} status values, {} diameter bins",
        analytics.health_counts.len(),
        analytics.status_counts.len(),
        analytics.diameter_histogram.bins.len()
    );

    analytics
}

/// Counts occurrences of each value, most common first (ties by name).
fn count_by<'a>(
    values: impl Iterator<Item = &'a str>,
    color: impl Fn(&str) -> Option<&'static str>,
) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(name, count)| CategoryCount {
            name: name.to_string(),
            count,
            color: color(name).map(ToString::to_string),
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    out
}

#[allow(clippy::cast_precision_loss)]
fn shares(counts: &[CategoryCount]) -> Vec<PieSlice> {
    let total: u64 = counts.iter().map(|c| c.count).sum();
    counts
        .iter()
        .map(|c| PieSlice {
            name: c.name.clone(),
            count: c.count,
            share: if total == 0 {
                0.0
            } else {
                c.count as f64 / total as f64
            },
            color: c.color.clone(),
        })
        .collect()
}

/// Histogram of diameters below [`DIAMETER_CUTOFF`].
#[must_use]
pub fn diameter_histogram(dataset: &Dataset) -> DiameterHistogram {
    let mut clipped = 0;
    let diameters: Vec<f64> = dataset
        .iter()
        .filter_map(|r| r.diameter)
        .filter(|&d| {
            let keep = d < DIAMETER_CUTOFF;
            if !keep {
                clipped += 1;
            }
            keep
        })
        .collect();

    DiameterHistogram {
        cutoff: DIAMETER_CUTOFF,
        bins: histogram(&diameters, HISTOGRAM_BINS),
        clipped,
    }
}

/// Buckets `values` into `bin_count` equal-width bins spanning
/// `[min, max]`. A single distinct value gets a unit-wide span.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn histogram(values: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };
    let width = span / bin_count as f64;

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            lower: (i as f64).mul_add(width, min),
            upper: if i + 1 == bin_count {
                min + span
            } else {
                ((i + 1) as f64).mul_add(width, min)
            },
            count: 0,
        })
        .collect();

    for &value in values {
        let idx = (((value - min) / width).floor() as usize).min(bin_count - 1);
        bins[idx].count += 1;
    }

    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{borough_sample, tree, two_trees};

    #[test]
    fn health_counts_most_common_first() {
        let analytics = precompute(&borough_sample());
        let names: Vec<&str> = analytics
            .health_counts
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, ["Good", "Fair", "Poor"]);
        assert_eq!(analytics.health_counts[0].count, 3);
        assert_eq!(analytics.health_counts[0].color.as_deref(), Some("green"));
        assert_eq!(analytics.health_values, ["Good", "Fair", "Poor"]);
    }

    #[test]
    fn records_without_health_are_not_counted() {
        let analytics = precompute(&borough_sample());
        let total: u64 = analytics.health_counts.iter().map(|c| c.count).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn status_values_are_sorted() {
        let analytics = precompute(&borough_sample());
        assert_eq!(analytics.status_values, ["Alive", "Dead", "Stump"]);
        assert_eq!(analytics.default_status(), Some("Alive"));
        assert_eq!(analytics.status_counts[0].name, "Alive");
        assert_eq!(analytics.status_counts[0].count, 5);
        assert_eq!(analytics.status_counts[0].color, None);
    }

    #[test]
    fn shares_sum_to_one() {
        let analytics = precompute(&borough_sample());
        let total: f64 = analytics.status_shares.iter().map(|s| s.share).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(analytics.health_shares.len(), analytics.health_counts.len());
    }

    #[test]
    fn histogram_excludes_large_diameters() {
        let analytics = precompute(&borough_sample());
        let hist = &analytics.diameter_histogram;

        assert_eq!(hist.bins.len(), HISTOGRAM_BINS);
        assert_eq!(hist.clipped, 1);
        let binned: u64 = hist.bins.iter().map(|b| b.count).sum();
        assert_eq!(binned, 5);
        assert!(hist.bins.iter().all(|b| b.upper < DIAMETER_CUTOFF));
        assert!((hist.bins.last().unwrap().upper - 99.0).abs() < 1e-9);
    }

    #[test]
    fn histogram_places_extremes_in_end_bins() {
        let bins = histogram(&[0.0, 5.0, 10.0], 2);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[1].count, 2);
        assert!((bins[0].upper - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn histogram_handles_single_value() {
        let bins = histogram(&[7.0, 7.0], 20);
        assert_eq!(bins[0].count, 2);
        assert!((bins[19].upper - 8.0).abs() < 1e-9);
    }

    #[test]
    fn histogram_empty_without_plausible_diameters() {
        let dataset = Dataset::from_records(vec![tree(
            "1",
            Some("Good"),
            Some("Alive"),
            "1",
            40.7,
            -74.0,
            Some(400.0),
        )]);
        let hist = diameter_histogram(&dataset);
        assert!(hist.bins.is_empty());
        assert_eq!(hist.clipped, 1);
    }

    #[test]
    fn precompute_is_stable() {
        let dataset = two_trees();
        assert_eq!(precompute(&dataset), precompute(&dataset));
    }
}
