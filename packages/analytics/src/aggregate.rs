//! Per-request district aggregation behind the map views.

use std::collections::BTreeMap;

use tree_census_analytics_models::{
    ColorScale, DistrictAggregate, DistrictAggregation, FilterState, MapCenter, MapView,
    ScaledStatus,
};
use tree_census_dataset::Dataset;
use tree_census_tree_models::CouncilDistrict;

#[derive(Default)]
struct Accumulator {
    count: u64,
    latitude_sum: f64,
    longitude_sum: f64,
}

/// Filters `dataset` by `filter` and aggregates the survivors per council
/// district.
///
/// The centre is the unweighted mean of the district means, not the mean
/// of the raw coordinates. It is `None` when nothing matched.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn aggregate_by_district(dataset: &Dataset, filter: &FilterState) -> DistrictAggregation {
    let mut groups: BTreeMap<&CouncilDistrict, Accumulator> = BTreeMap::new();

    for record in dataset.iter().filter(|r| filter.matches(r)) {
        let acc = groups.entry(&record.council_district).or_default();
        acc.count += 1;
        acc.latitude_sum += record.latitude;
        acc.longitude_sum += record.longitude;
    }

    let districts: Vec<DistrictAggregate> = groups
        .into_iter()
        .map(|(district, acc)| DistrictAggregate {
            district: district.clone(),
            count: acc.count,
            mean_latitude: acc.latitude_sum / acc.count as f64,
            mean_longitude: acc.longitude_sum / acc.count as f64,
        })
        .collect();

    let center = mean_of_means(&districts);

    log::debug!(
        "Aggregated {} districts for {filter:?} (center: {center:?})",
        districts.len()
    );

    DistrictAggregation { districts, center }
}

#[allow(clippy::cast_precision_loss)]
fn mean_of_means(districts: &[DistrictAggregate]) -> Option<MapCenter> {
    if districts.is_empty() {
        return None;
    }
    let n = districts.len() as f64;
    Some(MapCenter {
        latitude: districts.iter().map(|d| d.mean_latitude).sum::<f64>() / n,
        longitude: districts.iter().map(|d| d.mean_longitude).sum::<f64>() / n,
    })
}

/// Colour gradient for the status map. Statuses without a dedicated scale
/// get [`ColorScale::fallback`].
#[must_use]
pub fn color_scale_for_status(status: &str) -> ColorScale {
    status
        .parse::<ScaledStatus>()
        .map_or_else(|_| ColorScale::fallback(), ScaledStatus::color_scale)
}

/// Main map view for a health checklist selection.
#[must_use]
pub fn main_map(dataset: &Dataset, filter: &FilterState) -> MapView {
    MapView::new(aggregate_by_district(dataset, filter), None)
}

/// Analytics map view for a single status tab.
#[must_use]
pub fn status_map(dataset: &Dataset, status: &str) -> MapView {
    let filter = FilterState::status(status);
    MapView::new(
        aggregate_by_district(dataset, &filter),
        Some(color_scale_for_status(status)),
    )
}
