#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregate and view-model types for the tree census dashboard.
//!
//! Defines the filter selections a client can make, the static summary
//! charts computed once at startup, and the per-request district
//! aggregates that drive the map views. All of these serialize to JSON for
//! the API.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum_macros::EnumString;
use tree_census_tree_models::{CouncilDistrict, TreeRecord};

/// A client filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum FilterState {
    /// Map view checklist: records whose health is one of the selected
    /// values. Records without a health value never match.
    Health(BTreeSet<String>),
    /// Analytics view tab: records whose status equals the selected value.
    Status(String),
}

impl FilterState {
    /// Builds a health filter from any list of health values.
    #[must_use]
    pub fn health<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Health(values.into_iter().map(Into::into).collect())
    }

    /// Builds a status filter.
    #[must_use]
    pub fn status(value: impl Into<String>) -> Self {
        Self::Status(value.into())
    }

    /// Whether `record` passes this filter. Values absent from the dataset
    /// simply match nothing.
    #[must_use]
    pub fn matches(&self, record: &TreeRecord) -> bool {
        match self {
            Self::Health(selected) => record.health().is_some_and(|h| selected.contains(h)),
            Self::Status(selected) => record.status() == Some(selected.as_str()),
        }
    }
}

/// Known health values with a fixed chart colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString)]
pub enum HealthLevel {
    /// Healthy tree.
    Good,
    /// Some decline.
    Fair,
    /// Serious decline.
    Poor,
}

impl HealthLevel {
    /// Chart colour for this health level.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Good => "green",
            Self::Fair => "yellow",
            Self::Poor => "red",
        }
    }

    /// Chart colour for a raw health value, if it is a known level.
    #[must_use]
    pub fn color_for(value: &str) -> Option<&'static str> {
        value.parse::<Self>().ok().map(Self::color)
    }
}

/// Statuses that have a dedicated map colour gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString)]
pub enum ScaledStatus {
    /// Living tree.
    Alive,
    /// Fair condition.
    Fair,
    /// Dead tree.
    Dead,
}

impl ScaledStatus {
    /// Two-colour gradient used by the status map.
    #[must_use]
    pub fn color_scale(self) -> ColorScale {
        match self {
            Self::Alive => ColorScale::new("lightgreen", "green"),
            Self::Fair => ColorScale::new("lightblue", "blue"),
            Self::Dead => ColorScale::new("lightcoral", "red"),
        }
    }
}

/// A continuous two-colour gradient, from low to high counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScale {
    /// Colour for the lowest count.
    pub low: String,
    /// Colour for the highest count.
    pub high: String,
}

impl ColorScale {
    /// Gradient used for statuses without a dedicated scale.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new("lightblue", "darkblue")
    }

    /// Creates a gradient from two colour names.
    #[must_use]
    pub fn new(low: &str, high: &str) -> Self {
        Self {
            low: low.to_string(),
            high: high.to_string(),
        }
    }
}

/// Number of records sharing one category value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// Category value (e.g. `Good`, `Alive`).
    pub name: String,
    /// Number of records.
    pub count: u64,
    /// Fixed chart colour, if the category has one.
    pub color: Option<String>,
}

/// One slice of a share pie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieSlice {
    /// Category value.
    pub name: String,
    /// Number of records.
    pub count: u64,
    /// Fraction of the pie total, in `[0, 1]`.
    pub share: f64,
    /// Fixed chart colour, if the category has one.
    pub color: Option<String>,
}

/// One equal-width histogram bucket, `[lower, upper)`. The last bucket
/// also includes its upper edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Upper edge.
    pub upper: f64,
    /// Number of records in this bucket.
    pub count: u64,
}

/// Distribution of tree diameters below a display cut-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiameterHistogram {
    /// Diameters at or above this value are left out of the histogram.
    pub cutoff: f64,
    /// Buckets in ascending order. Empty when no diameter is below the
    /// cut-off.
    pub bins: Vec<HistogramBin>,
    /// Records left out because their diameter is at or above the cut-off.
    pub clipped: u64,
}

/// Summary charts computed once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticAnalytics {
    /// Records per health value, most common first.
    pub health_counts: Vec<CategoryCount>,
    /// Diameter distribution for plausible diameters.
    pub diameter_histogram: DiameterHistogram,
    /// Health share pie.
    pub health_shares: Vec<PieSlice>,
    /// Records per status value, most common first.
    pub status_counts: Vec<CategoryCount>,
    /// Status share pie.
    pub status_shares: Vec<PieSlice>,
    /// Distinct status values, sorted. The first one is the default tab.
    pub status_values: Vec<String>,
    /// Distinct health values in [`Self::health_counts`] order.
    pub health_values: Vec<String>,
}

impl StaticAnalytics {
    /// Status tab selected when the analytics page opens.
    #[must_use]
    pub fn default_status(&self) -> Option<&str> {
        self.status_values.first().map(String::as_str)
    }

    /// Checklist selection used when the map page opens (every health
    /// value).
    #[must_use]
    pub fn default_health_filter(&self) -> FilterState {
        FilterState::health(self.health_values.iter().cloned())
    }
}

/// Records in one council district that passed a filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictAggregate {
    /// District key.
    pub district: CouncilDistrict,
    /// Number of records.
    pub count: u64,
    /// Arithmetic mean latitude of the records.
    pub mean_latitude: f64,
    /// Arithmetic mean longitude of the records.
    pub mean_longitude: f64,
}

/// Map centre point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapCenter {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

impl MapCenter {
    /// Centre used when an aggregation has no districts (City Hall).
    pub const NYC: Self = Self {
        latitude: 40.7128,
        longitude: -74.0060,
    };
}

/// Result of aggregating a filtered dataset by district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictAggregation {
    /// One entry per district with at least one matching record, in
    /// district order.
    pub districts: Vec<DistrictAggregate>,
    /// Mean of the district means. `None` when no record matched.
    pub center: Option<MapCenter>,
}

impl DistrictAggregation {
    /// Whether no record matched the filter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    /// Number of matching records across all districts.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.districts.iter().map(|d| d.count).sum()
    }
}

/// Everything a client needs to draw a district scatter map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Markers, sized and coloured by count.
    pub districts: Vec<DistrictAggregate>,
    /// Computed centre, `None` when there are no markers.
    pub center: Option<MapCenter>,
    /// Centre the client should actually use.
    pub display_center: MapCenter,
    /// Initial zoom level.
    pub zoom: u8,
    /// Marker colour gradient. `None` means the client's default scale.
    pub color_scale: Option<ColorScale>,
}

impl MapView {
    /// Zoom level that frames the five boroughs.
    pub const DEFAULT_ZOOM: u8 = 10;

    /// Wraps an aggregation in a view, falling back to [`MapCenter::NYC`]
    /// when it is empty.
    #[must_use]
    pub fn new(aggregation: DistrictAggregation, color_scale: Option<ColorScale>) -> Self {
        Self {
            display_center: aggregation.center.unwrap_or(MapCenter::NYC),
            center: aggregation.center,
            districts: aggregation.districts,
            zoom: Self::DEFAULT_ZOOM,
            color_scale,
        }
    }
}

/// A record restricted to the columns shown in the map data table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Census tree identifier.
    pub id: String,
    /// Street address.
    pub address: String,
    /// Common species name.
    pub species: String,
    /// Health value.
    pub health: Option<String>,
    /// Status value.
    pub status: Option<String>,
    /// Council district.
    pub council_district: CouncilDistrict,
}

impl From<&TreeRecord> for TableRow {
    fn from(record: &TreeRecord) -> Self {
        Self {
            id: record.id.clone(),
            address: record.address.clone(),
            species: record.species.clone(),
            health: record.health.clone(),
            status: record.status.clone(),
            council_district: record.council_district.clone(),
        }
    }
}

/// Header descriptor for one table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    /// Field name in [`TableRow`]'s JSON form.
    pub id: String,
    /// Display title.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(health: Option<&str>, status: Option<&str>) -> TreeRecord {
        TreeRecord {
            id: "1".to_string(),
            address: "1 MAIN ST".to_string(),
            species: "pin oak".to_string(),
            health: health.map(ToString::to_string),
            status: status.map(ToString::to_string),
            council_district: CouncilDistrict::Numbered(1),
            latitude: 40.7,
            longitude: -74.0,
            diameter: Some(10.0),
        }
    }

    #[test]
    fn health_filter_is_set_membership() {
        let filter = FilterState::health(["Good", "Fair"]);
        assert!(filter.matches(&record(Some("Good"), None)));
        assert!(!filter.matches(&record(Some("Poor"), None)));
        assert!(!filter.matches(&record(None, Some("Alive"))));
    }

    #[test]
    fn empty_health_filter_matches_nothing() {
        let filter = FilterState::health(Vec::<String>::new());
        assert!(!filter.matches(&record(Some("Good"), None)));
    }

    #[test]
    fn unknown_health_value_matches_nothing() {
        let filter = FilterState::health(["Dying"]);
        for health in ["Good", "Fair", "Poor"] {
            assert!(!filter.matches(&record(Some(health), Some("Alive"))));
        }
        assert!(!filter.matches(&record(None, Some("Alive"))));
    }

    #[test]
    fn status_filter_is_equality() {
        let filter = FilterState::status("Alive");
        assert!(filter.matches(&record(None, Some("Alive"))));
        assert!(!filter.matches(&record(None, Some("Dead"))));
        assert!(!filter.matches(&record(Some("Good"), None)));
    }

    #[test]
    fn status_scales_are_fixed() {
        assert_eq!(
            ScaledStatus::Dead.color_scale(),
            ColorScale::new("lightcoral", "red")
        );
        assert_eq!("Alive".parse::<ScaledStatus>(), Ok(ScaledStatus::Alive));
        assert!("Stump".parse::<ScaledStatus>().is_err());
    }

    #[test]
    fn health_colors() {
        assert_eq!(HealthLevel::color_for("Good"), Some("green"));
        assert_eq!(HealthLevel::color_for("Fair"), Some("yellow"));
        assert_eq!(HealthLevel::color_for("Poor"), Some("red"));
        assert_eq!(HealthLevel::color_for("Unknown"), None);
    }

    #[test]
    fn empty_aggregation_falls_back_to_default_center() {
        let view = MapView::new(
            DistrictAggregation {
                districts: Vec::new(),
                center: None,
            },
            None,
        );
        assert_eq!(view.center, None);
        assert_eq!(view.display_center, MapCenter::NYC);
        assert_eq!(view.zoom, MapView::DEFAULT_ZOOM);
    }

    #[test]
    fn filter_state_json_shape() {
        let json = serde_json::to_value(FilterState::status("Dead")).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "status", "value": "Dead"}));

        let parsed: FilterState =
            serde_json::from_value(serde_json::json!({"kind": "health", "value": ["Good"]}))
                .unwrap();
        assert_eq!(parsed, FilterState::health(["Good"]));
    }
}
