#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter, aggregation and precomputation logic for the tree census
//! dashboard.
//!
//! Every function here is a pure function of an immutable
//! [`Dataset`](tree_census_dataset::Dataset) and, where relevant, a
//! [`FilterState`](tree_census_analytics_models::FilterState). Nothing is
//! cached between calls, so the dataset can be shared freely across
//! request handlers.

pub mod aggregate;
pub mod precompute;
pub mod table;

pub use aggregate::{aggregate_by_district, color_scale_for_status, main_map, status_map};
pub use precompute::precompute;
pub use table::{project_columns, table_columns};

#[cfg(test)]
pub(crate) mod fixtures {
    use tree_census_dataset::Dataset;
    use tree_census_tree_models::{CouncilDistrict, TreeRecord};

    pub fn tree(
        id: &str,
        health: Option<&str>,
        status: Option<&str>,
        district: &str,
        latitude: f64,
        longitude: f64,
        diameter: Option<f64>,
    ) -> TreeRecord {
        TreeRecord {
            id: id.to_string(),
            address: format!("{id} BROADWAY"),
            species: "honeylocust".to_string(),
            health: health.map(ToString::to_string),
            status: status.map(ToString::to_string),
            council_district: CouncilDistrict::parse(district),
            latitude,
            longitude,
            diameter,
        }
    }

    /// The two-tree dataset used by the worked examples.
    pub fn two_trees() -> Dataset {
        Dataset::from_records(vec![
            tree("1", Some("Good"), Some("Alive"), "1", 40.7, -74.0, Some(8.0)),
            tree("2", Some("Poor"), Some("Dead"), "1", 40.71, -74.01, Some(14.0)),
        ])
    }

    pub fn borough_sample() -> Dataset {
        Dataset::from_records(vec![
            tree("10", Some("Good"), Some("Alive"), "2", 40.72, -73.98, Some(4.0)),
            tree("11", Some("Fair"), Some("Alive"), "2", 40.74, -73.99, Some(12.0)),
            tree("12", Some("Good"), Some("Alive"), "10", 40.80, -73.95, Some(30.0)),
            tree("13", None, Some("Stump"), "10", 40.81, -73.94, Some(0.0)),
            tree("14", None, Some("Dead"), "", 40.60, -74.10, Some(250.0)),
            tree("15", Some("Poor"), Some("Alive"), "51", 40.58, -74.15, Some(99.0)),
            tree("16", Some("Good"), Some("Alive"), "51.0", 40.56, -74.17, None),
        ])
    }
}
