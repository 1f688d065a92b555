//! Column projection for the map data table.

use tree_census_analytics_models::{FilterState, TableColumn, TableRow};
use tree_census_dataset::Dataset;

/// JSON field names of [`TableRow`], in display order.
pub const TABLE_FIELDS: [&str; 6] = [
    "id",
    "address",
    "species",
    "health",
    "status",
    "councilDistrict",
];

/// Rows matching `filter`, restricted to the table columns, in dataset
/// order. Paging and sorting are left to the client.
#[must_use]
pub fn project_columns(dataset: &Dataset, filter: &FilterState) -> Vec<TableRow> {
    dataset
        .iter()
        .filter(|r| filter.matches(r))
        .map(TableRow::from)
        .collect()
}

/// Header descriptors for the table, titled from the field names.
#[must_use]
pub fn table_columns() -> Vec<TableColumn> {
    TABLE_FIELDS
        .iter()
        .map(|field| TableColumn {
            id: (*field).to_string(),
            name: title_case(field),
        })
        .collect()
}

/// `councilDistrict` -> `Council District`.
fn title_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for (i, c) in field.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out
}
