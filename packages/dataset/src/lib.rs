#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Street tree census CSV loader.
//!
//! Reads a census export (optionally gzip-compressed), discards rows that
//! lack usable coordinates, and returns an immutable [`Dataset`] that the
//! rest of the process shares for its whole lifetime.

pub mod parsing;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tree_census_tree_models::{CouncilDistrict, TreeRecord};

use crate::parsing::{non_blank, parse_f64, parse_lat_lng};

/// Errors that make the dataset unavailable. All of them are fatal at
/// startup.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file is missing or unreadable.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The source is not valid CSV.
    #[error("CSV error in {label}: {source}")]
    Csv {
        /// Human-readable name of the source.
        label: String,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// No row survived coordinate filtering.
    #[error("No rows with coordinates in {label} ({rows_read} rows read)")]
    Empty {
        /// Human-readable name of the source.
        label: String,
        /// Number of data rows read before filtering.
        rows_read: u64,
    },
}

/// One CSV row as exported by the census, keyed by header name.
#[derive(Debug, Deserialize)]
struct RawTreeRow {
    #[serde(rename = "tree_id")]
    id: Option<String>,
    address: Option<String>,
    #[serde(rename = "spc_common")]
    species: Option<String>,
    health: Option<String>,
    status: Option<String>,
    #[serde(rename = "council district")]
    council_district: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
    #[serde(rename = "tree_dbh")]
    diameter: Option<String>,
}

impl RawTreeRow {
    fn into_record(self) -> Option<TreeRecord> {
        let (latitude, longitude) =
            parse_lat_lng(self.latitude.as_deref(), self.longitude.as_deref())?;

        Some(TreeRecord {
            id: non_blank(self.id).unwrap_or_default(),
            address: non_blank(self.address).unwrap_or_default(),
            species: non_blank(self.species).unwrap_or_default(),
            health: non_blank(self.health),
            status: non_blank(self.status),
            council_district: self
                .council_district
                .as_deref()
                .map_or(CouncilDistrict::Unassigned, CouncilDistrict::parse),
            latitude,
            longitude,
            diameter: parse_f64(self.diameter.as_deref()),
        })
    }
}

/// Immutable, in-memory census table.
///
/// Invariant: every record has finite latitude and longitude.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<TreeRecord>,
}

impl Dataset {
    /// Builds a dataset from already-parsed records, dropping any whose
    /// coordinates are not finite.
    #[must_use]
    pub fn from_records(records: Vec<TreeRecord>) -> Self {
        let records = records
            .into_iter()
            .filter(|r| r.latitude.is_finite() && r.longitude.is_finite())
            .collect();
        Self { records }
    }

    /// All records, in source order.
    #[must_use]
    pub fn records(&self) -> &[TreeRecord] {
        &self.records
    }

    /// Iterates over all records in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, TreeRecord> {
        self.records.iter()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a TreeRecord;
    type IntoIter = std::slice::Iter<'a, TreeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Loads the census CSV at `path`.
///
/// Files ending in `.gz` are decompressed while reading.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read, is not valid CSV, or
/// contains no row with usable coordinates.
pub fn load(path: &Path) -> Result<Dataset, LoadError> {
    let label = path.display().to_string();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: label.clone(),
        source,
    })?;
    let reader = BufReader::new(file);

    let is_gzipped = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));

    log::info!("Loading tree census from {label}");

    if is_gzipped {
        load_from_reader(flate2::read::GzDecoder::new(reader), &label)
    } else {
        load_from_reader(reader, &label)
    }
}

/// Loads census rows from any reader. `label` names the source in log
/// messages and errors.
///
/// # Errors
///
/// Returns [`LoadError`] if the input is not valid CSV or contains no row
/// with usable coordinates.
pub fn load_from_reader<R: Read>(reader: R, label: &str) -> Result<Dataset, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut rows_read: u64 = 0;

    for row in csv_reader.deserialize::<RawTreeRow>() {
        let row = row.map_err(|source| csv_error(label, source))?;
        rows_read += 1;
        if let Some(record) = row.into_record() {
            records.push(record);
        }
    }

    let discarded = rows_read - records.len() as u64;
    if discarded > 0 {
        log::info!("[{label}] Discarded {discarded} rows without coordinates");
    }

    if records.is_empty() {
        return Err(LoadError::Empty {
            label: label.to_string(),
            rows_read,
        });
    }

    log::info!("[{label}] Loaded {} tree records", records.len());

    Ok(Dataset { records })
}

fn csv_error(label: &str, source: csv::Error) -> LoadError {
    LoadError::Csv {
        label: label.to_string(),
        source,
    }
}
