#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Street tree census record types.
//!
//! These types describe a single surveyed street tree as it is held in
//! memory after loading. They are shared by the dataset loader, the
//! analytics crate and the API server.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// City council district a tree is attributed to.
///
/// Census exports spell district numbers inconsistently (`"1"`, `"1.0"`),
/// so numeric spellings are normalized into [`CouncilDistrict::Numbered`].
/// Ordering is numeric for numbered districts, followed by named districts
/// and finally [`CouncilDistrict::Unassigned`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CouncilDistrict {
    /// A numbered council district.
    Numbered(u32),
    /// A district identified by a non-numeric label.
    Named(String),
    /// The record carries no district.
    Unassigned,
}

impl CouncilDistrict {
    /// Label used when serializing [`CouncilDistrict::Unassigned`].
    pub const UNASSIGNED_LABEL: &'static str = "Unassigned";

    /// Parses a raw district cell. Empty cells become
    /// [`CouncilDistrict::Unassigned`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == Self::UNASSIGNED_LABEL {
            return Self::Unassigned;
        }
        if let Ok(n) = raw.parse::<u32>() {
            return Self::Numbered(n);
        }
        if let Some(n) = parse_integral_float(raw) {
            return Self::Numbered(n);
        }
        Self::Named(raw.to_string())
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn parse_integral_float(raw: &str) -> Option<u32> {
    let value = raw.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    if value.fract() != 0.0 {
        return None;
    }
    Some(value as u32)
}

impl std::fmt::Display for CouncilDistrict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numbered(n) => write!(f, "{n}"),
            Self::Named(name) => f.write_str(name),
            Self::Unassigned => f.write_str(Self::UNASSIGNED_LABEL),
        }
    }
}

impl Serialize for CouncilDistrict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CouncilDistrict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// A single surveyed street tree.
///
/// Every record held by a loaded dataset has valid coordinates; rows
/// without them are dropped during loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeRecord {
    /// Census tree identifier.
    pub id: String,
    /// Street address nearest the tree.
    pub address: String,
    /// Common species name.
    pub species: String,
    /// Perceived health (e.g. `Good`, `Fair`, `Poor`). Absent for stumps
    /// and dead trees.
    pub health: Option<String>,
    /// Lifecycle status (e.g. `Alive`, `Stump`, `Dead`).
    pub status: Option<String>,
    /// Council district the tree belongs to.
    pub council_district: CouncilDistrict,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Diameter at breast height. Not bounded; implausible values are
    /// kept here and only clipped by views that care.
    pub diameter: Option<f64>,
}

impl TreeRecord {
    /// Returns the health value, if present.
    #[must_use]
    pub fn health(&self) -> Option<&str> {
        self.health.as_deref()
    }

    /// Returns the status value, if present.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}
