#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the tree census server.
//!
//! These types are serialized to JSON for the REST API. They describe page
//! layouts, the client events the dashboard reacts to, and the updates it
//! sends back.

use serde::{Deserialize, Serialize};
use tree_census_analytics_models::{
    FilterState, MapView, StaticAnalytics, TableColumn, TableRow,
};

/// Dashboard title shown on every page.
pub const DASHBOARD_TITLE: &str = "NYC Street Tree Census";

/// Rows per page in the map data table.
pub const TABLE_PAGE_SIZE: u32 = 10;

/// A browser-routable page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Health-filtered district map with a data table. The default page.
    Map,
    /// Summary charts and the status map.
    Analytics,
}

impl Page {
    /// Path of the analytics page.
    pub const ANALYTICS_PATH: &'static str = "/analytics";

    /// Resolves a URL path. Anything other than the analytics path shows
    /// the map page.
    #[must_use]
    pub fn from_pathname(pathname: &str) -> Self {
        if pathname == Self::ANALYTICS_PATH {
            Self::Analytics
        } else {
            Self::Map
        }
    }

    /// Canonical URL path of this page.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Map => "/",
            Self::Analytics => Self::ANALYTICS_PATH,
        }
    }

    /// Navigation menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Map => "Map View",
            Self::Analytics => "Analytics",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Map, Self::Analytics]
    }
}

/// A navigation menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    /// Menu label.
    pub label: String,
    /// Target path.
    pub href: String,
}

/// A checklist option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistOption {
    /// Display label.
    pub label: String,
    /// Submitted value.
    pub value: String,
}

/// Page-specific controls and content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageContent {
    /// Map page controls.
    #[serde(rename_all = "camelCase")]
    Map {
        /// Health checklist options.
        health_options: Vec<ChecklistOption>,
        /// Initially checked health values.
        selected_health: Vec<String>,
        /// Data table header.
        table_columns: Vec<TableColumn>,
        /// Data table rows per page.
        page_size: u32,
    },
    /// Analytics page charts and controls.
    #[serde(rename_all = "camelCase")]
    Analytics {
        /// Static summary charts.
        analytics: Box<StaticAnalytics>,
        /// Status tab values.
        status_tabs: Vec<String>,
        /// Initially selected status tab. `None` when the dataset has no
        /// status values.
        selected_status: Option<String>,
    },
}

/// Layout returned for a URL path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    /// Dashboard title.
    pub title: String,
    /// Navigation menu.
    pub nav: Vec<NavLink>,
    /// Page-specific content.
    pub content: PageContent,
}

impl PageLayout {
    /// Which page this layout describes.
    #[must_use]
    pub const fn page(&self) -> Page {
        match self.content {
            PageContent::Map { .. } => Page::Map,
            PageContent::Analytics { .. } => Page::Analytics,
        }
    }
}

/// A client interaction the dashboard reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "camelCase")]
pub enum DashboardEvent {
    /// The browser navigated to a path.
    PathChanged(String),
    /// The map page health checklist changed.
    HealthSelectionChanged(Vec<String>),
    /// The analytics page status tab changed.
    StatusTabChanged(String),
}

/// One component refresh produced by a [`DashboardEvent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target", content = "value", rename_all = "camelCase")]
pub enum DashboardUpdate {
    /// Replace the page body.
    PageContent(Box<PageLayout>),
    /// Redraw the map page district map.
    MainMap(MapView),
    /// Replace the map page table rows.
    MapTable(Vec<TableRow>),
    /// Redraw the analytics page status map.
    AnalyticsMap(MapView),
}

/// Query parameters for `GET /api/layout`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutQueryParams {
    /// URL path to resolve. Defaults to `/`.
    pub pathname: Option<String>,
}

/// Query parameters for the health-filtered endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthQueryParams {
    /// Comma-separated health values. Missing means every health value;
    /// present but empty means none.
    pub health: Option<String>,
}

impl HealthQueryParams {
    /// Converts the query into a filter. `all_values` is the selection used
    /// when the parameter is missing.
    #[must_use]
    pub fn filter(&self, all_values: &[String]) -> FilterState {
        self.health.as_deref().map_or_else(
            || FilterState::health(all_values.iter().cloned()),
            |list| {
                FilterState::health(
                    list.split(',')
                        .map(str::trim)
                        .filter(|v| !v.is_empty()),
                )
            },
        )
    }
}

/// Query parameters for `GET /api/analytics/map`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQueryParams {
    /// Status tab value. Defaults to the first tab.
    pub status: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of loaded tree records.
    pub records: usize,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}
