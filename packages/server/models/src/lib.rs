#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the strategy deck server.
//!
//! These types are serialized to JSON for the REST API. They wrap the
//! pipeline outputs with the labels and colours the charts need so the
//! front end does no arithmetic of its own.

use camden_commodity_models::{CommodityKind, CommodityRow};
use camden_incident_models::{CategorySeries, IncidentRecord, RankedIncidents};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable error.
    pub error: String,
}

impl ApiError {
    /// Creates an error body.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Query parameters for the top locations endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopLocationsParams {
    /// Number of locations to keep. Defaults to the configured top N.
    pub limit: Option<usize>,
}

/// Top incident locations, ready for a stacked horizontal bar chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTopLocations {
    /// Chart title carrying the grand total.
    pub title: String,
    /// Sum of every count in the incident table.
    pub grand_total: u64,
    /// Location axis, ascending by total.
    pub top_locations: Vec<String>,
    /// Incident rows at the top locations, in table order.
    pub records: Vec<IncidentRecord>,
    /// Per-category counts along `top_locations`.
    pub series: Vec<CategorySeries>,
}

impl ApiTopLocations {
    /// Wraps a ranking result and its category breakdown.
    #[must_use]
    pub fn new(ranked: RankedIncidents, series: Vec<CategorySeries>) -> Self {
        Self {
            title: format!("Total Incidents: {}", ranked.grand_total),
            grand_total: ranked.grand_total,
            top_locations: ranked.top_locations,
            records: ranked.filtered_records,
            series,
        }
    }
}

/// One bar of the commodity comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCommodityRow {
    /// Commodity name.
    pub commodity: String,
    /// Value in billions of pounds.
    pub value: f64,
    /// Legal or illegal.
    pub kind: CommodityKind,
    /// Bar colour.
    pub color: String,
    /// Bar label, e.g. `£8.7B`.
    pub label: String,
}

impl From<CommodityRow> for ApiCommodityRow {
    fn from(row: CommodityRow) -> Self {
        Self {
            label: format!("£{:.1}B", row.value),
            color: row.kind.color().to_string(),
            commodity: row.commodity,
            value: row.value,
            kind: row.kind,
        }
    }
}

/// The commodity comparison chart for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCommodityTable {
    /// Whether the illicit market row is shown.
    pub revealed: bool,
    /// Rows, descending by value.
    pub rows: Vec<ApiCommodityRow>,
}

impl ApiCommodityTable {
    /// Builds the response from a reveal flag and its table.
    #[must_use]
    pub fn new(revealed: bool, rows: Vec<CommodityRow>) -> Self {
        Self {
            revealed,
            rows: rows.into_iter().map(ApiCommodityRow::from).collect(),
        }
    }
}
