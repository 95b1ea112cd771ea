#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident record types and the anti-social behaviour category taxonomy.
//!
//! Every row of the incident table normalizes into an [`IncidentRecord`].
//! The ranking pipeline derives [`LocationTotal`]s and a
//! [`RankedIncidents`] result from a slice of them.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Number of locations kept by the default top-N ranking.
pub const DEFAULT_TOP_LOCATIONS: usize = 20;

/// Category of a logged anti-social behaviour incident.
///
/// The string forms match the values used in the `Category` column of the
/// incident table exactly.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum IncidentCategory {
    /// Drug use or dealing observed at the location
    #[serde(rename = "Drug Users/Dealers")]
    #[strum(serialize = "Drug Users/Dealers")]
    DrugUsersDealers,
    /// Groups of youths causing a disturbance
    Youths,
    /// Noise complaints
    Noise,
    /// People sleeping rough
    #[serde(rename = "Rough Sleeper")]
    #[strum(serialize = "Rough Sleeper")]
    RoughSleeper,
    /// Smoking in prohibited areas
    Smoking,
    /// Loitering
    Loitering,
    /// Indecent exposure or public urination
    #[serde(rename = "Public Indecency")]
    #[strum(serialize = "Public Indecency")]
    PublicIndecency,
    /// Trespass on private property
    Intruder,
    /// Street drinking or drunkenness
    #[serde(rename = "Drinking/Drunk")]
    #[strum(serialize = "Drinking/Drunk")]
    DrinkingDrunk,
}

impl IncidentCategory {
    /// Returns the chart colour used for this category's stacked segment.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::DrugUsersDealers => "#DC3912",
            Self::Youths => "#FF9900",
            Self::Noise => "#3366CC",
            Self::RoughSleeper => "#109618",
            Self::Smoking => "#990099",
            Self::Loitering => "#0099C6",
            Self::PublicIndecency => "#DD4477",
            Self::Intruder => "#AAAA11",
            Self::DrinkingDrunk => "#66AA00",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::DrugUsersDealers,
            Self::Youths,
            Self::Noise,
            Self::RoughSleeper,
            Self::Smoking,
            Self::Loitering,
            Self::PublicIndecency,
            Self::Intruder,
            Self::DrinkingDrunk,
        ]
    }
}

/// One row of the incident table.
///
/// Field names map onto the `Location`, `Category` and `Count` columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentRecord {
    /// Street, station or landmark where the incidents were logged.
    #[serde(rename = "Location")]
    pub location: String,
    /// Incident category.
    #[serde(rename = "Category")]
    pub category: IncidentCategory,
    /// Number of incidents of this category at this location.
    #[serde(rename = "Count")]
    pub count: u64,
}

impl IncidentRecord {
    /// Creates a record from its parts.
    #[must_use]
    pub fn new(location: impl Into<String>, category: IncidentCategory, count: u64) -> Self {
        Self {
            location: location.into(),
            category,
            count,
        }
    }
}

/// Sum of incident counts for one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationTotal {
    /// Location name.
    pub location: String,
    /// Sum of `count` over every record at this location.
    pub total: u64,
}

/// Output of the top-N location ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedIncidents {
    /// The highest-volume locations, ordered by ascending total.
    pub top_locations: Vec<String>,
    /// Input records whose location is in `top_locations`, in input order.
    pub filtered_records: Vec<IncidentRecord>,
    /// Sum of all counts in the unfiltered input.
    pub grand_total: u64,
}

impl RankedIncidents {
    /// Returns `true` if no location survived the ranking.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top_locations.is_empty()
    }
}

/// Per-category counts laid out along the ranked location axis.
///
/// `counts[i]` is the number of incidents of `category` at
/// `top_locations[i]` of the [`RankedIncidents`] it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySeries {
    /// Incident category of this series.
    pub category: IncidentCategory,
    /// Display colour for the series.
    pub color: String,
    /// One count per ranked location.
    pub counts: Vec<u64>,
}
