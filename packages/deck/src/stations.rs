//! The critical transport triangle: St Pancras, King's Cross and Camden
//! Town.

use serde::Serialize;

/// Passenger numbers for one year, in millions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    /// Calendar year.
    pub year: u16,
    /// Passengers in millions.
    pub passengers_millions: f64,
}

/// A named stretch of the growth series, drawn as its own filled segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPhase {
    /// Phase label.
    pub name: &'static str,
    /// Segment colour.
    pub color: &'static str,
    /// Start and end points of the phase.
    pub points: [GrowthPoint; 2],
}

/// Facts shown when a station is selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Station name.
    pub name: &'static str,
    /// Slide image file name.
    pub image: &'static str,
    /// Yearly entries and exits, if shown as a headline figure.
    pub yearly_usage: Option<u64>,
    /// Short tag shown under the headline figure.
    pub usage_label: Option<&'static str>,
    /// Explanatory note.
    pub info: &'static str,
    /// Passenger growth phases, oldest first.
    pub growth: Vec<GrowthPhase>,
}

const CAMDEN_TOWN_GROWTH: [GrowthPoint; 4] = [
    GrowthPoint {
        year: 2020,
        passengers_millions: 5.51,
    },
    GrowthPoint {
        year: 2021,
        passengers_millions: 9.12,
    },
    GrowthPoint {
        year: 2022,
        passengers_millions: 17.34,
    },
    GrowthPoint {
        year: 2023,
        passengers_millions: 18.81,
    },
];

/// Returns the three transport hubs in slide order.
#[must_use]
pub fn stations() -> Vec<Station> {
    vec![
        Station {
            name: "St Pancras International",
            image: "1.png",
            yearly_usage: Some(35_959_980),
            usage_label: Some("High Volume"),
            info: "International trains: the London terminal for the Eurostar, \
                   which runs high-speed trains to Paris, Brussels, Amsterdam, \
                   and other destinations in Europe.",
            growth: Vec::new(),
        },
        Station {
            name: "Kings Cross Station",
            image: "2.png",
            yearly_usage: Some(24_483_824),
            usage_label: Some("Major Interchange"),
            info: "Major UK rail hub: trains from King's Cross go mainly to the \
                   north and east of England, including York, Newcastle, Leeds, \
                   Edinburgh, and other destinations along the East Coast Main Line.",
            growth: Vec::new(),
        },
        Station {
            name: "Camden Town Station",
            image: "3.png",
            yearly_usage: None,
            usage_label: None,
            info: "The annual crime rate in the area around Camden Town \
                   Underground Station (Oct 2024 to Sept 2025) is 1,597 crimes \
                   per 1,000 resident population.",
            growth: camden_town_growth(),
        },
    ]
}

/// Looks up a station by name, ignoring ASCII case.
#[must_use]
pub fn station(name: &str) -> Option<Station> {
    stations()
        .into_iter()
        .find(|s| s.name.eq_ignore_ascii_case(name))
}

fn camden_town_growth() -> Vec<GrowthPhase> {
    let [y2020, y2021, y2022, y2023] = CAMDEN_TOWN_GROWTH;
    vec![
        GrowthPhase {
            name: "Recovery",
            color: "#1f77b4",
            points: [y2020, y2021],
        },
        GrowthPhase {
            name: "Growth",
            color: "#f1c40f",
            points: [y2021, y2022],
        },
        GrowthPhase {
            name: "High Traffic",
            color: "#d92828",
            points: [y2022, y2023],
        },
    ]
}
