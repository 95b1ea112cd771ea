//! Top-N location ranking over incident records.
//!
//! Locations are grouped in first-seen order, stably sorted by ascending
//! total and truncated to the highest `limit` entries. The surviving
//! locations keep ascending order so a consumer stacking bars one after the
//! other puts the busiest location at the far end of the axis.
//!
//! Sums saturate at `u64::MAX`. Tables from [`crate::load`] are already
//! rejected when their counts overflow, so saturation only affects records
//! built by hand.

use std::collections::{BTreeMap, BTreeSet};

use camden_incident_models::{
    CategorySeries, DEFAULT_TOP_LOCATIONS, IncidentCategory, IncidentRecord, LocationTotal,
    RankedIncidents,
};

/// Sums incident counts per location.
///
/// Returns one entry per distinct location, in the order each location is
/// first seen in `records`.
#[must_use]
pub fn location_totals(records: &[IncidentRecord]) -> Vec<LocationTotal> {
    let mut index: BTreeMap<&str, usize> = BTreeMap::new();
    let mut totals: Vec<LocationTotal> = Vec::new();

    for record in records {
        if let Some(&i) = index.get(record.location.as_str()) {
            totals[i].total = totals[i].total.saturating_add(record.count);
        } else {
            index.insert(record.location.as_str(), totals.len());
            totals.push(LocationTotal {
                location: record.location.clone(),
                total: record.count,
            });
        }
    }

    totals
}

/// Returns the `limit` highest location totals in ascending order.
///
/// Equal totals keep first-seen order, so when a tie straddles the cutoff
/// the later-seen locations are the ones retained.
#[must_use]
pub fn top_location_totals(records: &[IncidentRecord], limit: usize) -> Vec<LocationTotal> {
    let mut totals = location_totals(records);
    // `sort_by_key` is stable
    totals.sort_by_key(|t| t.total);
    let keep = limit.min(totals.len());
    totals.split_off(totals.len() - keep)
}

/// Ranks locations by incident volume and filters the records down to the
/// top `limit` locations.
///
/// `grand_total` always covers the full input regardless of truncation.
#[must_use]
pub fn rank_top_locations(records: &[IncidentRecord], limit: usize) -> RankedIncidents {
    let top_locations: Vec<String> = top_location_totals(records, limit)
        .into_iter()
        .map(|t| t.location)
        .collect();

    let keep: BTreeSet<&str> = top_locations.iter().map(String::as_str).collect();
    let filtered_records = records
        .iter()
        .filter(|r| keep.contains(r.location.as_str()))
        .cloned()
        .collect();

    let grand_total = records
        .iter()
        .fold(0_u64, |sum, r| sum.saturating_add(r.count));

    log::debug!(
        "Ranked {} records: {} top locations, grand total {grand_total}",
        records.len(),
        top_locations.len()
    );

    RankedIncidents {
        top_locations,
        filtered_records,
        grand_total,
    }
}

/// [`rank_top_locations`] with the default limit of
/// [`DEFAULT_TOP_LOCATIONS`].
#[must_use]
pub fn rank_default(records: &[IncidentRecord]) -> RankedIncidents {
    rank_top_locations(records, DEFAULT_TOP_LOCATIONS)
}

/// Pivots ranked records into one series per category for a stacked chart.
///
/// Series appear in the order their category first occurs in
/// `filtered_records`; each series has one count per entry of
/// `top_locations`, zero where the category was not logged.
#[must_use]
pub fn category_breakdown(ranked: &RankedIncidents) -> Vec<CategorySeries> {
    let axis: BTreeMap<&str, usize> = ranked
        .top_locations
        .iter()
        .enumerate()
        .map(|(i, location)| (location.as_str(), i))
        .collect();

    let mut order: BTreeMap<IncidentCategory, usize> = BTreeMap::new();
    let mut series: Vec<CategorySeries> = Vec::new();

    for record in &ranked.filtered_records {
        let Some(&slot) = axis.get(record.location.as_str()) else {
            continue;
        };

        let i = *order.entry(record.category).or_insert_with(|| {
            series.push(CategorySeries {
                category: record.category,
                color: record.category.color().to_string(),
                counts: vec![0; ranked.top_locations.len()],
            });
            series.len() - 1
        });

        let count = &mut series[i].counts[slot];
        *count = count.saturating_add(record.count);
    }

    series
}

#[cfg(test)]
mod tests {
    use camden_incident_models::IncidentCategory::{DrugUsersDealers, Noise, Smoking, Youths};

    use super::*;

    fn scenario() -> Vec<IncidentRecord> {
        vec![
            IncidentRecord::new("A", Noise, 3),
            IncidentRecord::new("B", Youths, 10),
            IncidentRecord::new("A", Smoking, 2),
        ]
    }

    /// `count` locations named `L0..`, location `i` having total `i + 1`.
    fn many_locations(count: usize) -> Vec<IncidentRecord> {
        (0..count)
            .map(|i| IncidentRecord::new(format!("L{i}"), Noise, i as u64 + 1))
            .collect()
    }

    #[test]
    fn totals_follow_first_seen_order() {
        let totals = location_totals(&scenario());
        assert_eq!(
            totals,
            vec![
                LocationTotal {
                    location: "A".to_string(),
                    total: 5
                },
                LocationTotal {
                    location: "B".to_string(),
                    total: 10
                },
            ]
        );
    }

    #[test]
    fn grouping_conserves_mass() {
        let records = many_locations(37);
        let grouped: u64 = location_totals(&records).iter().map(|t| t.total).sum();
        let raw: u64 = records.iter().map(|r| r.count).sum();
        assert_eq!(grouped, raw);
    }

    #[test]
    fn small_scenario_keeps_everything() {
        let records = scenario();
        let ranked = rank_default(&records);
        assert_eq!(ranked.top_locations, vec!["A", "B"]);
        assert_eq!(ranked.grand_total, 15);
        assert_eq!(ranked.filtered_records, records);
    }

    #[test]
    fn empty_input_degrades_to_empty_output() {
        let ranked = rank_default(&[]);
        assert!(ranked.is_empty());
        assert!(ranked.filtered_records.is_empty());
        assert_eq!(ranked.grand_total, 0);
        assert!(category_breakdown(&ranked).is_empty());
    }

    #[test]
    fn truncates_to_twenty_highest_ascending() {
        let records = many_locations(25);
        let ranked = rank_default(&records);

        assert_eq!(ranked.top_locations.len(), 20);
        assert_eq!(ranked.top_locations.first().map(String::as_str), Some("L5"));
        assert_eq!(ranked.top_locations.last().map(String::as_str), Some("L24"));
        assert_eq!(ranked.filtered_records.len(), 20);
        assert!(
            ranked
                .filtered_records
                .iter()
                .all(|r| r.location != "L0" && r.location != "L4")
        );
    }

    #[test]
    fn grand_total_ignores_truncation() {
        let records = many_locations(25);
        let full: u64 = (1..=25).sum();
        assert_eq!(rank_default(&records).grand_total, full);
        assert_eq!(rank_top_locations(&records, 1).grand_total, full);
        assert_eq!(rank_top_locations(&records, 0).grand_total, full);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let records = vec![
            IncidentRecord::new("X", Noise, 4),
            IncidentRecord::new("Y", Noise, 4),
            IncidentRecord::new("Z", Noise, 1),
            IncidentRecord::new("W", Noise, 4),
        ];
        let ranked = rank_top_locations(&records, 3);
        assert_eq!(ranked.top_locations, vec!["X", "Y", "W"]);

        let ranked = rank_top_locations(&records, 2);
        assert_eq!(ranked.top_locations, vec!["Y", "W"]);
    }

    #[test]
    fn filtered_records_keep_input_order() {
        let records = vec![
            IncidentRecord::new("B", Youths, 10),
            IncidentRecord::new("C", Noise, 1),
            IncidentRecord::new("A", Noise, 3),
            IncidentRecord::new("B", Smoking, 1),
            IncidentRecord::new("A", Smoking, 9),
        ];
        let ranked = rank_top_locations(&records, 2);
        assert_eq!(ranked.top_locations, vec!["B", "A"]);
        assert_eq!(
            ranked.filtered_records,
            vec![
                records[0].clone(),
                records[2].clone(),
                records[3].clone(),
                records[4].clone(),
            ]
        );
    }

    #[test]
    fn exactly_twenty_locations_are_all_kept() {
        let records = many_locations(20);
        let ranked = rank_default(&records);
        assert_eq!(ranked.top_locations.len(), 20);
        assert_eq!(ranked.filtered_records, records);
    }

    #[test]
    fn twenty_first_location_is_dropped() {
        let records = many_locations(21);
        let ranked = rank_default(&records);
        assert_eq!(ranked.top_locations.len(), 20);
        assert_eq!(ranked.top_locations.first().map(String::as_str), Some("L1"));
        assert_eq!(ranked.filtered_records, records[1..].to_vec());
        assert_eq!(ranked.grand_total, (1..=21).sum::<u64>());
    }

    #[test]
    fn huge_counts_saturate_instead_of_overflowing() {
        let half = u64::MAX / 2 + 1;
        let records = vec![
            IncidentRecord::new("A", Noise, half),
            IncidentRecord::new("B", Noise, half),
            IncidentRecord::new("B", Youths, half),
        ];
        let ranked = rank_default(&records);
        assert_eq!(ranked.grand_total, u64::MAX);
        assert_eq!(ranked.top_locations, vec!["A", "B"]);
        assert_eq!(
            location_totals(&records)[1].total,
            u64::MAX,
            "B's total saturates"
        );
    }

    #[test]
    fn ranking_is_idempotent() {
        let records = many_locations(30);
        assert_eq!(rank_default(&records), rank_default(&records));
    }

    #[test]
    fn breakdown_aligns_counts_with_location_axis() {
        let records = vec![
            IncidentRecord::new("A", Noise, 3),
            IncidentRecord::new("B", DrugUsersDealers, 10),
            IncidentRecord::new("A", DrugUsersDealers, 2),
            IncidentRecord::new("A", Noise, 1),
        ];
        let ranked = rank_default(&records);
        assert_eq!(ranked.top_locations, vec!["A", "B"]);

        let series = category_breakdown(&ranked);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].category, Noise);
        assert_eq!(series[0].counts, vec![4, 0]);
        assert_eq!(series[1].category, DrugUsersDealers);
        assert_eq!(series[1].counts, vec![2, 10]);
        assert_eq!(series[1].color, "#DC3912");
    }
}
