//! Plain-text renderings of each deck view.

use std::fmt::Write as _;

use camden_assets::IntegrityReport;
use camden_cli_utils::{Align, TextTable};
use camden_commodity::CommodityRow;
use camden_deck::stations::Station;
use camden_incident::RankedIncidents;
use camden_incident::ranking::category_breakdown;

/// Renders the ranked locations with one column per category, largest
/// location first.
pub fn top_locations(ranked: &RankedIncidents) -> String {
    let mut out = format!("Total Incidents: {}\n\n", ranked.grand_total);

    if ranked.is_empty() {
        out.push_str("No incidents recorded.\n");
        return out;
    }

    let series = category_breakdown(ranked);

    let mut headers: Vec<(&str, Align)> = vec![("Location", Align::Left)];
    headers.extend(series.iter().map(|s| (s.category.as_ref(), Align::Right)));
    headers.push(("Total", Align::Right));
    let mut table = TextTable::new(&headers);

    for (slot, location) in ranked.top_locations.iter().enumerate().rev() {
        let mut row = vec![location.clone()];
        let mut total: u64 = 0;
        for s in &series {
            total = total.saturating_add(s.counts[slot]);
            row.push(s.counts[slot].to_string());
        }
        row.push(total.to_string());
        table.push(row);
    }

    out.push_str(&table.render());
    out
}

/// Renders the commodity comparison, highest value first.
pub fn commodities(rows: &[CommodityRow], revealed: bool) -> String {
    let mut table = TextTable::new(&[
        ("Commodity", Align::Left),
        ("Value", Align::Right),
        ("Type", Align::Left),
    ]);

    for row in rows {
        table.push(vec![
            row.commodity.clone(),
            format!("£{:.1}B", row.value),
            row.kind.to_string(),
        ]);
    }

    let mut out = table.render();
    if !revealed {
        out.push_str("\n(illicit market hidden)\n");
    }
    out
}

/// Renders the transport hub facts.
pub fn stations(stations: &[Station]) -> String {
    let mut out = String::new();

    for station in stations {
        let _ = writeln!(out, "{}", station.name);
        if let Some(usage) = station.yearly_usage {
            let label = station.usage_label.unwrap_or_default();
            let _ = writeln!(out, "  Yearly usage: {} {label}", group_thousands(usage));
        }
        let _ = writeln!(out, "  {}", station.info);
        for phase in &station.growth {
            let [start, end] = phase.points;
            let _ = writeln!(
                out,
                "  {}: {} {:.2}M -> {} {:.2}M",
                phase.name,
                start.year,
                start.passengers_millions,
                end.year,
                end.passengers_millions
            );
        }
        out.push('\n');
    }

    out
}

/// Renders an integrity report, one line per missing file.
pub fn integrity(report: &IntegrityReport) -> String {
    if report.is_complete() {
        return "All deck assets present.\n".to_string();
    }

    let mut out = String::new();
    for path in &report.missing_data {
        let _ = writeln!(out, "missing data:  {}", path.display());
    }
    for path in &report.missing_images {
        let _ = writeln!(out, "missing image: {}", path.display());
    }
    out
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use camden_commodity::{RevealState, table_for};
    use camden_incident::ranking::rank_top_locations;
    use camden_incident::{IncidentCategory, IncidentRecord};

    use super::*;

    #[test]
    fn top_locations_lists_largest_first() {
        let records = vec![
            IncidentRecord::new("A", IncidentCategory::Noise, 5),
            IncidentRecord::new("B", IncidentCategory::Noise, 3),
            IncidentRecord::new("A", IncidentCategory::Youths, 2),
        ];
        let text = top_locations(&rank_top_locations(&records, 20));

        assert!(text.starts_with("Total Incidents: 10\n"));
        let a = text.find("\nA ").unwrap();
        let b = text.find("\nB ").unwrap();
        assert!(a < b);
    }

    #[test]
    fn empty_ranking_says_so() {
        let text = top_locations(&rank_top_locations(&[], 20));
        assert_eq!(text, "Total Incidents: 0\n\nNo incidents recorded.\n");
    }

    #[test]
    fn hidden_table_notes_the_hidden_row() {
        let text = commodities(&table_for(RevealState::new()), false);
        assert!(!text.contains("Illicit Drugs"));
        assert!(text.contains("(illicit market hidden)"));
    }

    #[test]
    fn revealed_table_shows_illicit_value() {
        let mut state = RevealState::new();
        state.reveal();
        let text = commodities(&table_for(state), true);
        assert!(text.contains("Illicit Drugs"));
        assert!(text.contains("£9.4B"));
    }

    #[test]
    fn stations_show_grouped_usage() {
        let text = stations(&camden_deck::stations::stations());
        assert!(text.contains("35,959,980 High Volume"));
        assert!(text.contains("Recovery: 2020 5.51M -> 2021 9.12M"));
    }

    #[test]
    fn integrity_lists_missing_files() {
        let report = IntegrityReport {
            missing_data: vec![PathBuf::from("data.csv")],
            missing_images: vec![PathBuf::from("4.png")],
        };
        assert_eq!(
            integrity(&report),
            "missing data:  data.csv\nmissing image: 4.png\n"
        );
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(24_483_824), "24,483,824");
    }
}
