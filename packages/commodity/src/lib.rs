#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Legal imports vs. illicit market comparison table.
//!
//! The ten largest legal UK import categories are fixed data. The illicit
//! drugs market estimate is appended only while the reveal toggle is set,
//! and the combined table is always ordered by descending value.

pub use camden_commodity_models::{CommodityKind, CommodityRow, RevealState};

/// Legal import categories and their value in billions of pounds, in
/// source order.
pub const LEGAL_IMPORTS: &[(&str, f64)] = &[
    ("Mineral Fuels", 8.7),
    ("Mechanical Appliances", 6.4),
    ("Electronic Equipment", 5.3),
    ("Precious Metals", 4.2),
    ("Motor Vehicles", 4.1),
    ("Pharmaceuticals", 2.0),
    ("Other Products", 1.6),
    ("Plastics", 1.5),
    ("Measuring Devices", 1.3),
    ("Knitwear", 1.3),
];

/// Name of the illicit market row.
pub const ILLICIT_DRUGS: &str = "Illicit Drugs";

/// Estimated illicit drugs market in billions of pounds.
pub const ILLICIT_DRUGS_VALUE: f64 = 9.4;

/// Returns the legal import rows in source order.
#[must_use]
pub fn base_table() -> Vec<CommodityRow> {
    LEGAL_IMPORTS
        .iter()
        .map(|(name, value)| CommodityRow::new(*name, *value, CommodityKind::Legal))
        .collect()
}

/// Returns the illicit market row.
#[must_use]
pub fn illicit_row() -> CommodityRow {
    CommodityRow::new(ILLICIT_DRUGS, ILLICIT_DRUGS_VALUE, CommodityKind::Illegal)
}

/// Builds the comparison table, sorted by descending value.
///
/// Equal values keep insertion order (base rows first, then the illicit
/// row).
#[must_use]
pub fn build_comparison_table(revealed: bool) -> Vec<CommodityRow> {
    let mut rows = base_table();
    if revealed {
        rows.push(illicit_row());
    }

    // `sort_by` is stable
    rows.sort_by(|a, b| b.value.total_cmp(&a.value));

    log::trace!(
        "Built commodity table: {} rows (revealed={revealed})",
        rows.len()
    );

    rows
}

/// Builds the comparison table for the given toggle state.
#[must_use]
pub fn table_for(state: RevealState) -> Vec<CommodityRow> {
    build_comparison_table(state.is_revealed())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rows: &[CommodityRow]) -> Vec<&str> {
        rows.iter().map(|r| r.commodity.as_str()).collect()
    }

    #[test]
    fn hidden_table_has_ten_legal_rows() {
        let rows = build_comparison_table(false);
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|r| r.kind == CommodityKind::Legal));
        assert_eq!(rows[0].commodity, "Mineral Fuels");
        assert!((rows[0].value - 8.7).abs() < f64::EPSILON);
    }

    #[test]
    fn revealed_table_leads_with_illicit_drugs() {
        let rows = build_comparison_table(true);
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[0], illicit_row());
        assert_eq!(
            rows.iter()
                .filter(|r| r.kind == CommodityKind::Illegal)
                .count(),
            1
        );
        assert_eq!(rows[1].commodity, "Mineral Fuels");
    }

    #[test]
    fn rows_are_descending_by_value() {
        for revealed in [false, true] {
            let rows = build_comparison_table(revealed);
            assert!(rows.windows(2).all(|w| w[0].value >= w[1].value));
        }
    }

    #[test]
    fn equal_values_keep_source_order() {
        let rows = build_comparison_table(false);
        let tail = &names(&rows)[8..];
        assert_eq!(tail, ["Measuring Devices", "Knitwear"]);
    }

    #[test]
    fn reveal_reset_reveal_reproduces_first_reveal() {
        let mut state = RevealState::new();
        state.reveal();
        let first = table_for(state);
        state.reset();
        assert_eq!(table_for(state).len(), 10);
        state.reveal();
        state.reveal();
        assert_eq!(table_for(state), first);
    }

    #[test]
    fn base_table_is_unsorted_source_order() {
        let rows = base_table();
        assert_eq!(rows.len(), LEGAL_IMPORTS.len());
        assert_eq!(names(&rows)[5], "Pharmaceuticals");
    }
}
