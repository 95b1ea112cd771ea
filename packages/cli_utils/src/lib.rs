#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared CLI utilities for the strategy deck.
//!
//! Provides [`init_logger`], which configures `pretty_env_logger` from
//! `RUST_LOG`, and [`TextTable`] for printing aligned columns in a terminal.

use std::fmt::Write as _;

/// Initializes the global logger from `RUST_LOG`, defaulting to `info`.
///
/// Safe to call more than once; later calls are ignored (e.g., in tests).
pub fn init_logger() {
    let mut builder = pretty_env_logger::formatted_builder();
    builder
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG");

    let logger = builder.build();
    let level = logger.filter();

    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
}

/// Column alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Pad on the right.
    Left,
    /// Pad on the left.
    Right,
}

/// A plain-text table with a header row and aligned columns.
#[derive(Debug, Clone)]
pub struct TextTable {
    headers: Vec<(String, Align)>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Creates a table with the given column headers.
    #[must_use]
    pub fn new(headers: &[(&str, Align)]) -> Self {
        Self {
            headers: headers
                .iter()
                .map(|(h, a)| ((*h).to_string(), *a))
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row. Missing cells render empty; extra cells are dropped.
    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Renders the table, one line per row, with a rule under the header.
    #[must_use]
    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, (header, _))| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        let header_cells: Vec<&str> = self.headers.iter().map(|(h, _)| h.as_str()).collect();
        self.render_line(&mut out, &header_cells, &widths);

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let rule_cells: Vec<&str> = rule.iter().map(String::as_str).collect();
        self.render_line(&mut out, &rule_cells, &widths);

        for row in &self.rows {
            let cells: Vec<&str> = (0..widths.len())
                .map(|i| row.get(i).map_or("", String::as_str))
                .collect();
            self.render_line(&mut out, &cells, &widths);
        }

        out
    }

    fn render_line(&self, out: &mut String, cells: &[&str], widths: &[usize]) {
        let mut line = String::new();
        for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            let _ = match self.headers[i].1 {
                Align::Left => write!(line, "{cell:<width$}"),
                Align::Right => write!(line, "{cell:>width$}"),
            };
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logger_defaults_to_info_and_tolerates_repeat_calls() {
        init_logger();
        init_logger();
        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(log::max_level(), log::LevelFilter::Info);
        }
    }

    #[test]
    fn columns_are_aligned() {
        let mut table = TextTable::new(&[("Location", Align::Left), ("Total", Align::Right)]);
        table.push(vec!["Camden High St".to_string(), "12".to_string()]);
        table.push(vec!["Buck St".to_string(), "105".to_string()]);

        assert_eq!(
            table.render(),
            "Location        Total\n\
             --------------  -----\n\
             Camden High St     12\n\
             Buck St           105\n"
        );
    }

    #[test]
    fn short_rows_render_empty_cells() {
        let mut table = TextTable::new(&[("A", Align::Left), ("B", Align::Left)]);
        table.push(vec!["x".to_string()]);
        assert_eq!(table.render(), "A  B\n-  -\nx\n");
    }
}
