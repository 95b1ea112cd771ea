#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Commodity comparison types.
//!
//! A [`CommodityRow`] is one bar of the "legal imports vs. illicit market"
//! chart. [`RevealState`] is the two-state toggle deciding whether the
//! illicit market row is shown.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Whether a commodity is traded legally.
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
pub enum CommodityKind {
    /// Recorded legal import
    Legal,
    /// Illicit market estimate
    Illegal,
}

impl CommodityKind {
    /// Returns the bar colour for this kind.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Legal => "#1f77b4",
            Self::Illegal => "#DC3912",
        }
    }
}

/// One row of the commodity comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommodityRow {
    /// Commodity name.
    pub commodity: String,
    /// Annual value in billions of pounds.
    pub value: f64,
    /// Legal or illegal.
    pub kind: CommodityKind,
}

impl CommodityRow {
    /// Creates a row from its parts.
    #[must_use]
    pub fn new(commodity: impl Into<String>, value: f64, kind: CommodityKind) -> Self {
        Self {
            commodity: commodity.into(),
            value,
            kind,
        }
    }
}

/// The reveal toggle for the illicit market row.
///
/// Starts hidden. [`reveal`](Self::reveal) and [`reset`](Self::reset) are
/// the only transitions and both are idempotent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealState {
    revealed: bool,
}

impl RevealState {
    /// Creates a hidden state.
    #[must_use]
    pub const fn new() -> Self {
        Self { revealed: false }
    }

    /// Shows the illicit market row.
    pub const fn reveal(&mut self) {
        self.revealed = true;
    }

    /// Hides the illicit market row again.
    pub const fn reset(&mut self) {
        self.revealed = false;
    }

    /// Returns `true` once [`reveal`](Self::reveal) has been called and no
    /// [`reset`](Self::reset) has followed.
    #[must_use]
    pub const fn is_revealed(self) -> bool {
        self.revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden() {
        assert!(!RevealState::new().is_revealed());
        assert_eq!(RevealState::default(), RevealState::new());
    }

    #[test]
    fn reveal_and_reset_are_idempotent() {
        let mut state = RevealState::new();
        state.reveal();
        state.reveal();
        assert!(state.is_revealed());
        state.reset();
        state.reset();
        assert!(!state.is_revealed());
    }

    #[test]
    fn kind_display_matches_table_spelling() {
        assert_eq!(CommodityKind::Legal.to_string(), "Legal");
        assert_eq!(CommodityKind::Illegal.as_ref(), "Illegal");
    }
}
