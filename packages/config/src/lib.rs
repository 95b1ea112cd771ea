#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Deck configuration.
//!
//! Settings come from an optional `deck.toml` and are then overridden by
//! environment variables:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `DECK_DATA_PATH` | `data_path` |
//! | `DECK_ASSET_DIR` | `asset_dir` |
//! | `DECK_TOP_N` | `top_n` |
//! | `DECK_IMAGE_WIDTH` | `image_width` |
//! | `DECK_IMAGE_HEIGHT` | `image_height` |
//! | `BIND_ADDR` | `bind_addr` |
//! | `PORT` | `port` |

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "deck.toml";

/// Errors that can occur while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML or has wrongly typed fields.
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Runtime settings for the deck server and CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DeckConfig {
    /// Incident table CSV.
    pub data_path: PathBuf,
    /// Directory holding the slide images.
    pub asset_dir: PathBuf,
    /// Image file names (relative to `asset_dir`) the deck expects.
    pub required_images: Vec<String>,
    /// Number of locations kept by the incident ranking.
    pub top_n: usize,
    /// Width slide images are fitted to. Zero serves images unscaled.
    pub image_width: u32,
    /// Height slide images are fitted to. Zero serves images unscaled.
    pub image_height: u32,
    /// Server bind address.
    pub bind_addr: String,
    /// Server port.
    pub port: u16,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.csv"),
            asset_dir: PathBuf::from("."),
            required_images: (1..=8).map(|i| format!("{i}.png")).collect(),
            top_n: 20,
            image_width: 600,
            image_height: 400,
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl DeckConfig {
    /// Loads the config file at `path`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                log::debug!("Loading config from {}", path.display());
                Self::from_toml(&text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Loads [`DEFAULT_CONFIG_PATH`] and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::load(Path::new(DEFAULT_CONFIG_PATH))?;
        config.apply_env();
        Ok(config)
    }

    /// Parses a config from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid TOML.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary key lookup.
    ///
    /// Numeric values that fail to parse are ignored with a warning.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("DECK_DATA_PATH") {
            self.data_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("DECK_ASSET_DIR") {
            self.asset_dir = PathBuf::from(dir);
        }
        if let Some(top_n) = lookup("DECK_TOP_N") {
            match top_n.trim().parse() {
                Ok(n) => self.top_n = n,
                Err(e) => log::warn!("Ignoring DECK_TOP_N={top_n:?}: {e}"),
            }
        }
        if let Some(width) = lookup("DECK_IMAGE_WIDTH") {
            match width.trim().parse() {
                Ok(w) => self.image_width = w,
                Err(e) => log::warn!("Ignoring DECK_IMAGE_WIDTH={width:?}: {e}"),
            }
        }
        if let Some(height) = lookup("DECK_IMAGE_HEIGHT") {
            match height.trim().parse() {
                Ok(h) => self.image_height = h,
                Err(e) => log::warn!("Ignoring DECK_IMAGE_HEIGHT={height:?}: {e}"),
            }
        }
        if let Some(addr) = lookup("BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(port) = lookup("PORT") {
            match port.trim().parse() {
                Ok(p) => self.port = p,
                Err(e) => log::warn!("Ignoring PORT={port:?}: {e}"),
            }
        }
    }

    /// Frame slide images are fitted to as `(width, height)`, or `None` when
    /// either side is zero.
    #[must_use]
    pub const fn image_frame(&self) -> Option<(u32, u32)> {
        if self.image_width == 0 || self.image_height == 0 {
            None
        } else {
            Some((self.image_width, self.image_height))
        }
    }

    /// Full paths of the required images.
    #[must_use]
    pub fn image_paths(&self) -> Vec<PathBuf> {
        self.required_images
            .iter()
            .map(|name| self.asset_dir.join(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn defaults_match_deck_layout() {
        let config = DeckConfig::default();
        assert_eq!(config.data_path, PathBuf::from("data.csv"));
        assert_eq!(config.required_images.len(), 8);
        assert_eq!(config.required_images[7], "8.png");
        assert_eq!(config.top_n, 20);
        assert_eq!(config.port, 8080);
        assert_eq!(config.image_frame(), Some((600, 400)));
    }

    #[test]
    fn zero_image_side_disables_fitting() {
        let config = DeckConfig::from_toml("image_width = 0
").unwrap();
        assert_eq!(config.image_frame(), None);

        let config = DeckConfig::from_toml("image_width = 800
image_height = 450
").unwrap();
        assert_eq!(config.image_frame(), Some((800, 450)));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = DeckConfig::from_toml("top_n = 10\nasset_dir = \"slides\"\n").unwrap();
        assert_eq!(config.top_n, 10);
        assert_eq!(config.asset_dir, PathBuf::from("slides"));
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(
            config.image_paths()[0],
            PathBuf::from("slides").join("1.png")
        );
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = DeckConfig::from_toml("top_n = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DeckConfig::load(&dir.path().join("deck.toml")).unwrap();
        assert_eq!(config, DeckConfig::default());
    }

    #[test]
    fn overrides_replace_fields_and_skip_bad_numbers() {
        let env: BTreeMap<&str, &str> = [
            ("DECK_DATA_PATH", "incidents.csv"),
            ("DECK_TOP_N", "5"),
            ("PORT", "not-a-port"),
            ("BIND_ADDR", "0.0.0.0"),
            ("DECK_IMAGE_WIDTH", "1024"),
        ]
        .into_iter()
        .collect();

        let mut config = DeckConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.data_path, PathBuf::from("incidents.csv"));
        assert_eq!(config.top_n, 5);
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.image_frame(), Some((1024, 400)));
    }
}
