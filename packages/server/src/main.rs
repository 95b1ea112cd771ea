#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone entry point for the strategy deck API server.
//!
//! Reads `deck.toml` and environment overrides, then delegates to
//! [`camden_server::run_server`].

use camden_config::DeckConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = DeckConfig::from_env().map_err(std::io::Error::other)?;

    camden_server::run_server(config).await
}
