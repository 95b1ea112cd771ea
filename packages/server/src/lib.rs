#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the strategy deck.
//!
//! Serves the incident ranking, the commodity comparison (with a
//! per-session reveal toggle), the transport hub facts, the supply cycle
//! diagram and the slide images. The incident table and images are read
//! once and memoized until their files change.

mod handlers;
pub mod interactive;
pub mod session;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use camden_assets::{FileCache, ImageFrame, ImageStore, IntegrityReport, check_integrity};
use camden_config::DeckConfig;
use camden_incident::IncidentRecord;
use camden_incident::load::load_incidents;

use crate::session::SessionStore;

/// Shared application state.
pub struct AppState {
    /// Deck configuration.
    pub config: DeckConfig,
    /// Memoized incident table, keyed by `config.data_path`.
    pub incidents: FileCache<Vec<IncidentRecord>>,
    /// Slide images from `config.asset_dir`, fitted to the configured frame.
    pub images: ImageStore,
    /// Reveal toggles per browser session.
    pub sessions: SessionStore,
}

impl AppState {
    /// Creates empty state for `config`. Nothing is read from disk yet.
    #[must_use]
    pub fn new(config: DeckConfig) -> Self {
        Self {
            images: ImageStore::new(
                config.asset_dir.clone(),
                config
                    .image_frame()
                    .map(|(width, height)| ImageFrame { width, height }),
            ),
            incidents: FileCache::new(),
            sessions: SessionStore::new(),
            config,
        }
    }

    /// Checks the configured data file and images.
    #[must_use]
    pub fn integrity(&self) -> IntegrityReport {
        check_integrity(
            std::slice::from_ref(&self.config.data_path),
            &self.config.image_paths(),
        )
    }

    /// Loads the incident table into the cache.
    ///
    /// # Errors
    ///
    /// Returns the load error if the table is missing or malformed.
    pub fn warm(&self) -> Result<Arc<Vec<IncidentRecord>>, camden_incident::IncidentError> {
        self.incidents
            .get_or_load(&self.config.data_path, load_incidents)
    }
}

/// Registers every deck route.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/integrity", web::get().to(handlers::integrity))
            .route("/incidents/top", web::get().to(handlers::top_locations))
            .route("/commodities", web::get().to(handlers::commodities))
            .route("/commodities/reveal", web::post().to(handlers::reveal))
            .route("/commodities/reset", web::post().to(handlers::reset))
            .route("/stations", web::get().to(handlers::stations))
            .route("/cycle", web::get().to(handlers::cycle)),
    )
    .route("/assets/{name}", web::get().to(handlers::asset));
}

/// Starts the deck API server.
///
/// Runs the asset integrity check and loads the incident table before
/// binding. This is a regular async function; the caller provides the
/// runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the incident table is missing or
/// malformed, or if the HTTP server fails to bind or encounters a runtime
/// error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: DeckConfig) -> std::io::Result<()> {
    let state = AppState::new(config);

    log::info!("Checking deck assets...");
    state
        .integrity()
        .ensure_data()
        .map_err(std::io::Error::other)?;

    log::info!("Loading incident table...");
    let records = state.warm().map_err(std::io::Error::other)?;
    log::info!("{} incident rows ready", records.len());

    let bind_addr = state.config.bind_addr.clone();
    let port = state.config.port;
    let state = web::Data::new(state);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(routes)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
