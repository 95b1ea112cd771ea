//! HTTP handler functions for the deck API.

use actix_web::{HttpRequest, HttpResponse, web};
use camden_assets::AssetError;
use camden_commodity::{RevealState, table_for};
use camden_incident::load::load_incidents;
use camden_incident::ranking::{category_breakdown, rank_top_locations};
use camden_server_models::{
    ApiCommodityTable, ApiError, ApiHealth, ApiTopLocations, TopLocationsParams,
};

use crate::AppState;
use crate::session::Session;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/integrity`
///
/// Lists missing data files and images.
pub async fn integrity(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.integrity())
}

/// `GET /api/incidents/top`
///
/// Ranks locations by incident volume and returns the stacked chart data.
/// An empty incident table yields an empty ranking; a table that cannot be
/// loaded is a server error.
pub async fn top_locations(
    state: web::Data<AppState>,
    params: web::Query<TopLocationsParams>,
) -> HttpResponse {
    let path = &state.config.data_path;

    match state.incidents.get_or_load(path, load_incidents) {
        Ok(records) => {
            let limit = params.limit.unwrap_or(state.config.top_n);
            let ranked = rank_top_locations(&records, limit);
            let series = category_breakdown(&ranked);
            HttpResponse::Ok().json(ApiTopLocations::new(ranked, series))
        }
        Err(e) => {
            log::error!("Failed to load incident table: {e}");
            HttpResponse::InternalServerError().json(ApiError::new(format!(
                "Could not read {}: {e}",
                path.display()
            )))
        }
    }
}

/// `GET /api/commodities`
///
/// Returns the commodity comparison for the caller's session.
pub async fn commodities(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let session = Session::from_request(&req);
    let reveal = state.sessions.reveal_state(session.id());
    session.respond(HttpResponse::Ok(), &commodity_table(reveal))
}

/// `POST /api/commodities/reveal`
pub async fn reveal(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let session = Session::from_request(&req);
    let reveal = state.sessions.update(session.id(), RevealState::reveal);
    log::info!("Session {} revealed the illicit market", session.id());
    session.respond(HttpResponse::Ok(), &commodity_table(reveal))
}

/// `POST /api/commodities/reset`
pub async fn reset(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let session = Session::from_request(&req);
    let reveal = state.sessions.update(session.id(), RevealState::reset);
    session.respond(HttpResponse::Ok(), &commodity_table(reveal))
}

/// `GET /api/stations`
pub async fn stations() -> HttpResponse {
    HttpResponse::Ok().json(camden_deck::stations::stations())
}

/// `GET /api/cycle`
///
/// Returns the supply cycle as Graphviz DOT source.
pub async fn cycle() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/vnd.graphviz; charset=utf-8")
        .body(camden_deck::cycle::supply_cycle().to_dot())
}

/// `GET /assets/{name}`
///
/// Serves a slide image from the asset directory.
pub async fn asset(state: web::Data<AppState>, name: web::Path<String>) -> HttpResponse {
    match state.images.get(&name) {
        Ok(image) => match image.as_ref() {
            Some(image) => HttpResponse::Ok()
                .content_type(image.content_type.as_str())
                .body(image.bytes.clone()),
            None => HttpResponse::NotFound().json(ApiError::new(format!("No asset named {name}"))),
        },
        Err(AssetError::InvalidName { name }) => {
            HttpResponse::BadRequest().json(ApiError::new(format!("Invalid asset name {name}")))
        }
        Err(e) => {
            log::error!("Failed to load asset {name}: {e}");
            HttpResponse::InternalServerError().json(ApiError::new("Failed to load asset"))
        }
    }
}

fn commodity_table(reveal: RevealState) -> ApiCommodityTable {
    ApiCommodityTable::new(reveal.is_revealed(), table_for(reveal))
}
