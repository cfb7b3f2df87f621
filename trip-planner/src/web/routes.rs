//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{debug, warn};

use crate::domain::StationId;
use crate::planner::{Planner, SearchError};
use crate::stations::LookupError;

use super::dto::*;
use super::state::AppState;

/// Upper bound on station search results, whatever the request asks for.
const MAX_SEARCH_LIMIT: usize = 50;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/network", get(network_summary))
        .route("/api/stations/search", get(search_stations))
        .route("/api/route", post(plan_route))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Counts describing the loaded network.
async fn network_summary(State(state): State<AppState>) -> Json<NetworkSummary> {
    Json(NetworkSummary::from_network(&state.network))
}

/// Search stations by name.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Result<Json<StationSearchResponse>, AppError> {
    let limit = req
        .limit
        .unwrap_or(state.config.max_lookup_results)
        .min(MAX_SEARCH_LIMIT);
    let matches = state.stations.search(&req.q, limit)?;

    let stations = matches.into_iter().map(StationSearchResult::from).collect();

    Ok(Json(StationSearchResponse { stations }))
}

/// Plan a route between two stations.
async fn plan_route(
    State(state): State<AppState>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let origin = resolve_station(&state, &req.origin)?;
    let destination = resolve_station(&state, &req.destination)?;
    let criterion = req.criterion(&state.config);

    let planner = Planner::new(&state.network);
    let outcome = planner.find_path(origin, destination, criterion)?;

    debug!(
        origin = %origin,
        destination = %destination,
        criterion = %criterion,
        reachable = outcome.is_reachable(),
        "planned route"
    );

    Ok(Json(RouteResponse::from_outcome(&state.network, &outcome)))
}

fn resolve_station(state: &AppState, station: &StationRef) -> Result<StationId, AppError> {
    match station {
        StationRef::Id(index) => {
            let id = StationId(*index);
            state.network.station(id).map_err(|e| AppError::NotFound {
                message: e.to_string(),
            })?;
            Ok(id)
        }
        StationRef::Name(name) => Ok(state.stations.resolve(name)?),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidRequest(msg) => AppError::BadRequest { message: msg },
            SearchError::StationNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::NotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            LookupError::EmptyQuery | LookupError::Ambiguous { .. } => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(status = %status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
