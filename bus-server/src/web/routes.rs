//! HTTP route handlers.

use std::path::Path;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::{debug, error, warn};

use crate::planner::{ResolveRequest, Resolver};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `static_dir` is the path to the front-end assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/route-candidates", get(route_candidates))
        .route("/api/stops", get(list_stops))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Suggest trips between two stops.
async fn route_candidates(
    State(state): State<AppState>,
    Query(query): Query<RouteCandidatesQuery>,
) -> Result<Json<RouteCandidatesResponse>, AppError> {
    let (Some(origin), Some(dest)) = (query.origin(), query.dest()) else {
        return Err(AppError::BadRequest {
            message: "origin and dest are required".into(),
        });
    };

    let agency = match query.agency() {
        Some(agency) if is_valid_agency(agency) => agency,
        Some(agency) => {
            return Err(AppError::BadRequest {
                message: format!("Invalid agency: {agency}"),
            });
        }
        None => &*state.default_agency,
    };

    let now_minutes = query
        .now_minutes()
        .map_err(|message| AppError::BadRequest { message })?;

    let mut request = ResolveRequest::new(origin, dest);
    request.max_results = query.max_results();
    request.now_minutes = now_minutes;

    // Both lookups are independent; the feed fetch dominates
    let (index, active) = tokio::join!(
        state.schedule.snapshot(),
        state.realtime.active_trips(agency)
    );

    let config = Arc::clone(&state.config);
    let resolution = tokio::task::spawn_blocking(move || {
        Resolver::new(&index, &config).resolve(&request, &active)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("Resolver task failed: {e}"),
    })?;

    debug!(
        origin,
        dest,
        agency,
        fallback = resolution.is_fallback(),
        results = resolution.len(),
        "resolved route candidates"
    );

    Ok(Json(RouteCandidatesResponse::from_resolution(&resolution)))
}

/// All stops with a known position.
async fn list_stops(State(state): State<AppState>) -> Json<StopsResponse> {
    let index = state.schedule.snapshot().await;
    let stops = index.stops().iter().map(StopResult::from_stop).collect();
    Json(StopsResponse { stops })
}

/// Agency ids end up in the feed URL path, so only allow plain identifiers.
fn is_valid_agency(agency: &str) -> bool {
    agency
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "rejected request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(%message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
