//! Endpoints API REST pour la grille des programmes
//!
//! Ce module définit les handlers HTTP pour l'émission à l'antenne, la
//! liste des émissions et les fiches animateurs. Les routes portent leurs
//! chemins complets et sont fusionnées à la racine du serveur.

use crate::models::{Presenter, Show};
use crate::schedule;
use crate::sfmserver_ext::ContentState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json;

// ============ Gestion des erreurs ============

struct AppError(String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0.as_str() {
            "No show scheduled." => (StatusCode::NOT_FOUND, self.0),
            s if s.starts_with("Presenter not found") => (StatusCode::NOT_FOUND, self.0),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.0),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        Self(err)
    }
}

/// Crée le router pour l'API de la grille des programmes
pub fn create_router(state: ContentState) -> Router {
    Router::new()
        .route("/api/schedule/now", get(get_schedule_now))
        .route("/api/shows", get(get_shows))
        .route("/api/presenters/{slug}", get(get_presenter))
        .with_state(state)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/schedule/now
/// Returns the show currently on air, with the station hour
#[axum::debug_handler]
async fn get_schedule_now(
    State(state): State<ContentState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let hour = schedule::station_hour(state.timezone_offset_hours);

    let show = state
        .store
        .show_on_air(hour)
        .await
        .map_err(|e| AppError(e.to_string()))?
        .ok_or_else(|| AppError("No show scheduled.".to_string()))?;

    Ok(Json(serde_json::json!({
        "hour": hour,
        "show": show
    })))
}

/// GET /api/shows
/// Returns all shows ordered by start hour
async fn get_shows(State(state): State<ContentState>) -> Result<Json<Vec<Show>>, AppError> {
    let shows = state
        .store
        .shows()
        .await
        .map_err(|e| AppError(e.to_string()))?;

    Ok(Json(shows))
}

/// GET /api/presenters/{slug}
/// Returns a presenter profile with the shows they appear in
async fn get_presenter(
    State(state): State<ContentState>,
    Path(slug): Path<String>,
) -> Result<Json<Presenter>, AppError> {
    let presenter = state
        .store
        .presenter_by_slug(&slug)
        .await
        .map_err(|e| AppError(e.to_string()))?
        .ok_or_else(|| AppError(format!("Presenter not found: {}", slug)))?;

    Ok(Json(presenter))
}
