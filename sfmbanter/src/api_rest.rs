//! Endpoint API REST pour la génération de scripts
//!
//! Ce module définit le handler HTTP du générateur de banter. La route
//! est montée sous /api/banter par le trait d'extension.

use crate::error::Error;
use crate::script::ScriptRequest;
use crate::sfmserver_ext::BanterState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json;
use tracing::error;

// ============ Gestion des erreurs ============

struct AppError(Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Script generation failed: {}", self.0);

        // The real cause stays in the logs; callers get a stable
        // message they can show as-is.
        let (status, message) = match &self.0 {
            Error::UnknownPresenters(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            Error::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "AI overload (try again)".to_string(),
            ),
            _ => (StatusCode::BAD_GATEWAY, "Script generation failed".to_string()),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

/// Crée le router pour l'API du générateur de scripts
pub fn create_router(state: BanterState) -> Router {
    Router::new()
        .route("/", post(generate_script))
        .with_state(state)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/banter
/// Generates a DJ script reacting to the track that just finished
#[axum::debug_handler]
async fn generate_script(
    State(state): State<BanterState>,
    Json(request): Json<ScriptRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let script = state.generator.generate(&request).await?;

    Ok(Json(serde_json::json!({
        "script": script
    })))
}
