//! Endpoint API REST pour le titre en cours de lecture
//!
//! Ce module définit le handler HTTP qui sonde un flux radio et renvoie
//! le titre à afficher. La route ne renvoie jamais d'erreur : le lecteur
//! ne doit pas casser quand les métadonnées sont indisponibles.

use crate::sfmserver_ext::NowPlayingState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

/// Crée le router pour l'API now-playing
pub fn create_router(state: NowPlayingState) -> Router {
    Router::new()
        .route("/", get(get_now_playing))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct NowPlayingParams {
    url: Option<String>,
}

/// GET /api/nowplaying?url={stream-url}
/// Returns the display title of the stream, fallbacks already applied
#[axum::debug_handler]
async fn get_now_playing(
    State(state): State<NowPlayingState>,
    Query(params): Query<NowPlayingParams>,
) -> Json<serde_json::Value> {
    let Some(url) = params.url.filter(|u| !u.is_empty()) else {
        return Json(json!({ "title": "" }));
    };

    let playing = state.probe.now_playing(&url).await;
    Json(json!({ "title": playing.title }))
}
