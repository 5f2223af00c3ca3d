//! Integration tests for sfmcontent

use serde_json::json;
use sfmcontent::{ContentStore, Error, SanityStore};
use wiremock::matchers::{method, query_param, query_param_contains};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(mock_server: &MockServer) -> SanityStore {
    SanityStore::builder()
        .base_url(mock_server.uri())
        .build()
        .unwrap()
}

/// The store wraps every result in a `{"result": ...}` envelope with
/// timing noise around it.
fn envelope(result: serde_json::Value) -> serde_json::Value {
    json!({ "ms": 3, "query": "...", "result": result })
}

#[tokio::test]
async fn test_show_on_air() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("$hour", "22"))
        .and(query_param_contains("query", "timeSlot <= $hour"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "title": "The Graveyard Shift",
            "slug": "graveyard-shift",
            "timeSlot": 22,
            "streamUrl": "https://streams.example.com/graveyard",
            "imageUrl": "https://cdn.example.com/covers/graveyard.jpg",
            "hosts": [{ "name": "Vera Moody" }]
        }))))
        .mount(&mock_server)
        .await;

    let store = store_for(&mock_server);
    let show = store.show_on_air(22).await.unwrap().unwrap();

    assert_eq!(show.title, "The Graveyard Shift");
    assert_eq!(show.time_slot, 22);
    assert_eq!(show.hosts[0].name, "Vera Moody");
}

#[tokio::test]
async fn test_show_on_air_when_nothing_scheduled() {
    let mock_server = MockServer::start().await;

    // Before the first slot of the day the query matches nothing.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
        .mount(&mock_server)
        .await;

    let store = store_for(&mock_server);
    assert_eq!(store.show_on_air(4).await.unwrap(), None);
}

#[tokio::test]
async fn test_shows_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param_contains("query", r#"_type == "show""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "title": "Morning Drive", "slug": "morning-drive", "timeSlot": 6 },
            { "title": "Midday Mix", "slug": "midday-mix", "timeSlot": 10 }
        ]))))
        .mount(&mock_server)
        .await;

    let store = store_for(&mock_server);
    let shows = store.shows().await.unwrap();

    assert_eq!(shows.len(), 2);
    assert_eq!(shows[0].slug, "morning-drive");
    assert_eq!(shows[1].time_slot, 10);
}

#[tokio::test]
async fn test_presenter_by_slug_sends_quoted_param() {
    let mock_server = MockServer::start().await;

    // String parameters are JSON-encoded, quotes included.
    Mock::given(method("GET"))
        .and(query_param("$slug", "\"vera-moody\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "name": "Vera Moody",
            "slug": "vera-moody",
            "bio": "Veteran of the night shift.",
            "shows": [{ "title": "The Graveyard Shift", "slug": "graveyard-shift", "timeSlot": 22 }]
        }))))
        .mount(&mock_server)
        .await;

    let store = store_for(&mock_server);
    let presenter = store.presenter_by_slug("vera-moody").await.unwrap().unwrap();

    assert_eq!(presenter.name, "Vera Moody");
    assert_eq!(presenter.shows.len(), 1);
    assert_eq!(presenter.voice_prompt, None);
}

#[tokio::test]
async fn test_unknown_presenter_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
        .mount(&mock_server)
        .await;

    let store = store_for(&mock_server);
    assert!(store.presenter_by_slug("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_voice_profiles_by_names() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("$names", r#"["Vera Moody","DJ Static"]"#))
        .and(query_param_contains("query", "name in $names"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "name": "Vera Moody", "voicePrompt": "Dry wit, slow delivery." },
            { "name": "DJ Static", "voicePrompt": "Chaotic gremlin energy." }
        ]))))
        .mount(&mock_server)
        .await;

    let store = store_for(&mock_server);
    let profiles = store
        .presenters_by_names(&["Vera Moody".to_string(), "DJ Static".to_string()])
        .await
        .unwrap();

    assert_eq!(profiles.len(), 2);
    assert_eq!(
        profiles[0].voice_prompt.as_deref(),
        Some("Dry wit, slow delivery.")
    );
}

#[tokio::test]
async fn test_error_status_surfaces() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "description": "Unauthorized" }
        })))
        .mount(&mock_server)
        .await;

    let store = store_for(&mock_server);
    let err = store.shows().await.unwrap_err();
    assert!(matches!(err, Error::ApiError(_)));
}
