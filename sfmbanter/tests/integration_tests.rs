//! Integration tests for sfmbanter

use std::sync::Arc;

use serde_json::json;
use sfmbanter::{
    dispatch, BanterGenerator, ChatMessage, CompletionClient, Error, SamplingParams,
    ScriptRequest,
};
use sfmcontent::{ContentStore, Presenter};
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(mock_server: &MockServer) -> CompletionClient {
    CompletionClient::builder()
        .api_base(mock_server.uri())
        .api_key("test-key")
        .build()
        .unwrap()
}

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "gen-123",
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

fn action_messages() -> Vec<ChatMessage> {
    vec![ChatMessage::system("Be brief."), ChatMessage::user("Action!")]
}

/// In-memory presenter fixtures standing in for the hosted store.
#[derive(Debug)]
struct FixtureStore {
    presenters: Vec<Presenter>,
}

#[async_trait::async_trait]
impl ContentStore for FixtureStore {
    async fn shows(&self) -> sfmcontent::Result<Vec<sfmcontent::Show>> {
        Ok(Vec::new())
    }

    async fn show_on_air(&self, _hour: u32) -> sfmcontent::Result<Option<sfmcontent::Show>> {
        Ok(None)
    }

    async fn presenter_by_slug(&self, _slug: &str) -> sfmcontent::Result<Option<Presenter>> {
        Ok(None)
    }

    async fn presenters_by_names(&self, names: &[String]) -> sfmcontent::Result<Vec<Presenter>> {
        Ok(self
            .presenters
            .iter()
            .filter(|p| names.contains(&p.name))
            .cloned()
            .collect())
    }
}

fn vera() -> Presenter {
    Presenter {
        name: "Vera Moody".to_string(),
        slug: "vera-moody".to_string(),
        bio: None,
        voice_prompt: Some("Noir radio veteran, speaks in film quotes".to_string()),
        image_url: None,
        shows: Vec::new(),
    }
}

#[tokio::test]
async fn test_completion_request_wire_shape() {
    let mock_server = MockServer::start().await;

    // The mock only matches the exact payload contract: endpoint,
    // bearer token, model id, both messages and the sampling knobs.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "test/model",
            "messages": [
                { "role": "system", "content": "Be brief." },
                { "role": "user", "content": "Action!" }
            ],
            "temperature": 0.85,
            "max_tokens": 250
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion_body("Hello from the booth.")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let text = client
        .complete("test/model", &action_messages(), &SamplingParams::default())
        .await
        .unwrap();

    assert_eq!(text, "Hello from the booth.");
}

#[tokio::test]
async fn test_rate_limit_stays_distinguishable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "Rate limit exceeded" }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .complete("test/model", &action_messages(), &SamplingParams::default())
        .await
        .unwrap_err();

    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn test_error_status_surfaces() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .complete("test/model", &action_messages(), &SamplingParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::BadStatus(status) if status.as_u16() == 500));
}

#[tokio::test]
async fn test_null_content_reads_as_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [ { "message": { "role": "assistant", "content": null } } ]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let text = client
        .complete("test/model", &action_messages(), &SamplingParams::default())
        .await
        .unwrap();

    assert_eq!(text, "");
}

#[tokio::test]
async fn test_missing_choices_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .complete("test/model", &action_messages(), &SamplingParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NoChoices));
}

#[tokio::test]
async fn test_dispatch_fails_over_to_next_model() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "model": "m1" })))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "model": "m2" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion_body("From the second model.")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let models = vec!["m1".to_string(), "m2".to_string()];
    let text = dispatch(&client, &models, &action_messages(), &SamplingParams::default())
        .await
        .unwrap();

    assert_eq!(text, "From the second model.");
}

#[tokio::test]
async fn test_dispatch_surfaces_closing_rate_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "model": "m1" })))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "model": "m2" })))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let models = vec!["m1".to_string(), "m2".to_string()];
    let err = dispatch(&client, &models, &action_messages(), &SamplingParams::default())
        .await
        .unwrap_err();

    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn test_generator_casts_presenters_into_prompt() {
    let mock_server = MockServer::start().await;

    // The voice profile and the fixed user message must both reach the
    // backend verbatim.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Noir radio veteran, speaks in film quotes"))
        .and(body_string_contains("Action!"))
        .and(body_string_contains(
            "The song 'Midnight Static' by 'The Interference' just finished playing.",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("Vera: now that was a transmission.")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(FixtureStore {
        presenters: vec![vera()],
    });
    let backend = Arc::new(client_for(&mock_server));
    let generator = BanterGenerator::new(store, backend, vec!["only/model".to_string()]);

    let script = generator
        .generate(&ScriptRequest {
            song_title: "Midnight Static".to_string(),
            artist: "The Interference".to_string(),
            show_title: "The Graveyard Shift".to_string(),
            host_names: vec!["Vera Moody".to_string()],
        })
        .await
        .unwrap();

    assert_eq!(script, "Vera: now that was a transmission.");
}

#[tokio::test]
async fn test_generator_skips_backend_when_hosts_unknown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("never")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let store = Arc::new(FixtureStore {
        presenters: Vec::new(),
    });
    let backend = Arc::new(client_for(&mock_server));
    let generator = BanterGenerator::new(store, backend, vec!["only/model".to_string()]);

    let err = generator
        .generate(&ScriptRequest {
            song_title: "Midnight Static".to_string(),
            artist: "The Interference".to_string(),
            show_title: "The Graveyard Shift".to_string(),
            host_names: vec!["Ghost Host".to_string()],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnknownPresenters(ref names) if names == "Ghost Host"));
}
