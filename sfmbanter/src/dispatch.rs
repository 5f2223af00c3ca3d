//! Failover dispatch across an ordered list of completion models
//!
//! The model list is a hand-picked preference order (fast/good first,
//! reliable fallback last). Each entry gets exactly one attempt, with
//! no backoff and no parallelism; the first non-empty answer wins.

use std::fmt::Debug;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{ChatMessage, SamplingParams};

/// A backend able to run one chat completion against a named model.
///
/// Production uses [`CompletionClient`](crate::CompletionClient); tests
/// drive the dispatcher with scripted fakes.
#[async_trait::async_trait]
pub trait CompletionBackend: Debug + Send + Sync {
    /// Runs a single completion attempt.
    ///
    /// Empty output is an `Ok` value, not an error; the dispatcher
    /// decides what to do with it.
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &SamplingParams,
    ) -> Result<String>;
}

/// Tries each model once, in order, and returns the first non-empty text.
///
/// A model that errors is recorded and skipped; a model that answers
/// with empty text is skipped without being recorded. When the whole
/// list has been tried, the last recorded error is surfaced, so a
/// closing rate limit stays distinguishable from a generic failure.
/// When no model raised an error (empty list, or only empty answers)
/// the result is [`Error::AllBusy`].
pub async fn dispatch(
    backend: &dyn CompletionBackend,
    models: &[String],
    messages: &[ChatMessage],
    params: &SamplingParams,
) -> Result<String> {
    let mut last_error: Option<Error> = None;

    for model in models {
        debug!("Trying model: {}", model);

        match backend.complete(model, messages, params).await {
            Ok(text) if !text.is_empty() => {
                debug!("Model {} answered ({} bytes)", model, text.len());
                return Ok(text);
            }
            Ok(_) => {
                debug!("Model {} returned empty content, trying next", model);
            }
            Err(e) => {
                warn!("Model {} failed: {}", model, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or(Error::AllBusy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug)]
    enum Canned {
        Text(&'static str),
        Fail(&'static str),
        RateLimited,
    }

    /// Scripted backend: each model id maps to a canned outcome, and
    /// every call is logged in order.
    #[derive(Debug)]
    struct ScriptedBackend {
        outcomes: HashMap<String, Canned>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(outcomes: Vec<(&str, Canned)>) -> Self {
            Self {
                outcomes: outcomes
                    .into_iter()
                    .map(|(model, canned)| (model.to_string(), canned))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn complete(
            &self,
            model: &str,
            _messages: &[ChatMessage],
            _params: &SamplingParams,
        ) -> Result<String> {
            self.calls.lock().unwrap().push(model.to_string());
            match self.outcomes.get(model) {
                Some(Canned::Text(text)) => Ok((*text).to_string()),
                Some(Canned::Fail(msg)) => Err(Error::other(*msg)),
                Some(Canned::RateLimited) => Err(Error::RateLimited),
                None => Err(Error::other("unknown model")),
            }
        }
    }

    fn models(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn messages() -> Vec<ChatMessage> {
        vec![ChatMessage::system("Be brief."), ChatMessage::user("Action!")]
    }

    #[tokio::test]
    async fn test_first_model_wins() {
        let backend = ScriptedBackend::new(vec![
            ("a", Canned::Text("hello")),
            ("b", Canned::Text("never")),
        ]);

        let text = dispatch(&backend, &models(&["a", "b"]), &messages(), &SamplingParams::default())
            .await
            .unwrap();

        assert_eq!(text, "hello");
        assert_eq!(backend.calls(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_failover_skips_errors_and_empty_answers() {
        let backend = ScriptedBackend::new(vec![
            ("a", Canned::Fail("boom")),
            ("b", Canned::Text("")),
            ("c", Canned::Text("ok")),
            ("d", Canned::Text("never")),
        ]);

        let text = dispatch(
            &backend,
            &models(&["a", "b", "c", "d"]),
            &messages(),
            &SamplingParams::default(),
        )
        .await
        .unwrap();

        assert_eq!(text, "ok");
        // One attempt each, nothing after the first non-empty answer.
        assert_eq!(backend.calls(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_exhaustion_surfaces_last_error() {
        let backend = ScriptedBackend::new(vec![
            ("a", Canned::RateLimited),
            ("b", Canned::Fail("boom")),
        ]);

        let err = dispatch(&backend, &models(&["a", "b"]), &messages(), &SamplingParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Other(ref msg) if msg == "boom"));
        assert_eq!(backend.calls(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_closing_rate_limit_stays_distinguishable() {
        let backend = ScriptedBackend::new(vec![
            ("a", Canned::Fail("boom")),
            ("b", Canned::RateLimited),
        ]);

        let err = dispatch(&backend, &models(&["a", "b"]), &messages(), &SamplingParams::default())
            .await
            .unwrap_err();

        assert!(err.is_rate_limited());
    }

    #[tokio::test]
    async fn test_trailing_empty_answer_keeps_earlier_error() {
        let backend = ScriptedBackend::new(vec![
            ("a", Canned::Fail("boom")),
            ("b", Canned::Text("")),
        ]);

        let err = dispatch(&backend, &models(&["a", "b"]), &messages(), &SamplingParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Other(ref msg) if msg == "boom"));
    }

    #[tokio::test]
    async fn test_only_empty_answers_reports_all_busy() {
        let backend = ScriptedBackend::new(vec![
            ("a", Canned::Text("")),
            ("b", Canned::Text("")),
        ]);

        let err = dispatch(&backend, &models(&["a", "b"]), &messages(), &SamplingParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::AllBusy));
    }

    #[tokio::test]
    async fn test_empty_model_list_reports_all_busy() {
        let backend = ScriptedBackend::new(vec![]);

        let err = dispatch(&backend, &[], &messages(), &SamplingParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::AllBusy));
        assert!(backend.calls().is_empty());
    }
}
