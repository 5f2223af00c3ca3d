//! DJ script generation
//!
//! When a track ends, the front-end posts the show context and gets
//! back a short script in the presenters' voices. The prompt is built
//! from each presenter's voice profile in the content store, then run
//! through the failover dispatcher over the configured model list.

use std::sync::Arc;

use tracing::{debug, info};

use sfmcontent::{ContentStore, Presenter};

use crate::dispatch::{dispatch, CompletionBackend};
use crate::error::{Error, Result};
use crate::models::{ChatMessage, SamplingParams};

/// Personality used when a presenter has no voice profile configured
pub const DEFAULT_PERSONALITY: &str = "Energetic Radio DJ";

/// The on-air moment a script reacts to
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ScriptRequest {
    pub song_title: String,
    pub artist: String,
    pub show_title: String,
    pub host_names: Vec<String>,
}

/// Generates DJ scripts from presenter voice profiles
///
/// Holds the content store for voice profile lookups, the completion
/// backend and the ordered model list. Cloning is cheap; one generator
/// is shared by every request.
#[derive(Debug, Clone)]
pub struct BanterGenerator {
    store: Arc<dyn ContentStore>,
    backend: Arc<dyn CompletionBackend>,
    models: Vec<String>,
    params: SamplingParams,
}

impl BanterGenerator {
    /// Create a generator with default sampling parameters
    pub fn new(
        store: Arc<dyn ContentStore>,
        backend: Arc<dyn CompletionBackend>,
        models: Vec<String>,
    ) -> Self {
        Self {
            store,
            backend,
            models,
            params: SamplingParams::default(),
        }
    }

    /// Override the sampling parameters
    pub fn with_params(mut self, params: SamplingParams) -> Self {
        self.params = params;
        self
    }

    /// Create a generator from the application configuration
    ///
    /// The content store is passed in, not built here, so the schedule
    /// API and the generator can share one instance.
    #[cfg(feature = "sfmconfig")]
    pub fn from_config(config: &sfmconfig::Config, store: Arc<dyn ContentStore>) -> Result<Self> {
        let client = crate::client::CompletionClient::from_config(config)?;
        let params = SamplingParams {
            temperature: config.get_banter_temperature(),
            max_tokens: config.get_banter_max_tokens() as u32,
        };

        Ok(Self {
            store,
            backend: Arc::new(client),
            models: config.get_banter_models(),
            params,
        })
    }

    /// Ordered model list the generator dispatches over
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Generate a script for the given on-air moment
    ///
    /// Host names with no presenter in the store yield
    /// [`Error::UnknownPresenters`]. Backend trouble surfaces only after
    /// the whole model list is exhausted, with rate limits kept
    /// distinguishable from generic failures.
    pub async fn generate(&self, request: &ScriptRequest) -> Result<String> {
        info!("Generating script for show: {}", request.show_title);
        debug!("Hosts: {}", request.host_names.join(", "));
        debug!("Context: {} by {}", request.song_title, request.artist);

        let hosts = self.store.presenters_by_names(&request.host_names).await?;
        if hosts.is_empty() {
            return Err(Error::UnknownPresenters(request.host_names.join(", ")));
        }

        let prompt = build_system_prompt(
            &request.show_title,
            &request.song_title,
            &request.artist,
            &hosts,
        );
        let messages = [ChatMessage::system(prompt), ChatMessage::user("Action!")];

        let script = dispatch(self.backend.as_ref(), &self.models, &messages, &self.params).await?;
        debug!("Generated script:\n{}", script);
        Ok(script)
    }
}

/// Build the showrunner system prompt
///
/// Pure function over the show context and the cast. Each presenter
/// contributes one cast entry with their voice profile verbatim;
/// presenters without one get [`DEFAULT_PERSONALITY`]. The style
/// directive asks for a banter between hosts when the cast has two or
/// more, a monologue otherwise.
pub fn build_system_prompt(
    show_title: &str,
    song_title: &str,
    artist: &str,
    hosts: &[Presenter],
) -> String {
    let cast = hosts
        .iter()
        .map(|host| {
            let personality = host
                .voice_prompt
                .as_deref()
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_PERSONALITY);
            format!("- NAME: {}\n  PERSONALITY: {}", host.name, personality)
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let style = if hosts.len() > 1 {
        "Write a short, punchy BANTER (3-4 lines total) between the hosts."
    } else {
        "Write a short, high-energy MONOLOGUE (1-2 sentences)."
    };

    format!(
        "You are the showrunner for '{show_title}'.\n\
         \n\
         THE CAST:\n\
         {cast}\n\
         \n\
         CONTEXT:\n\
         The song '{song_title}' by '{artist}' just finished playing.\n\
         \n\
         DIRECTIVES:\n\
         - {style}\n\
         - Be reactive to the song title or artist.\n\
         - Use the specific slang/vibe defined in the personalities.\n\
         - If writing dialogue, format it like a script: \"Name: [Line]\"\n\
         - KEEP IT SHORT. No long intros."
    )
}
