//! HTTP client for OpenAI-compatible completion backends

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::dispatch::CompletionBackend;
use crate::error::{Error, Result};
use crate::models::{ChatMessage, ChatRequest, ChatResponse, SamplingParams};

/// Default API base, an OpenAI-compatible aggregator
pub const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";

/// Default timeout for one completion attempt
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "sfmbanter/0.1.0";

/// Client for an OpenAI-style `/chat/completions` endpoint
///
/// One instance serves every model behind the same API base; the model
/// id travels in the request payload, so the failover loop needs no
/// per-model setup.
///
/// # Example
///
/// ```no_run
/// use sfmbanter::{ChatMessage, CompletionClient, SamplingParams};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = CompletionClient::new("sk-your-key")?;
///     let messages = [
///         ChatMessage::system("You are a radio DJ. Keep it short."),
///         ChatMessage::user("Action!"),
///     ];
///     let text = client
///         .complete("deepseek/deepseek-chat:free", &messages, &SamplingParams::default())
///         .await?;
///     println!("{text}");
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    api_base: String,
    api_key: String,
}

impl CompletionClient {
    /// Create a new client with default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> CompletionClientBuilder {
        CompletionClientBuilder::default()
    }

    /// Create a client with a custom reqwest::Client
    ///
    /// Useful for sharing HTTP connection pools or custom proxy settings.
    ///
    /// Note: Uses default settings otherwise. For more control, use
    /// `CompletionClientBuilder::default().client(client).build()`.
    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from the application configuration
    #[cfg(feature = "sfmconfig")]
    pub fn from_config(config: &sfmconfig::Config) -> Result<Self> {
        Self::builder()
            .api_base(config.get_banter_api_base())
            .api_key(config.get_banter_api_key()?)
            .build()
    }

    /// Run one completion attempt against one model
    ///
    /// HTTP 429 maps to [`Error::RateLimited`]; any other non-success
    /// status to [`Error::BadStatus`]. An answer without a message is
    /// [`Error::NoChoices`], while a present message with `null` or
    /// empty content comes back as an empty string.
    pub async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &SamplingParams,
    ) -> Result<String> {
        let request = ChatRequest::new(model, messages.to_vec(), params);
        let url = format!("{}/chat/completions", self.api_base);

        debug!(model, "requesting completion");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited);
        }
        if !status.is_success() {
            return Err(Error::BadStatus(status));
        }

        let completion: ChatResponse = response.json().await?;
        let message = completion
            .choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .ok_or(Error::NoChoices)?;

        Ok(message.content.clone().unwrap_or_default())
    }

    /// Get the internal HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// API base URL, without the `/chat/completions` suffix
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

#[async_trait::async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &SamplingParams,
    ) -> Result<String> {
        CompletionClient::complete(self, model, messages, params).await
    }
}

/// Builder for configuring a CompletionClient
#[derive(Debug)]
pub struct CompletionClientBuilder {
    client: Option<Client>,
    api_base: String,
    api_key: String,
    timeout: Duration,
    user_agent: String,
    proxy: Option<String>,
}

impl Default for CompletionClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
        }
    }
}

impl CompletionClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the API base URL (everything before `/chat/completions`)
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the bearer token sent with every request
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the timeout for one completion attempt
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a proxy URL
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<CompletionClient> {
        let client = if let Some(client) = self.client {
            client
        } else {
            let mut builder = Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.timeout);

            if let Some(proxy_url) = &self.proxy {
                let proxy = reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::other(format!("Invalid proxy: {}", e)))?;
                builder = builder.proxy(proxy);
            }

            builder.build()?
        };

        Ok(CompletionClient {
            client,
            api_base: self.api_base.trim_end_matches('/').to_string(),
            api_key: self.api_key,
        })
    }
}
