//! Sanity-hosted content store
//!
//! Production [`ContentStore`] backed by a Sanity project. Queries go
//! over the HTTP query API (`GET /v{version}/data/query/{dataset}` with
//! the GROQ string and `$`-prefixed parameters in the query string) and
//! come back wrapped in a `{"result": ...}` envelope.
//!
//! Reads normally go through the CDN host when `use_cdn` is set; the
//! on-air lookup always bypasses it, stale schedules being worse than
//! slightly slower answers.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::models::{Presenter, Show};
use crate::store::ContentStore;

/// Default content API version
pub const DEFAULT_API_VERSION: &str = "2024-01-01";

/// Default dataset name
pub const DEFAULT_DATASET: &str = "production";

/// Default timeout for store queries
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "sfmcontent/0.1.0";

const SHOW_FIELDS: &str = r#"title, "slug": slug.current, timeSlot, description, vibe, streamUrl, "imageUrl": coverImage.asset->url, "hosts": hosts[]->{ name, "imageUrl": image.asset->url }"#;

const PRESENTER_SHOW_FIELDS: &str =
    r#"title, "slug": slug.current, timeSlot, "imageUrl": coverImage.asset->url"#;

/// GROQ queries, one per [`ContentStore`] operation. Only the voice
/// profile query projects `voicePrompt`; the public-facing ones never
/// fetch it.
fn shows_query() -> String {
    format!(r#"*[_type == "show"] | order(timeSlot asc) {{ {SHOW_FIELDS} }}"#)
}

fn show_on_air_query() -> String {
    format!(
        r#"*[_type == "show" && timeSlot <= $hour] | order(timeSlot desc)[0] {{ {SHOW_FIELDS} }}"#
    )
}

fn presenter_by_slug_query() -> String {
    format!(
        r#"*[_type == "presenter" && slug.current == $slug][0] {{ name, "slug": slug.current, bio, "imageUrl": image.asset->url, "shows": *[_type == "show" && references(^._id)] | order(timeSlot asc) {{ {PRESENTER_SHOW_FIELDS} }} }}"#
    )
}

fn voice_profiles_query() -> String {
    r#"*[_type == "presenter" && name in $names]{ name, voicePrompt }"#.to_string()
}

/// Query response envelope.
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: Option<T>,
}

/// Content store backed by a hosted Sanity project
///
/// # Example
///
/// ```no_run
/// use sfmcontent::{ContentStore, SanityStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = SanityStore::builder()
///         .project_id("abc123")
///         .build()?;
///
///     if let Some(show) = store.show_on_air(14).await? {
///         println!("On air: {}", show.title);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SanityStore {
    client: Client,
    query_url: String,
    fresh_query_url: String,
}

impl SanityStore {
    /// Create a builder for configuring the store
    pub fn builder() -> SanityStoreBuilder {
        SanityStoreBuilder::default()
    }

    /// Create a store from the application configuration
    #[cfg(feature = "sfmconfig")]
    pub fn from_config(config: &sfmconfig::Config) -> Result<Self> {
        Self::builder()
            .project_id(config.get_content_project_id()?)
            .dataset(config.get_content_dataset())
            .api_version(config.get_content_api_version())
            .use_cdn(config.get_content_use_cdn())
            .build()
    }

    /// Run a GROQ query against `endpoint` and unwrap the result
    /// envelope. A `null` result becomes `None`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &str,
        params: &[(&str, serde_json::Value)],
    ) -> Result<Option<T>> {
        let mut url = Url::parse(endpoint)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query);
            // Parameters are JSON-encoded: strings keep their quotes.
            for (name, value) in params {
                pairs.append_pair(&format!("${}", name), &serde_json::to_string(value)?);
            }
        }

        debug!(%url, "querying content store");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::api_error(format!(
                "content store returned {}",
                status
            )));
        }

        let envelope: QueryResponse<T> = response.json().await?;
        Ok(envelope.result)
    }
}

#[async_trait::async_trait]
impl ContentStore for SanityStore {
    async fn shows(&self) -> Result<Vec<Show>> {
        Ok(self
            .fetch(&self.query_url, &shows_query(), &[])
            .await?
            .unwrap_or_default())
    }

    async fn show_on_air(&self, hour: u32) -> Result<Option<Show>> {
        self.fetch(
            &self.fresh_query_url,
            &show_on_air_query(),
            &[("hour", json!(hour))],
        )
        .await
    }

    async fn presenter_by_slug(&self, slug: &str) -> Result<Option<Presenter>> {
        self.fetch(
            &self.query_url,
            &presenter_by_slug_query(),
            &[("slug", json!(slug))],
        )
        .await
    }

    async fn presenters_by_names(&self, names: &[String]) -> Result<Vec<Presenter>> {
        Ok(self
            .fetch(
                &self.query_url,
                &voice_profiles_query(),
                &[("names", json!(names))],
            )
            .await?
            .unwrap_or_default())
    }
}

/// Builder for configuring a SanityStore
#[derive(Debug)]
pub struct SanityStoreBuilder {
    client: Option<Client>,
    project_id: String,
    dataset: String,
    api_version: String,
    use_cdn: bool,
    base_url: Option<String>,
    request_timeout: Duration,
    user_agent: String,
}

impl Default for SanityStoreBuilder {
    fn default() -> Self {
        Self {
            client: None,
            project_id: String::new(),
            dataset: DEFAULT_DATASET.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            use_cdn: true,
            base_url: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl SanityStoreBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the project identifier
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = project_id.into();
        self
    }

    /// Set the dataset name
    pub fn dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = dataset.into();
        self
    }

    /// Set the content API version
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Route cacheable reads through the CDN host
    pub fn use_cdn(mut self, use_cdn: bool) -> Self {
        self.use_cdn = use_cdn;
        self
    }

    /// Override the full query endpoint (used by tests)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the store
    pub fn build(self) -> Result<SanityStore> {
        let (query_url, fresh_query_url) = match &self.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/').to_string();
                (base.clone(), base)
            }
            None => {
                if self.project_id.is_empty() {
                    return Err(Error::other("content store project id is required"));
                }
                let path = format!("/v{}/data/query/{}", self.api_version, self.dataset);
                let api = format!("https://{}.api.sanity.io{}", self.project_id, path);
                let cdn = format!("https://{}.apicdn.sanity.io{}", self.project_id, path);
                (if self.use_cdn { cdn } else { api.clone() }, api)
            }
        };

        let client = if let Some(client) = self.client {
            client
        } else {
            Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.request_timeout)
                .build()?
        };

        Ok(SanityStore {
            client,
            query_url,
            fresh_query_url,
        })
    }
}
