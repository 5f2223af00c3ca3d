//! HTTP probe for ICY stream metadata

use std::time::Duration;

use futures::StreamExt;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::headers::{IcyHeaders, ICY_METADATA};
use crate::models::NowPlaying;
use crate::scan::{scan_for_title, ScanOutcome};

/// Default scan overshoot beyond the advertised interval, in bytes
pub const DEFAULT_OVERSHOOT_LIMIT: usize = 40_000;

/// Default deadline for a whole probe (connect, headers and scan)
pub const DEFAULT_PROBE_DEADLINE_SECS: u64 = 10;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "sfmicy/0.1.0";

/// Probe for the currently playing title of a Shoutcast/Icecast stream
///
/// The probe opens the stream with `Icy-MetaData: 1`, reads just enough
/// of the body to reach the first interleaved metadata block, extracts
/// the `StreamTitle` field and drops the connection. One probe instance
/// can serve any number of URLs concurrently; it only holds a
/// `reqwest::Client`.
///
/// # Example
///
/// ```no_run
/// use sfmicy::IcyProbe;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let probe = IcyProbe::new()?;
///     let playing = probe.now_playing("https://ice1.somafm.com/groovesalad-128-mp3").await;
///     println!("Now playing: {}", playing.title);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct IcyProbe {
    client: Client,
    overshoot_limit: usize,
    deadline: Duration,
}

impl IcyProbe {
    /// Create a new probe with default settings
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a builder for configuring the probe
    pub fn builder() -> IcyProbeBuilder {
        IcyProbeBuilder::default()
    }

    /// Create a probe with a custom reqwest::Client
    ///
    /// Useful for sharing HTTP connection pools or custom proxy settings.
    ///
    /// Note: Uses default settings otherwise. For more control, use
    /// `IcyProbeBuilder::default().client(client).build()`.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            overshoot_limit: DEFAULT_OVERSHOOT_LIMIT,
            deadline: Duration::from_secs(DEFAULT_PROBE_DEADLINE_SECS),
        }
    }

    /// Create a probe from the application configuration
    #[cfg(feature = "sfmconfig")]
    pub fn from_config(config: &sfmconfig::Config) -> Result<Self> {
        Self::builder()
            .overshoot_limit(config.get_icy_overshoot_limit())
            .deadline(Duration::from_secs(
                config.get_icy_request_timeout_secs() as u64
            ))
            .user_agent(config.get_icy_user_agent())
            .build()
    }

    /// Currently playing title of a stream, with fallbacks applied
    ///
    /// This never fails: whatever goes wrong (bad URL, unreachable host,
    /// error status, malformed body, deadline) degrades to the station
    /// name or the placeholder title. The player UI must keep working
    /// when metadata is unavailable.
    pub async fn now_playing(&self, url: &str) -> NowPlaying {
        match self.probe_with_deadline(url).await {
            Ok(playing) => playing,
            Err(err) => {
                warn!(url, %err, "stream probe failed");
                NowPlaying::placeholder()
            }
        }
    }

    /// Probe a stream, surfacing transport and status errors
    ///
    /// Once the response headers are in hand the probe stops failing:
    /// scan-level trouble (stream too short, budget exhausted) degrades
    /// to the station name inside this call. No deadline is applied
    /// beyond the client timeout; `now_playing` adds one.
    pub async fn probe(&self, url: &str) -> Result<NowPlaying> {
        let url = Url::parse(url)?;
        debug!(%url, "probing stream for metadata");

        let response = self
            .client
            .get(url)
            .header(ICY_METADATA, "1")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::BadStatus(status));
        }

        let icy = IcyHeaders::parse(response.headers());
        if let Some(kbps) = icy.bitrate {
            debug!(kbps, "stream advertises bitrate");
        }
        let Some(interval) = icy.metadata_interval else {
            debug!("no usable icy-metaint, stream cannot be scanned");
            return Ok(NowPlaying::without_stream_title(icy.station_name));
        };

        let chunks = response.bytes_stream().boxed();
        match scan_for_title(chunks, interval, self.overshoot_limit).await {
            Ok(ScanOutcome::Title(title)) => {
                Ok(NowPlaying::from_stream_title(title, icy.station_name))
            }
            Ok(ScanOutcome::NoTitle) => Ok(NowPlaying::without_stream_title(icy.station_name)),
            Err(err) => {
                debug!(%err, "metadata scan gave up");
                Ok(NowPlaying::without_stream_title(icy.station_name))
            }
        }
    }

    async fn probe_with_deadline(&self, url: &str) -> Result<NowPlaying> {
        tokio::time::timeout(self.deadline, self.probe(url))
            .await
            .map_err(|_| Error::DeadlineElapsed)?
    }

    /// Get the internal HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Scan overshoot limit in bytes
    pub fn overshoot_limit(&self) -> usize {
        self.overshoot_limit
    }

    /// Probe deadline
    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

/// Builder for configuring an IcyProbe
#[derive(Debug)]
pub struct IcyProbeBuilder {
    client: Option<Client>,
    overshoot_limit: usize,
    deadline: Duration,
    user_agent: String,
    proxy: Option<String>,
}

impl Default for IcyProbeBuilder {
    fn default() -> Self {
        Self {
            client: None,
            overshoot_limit: DEFAULT_OVERSHOOT_LIMIT,
            deadline: Duration::from_secs(DEFAULT_PROBE_DEADLINE_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
        }
    }
}

impl IcyProbeBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set how far past the advertised interval the scan may walk
    pub fn overshoot_limit(mut self, bytes: usize) -> Self {
        self.overshoot_limit = bytes;
        self
    }

    /// Set the deadline for a whole probe
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
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

    /// Build the probe
    pub fn build(self) -> Result<IcyProbe> {
        let client = if let Some(client) = self.client {
            client
        } else {
            let mut builder = Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.deadline);

            if let Some(proxy_url) = &self.proxy {
                let proxy = reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::other(format!("Invalid proxy: {}", e)))?;
                builder = builder.proxy(proxy);
            }

            builder.build()?
        };

        Ok(IcyProbe {
            client,
            overshoot_limit: self.overshoot_limit,
            deadline: self.deadline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TitleSource;

    #[test]
    fn test_builder_defaults() {
        let builder = IcyProbeBuilder::default();
        assert_eq!(builder.overshoot_limit, DEFAULT_OVERSHOOT_LIMIT);
        assert_eq!(
            builder.deadline,
            Duration::from_secs(DEFAULT_PROBE_DEADLINE_SECS)
        );
        assert_eq!(builder.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_builder_overrides() {
        let probe = IcyProbe::builder()
            .overshoot_limit(1024)
            .deadline(Duration::from_secs(3))
            .build()
            .unwrap();
        assert_eq!(probe.overshoot_limit(), 1024);
        assert_eq!(probe.deadline(), Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_invalid_url_degrades_to_placeholder() {
        let probe = IcyProbe::new().unwrap();
        let playing = probe.now_playing("not a url").await;
        assert_eq!(playing.source, TitleSource::Placeholder);
        assert_eq!(playing.title, crate::models::FALLBACK_TITLE);
    }

    #[tokio::test]
    #[ignore = "Integration test - probes a live radio stream"]
    async fn test_live_stream_probe() {
        let probe = IcyProbe::new().unwrap();
        let playing = probe
            .now_playing("https://ice1.somafm.com/groovesalad-128-mp3")
            .await;
        println!("Now playing: {:?}", playing);
        assert!(!playing.title.is_empty() || playing.source == TitleSource::Stream);
    }
}
