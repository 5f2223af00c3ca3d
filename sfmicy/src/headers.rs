//! Typed view over the ICY response headers
//!
//! Shoutcast/Icecast servers answer a request carrying `Icy-MetaData: 1`
//! with a handful of non-standard `icy-*` headers. Only three matter to
//! the probe and they are all optional and frequently malformed, so the
//! raw values are normalized here once and the rest of the crate never
//! touches `HeaderMap` again.

use reqwest::header::HeaderMap;

/// Request header that asks the server to interleave metadata.
pub const ICY_METADATA: &str = "Icy-MetaData";

/// Response header carrying the metadata interval in bytes.
pub const ICY_METAINT: &str = "icy-metaint";

/// Response header carrying the station name.
pub const ICY_NAME: &str = "icy-name";

/// Response header carrying the advertised bitrate in kbps.
pub const ICY_BR: &str = "icy-br";

/// Normalized ICY headers of a stream response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IcyHeaders {
    /// Metadata interval in bytes. `None` when the header is absent,
    /// non-numeric or zero, all of which mean the stream cannot be
    /// scanned for interleaved metadata.
    pub metadata_interval: Option<usize>,
    /// Station name, trimmed. `None` when absent or blank.
    pub station_name: Option<String>,
    /// Advertised bitrate in kbps, when parseable.
    pub bitrate: Option<u32>,
}

impl IcyHeaders {
    /// Extract and normalize the ICY headers from a response.
    pub fn parse(headers: &HeaderMap) -> Self {
        Self {
            metadata_interval: header_str(headers, ICY_METAINT)
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|&n| n > 0),
            station_name: header_str(headers, ICY_NAME)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
            bitrate: header_str(headers, ICY_BR).and_then(|v| v.parse::<u32>().ok()),
        }
    }
}

/// Header value as a trimmed string, when it is valid ASCII.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::trim)
}
