//! Result types for the ICY stream probe

use serde::{Deserialize, Serialize};

/// Title shown when a stream tells us nothing about itself.
pub const FALLBACK_TITLE: &str = "Live Broadcast";

/// Where the display title of a probe came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleSource {
    /// Extracted from the interleaved metadata block.
    Stream,
    /// The `icy-name` header, used when the stream carries no title.
    StationName,
    /// Nothing usable at all, [`FALLBACK_TITLE`] substituted.
    Placeholder,
}

/// What a stream is currently playing, as far as it would tell us.
///
/// A probe always produces one of these. `title` is ready for display:
/// the fallback chain (stream title, then station name, then the
/// [`FALLBACK_TITLE`] placeholder) has already been applied, and
/// `source` records which rung supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    /// Display title for the player UI.
    pub title: String,
    /// Station name advertised by the server, when any.
    pub station: Option<String>,
    /// Which fallback rung `title` came from.
    pub source: TitleSource,
}

impl NowPlaying {
    /// Title extracted from the stream metadata itself.
    pub(crate) fn from_stream_title(title: String, station: Option<String>) -> Self {
        Self {
            title,
            station,
            source: TitleSource::Stream,
        }
    }

    /// Fallback when the stream yielded no title: the station name when
    /// the server sent one, the placeholder otherwise.
    pub(crate) fn without_stream_title(station: Option<String>) -> Self {
        match station {
            Some(name) => Self {
                title: name.clone(),
                station: Some(name),
                source: TitleSource::StationName,
            },
            None => Self::placeholder(),
        }
    }

    /// The placeholder result, used when the probe learned nothing.
    pub fn placeholder() -> Self {
        Self {
            title: FALLBACK_TITLE.to_string(),
            station: None,
            source: TitleSource::Placeholder,
        }
    }
}
