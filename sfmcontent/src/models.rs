//! Data structures for shows and presenters
//!
//! These mirror the projections used by the content store queries: the
//! store speaks camelCase JSON and flattens slugs and image references
//! to plain strings, so the structs stay flat too. Fields a given query
//! does not project fall back to their defaults.

use serde::{Deserialize, Serialize};

/// A presenter as referenced from a show (name and portrait only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A scheduled show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub title: String,
    #[serde(default)]
    pub slug: String,
    /// Start hour in station time, 0 to 23. Shows run until the next
    /// one starts.
    pub time_slot: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form mood text, comma separated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub hosts: Vec<HostRef>,
}

/// A presenter profile.
///
/// `voice_prompt` is the persona text fed to the script generator. It is
/// only projected by the internal voice-profile query and never
/// serialized when absent, so public endpoints do not leak it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presenter {
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Shows this presenter appears in, filled by the slug lookup.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shows: Vec<Show>,
}
