//! ICY stream metadata probe for Static FM
//!
//! This crate answers one question: what is a Shoutcast/Icecast stream
//! playing right now? It opens the stream with `Icy-MetaData: 1`, reads
//! just enough audio to reach the first interleaved metadata block,
//! extracts the `StreamTitle` field and closes the connection.
//!
//! # Features
//!
//! - **Bounded reads**: never downloads more than the metadata interval
//!   plus a configurable overshoot, under a global deadline
//! - **Chunk-boundary safe**: reassembles metadata blocks that arrive
//!   split across body chunks
//! - **Graceful degradation**: falls back to the `icy-name` station name,
//!   then to a placeholder title, and never fails outward
//! - **Server integration**: optional `GET /api/nowplaying` route for
//!   sfmserver behind the `server` feature
//!
//! # Example
//!
//! ```no_run
//! use sfmicy::IcyProbe;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let probe = IcyProbe::new()?;
//!
//!     let playing = probe
//!         .now_playing("https://ice1.somafm.com/groovesalad-128-mp3")
//!         .await;
//!     println!("Now playing: {} (from {:?})", playing.title, playing.source);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Protocol notes
//!
//! The interleaving scheme is not part of HTTP: the server only honors it
//! when the request carries `Icy-MetaData: 1`, and advertises the audio
//! byte count between blocks in the `icy-metaint` response header. Streams
//! without that header (or with a zero or garbled value) cannot be scanned
//! and resolve to the station name instead.

pub mod client;
pub mod error;
pub mod headers;
pub mod metadata;
pub mod models;
pub mod scan;

#[cfg(feature = "server")]
pub mod api_rest;

#[cfg(feature = "server")]
pub mod sfmserver_ext;

#[cfg(feature = "server")]
pub mod sfmserver_impl;

// Re-exports
pub use client::{IcyProbe, IcyProbeBuilder};
pub use error::{Error, Result};
pub use headers::IcyHeaders;
pub use metadata::{decode_metadata_block, parse_stream_title};
pub use models::{NowPlaying, TitleSource, FALLBACK_TITLE};
pub use scan::{scan_for_title, ScanOutcome};

#[cfg(feature = "server")]
pub use sfmserver_ext::{NowPlayingExt, NowPlayingState};
