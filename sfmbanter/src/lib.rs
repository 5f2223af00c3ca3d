//! AI DJ banter for Static FM
//!
//! When a track ends, the front-end posts the show context here and gets
//! back a short script in the presenters' voices. Generation runs over
//! an ordered list of chat-completion models, trying each exactly once
//! and keeping the first non-empty answer; a closing rate limit stays
//! distinguishable from a generic failure so the player can say so.
//!
//! # Features
//!
//! - **Failover dispatch**: one attempt per model, no backoff, no
//!   parallelism; the list order is the whole policy
//! - **Voice profiles**: the prompt casts each presenter with the
//!   `voice_prompt` stored alongside them in the content store
//! - **Pluggable backend**: the dispatcher works against a
//!   [`CompletionBackend`] trait, so tests script it without a network
//! - **Server integration**: optional `POST /api/banter` route for
//!   sfmserver behind the `server` feature
//!
//! # Example
//!
//! ```no_run
//! use sfmbanter::{dispatch, ChatMessage, CompletionClient, SamplingParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CompletionClient::new("sk-your-key")?;
//!     let models = vec![
//!         "google/gemini-2.0-flash-exp:free".to_string(),
//!         "meta-llama/llama-3.3-70b-instruct:free".to_string(),
//!     ];
//!     let messages = [
//!         ChatMessage::system("You are a radio DJ. Keep it short."),
//!         ChatMessage::user("Action!"),
//!     ];
//!
//!     let script = dispatch(&client, &models, &messages, &SamplingParams::default()).await?;
//!     println!("{script}");
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod script;

#[cfg(feature = "server")]
pub mod api_rest;

#[cfg(feature = "server")]
pub mod sfmserver_ext;

#[cfg(feature = "server")]
pub mod sfmserver_impl;

pub use client::{CompletionClient, CompletionClientBuilder};
pub use dispatch::{dispatch, CompletionBackend};
pub use error::{Error, Result};
pub use models::{ChatMessage, ChatRequest, SamplingParams};
pub use script::{build_system_prompt, BanterGenerator, ScriptRequest, DEFAULT_PERSONALITY};

#[cfg(feature = "server")]
pub use sfmserver_ext::{BanterExt, BanterState};
