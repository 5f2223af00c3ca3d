//! Content store client and on-air schedule for Static FM
//!
//! The station's shows and presenters live in a hosted CMS. This crate
//! provides:
//!
//! - **Typed models**: [`Show`] and [`Presenter`] as the store projects
//!   them
//! - **A store seam**: the [`ContentStore`] trait, so consumers can be
//!   tested against fixtures
//! - **The production store**: [`SanityStore`], speaking GROQ over HTTP
//! - **Schedule arithmetic**: station-local hour and the on-air pick rule
//! - **Server integration**: schedule, shows and presenter routes for
//!   sfmserver behind the `server` feature
//!
//! # Example
//!
//! ```no_run
//! use sfmcontent::{ContentStore, SanityStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SanityStore::builder().project_id("abc123").build()?;
//!
//!     let hour = sfmcontent::schedule::station_hour(2);
//!     match store.show_on_air(hour).await? {
//!         Some(show) => println!("On air at {}h: {}", hour, show.title),
//!         None => println!("Nothing scheduled yet at {}h", hour),
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod sanity;
pub mod schedule;
pub mod store;

#[cfg(feature = "server")]
pub mod api_rest;

#[cfg(feature = "server")]
pub mod sfmserver_ext;

#[cfg(feature = "server")]
pub mod sfmserver_impl;

// Re-exports
pub use error::{Error, Result};
pub use models::{HostRef, Presenter, Show};
pub use sanity::{SanityStore, SanityStoreBuilder};
pub use schedule::{pick_on_air, station_hour, station_hour_at};
pub use store::ContentStore;

#[cfg(feature = "server")]
pub use sfmserver_ext::{ContentExt, ContentState};
