//! Content store abstraction
//!
//! Shows and presenters live in a hosted CMS. Everything that needs them
//! goes through this trait rather than a concrete client, so handlers
//! and the script generator can be driven by in-memory fixtures in
//! tests. The production implementation is
//! [`SanityStore`](crate::SanityStore).

use std::fmt::Debug;

use crate::error::Result;
use crate::models::{Presenter, Show};

/// Read access to the station's shows and presenters.
///
/// All implementations must be `Send + Sync` for use in async servers.
///
/// # Example
///
/// ```rust,ignore
/// #[async_trait::async_trait]
/// impl ContentStore for FixtureStore {
///     async fn shows(&self) -> Result<Vec<Show>> {
///         Ok(self.shows.clone())
///     }
///     // ...
/// }
/// ```
#[async_trait::async_trait]
pub trait ContentStore: Debug + Send + Sync {
    /// All shows, ordered by start hour.
    async fn shows(&self) -> Result<Vec<Show>>;

    /// The show on air at the given station hour (0-23), when any has
    /// started yet. Hosts are resolved to names and portraits.
    async fn show_on_air(&self, hour: u32) -> Result<Option<Show>>;

    /// A presenter by slug, with the shows they appear in.
    async fn presenter_by_slug(&self, slug: &str) -> Result<Option<Presenter>>;

    /// Voice profiles for the named presenters, for script generation.
    /// Names not present in the store are silently absent from the
    /// result.
    async fn presenters_by_names(&self, names: &[String]) -> Result<Vec<Presenter>>;
}
