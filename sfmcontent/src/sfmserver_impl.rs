//! Implémentation du trait ContentExt pour sfmserver::Server
//!
//! Ce module enrichit `sfmserver::Server` avec la grille des programmes
//! en implémentant le trait [`ContentExt`](crate::ContentExt).

use crate::api_rest::create_router;
use crate::sanity::SanityStore;
use crate::sfmserver_ext::{ContentExt, ContentState};
use crate::store::ContentStore;
use anyhow::Result;
use sfmserver::Server;
use std::sync::Arc;
use tracing::info;

impl ContentExt for Server {
    async fn init_content(&mut self, config: &sfmconfig::Config) -> Result<Arc<ContentState>> {
        info!("Initializing content API...");

        let store = SanityStore::from_config(config)
            .map_err(|e| anyhow::anyhow!("Failed to create content store: {}", e))?;
        let offset = config.get_timezone_offset_hours();

        self.init_content_with_store(Arc::new(store), offset).await
    }

    async fn init_content_with_store(
        &mut self,
        store: Arc<dyn ContentStore>,
        timezone_offset_hours: i64,
    ) -> Result<Arc<ContentState>> {
        let state = ContentState::new(store, timezone_offset_hours);

        // Les routes portent leurs chemins complets, fusion à la racine
        let router = create_router(state.clone());
        self.add_router("/", router).await;

        info!("Content API initialized");
        info!("API endpoints available at /api/schedule/now, /api/shows, /api/presenters/{{slug}}");

        Ok(Arc::new(state))
    }
}
