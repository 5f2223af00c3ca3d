//! Implémentation du trait BanterExt pour sfmserver::Server
//!
//! Ce module enrichit `sfmserver::Server` avec le générateur de scripts
//! en implémentant le trait [`BanterExt`](crate::BanterExt).

use crate::api_rest::create_router;
use crate::script::BanterGenerator;
use crate::sfmserver_ext::{BanterExt, BanterState};
use anyhow::Result;
use sfmserver::Server;
use std::sync::Arc;
use tracing::info;

impl BanterExt for Server {
    async fn init_banter(&mut self, config: &sfmconfig::Config) -> Result<Arc<BanterState>> {
        info!("Initializing banter API...");

        let store = sfmcontent::SanityStore::from_config(config)
            .map_err(|e| anyhow::anyhow!("Failed to create content store: {}", e))?;
        let generator = BanterGenerator::from_config(config, Arc::new(store))
            .map_err(|e| anyhow::anyhow!("Failed to create banter generator: {}", e))?;

        self.init_banter_with_generator(generator).await
    }

    async fn init_banter_with_generator(
        &mut self,
        generator: BanterGenerator,
    ) -> Result<Arc<BanterState>> {
        let state = BanterState::new(generator);

        let router = create_router(state.clone());
        self.add_router("/api/banter", router).await;

        info!("Banter API initialized");
        info!("API endpoint available at /api/banter");

        Ok(Arc::new(state))
    }
}
