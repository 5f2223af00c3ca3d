//! Implémentation du trait NowPlayingExt pour sfmserver::Server
//!
//! Ce module enrichit `sfmserver::Server` avec la sonde de métadonnées ICY
//! en implémentant le trait [`NowPlayingExt`](crate::NowPlayingExt).

use crate::api_rest::create_router;
use crate::client::IcyProbe;
use crate::sfmserver_ext::{NowPlayingExt, NowPlayingState};
use anyhow::Result;
use sfmserver::Server;
use std::sync::Arc;
use tracing::info;

impl NowPlayingExt for Server {
    async fn init_nowplaying(
        &mut self,
        config: &sfmconfig::Config,
    ) -> Result<Arc<NowPlayingState>> {
        info!("Initializing now-playing API...");

        let probe = IcyProbe::from_config(config)
            .map_err(|e| anyhow::anyhow!("Failed to create ICY probe: {}", e))?;

        let state = NowPlayingState::new(probe);
        let router = create_router(state.clone());
        self.add_router("/api/nowplaying", router).await;

        info!("Now-playing API initialized");
        info!("API endpoint available at /api/nowplaying");

        Ok(Arc::new(state))
    }

    async fn init_nowplaying_with_probe(
        &mut self,
        probe: IcyProbe,
    ) -> Result<Arc<NowPlayingState>> {
        info!("Initializing now-playing API with existing probe...");

        let state = NowPlayingState::new(probe);
        let router = create_router(state.clone());
        self.add_router("/api/nowplaying", router).await;

        info!("Now-playing API initialized with probe");

        Ok(Arc::new(state))
    }
}
