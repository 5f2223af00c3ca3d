use std::sync::Arc;

use sfmbanter::{BanterExt, BanterGenerator};
use sfmconfig::Config;
use sfmcontent::{ContentExt, ContentStore, SanityStore};
use sfmicy::NowPlayingExt;
use sfmserver::ServerBuilder;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ========== PHASE 1 : Configuration et serveur HTTP ==========

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::load()?;
    let mut server = ServerBuilder::from_config(&config).build();

    // Route d'information de l'application
    let station = config.get_station_name();
    server
        .add_route("/api/info", move || {
            let station = station.clone();
            async move {
                serde_json::json!({
                    "name": "Static FM",
                    "version": env!("CARGO_PKG_VERSION"),
                    "station": station,
                })
            }
        })
        .await;

    // ========== PHASE 2 : APIs métier ==========

    // Sonde de métadonnées des flux radio
    info!("📻 Initializing now-playing probe...");
    server.init_nowplaying(&config).await?;

    // Grille des programmes et générateur de banter, partageant le même
    // store de contenu. Un store non configuré désactive ces deux APIs
    // sans empêcher le démarrage.
    info!("🎙️ Initializing content APIs...");
    match SanityStore::from_config(&config) {
        Ok(store) => {
            let store: Arc<dyn ContentStore> = Arc::new(store);

            server
                .init_content_with_store(store.clone(), config.get_timezone_offset_hours())
                .await?;

            match BanterGenerator::from_config(&config, store) {
                Ok(generator) => {
                    server.init_banter_with_generator(generator).await?;
                }
                Err(e) => {
                    warn!("⚠️ Banter generator disabled: {}", e);
                }
            }
        }
        Err(e) => {
            warn!("⚠️ Content store not configured, schedule and banter APIs disabled: {}", e);
        }
    }

    // ========== PHASE 3 : Démarrage du serveur ==========

    info!("🌐 Starting HTTP server...");
    server.start().await?;

    info!("✅ Static FM backend is ready!");
    info!("Press Ctrl+C to stop...");
    server.wait().await;

    Ok(())
}
