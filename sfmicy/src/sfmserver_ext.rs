//! Extension sfmserver pour le titre en cours de lecture
//!
//! Ce module fournit un trait d'extension pour ajouter l'API now-playing
//! à un serveur sfmserver.

use anyhow::Result;
use std::sync::Arc;

use crate::client::IcyProbe;

/// État partagé pour le handler now-playing
#[derive(Clone)]
pub struct NowPlayingState {
    pub probe: IcyProbe,
}

impl NowPlayingState {
    pub fn new(probe: IcyProbe) -> Self {
        Self { probe }
    }
}

/// Trait pour étendre sfmserver avec la sonde de métadonnées ICY
///
/// Ce trait permet à `sfmicy` d'ajouter des méthodes d'extension sur
/// `sfmserver::Server` sans que sfmserver dépende de sfmicy.
///
/// # Architecture
///
/// - `sfmserver` définit un serveur HTTP générique
/// - `sfmicy` étend ce serveur avec la route now-playing via ce trait
/// - Le serveur n'a pas besoin de connaître `sfmicy`
///
/// # Exemple
///
/// ```rust,no_run
/// use sfmicy::NowPlayingExt;
/// use sfmserver::ServerBuilder;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = sfmconfig::Config::load()?;
///     let mut server = ServerBuilder::from_config(&config).build();
///
///     // Initialise la sonde ICY
///     server.init_nowplaying(&config).await?;
///
///     server.start().await?;
///     server.wait().await;
///     Ok(())
/// }
/// ```
pub trait NowPlayingExt {
    /// Initialise la sonde ICY et enregistre la route HTTP
    ///
    /// # Returns
    /// État partagé de la sonde
    ///
    /// # Routes enregistrées
    ///
    /// - `GET /api/nowplaying?url={stream-url}` - Titre en cours du flux
    async fn init_nowplaying(
        &mut self,
        config: &sfmconfig::Config,
    ) -> Result<Arc<NowPlayingState>>;

    /// Initialise l'extension avec une sonde existante
    ///
    /// Similaire à `init_nowplaying()` mais utilise une sonde déjà
    /// construite, permettant de partager le pool de connexions HTTP.
    async fn init_nowplaying_with_probe(
        &mut self,
        probe: IcyProbe,
    ) -> Result<Arc<NowPlayingState>>;
}

// L'implémentation du trait est dans un module séparé (sfmserver_impl.rs)
// pour éviter les dépendances circulaires
