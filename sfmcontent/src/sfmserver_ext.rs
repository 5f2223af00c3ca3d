//! Extension sfmserver pour la grille des programmes
//!
//! Ce module fournit un trait d'extension pour ajouter l'API de la
//! grille (émission à l'antenne, émissions, animateurs) à un serveur
//! sfmserver.

use anyhow::Result;
use std::sync::Arc;

use crate::store::ContentStore;

/// État partagé pour les handlers de la grille
#[derive(Clone)]
pub struct ContentState {
    pub store: Arc<dyn ContentStore>,
    /// Décalage fixe de l'heure station par rapport à UTC, en heures
    pub timezone_offset_hours: i64,
}

impl ContentState {
    pub fn new(store: Arc<dyn ContentStore>, timezone_offset_hours: i64) -> Self {
        Self {
            store,
            timezone_offset_hours,
        }
    }
}

/// Trait pour étendre sfmserver avec la grille des programmes
///
/// Ce trait permet à `sfmcontent` d'ajouter des méthodes d'extension sur
/// `sfmserver::Server` sans que sfmserver dépende de sfmcontent.
///
/// # Exemple
///
/// ```rust,no_run
/// use sfmcontent::ContentExt;
/// use sfmserver::ServerBuilder;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = sfmconfig::Config::load()?;
///     let mut server = ServerBuilder::from_config(&config).build();
///
///     // Initialise le client du store de contenu
///     server.init_content(&config).await?;
///
///     server.start().await?;
///     server.wait().await;
///     Ok(())
/// }
/// ```
pub trait ContentExt {
    /// Initialise le store de contenu et enregistre les routes HTTP
    ///
    /// # Returns
    /// État partagé de la grille
    ///
    /// # Routes enregistrées
    ///
    /// - `GET /api/schedule/now` - Émission actuellement à l'antenne
    /// - `GET /api/shows` - Liste des émissions
    /// - `GET /api/presenters/{slug}` - Fiche animateur
    async fn init_content(&mut self, config: &sfmconfig::Config) -> Result<Arc<ContentState>>;

    /// Initialise l'extension avec un store existant
    ///
    /// Similaire à `init_content()` mais utilise un store déjà construit,
    /// ce qui permet de partager la même instance avec le générateur de
    /// scripts.
    async fn init_content_with_store(
        &mut self,
        store: Arc<dyn ContentStore>,
        timezone_offset_hours: i64,
    ) -> Result<Arc<ContentState>>;
}

// L'implémentation du trait est dans un module séparé (sfmserver_impl.rs)
// pour éviter les dépendances circulaires
