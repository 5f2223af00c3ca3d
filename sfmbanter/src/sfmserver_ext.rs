//! Extension sfmserver pour le générateur de scripts
//!
//! Ce module fournit un trait d'extension pour ajouter l'API du
//! générateur de banter à un serveur sfmserver.

use anyhow::Result;
use std::sync::Arc;

use crate::script::BanterGenerator;

/// État partagé pour le handler du générateur
#[derive(Clone)]
pub struct BanterState {
    pub generator: BanterGenerator,
}

impl BanterState {
    pub fn new(generator: BanterGenerator) -> Self {
        Self { generator }
    }
}

/// Trait pour étendre sfmserver avec le générateur de scripts
///
/// Ce trait permet à `sfmbanter` d'ajouter des méthodes d'extension sur
/// `sfmserver::Server` sans que sfmserver dépende de sfmbanter.
///
/// # Exemple
///
/// ```rust,no_run
/// use sfmbanter::BanterExt;
/// use sfmserver::ServerBuilder;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = sfmconfig::Config::load()?;
///     let mut server = ServerBuilder::from_config(&config).build();
///
///     // Initialise le générateur et sa route HTTP
///     server.init_banter(&config).await?;
///
///     server.start().await?;
///     server.wait().await;
///     Ok(())
/// }
/// ```
pub trait BanterExt {
    /// Initialise le générateur de scripts et enregistre la route HTTP
    ///
    /// Construit son propre store de contenu à partir de la
    /// configuration.
    ///
    /// # Returns
    /// État partagé du générateur
    ///
    /// # Routes enregistrées
    ///
    /// - `POST /api/banter` - Génère un script pour le morceau qui vient de se terminer
    async fn init_banter(&mut self, config: &sfmconfig::Config) -> Result<Arc<BanterState>>;

    /// Initialise l'extension avec un générateur existant
    ///
    /// Permet de partager le store de contenu déjà construit pour la
    /// grille des programmes.
    async fn init_banter_with_generator(
        &mut self,
        generator: BanterGenerator,
    ) -> Result<Arc<BanterState>>;
}

// L'implémentation du trait est dans un module séparé (sfmserver_impl.rs)
// pour éviter les dépendances circulaires
