//! Application State - Stato globale dell'applicazione
//!
//! Contiene tutti i repository, configurazioni e servizi esterni
//! necessari per gestire l'applicazione.

use crate::repositories::{
    CircleMemberRepository, CircleRepository, FeedRepository, InviteLinkRepository,
    InviteRepository, MediaRepository, RsvpRepository, UserRepository,
};
use crate::storage::MediaStore;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Repository per la gestione degli utenti
    pub user: UserRepository,

    /// Repository per la gestione dei circle
    pub circle: CircleRepository,

    /// Repository per le membership dei circle
    pub member: CircleMemberRepository,

    /// Repository per i link di invito a uso limitato
    pub link: InviteLinkRepository,

    /// Repository per gli inviti (eventi)
    pub invite: InviteRepository,

    pub rsvp: RsvpRepository,

    pub feed: FeedRepository,

    pub media: MediaRepository,

    /// Store esterno per i byte dei media caricati
    pub media_store: Arc<dyn MediaStore>,

    /// Secret key per JWT token
    pub jwt_secret: String,

    /// Se true, il token `dev-token` autentica l'utente di sviluppo
    pub allow_dev_token: bool,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito.
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni SQLite condiviso
    /// * `jwt_secret` - Chiave segreta per la verifica dei token JWT
    /// * `media_store` - Store per i file caricati
    pub fn new(pool: SqlitePool, jwt_secret: String, media_store: Arc<dyn MediaStore>) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            circle: CircleRepository::new(pool.clone()),
            member: CircleMemberRepository::new(pool.clone()),
            link: InviteLinkRepository::new(pool.clone()),
            invite: InviteRepository::new(pool.clone()),
            rsvp: RsvpRepository::new(pool.clone()),
            feed: FeedRepository::new(pool.clone()),
            media: MediaRepository::new(pool),
            media_store,
            jwt_secret,
            allow_dev_token: false,
        }
    }

    /// Abilita il bypass di sviluppo (`dev-token`)
    pub fn with_dev_token(mut self, enabled: bool) -> Self {
        self.allow_dev_token = enabled;
        self
    }
}
