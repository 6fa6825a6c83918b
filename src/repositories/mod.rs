//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Questo modulo organizza i repository in sotto-moduli separati per una migliore manutenibilità.
//! Ogni repository gestisce le operazioni di database per una specifica entità.

// ************************* NOTA SU SQLX ************************* //

/*
   Le query usano `sqlx::query_as::<_, T>` con entità che derivano `sqlx::FromRow`,
   quindi non serve un database attivo in fase di compilazione: lo schema vive in
   `migrations/` ed è applicato all'avvio con `sqlx::migrate!`.

   Promemoria sui metodi di esecuzione:
   .execute(...)         -> INSERT/UPDATE/DELETE senza RETURNING (rows_affected)
   .fetch_optional(...)  -> zero o una riga
   .fetch_one(...)       -> esattamente una riga (RowNotFound altrimenti), anche per COUNT(*)
   .fetch_all(...)       -> Vec di righe

   Dentro una transazione si passa sempre `&mut *tx`, mai il pool.
   Le righe "con join" (es. MemberWithUser) usano `#[sqlx(flatten)]` sull'entità e
   alias espliciti (`u.name AS user_name`) per le colonne dell'altra tabella.
*/

// ************************* MODULI REPOSITORY ************************* //

pub mod circle;
pub mod circle_member;
pub mod feed;
pub mod invite;
pub mod invite_link;
pub mod media;
pub mod rsvp;
pub mod traits;
pub mod user;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Delete, Read, Update};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use circle::{CircleOverview, CircleRepository};
pub use circle_member::{CircleMemberRepository, MemberWithUser};
pub use feed::{FeedItemWithUser, FeedRepository};
pub use invite::{InviteOverview, InviteRepository};
pub use invite_link::InviteLinkRepository;
pub use media::MediaRepository;
pub use rsvp::{RsvpRepository, RsvpWithUser};
pub use user::UserRepository;
