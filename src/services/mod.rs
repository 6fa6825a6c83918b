//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Questo modulo organizza i service handlers in sotto-moduli separati per una migliore manutenibilità.
//! Ogni modulo gestisce gli endpoint HTTP per una specifica funzionalità.

pub mod auth;
pub mod circle;
pub mod feed;
pub mod invite;
pub mod invite_link;
pub mod media;
pub mod membership;
pub mod user;

// Re-exports per facilitare l'import
pub use auth::sync_user;
pub use circle::{
    create_circle, delete_circle, get_circle, get_circle_by_invite_code, list_circles,
    regenerate_invite_code, update_circle_settings,
};
pub use feed::{create_post, get_feed};
pub use invite::{create_invite, delete_invite, get_invite_details, list_invites, upsert_rsvp};
pub use invite_link::{create_invite_link, delete_invite_link, list_invite_links};
pub use media::upload_media;
pub use membership::{approve_member, join_by_code, list_pending_members, remove_member};
pub use user::{get_profile, get_stats, update_profile};

use axum::{http::StatusCode, response::IntoResponse};

/// Root endpoint - health check
pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}

/// Heartbeat per i load balancer
pub async fn ping() -> impl IntoResponse {
    (StatusCode::OK, ".")
}
