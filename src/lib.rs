//! Invito - backend per circle privati, inviti a eventi, RSVP e feed
//!
//! La libreria espone i moduli principali per il binario e per i test.

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;
pub mod storage;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, auth, config};
pub use services::root;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};
use std::sync::Arc;

/// Crea il router principale dell'applicazione.
///
/// Tutte le rotte sotto `/api` richiedono autenticazione, tranne l'anteprima
/// pubblica di un circle tramite codice di invito.
pub fn create_router(state: Arc<AppState>) -> Router {
    use services::*;

    Router::new()
        .route("/", get(root))
        .route("/ping", get(ping))
        .nest("/api", configure_api_routes(state.clone()))
        .with_state(state)
}

fn configure_api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .nest("/auth", configure_auth_routes(state.clone()))
        .nest("/circles", configure_circle_routes(state.clone()))
        .nest("/invites", configure_invite_routes(state.clone()))
        .nest("/feed", configure_feed_routes(state.clone()))
        .nest("/media", configure_media_routes(state.clone()))
        .nest("/users", configure_user_routes(state))
}

/// Configura le routes di sincronizzazione utente
fn configure_auth_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/sync", post(sync_user))
        .layer(middleware::from_fn_with_state(state, authentication_middleware))
}

/// Configura le routes per circle, membership e link di invito
fn configure_circle_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    // Rotte che NON richiedono autenticazione
    let public_routes = Router::new().route("/invite/{code}", get(get_circle_by_invite_code));

    let protected_routes = Router::new()
        .route("/", get(list_circles).post(create_circle))
        .route("/join/{code}", post(join_by_code))
        .route("/{circle_id}", get(get_circle).delete(delete_circle))
        .route("/{circle_id}/regenerate", post(regenerate_invite_code))
        .route("/{circle_id}/settings", patch(update_circle_settings))
        .route("/{circle_id}/pending", get(list_pending_members))
        .route(
            "/{circle_id}/members/{user_id}/approve",
            post(approve_member),
        )
        .route("/{circle_id}/members/{user_id}", delete(remove_member))
        .route(
            "/{circle_id}/invites",
            get(list_invite_links).post(create_invite_link),
        )
        .route("/{circle_id}/invites/{link_id}", delete(delete_invite_link))
        .layer(middleware::from_fn_with_state(state, authentication_middleware));

    public_routes.merge(protected_routes)
}

/// Configura le routes per inviti ed RSVP
fn configure_invite_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/", get(list_invites).post(create_invite))
        .route("/{invite_id}", get(get_invite_details).delete(delete_invite))
        .route("/{invite_id}/rsvp", post(upsert_rsvp))
        .layer(middleware::from_fn_with_state(state, authentication_middleware))
}

/// Configura le routes del feed degli eventi
fn configure_feed_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/", post(create_post))
        .route("/{invite_id}", get(get_feed))
        .layer(middleware::from_fn_with_state(state, authentication_middleware))
}

/// Configura la route di upload dei media
fn configure_media_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/", post(upload_media))
        .layer(DefaultBodyLimit::max(media::MAX_UPLOAD_BYTES))
        .layer(middleware::from_fn_with_state(state, authentication_middleware))
}

/// Configura le routes per profili e statistiche
fn configure_user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/{user_id}/profile", get(get_profile).put(update_profile))
        .route("/{user_id}/stats", get(get_stats))
        .layer(middleware::from_fn_with_state(state, authentication_middleware))
}
