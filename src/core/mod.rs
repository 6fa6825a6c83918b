//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Autenticazione (JWT / cookie di sessione) e controllo accessi
//! - Configurazione e database
//! - Gestione errori ed estrattori
//! - Stato applicazione

pub mod access;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod state;

// Re-exports per facilitare l'import
pub use access::{require_active_member, require_owner};
pub use auth::{AuthenticatedUser, Claims, authentication_middleware, decode_jwt, encode_jwt};
pub use config::Config;
pub use error::{AppError, ErrorKind};
pub use extract::AppJson;
pub use state::AppState;
