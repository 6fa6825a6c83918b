//! Estrattori personalizzati
//!
//! `AppJson` si comporta come `axum::Json` ma, in caso di body non valido,
//! risponde con l'envelope di errore standard (BAD_REQUEST) invece del testo di axum.

use super::AppError;
use axum_macros::FromRequest;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
