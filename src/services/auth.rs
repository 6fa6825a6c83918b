//! Auth services - Sincronizzazione degli utenti dall'identity provider

use crate::core::{AppError, AppJson, AppState, AuthenticatedUser};
use crate::dtos::{SuccessDTO, SyncUserRequestDTO, UpsertUserDTO};
use axum::{
    Extension,
    extract::{Json, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Chiamato dal frontend dopo il login: crea o aggiorna l'utente (chiave: email)
#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn sync_user(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<AuthenticatedUser>,
    AppJson(body): AppJson<SyncUserRequestDTO>,
) -> Result<Json<SuccessDTO>, AppError> {
    debug!("Syncing user");
    // 1. id ed email obbligatori
    // 2. L'id deve coincidere con quello del token
    // 3. Upsert per email
    let (id, email) = match (body.id, body.email) {
        (Some(id), Some(email)) if !id.is_empty() && !email.is_empty() => (id, email),
        _ => {
            warn!("Sync request with missing fields");
            return Err(AppError::bad_request("Missing required fields"));
        }
    };

    if id != current_user.user_id {
        warn!("Sync request for a different user id");
        return Err(AppError::forbidden("You can only sync your own account"));
    }

    state
        .user
        .upsert_by_email(&UpsertUserDTO {
            id,
            name: body.name,
            email,
            image: body.image,
            email_verified: body.email_verified,
        })
        .await?;

    info!("User synchronized");
    Ok(Json(SuccessDTO { success: true }))
}
