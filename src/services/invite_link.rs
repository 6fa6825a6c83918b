//! Invite link services - Link di invito a uso limitato (solo proprietario)

use super::circle::generate_invite_code;
use crate::core::{AppError, AppJson, AppState, AuthenticatedUser, require_owner};
use crate::dtos::{CreateInviteLinkDTO, CreateInviteLinkRequestDTO, InviteLinkDTO, SuccessDTO};
use crate::repositories::Create;
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, circle_id = %circle_id))]
pub async fn create_invite_link(
    State(state): State<Arc<AppState>>,
    Path(circle_id): Path<String>,
    Extension(current_user): Extension<AuthenticatedUser>,
    AppJson(body): AppJson<CreateInviteLinkRequestDTO>,
) -> Result<Json<InviteLinkDTO>, AppError> {
    debug!("Creating invite link");
    // 1. Solo il proprietario
    // 2. maxUses >= 1, scadenza (se presente) nel futuro
    // 3. Codice casuale, contatore a zero
    let circle = require_owner(&state, &circle_id, &current_user).await?;

    if body.validate().is_err() {
        warn!("Invalid maxUses {}", body.max_uses);
        return Err(AppError::bad_request("maxUses must be at least 1"));
    }
    if body.expires_at.is_some_and(|expires_at| expires_at <= Utc::now()) {
        warn!("Invite link expiration is in the past");
        return Err(AppError::bad_request("expiresAt must be in the future"));
    }

    let link = state
        .link
        .create(&CreateInviteLinkDTO {
            circle_id: circle.id,
            code: generate_invite_code(),
            max_uses: body.max_uses,
            expires_at: body.expires_at,
            creator_id: current_user.user_id.clone(),
        })
        .await?;

    info!("Invite link {} created with {} uses", link.id, link.max_uses);
    Ok(Json(InviteLinkDTO::from(link)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id, circle_id = %circle_id))]
pub async fn list_invite_links(
    State(state): State<Arc<AppState>>,
    Path(circle_id): Path<String>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<InviteLinkDTO>>, AppError> {
    debug!("Listing invite links");
    require_owner(&state, &circle_id, &current_user).await?;

    let links: Vec<InviteLinkDTO> = state
        .link
        .list_available(&circle_id)
        .await?
        .into_iter()
        .map(InviteLinkDTO::from)
        .collect();

    info!("Found {} available invite links", links.len());
    Ok(Json(links))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id, circle_id = %circle_id, link_id = %link_id))]
pub async fn delete_invite_link(
    State(state): State<Arc<AppState>>,
    Path((circle_id, link_id)): Path<(String, String)>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> Result<Json<SuccessDTO>, AppError> {
    debug!("Deleting invite link");
    require_owner(&state, &circle_id, &current_user).await?;

    let deleted = state.link.delete_in_circle(&circle_id, &link_id).await?;
    if deleted == 0 {
        warn!("Invite link not found in circle");
        return Err(AppError::not_found("Invite link not found"));
    }

    info!("Invite link deleted");
    Ok(Json(SuccessDTO { success: true }))
}
