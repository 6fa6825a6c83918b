//! User services - Profili e statistiche degli utenti

use crate::core::{AppError, AppJson, AppState, AuthenticatedUser};
use crate::dtos::{UpdateProfileDTO, UserDTO, UserProfileDTO, UserStatsDTO};
use crate::entities::{ProfileVisibility, User};
use crate::repositories::{Read, Update};
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Carica l'utente e applica la regola di visibilità del profilo:
/// un profilo PRIVATE è visibile solo al proprietario.
async fn load_visible_user(
    state: &AppState,
    user_id: &String,
    current_user: &AuthenticatedUser,
) -> Result<User, AppError> {
    let user = state.user.read(user_id).await?.ok_or_else(|| {
        warn!("User not found");
        AppError::not_found("User not found")
    })?;

    if user.profile_visibility == ProfileVisibility::Private && user.id != current_user.user_id {
        warn!("Profile of user {} is private", user.id);
        return Err(AppError::unauthorized("This profile is private"));
    }

    Ok(user)
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id, target = %user_id))]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> Result<Json<UserProfileDTO>, AppError> {
    debug!("Getting user profile");
    let user = load_visible_user(&state, &user_id, &current_user).await?;
    let stats = state.user.get_stats(&user.id).await?;

    info!("Profile retrieved");
    Ok(Json(UserProfileDTO {
        user: UserDTO::from(user),
        stats,
    }))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id, target = %user_id))]
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> Result<Json<UserStatsDTO>, AppError> {
    debug!("Getting user stats");
    let user = load_visible_user(&state, &user_id, &current_user).await?;
    let stats = state.user.get_stats(&user.id).await?;
    Ok(Json(stats))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, target = %user_id))]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Extension(current_user): Extension<AuthenticatedUser>,
    AppJson(body): AppJson<UpdateProfileDTO>,
) -> Result<Json<UserDTO>, AppError> {
    debug!("Updating user profile");
    if user_id != current_user.user_id {
        warn!("User tried to update someone else's profile");
        return Err(AppError::unauthorized("You can only update your own profile"));
    }
    body.validate()?;

    let user = state.user.update(&user_id, &body).await?;

    info!("Profile updated");
    Ok(Json(UserDTO::from(user)))
}
