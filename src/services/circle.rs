//! Circle services - Gestione operazioni sui circle

use crate::core::{AppError, AppJson, AppState, AuthenticatedUser, require_owner};
use crate::dtos::{
    CircleDTO, CircleDetailsDTO, CircleMemberDTO, CirclePreviewDTO, CircleSummaryDTO,
    CreateCircleDTO, CreateCircleRequestDTO, InviteCodeDTO, InviteSummaryDTO, SuccessDTO,
    UpdateCircleSettingsDTO, UserSummaryDTO,
};
use crate::entities::MemberStatus;
use crate::repositories::{CircleOverview, Create, Delete, InviteOverview, MemberWithUser, Read, Update};
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use rand::{Rng, distributions::Alphanumeric};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

pub const INVITE_CODE_LENGTH: usize = 12;

/// Genera un codice alfanumerico casuale (a-z, A-Z, 0-9)
pub fn generate_invite_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(INVITE_CODE_LENGTH)
        .map(char::from)
        .collect()
}

impl From<CircleOverview> for CircleSummaryDTO {
    fn from(value: CircleOverview) -> Self {
        let owner = UserSummaryDTO {
            id: value.circle.owner_id.clone(),
            name: value.owner_name,
            image: value.owner_image,
        };
        Self {
            circle: CircleDTO::from(value.circle),
            owner,
            member_count: value.member_count,
        }
    }
}

impl From<MemberWithUser> for CircleMemberDTO {
    fn from(value: MemberWithUser) -> Self {
        let user = UserSummaryDTO {
            id: value.member.user_id.clone(),
            name: value.user_name,
            image: value.user_image,
        };
        CircleMemberDTO::new(value.member, user)
    }
}

impl From<InviteOverview> for InviteSummaryDTO {
    fn from(value: InviteOverview) -> Self {
        Self {
            id: value.invite.id,
            title: value.invite.title,
            location: value.invite.location,
            event_date: value.invite.event_date,
            sender_id: value.invite.sender_id,
            rsvp_count: value.rsvp_count,
        }
    }
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn create_circle(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<AuthenticatedUser>,
    AppJson(body): AppJson<CreateCircleRequestDTO>,
) -> Result<Json<CircleDTO>, AppError> {
    debug!("Creating new circle");
    // 1. Validare il body (nome non vuoto)
    // 2. Generare un codice di invito casuale
    // 3. Creare circle + membership OWNER/ACTIVE in un'unica transazione
    body.validate()?;
    if body.name.trim().is_empty() {
        warn!("Circle creation attempted with blank name");
        return Err(AppError::bad_request("Circle name is required"));
    }

    let new_circle = CreateCircleDTO {
        name: body.name.trim().to_string(),
        description: body.description,
        invite_code: generate_invite_code(),
        owner_id: current_user.user_id.clone(),
    };

    let circle = state.circle.create(&new_circle).await?;

    info!("Circle '{}' created by user {}", circle.name, current_user.user_id);
    Ok(Json(CircleDTO::from(circle)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn list_circles(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<CircleSummaryDTO>>, AppError> {
    debug!("Listing circles for user");
    let circles: Vec<CircleSummaryDTO> = state
        .circle
        .list_active_for_user(&current_user.user_id)
        .await?
        .into_iter()
        .map(CircleSummaryDTO::from)
        .collect();

    info!("Successfully retrieved {} circles", circles.len());
    Ok(Json(circles))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id, circle_id = %circle_id))]
pub async fn get_circle(
    State(state): State<Arc<AppState>>,
    Path(circle_id): Path<String>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> Result<Json<CircleDetailsDTO>, AppError> {
    debug!("Getting circle details");
    // 1. Recuperare la membership del chiamante (qualunque stato), altrimenti UNAUTHORIZED
    // 2. Recuperare circle + owner
    // 3. Se PENDING: membri e inviti vuoti
    // 4. Se ACTIVE: membri ACTIVE con utente e inviti del circle con numero di RSVP
    let membership = state
        .member
        .read(&(circle_id.clone(), current_user.user_id.clone()))
        .await?
        .ok_or_else(|| {
            warn!("User has no membership in circle");
            AppError::unauthorized("You are not a member of this circle")
        })?;

    let overview = state.circle.find_overview(&circle_id).await?.ok_or_else(|| {
        warn!("Circle not found");
        AppError::not_found("Circle not found")
    })?;
    let CircleSummaryDTO { circle, owner, .. } = CircleSummaryDTO::from(overview);

    let (members, invites) = match membership.status {
        MemberStatus::Pending => {
            debug!("Pending member, hiding members and invites");
            (Vec::new(), Vec::new())
        }
        MemberStatus::Active => {
            let (members, invites) = tokio::try_join!(
                state.member.list_with_users(&circle_id, MemberStatus::Active),
                state.invite.list_by_circle(&circle_id),
            )?;
            (
                members.into_iter().map(CircleMemberDTO::from).collect(),
                invites.into_iter().map(InviteSummaryDTO::from).collect(),
            )
        }
    };

    info!("Circle details retrieved ({} members, {} invites)", members.len(), invites.len());
    Ok(Json(CircleDetailsDTO {
        circle,
        owner,
        members,
        invites,
        current_user_status: membership.status,
    }))
}

/// Anteprima pubblica usata dalla pagina di join
#[instrument(skip(state))]
pub async fn get_circle_by_invite_code(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<CirclePreviewDTO>, AppError> {
    debug!("Getting circle preview by invite code");
    let circle = state.circle.find_by_invite_code(&code).await?.ok_or_else(|| {
        warn!("No circle with this invite code");
        AppError::not_found("Invalid invite code")
    })?;

    let overview = state.circle.find_overview(&circle.id).await?.ok_or_else(|| {
        AppError::not_found("Circle not found")
    })?;
    let summary = CircleSummaryDTO::from(overview);

    Ok(Json(CirclePreviewDTO {
        id: summary.circle.id,
        name: summary.circle.name,
        description: summary.circle.description,
        owner: summary.owner,
        member_count: summary.member_count,
    }))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id, circle_id = %circle_id))]
pub async fn regenerate_invite_code(
    State(state): State<Arc<AppState>>,
    Path(circle_id): Path<String>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> Result<Json<InviteCodeDTO>, AppError> {
    debug!("Regenerating circle invite code");
    require_owner(&state, &circle_id, &current_user).await?;

    let circle = state
        .circle
        .update_invite_code(&circle_id, &generate_invite_code())
        .await?;

    info!("Invite code regenerated for circle {}", circle.id);
    Ok(Json(InviteCodeDTO {
        invite_code: circle.invite_code,
    }))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id, circle_id = %circle_id))]
pub async fn delete_circle(
    State(state): State<Arc<AppState>>,
    Path(circle_id): Path<String>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> Result<Json<SuccessDTO>, AppError> {
    debug!("Deleting circle");
    let circle = require_owner(&state, &circle_id, &current_user).await?;

    state.circle.delete(&circle.id).await?;

    info!("Circle {} deleted", circle.id);
    Ok(Json(SuccessDTO { success: true }))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, circle_id = %circle_id))]
pub async fn update_circle_settings(
    State(state): State<Arc<AppState>>,
    Path(circle_id): Path<String>,
    Extension(current_user): Extension<AuthenticatedUser>,
    AppJson(body): AppJson<UpdateCircleSettingsDTO>,
) -> Result<Json<CircleDTO>, AppError> {
    debug!("Updating circle settings");
    let circle = require_owner(&state, &circle_id, &current_user).await?;

    let updated = state.circle.update(&circle.id, &body).await?;

    info!(
        "Circle {} settings updated (invite link enabled: {})",
        updated.id, updated.is_invite_link_enabled
    );
    Ok(Json(CircleDTO::from(updated)))
}
