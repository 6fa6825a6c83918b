//! Invite services - Eventi e RSVP

use crate::core::{AppError, AppJson, AppState, AuthenticatedUser, require_active_member};
use crate::dtos::{
    CircleMemberDTO, CircleRefDTO, CreateInviteDTO, CreateInviteRequestDTO, FeedItemDTO,
    InviteCircleDTO, InviteDTO, InviteDetailsDTO, InviteListItemDTO, MediaItemDTO, RsvpDTO,
    RsvpRequestDTO, SuccessDTO, UpsertRsvpDTO, UserSummaryDTO,
};
use crate::entities::MemberStatus;
use crate::repositories::{Create, Delete, InviteOverview, Read, RsvpWithUser};
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

impl From<InviteOverview> for InviteListItemDTO {
    fn from(value: InviteOverview) -> Self {
        let sender = UserSummaryDTO {
            id: value.invite.sender_id.clone(),
            name: value.sender_name,
            image: value.sender_image,
        };
        let circle = match (&value.invite.circle_id, value.circle_name) {
            (Some(id), Some(name)) => Some(CircleRefDTO {
                id: id.clone(),
                name,
            }),
            _ => None,
        };
        Self {
            invite: InviteDTO::from(value.invite),
            sender,
            circle,
            rsvp_count: value.rsvp_count,
        }
    }
}

impl From<RsvpWithUser> for RsvpDTO {
    fn from(value: RsvpWithUser) -> Self {
        let user = UserSummaryDTO {
            id: value.rsvp.user_id.clone(),
            name: value.user_name,
            image: value.user_image,
        };
        let mut dto = RsvpDTO::from(value.rsvp);
        dto.user = Some(user);
        dto
    }
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn create_invite(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<AuthenticatedUser>,
    AppJson(body): AppJson<CreateInviteRequestDTO>,
) -> Result<Json<InviteDTO>, AppError> {
    debug!("Creating new invite");
    // 1. title ed eventDate obbligatori
    // 2. Se l'invito è legato a un circle, il mittente deve esserne membro ACTIVE
    // 3. Salvare l'invito con il chiamante come mittente
    let title = body
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            warn!("Invite creation attempted without title");
            AppError::bad_request("Title and event date are required")
        })?;
    let event_date = body.event_date.ok_or_else(|| {
        warn!("Invite creation attempted without event date");
        AppError::bad_request("Title and event date are required")
    })?;

    let circle_id = body.circle_id.filter(|id| !id.is_empty());
    if let Some(circle_id) = &circle_id {
        require_active_member(&state, circle_id, &current_user).await?;
    }

    let invite = state
        .invite
        .create(&CreateInviteDTO {
            title,
            description: body.description,
            location: body.location,
            event_date,
            sender_id: current_user.user_id.clone(),
            circle_id,
        })
        .await?;

    info!("Invite {} created", invite.id);
    Ok(Json(InviteDTO::from(invite)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn list_invites(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<InviteListItemDTO>>, AppError> {
    debug!("Listing invites for user");
    let invites: Vec<InviteListItemDTO> = state
        .invite
        .list_visible_for_user(&current_user.user_id)
        .await?
        .into_iter()
        .map(InviteListItemDTO::from)
        .collect();

    info!("Successfully retrieved {} invites", invites.len());
    Ok(Json(invites))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id, invite_id = %invite_id))]
pub async fn get_invite_details(
    State(state): State<Arc<AppState>>,
    Path(invite_id): Path<String>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> Result<Json<InviteDetailsDTO>, AppError> {
    debug!("Getting invite details");
    // 1. Invito + mittente (NOT_FOUND se assente)
    // 2. Circle con membri ACTIVE, RSVP con utente, feed (più recenti prima), media
    let overview = state.invite.find_overview(&invite_id).await?.ok_or_else(|| {
        warn!("Invite not found");
        AppError::not_found("Invite not found")
    })?;
    let circle_id = overview.invite.circle_id.clone();
    let InviteListItemDTO {
        invite,
        sender,
        circle,
        ..
    } = InviteListItemDTO::from(overview);

    let (rsvps, feed, media) = tokio::try_join!(
        state.rsvp.list_with_users(&invite_id),
        state.feed.list_with_users(&invite_id),
        state.media.list_by_invite(&invite_id),
    )?;

    let circle = match (circle_id, circle) {
        (Some(circle_id), Some(circle)) => {
            let members = state
                .member
                .list_with_users(&circle_id, MemberStatus::Active)
                .await?
                .into_iter()
                .map(CircleMemberDTO::from)
                .collect();
            Some(InviteCircleDTO {
                id: circle.id,
                name: circle.name,
                members,
            })
        }
        _ => None,
    };

    info!("Invite details retrieved");
    Ok(Json(InviteDetailsDTO {
        invite,
        sender,
        circle,
        rsvps: rsvps.into_iter().map(RsvpDTO::from).collect(),
        feed: feed.into_iter().map(FeedItemDTO::from).collect(),
        media: media.into_iter().map(MediaItemDTO::from).collect(),
    }))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, invite_id = %invite_id))]
pub async fn upsert_rsvp(
    State(state): State<Arc<AppState>>,
    Path(invite_id): Path<String>,
    Extension(current_user): Extension<AuthenticatedUser>,
    AppJson(body): AppJson<RsvpRequestDTO>,
) -> Result<Json<RsvpDTO>, AppError> {
    debug!("Upserting RSVP");
    // 1. Status obbligatorio, guestCount minimo 1
    // 2. L'invito deve esistere
    // 3. Una sola risposta per (invito, utente): l'ultima sovrascrive
    let status = body.status.ok_or_else(|| {
        warn!("RSVP without status");
        AppError::bad_request("Status is required")
    })?;
    let guest_count = body.guest_count.unwrap_or(1).max(1);

    if state.invite.read(&invite_id).await?.is_none() {
        warn!("Invite not found");
        return Err(AppError::not_found("Invite not found"));
    }

    let rsvp = state
        .rsvp
        .upsert(&UpsertRsvpDTO {
            invite_id,
            user_id: current_user.user_id.clone(),
            status,
            guest_count,
            dietary: body.dietary,
            note: body.note,
        })
        .await?;

    info!("RSVP stored with status {:?} and {} guests", rsvp.status, rsvp.guest_count);
    Ok(Json(RsvpDTO::from(rsvp)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id, invite_id = %invite_id))]
pub async fn delete_invite(
    State(state): State<Arc<AppState>>,
    Path(invite_id): Path<String>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> Result<Json<SuccessDTO>, AppError> {
    debug!("Deleting invite");
    let invite = state.invite.read(&invite_id).await?.ok_or_else(|| {
        warn!("Invite not found");
        AppError::not_found("Invite not found")
    })?;

    if invite.sender_id != current_user.user_id {
        warn!("User is not the sender of the invite");
        return Err(AppError::forbidden("Only the sender can delete this invite"));
    }

    state.invite.delete(&invite.id).await?;

    info!("Invite {} deleted", invite.id);
    Ok(Json(SuccessDTO { success: true }))
}
