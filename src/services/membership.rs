//! Membership services - Join tramite codice, approvazione e rimozione dei membri
//!
//! Un codice può essere:
//! - il codice di un `CircleInviteLink` (uso limitato): il membro entra subito ACTIVE
//! - il codice generale del circle: il membro entra PENDING e attende l'approvazione
//!
//! Il join è idempotente: una membership già esistente (in qualunque stato) non viene
//! duplicata e non consuma utilizzi del link.

use crate::core::{AppError, AppState, AuthenticatedUser, require_owner};
use crate::dtos::{CircleMemberDTO, CreateCircleMemberDTO, JoinCircleResponseDTO, SuccessDTO};
use crate::entities::{MemberRole, MemberStatus};
use crate::repositories::{Create, Delete, Read};
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use axum_macros::debug_handler;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Circle e stato iniziale risolti a partire da un codice
#[derive(Debug, Clone, PartialEq)]
pub struct JoinTarget {
    pub circle_id: String,
    pub status: MemberStatus,
    /// Presente se il codice era un link a uso limitato
    pub link_id: Option<String>,
}

/// Risolve un codice nel circle di destinazione.
///
/// I link a uso limitato hanno la precedenza sul codice generale del circle.
#[instrument(skip(state, code))]
pub async fn resolve_join_code(state: &AppState, code: &str) -> Result<JoinTarget, AppError> {
    // 1. Link di invito
    if let Some(link) = state.link.find_by_code(code).await? {
        if link.is_exhausted() {
            warn!("Invite link {} has reached its usage limit", link.id);
            return Err(AppError::bad_request("This invite link has reached its usage limit"));
        }
        if link.is_expired(Utc::now()) {
            warn!("Invite link {} is expired", link.id);
            return Err(AppError::bad_request("This invite link has expired"));
        }
        debug!("Code resolved as invite link {}", link.id);
        return Ok(JoinTarget {
            circle_id: link.circle_id,
            status: MemberStatus::Active,
            link_id: Some(link.id),
        });
    }

    // 2. Codice generale del circle
    if let Some(circle) = state.circle.find_by_invite_code(code).await? {
        if !circle.is_invite_link_enabled {
            warn!("Invite code of circle {} is disabled", circle.id);
            return Err(AppError::bad_request("Invite link is disabled"));
        }
        debug!("Code resolved as general code of circle {}", circle.id);
        return Ok(JoinTarget {
            circle_id: circle.id,
            status: MemberStatus::Pending,
            link_id: None,
        });
    }

    // 3. Nessuna corrispondenza
    warn!("Invalid invite code");
    Err(AppError::not_found("Invalid invite code"))
}

/// Inserisce la membership se non esiste già.
///
/// Ritorna `false` quando la coppia (circle, utente) è già presente, sia che
/// venga trovata prima dell'inserimento sia che l'insert fallisca per il vincolo
/// di unicità (join concorrente).
#[instrument(skip(state, new_member), fields(circle_id = %new_member.circle_id, user_id = %new_member.user_id))]
pub async fn insert_membership(
    state: &AppState,
    new_member: &CreateCircleMemberDTO,
) -> Result<bool, AppError> {
    if state
        .member
        .read(&(new_member.circle_id.clone(), new_member.user_id.clone()))
        .await?
        .is_some()
    {
        return Ok(false);
    }

    match state.member.create(new_member).await {
        Ok(_) => Ok(true),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            info!("Concurrent join detected for circle {}", new_member.circle_id);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Aggiunge l'utente al circle indicato dal codice.
#[instrument(skip(state, user, code), fields(user_id = %user.user_id))]
pub async fn join_circle(
    state: &AppState,
    user: &AuthenticatedUser,
    code: &str,
) -> Result<JoinCircleResponseDTO, AppError> {
    let target = resolve_join_code(state, code).await?;
    let joined = JoinCircleResponseDTO {
        success: true,
        circle_id: target.circle_id.clone(),
    };

    // 4. Membership già presente (o inserita da una richiesta concorrente):
    //    successo idempotente, nessun consumo del link
    let new_member = CreateCircleMemberDTO {
        circle_id: target.circle_id.clone(),
        user_id: user.user_id.clone(),
        role: MemberRole::Member,
        status: target.status,
    };
    if !insert_membership(state, &new_member).await? {
        info!("User already has a membership in circle {}", target.circle_id);
        return Ok(joined);
    }

    // 5. Consumo del link: best-effort, il join resta valido anche se fallisce
    if let Some(link_id) = &target.link_id {
        match state.link.increment_usage(link_id).await {
            Ok(true) => debug!("Invite link {} usage incremented", link_id),
            Ok(false) => warn!("Invite link {} was exhausted by a concurrent join", link_id),
            Err(e) => error!("Failed to increment usage of invite link {}: {}", link_id, e),
        }
    }

    info!(
        "User joined circle {} with status {:?}",
        target.circle_id, target.status
    );
    Ok(joined)
}

#[debug_handler]
#[instrument(skip(state, current_user, code), fields(user_id = %current_user.user_id))]
pub async fn join_by_code(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> Result<Json<JoinCircleResponseDTO>, AppError> {
    debug!("Joining circle by code");
    let response = join_circle(&state, &current_user, &code).await?;
    Ok(Json(response))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id, circle_id = %circle_id))]
pub async fn list_pending_members(
    State(state): State<Arc<AppState>>,
    Path(circle_id): Path<String>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<CircleMemberDTO>>, AppError> {
    debug!("Listing pending members");
    require_owner(&state, &circle_id, &current_user).await?;

    let pending: Vec<CircleMemberDTO> = state
        .member
        .list_with_users(&circle_id, MemberStatus::Pending)
        .await?
        .into_iter()
        .map(CircleMemberDTO::from)
        .collect();

    info!("Found {} pending members", pending.len());
    Ok(Json(pending))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id, circle_id = %circle_id, target = %target_user_id))]
pub async fn approve_member(
    State(state): State<Arc<AppState>>,
    Path((circle_id, target_user_id)): Path<(String, String)>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> Result<Json<SuccessDTO>, AppError> {
    debug!("Approving member");
    require_owner(&state, &circle_id, &current_user).await?;

    // L'update viene eseguito in ogni caso: approvare un membro già attivo è un no-op
    let updated = state
        .member
        .update_status(&circle_id, &target_user_id, MemberStatus::Active)
        .await?;
    if updated == 0 {
        warn!("No membership found to approve");
    }

    info!("Member approved");
    Ok(Json(SuccessDTO { success: true }))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id, circle_id = %circle_id, target = %target_user_id))]
pub async fn remove_member(
    State(state): State<Arc<AppState>>,
    Path((circle_id, target_user_id)): Path<(String, String)>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> Result<Json<SuccessDTO>, AppError> {
    debug!("Removing member");
    // 1. Il circle deve esistere
    // 2. Il proprietario può rimuovere chiunque, ogni utente può rimuovere sé stesso
    let circle = state.circle.read(&circle_id).await?.ok_or_else(|| {
        warn!("Circle not found");
        AppError::not_found("Circle not found")
    })?;

    let is_owner = circle.owner_id == current_user.user_id;
    let is_self = target_user_id == current_user.user_id;
    if !is_owner && !is_self {
        warn!("User is not allowed to remove other members");
        return Err(AppError::forbidden("You can only remove yourself from this circle"));
    }
    if is_owner && is_self {
        warn!("Owner is removing their own membership from circle {}", circle.id);
    }

    state.member.delete(&(circle_id, target_user_id)).await?;

    info!("Member removed");
    Ok(Json(SuccessDTO { success: true }))
}
