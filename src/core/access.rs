//! Controllo accessi - Primitive di autorizzazione su circle e membership
//!
//! Ogni operazione verifica i permessi in modo indipendente usando queste funzioni.

use crate::core::{AppError, AppState, AuthenticatedUser};
use crate::entities::{Circle, CircleMember};
use crate::repositories::Read;
use tracing::{debug, instrument, warn};

/// Verifica che il chiamante sia il proprietario del circle.
///
/// # Returns
/// * `Ok(Circle)` - il circle, se il chiamante ne è proprietario
/// * `Err(NotFound)` - il circle non esiste
/// * `Err(Forbidden)` - il chiamante non è il proprietario
#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn require_owner(
    state: &AppState,
    circle_id: &str,
    user: &AuthenticatedUser,
) -> Result<Circle, AppError> {
    debug!("Checking circle ownership");
    let circle = state
        .circle
        .read(&circle_id.to_string())
        .await?
        .ok_or_else(|| {
            warn!("Circle not found");
            AppError::not_found("Circle not found")
        })?;

    if circle.owner_id != user.user_id {
        warn!("User is not the owner of circle {}", circle.id);
        return Err(AppError::forbidden("Only the circle owner can perform this action"));
    }

    Ok(circle)
}

/// Verifica che il chiamante sia un membro ACTIVE del circle.
///
/// Nessuna membership o membership PENDING producono `Unauthorized`.
#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn require_active_member(
    state: &AppState,
    circle_id: &str,
    user: &AuthenticatedUser,
) -> Result<CircleMember, AppError> {
    debug!("Checking active membership");
    let member = state
        .member
        .read(&(circle_id.to_string(), user.user_id.clone()))
        .await?
        .ok_or_else(|| {
            warn!("User is not a member of circle {}", circle_id);
            AppError::unauthorized("You are not a member of this circle")
        })?;

    if !member.is_active() {
        warn!("Membership of user in circle {} is still pending", circle_id);
        return Err(AppError::unauthorized("Your membership is pending approval"));
    }

    Ok(member)
}
